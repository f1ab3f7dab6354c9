use crate::domain::dashboard::UpdateNotice;
use crate::domain::widget::{ScopeId, DASHBOARD_AREA, GLOBAL_SCOPE};
use crate::infrastructure::memory_repository::{Comment, Post};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    #[serde(default = "default_area")]
    pub area: String,
    #[serde(default = "default_scope")]
    pub scope: ScopeId,
    #[serde(default = "default_experience_level")]
    pub default_experience_level: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            area: default_area(),
            scope: default_scope(),
            default_experience_level: default_experience_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SeedConfig {
    /// Widget types placed on the dashboard at startup, in display order
    #[serde(default)]
    pub widgets: Vec<String>,
    #[serde(default)]
    pub updates: Vec<UpdateNotice>,
    /// Content served by the in-memory content store
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_area() -> String {
    DASHBOARD_AREA.to_string()
}

fn default_scope() -> ScopeId {
    GLOBAL_SCOPE
}

fn default_experience_level() -> String {
    "user".to_string()
}

/// `config/dashboard.toml`, overridable with `DASH__SECTION__KEY` variables
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("DASH").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
