// Dashboard domain model
use super::stats::StatsSnapshot;
use super::widget::WidgetDescriptor;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Opaque update notice, stored by the options store
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UpdateNotice {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DashboardView {
    pub active_since: Option<DateTime<Utc>>,
    pub updates: Vec<UpdateNotice>,
    pub stats: StatsSnapshot,
    pub first_run: bool,
    pub widgets: Vec<WidgetDescriptor>,
}
