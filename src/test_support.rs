// Shared fixtures for unit tests
use crate::application::core_modules::register_core_modules;
use crate::application::dashboard_repository::WidgetRegistry;
use crate::application::dashboard_service::{DashboardService, DashboardStores};
use crate::application::extensions::Extensions;
use crate::application::widget_actions::WidgetActionService;
use crate::domain::dashboard::UpdateNotice;
use crate::domain::user::{Capability, UserContext};
use crate::domain::widget::{BlockId, NewBlock, WidgetCatalog, DASHBOARD_AREA, GLOBAL_SCOPE};
use crate::infrastructure::config::{CatalogEntry, DashboardSettings};
use crate::infrastructure::memory_registry::MemoryWidgetRegistry;
use crate::infrastructure::memory_repository::{
    MemoryContentStore, MemoryOptionsStore, MemoryProfileStore,
};
use crate::presentation::app_state::AppState;
use std::sync::Arc;

pub fn admin() -> UserContext {
    UserContext::new(1, "admin")
        .with_capability(Capability::ManageAllComments)
        .with_capability(Capability::ManageDashModules)
}

pub fn reader() -> UserContext {
    UserContext::new(2, "reader")
}

pub fn catalog_entries() -> Vec<CatalogEntry> {
    [
        ("latest_entries", "Latest Entries"),
        ("latest_comments", "Latest Comments"),
        ("rss", "RSS Feed"),
    ]
    .into_iter()
    .map(|(kind, label)| CatalogEntry {
        kind: kind.to_string(),
        label: label.to_string(),
    })
    .collect()
}

pub fn catalog() -> WidgetCatalog {
    let mut catalog = WidgetCatalog::new();
    for entry in catalog_entries() {
        catalog.insert(entry.kind, entry.label);
    }
    catalog
}

pub struct Fixture {
    pub content: Arc<MemoryContentStore>,
    pub profiles: Arc<MemoryProfileStore>,
    pub registry: Arc<MemoryWidgetRegistry>,
    pub dashboard: DashboardService,
    pub actions: WidgetActionService,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::with_extensions(Self::core_extensions()).await
    }

    pub fn core_extensions() -> Extensions {
        let mut extensions = Extensions::new();
        register_core_modules(&mut extensions, &catalog_entries());
        extensions
    }

    pub async fn with_extensions(extensions: Extensions) -> Self {
        let content = Arc::new(MemoryContentStore::new());
        let profiles = Arc::new(MemoryProfileStore::new());
        let registry = Arc::new(MemoryWidgetRegistry::new());
        let options = Arc::new(MemoryOptionsStore::new(vec![UpdateNotice {
            name: "Core".to_string(),
            version: "0.9.1".to_string(),
            url: None,
        }]));

        let stores = DashboardStores {
            stats: content.clone(),
            content: content.clone(),
            options,
            profiles: profiles.clone(),
            registry: registry.clone(),
        };
        let dashboard = DashboardService::new(
            stores,
            Arc::new(extensions),
            DashboardSettings::default(),
        );
        let actions = WidgetActionService::new(dashboard.clone());

        Self {
            content,
            profiles,
            registry,
            dashboard,
            actions,
        }
    }

    /// Places one widget per type, titled with its catalog label
    pub async fn seed_widgets(&self, kinds: &[&str]) -> Vec<BlockId> {
        let catalog = catalog();
        let mut ids = Vec::new();
        for &kind in kinds {
            let title = catalog.label(kind).unwrap_or(kind).to_string();
            let registration = self
                .registry
                .append(
                    DASHBOARD_AREA,
                    GLOBAL_SCOPE,
                    NewBlock {
                        title,
                        kind: kind.to_string(),
                    },
                )
                .await
                .unwrap();
            ids.push(registration.block_id);
        }
        ids
    }

    pub fn state(&self) -> Arc<AppState> {
        Arc::new(AppState {
            dashboard_service: self.dashboard.clone(),
            widget_actions: self.actions.clone(),
        })
    }
}
