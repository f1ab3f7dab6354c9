// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_support;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::core_modules::register_core_modules;
use crate::application::dashboard_repository::WidgetRegistry;
use crate::application::dashboard_service::{DashboardService, DashboardStores};
use crate::application::extensions::Extensions;
use crate::application::widget_actions::WidgetActionService;
use crate::domain::widget::NewBlock;
use crate::infrastructure::config::{load_app_config, AppConfig};
use crate::infrastructure::memory_registry::MemoryWidgetRegistry;
use crate::infrastructure::memory_repository::{
    MemoryContentStore, MemoryOptionsStore, MemoryProfileStore,
};
use crate::presentation::app_state::AppState;
use crate::presentation::router::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create stores (infrastructure layer)
    let content = Arc::new(MemoryContentStore::with_content(
        config.seed.posts.clone(),
        config.seed.comments.clone(),
        config.seed.tags.clone(),
    ));
    let registry = Arc::new(MemoryWidgetRegistry::new());
    seed_widgets(registry.as_ref(), &config).await?;

    let stores = DashboardStores {
        stats: content.clone(),
        content,
        options: Arc::new(MemoryOptionsStore::new(config.seed.updates.clone())),
        profiles: Arc::new(MemoryProfileStore::new()),
        registry,
    };

    // Register built-in modules on the extension points
    let mut extensions = Extensions::new();
    register_core_modules(&mut extensions, &config.catalog);

    // Create services (application layer)
    let dashboard_service =
        DashboardService::new(stores, Arc::new(extensions), config.dashboard.clone());
    let widget_actions = WidgetActionService::new(dashboard_service.clone());

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        widget_actions,
    });

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}

/// Places the configured starting widgets, skipping types missing from the catalog
async fn seed_widgets(registry: &dyn WidgetRegistry, config: &AppConfig) -> anyhow::Result<()> {
    for kind in &config.seed.widgets {
        let Some(entry) = config.catalog.iter().find(|e| &e.kind == kind) else {
            tracing::warn!("Seed widget type {} is not in the catalog", kind);
            continue;
        };

        registry
            .append(
                &config.dashboard.area,
                config.dashboard.scope,
                NewBlock {
                    title: entry.label.clone(),
                    kind: entry.kind.clone(),
                },
            )
            .await?;
    }

    Ok(())
}
