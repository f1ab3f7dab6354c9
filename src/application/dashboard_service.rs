// Dashboard service - Use case for assembling the dashboard view
use crate::application::dashboard_repository::{
    ContentRepository, OptionsStore, StatsProvider, UserProfileStore, WidgetRegistry,
};
use crate::application::extensions::Extensions;
use crate::application::widget_composer::WidgetComposer;
use crate::domain::dashboard::DashboardView;
use crate::domain::stats::{StatKind, StatScope, StatsSnapshot};
use crate::domain::user::{Capability, UserContext};
use crate::domain::widget::WidgetDescriptor;
use crate::infrastructure::config::DashboardSettings;
use std::sync::Arc;

pub const EXPERIENCE_LEVEL_KEY: &str = "experience_level";

/// The stores the dashboard reads from and writes to
#[derive(Clone)]
pub struct DashboardStores {
    pub stats: Arc<dyn StatsProvider>,
    pub content: Arc<dyn ContentRepository>,
    pub options: Arc<dyn OptionsStore>,
    pub profiles: Arc<dyn UserProfileStore>,
    pub registry: Arc<dyn WidgetRegistry>,
}

#[derive(Clone)]
pub struct DashboardService {
    stores: DashboardStores,
    extensions: Arc<Extensions>,
    settings: DashboardSettings,
}

impl DashboardService {
    pub fn new(
        stores: DashboardStores,
        extensions: Arc<Extensions>,
        settings: DashboardSettings,
    ) -> Self {
        Self {
            stores,
            extensions,
            settings,
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn registry(&self) -> &Arc<dyn WidgetRegistry> {
        &self.stores.registry
    }

    pub async fn build_dashboard(&self, user: &UserContext) -> anyhow::Result<DashboardView> {
        let active_since = self.stores.content.earliest_published().await?;
        let updates = self.stores.options.updates_available().await?;
        let stats = self.collect_stats(user).await?;
        let first_run = self.check_first_run(user).await?;
        let widgets = self.widget_list(user).await?;

        tracing::debug!(
            "Built dashboard for {}: {} widget(s), first run: {}",
            user.username,
            widgets.len(),
            first_run
        );

        Ok(DashboardView {
            active_since,
            updates,
            stats,
            first_run,
            widgets,
        })
    }

    async fn collect_stats(&self, user: &UserContext) -> anyhow::Result<StatsSnapshot> {
        let stats = &self.stores.stats;
        let own = StatScope::User(user.id);
        // comment moderation counts are global only for cross-user moderators
        let moderation = if user.can(Capability::ManageAllComments) {
            StatScope::All
        } else {
            own
        };

        let (
            author_count,
            post_count,
            comment_count,
            tag_count,
            user_draft_count,
            unapproved_comment_count,
            spam_comment_count,
            user_scheduled_count,
        ) = tokio::try_join!(
            stats.count(StatKind::Authors, StatScope::All),
            stats.count(StatKind::PublishedPosts, StatScope::All),
            stats.count(StatKind::ApprovedComments, StatScope::All),
            stats.count(StatKind::Tags, StatScope::All),
            stats.count(StatKind::DraftPosts, own),
            stats.count(StatKind::UnapprovedComments, moderation),
            stats.count(StatKind::SpamComments, moderation),
            stats.count(StatKind::ScheduledPosts, own),
        )?;

        Ok(StatsSnapshot {
            author_count,
            post_count,
            comment_count,
            tag_count,
            user_draft_count,
            unapproved_comment_count,
            spam_comment_count,
            user_scheduled_count,
        })
    }

    /// True on the user's first visit. Writes the default experience level as a side
    /// effect; concurrent first visits both write the same constant.
    async fn check_first_run(&self, user: &UserContext) -> anyhow::Result<bool> {
        let profiles = &self.stores.profiles;
        if profiles.get(user.id, EXPERIENCE_LEVEL_KEY).await?.is_some() {
            return Ok(false);
        }

        profiles
            .set(user.id, EXPERIENCE_LEVEL_KEY, &self.settings.default_experience_level)
            .await?;
        profiles.commit(user.id).await?;
        tracing::info!("First dashboard visit for user {}", user.id);

        Ok(true)
    }

    pub fn composer(&self, user: &UserContext) -> anyhow::Result<WidgetComposer> {
        let catalog = self.extensions.available_widgets(user)?;
        Ok(WidgetComposer::new(&self.extensions, user, catalog))
    }

    /// Ordered widget descriptors. A widget whose extension fails is logged and
    /// rendered as unavailable instead of failing the whole dashboard.
    pub async fn widget_list(&self, user: &UserContext) -> anyhow::Result<Vec<WidgetDescriptor>> {
        let catalog = self.extensions.available_widgets(user)?;
        if catalog.is_empty() {
            return Ok(Vec::new());
        }

        let active = self
            .stores
            .registry
            .list_active(&self.settings.area, self.settings.scope)
            .await?;
        tracing::debug!(
            "Composing {} active module(s) against {} known type(s)",
            active.len(),
            catalog.len()
        );
        let composer = WidgetComposer::new(&self.extensions, user, catalog);

        let widgets = composer
            .entries(&active)
            .into_iter()
            .map(|entry| match composer.compose_entry(&entry) {
                Ok(widget) => widget,
                Err(e) => {
                    tracing::warn!(
                        "Module {} ({}) failed to compose: {:#}",
                        entry.id,
                        entry.label,
                        e
                    );
                    WidgetDescriptor::unavailable(&entry.id, &entry.label, &entry.title)
                }
            })
            .collect();

        Ok(widgets)
    }
}
