// Repository traits for the collaborators the dashboard reads from and writes to
use crate::domain::dashboard::UpdateNotice;
use crate::domain::stats::{StatKind, StatScope};
use crate::domain::user::UserId;
use crate::domain::widget::{ActiveWidget, Block, BlockId, NewBlock, ScopeId, WidgetRegistration};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait StatsProvider: Send + Sync {
    async fn count(&self, kind: StatKind, scope: StatScope) -> anyhow::Result<u64>;
}

#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Publish date of the oldest published post, if any
    async fn earliest_published(&self) -> anyhow::Result<Option<DateTime<Utc>>>;
}

#[async_trait]
pub trait OptionsStore: Send + Sync {
    async fn updates_available(&self) -> anyhow::Result<Vec<UpdateNotice>>;
}

/// Per-user attributes. `set` stages a value, `commit` makes staged values durable.
#[async_trait]
pub trait UserProfileStore: Send + Sync {
    async fn get(&self, user: UserId, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, user: UserId, key: &str, value: &str) -> anyhow::Result<()>;
    async fn commit(&self, user: UserId) -> anyhow::Result<()>;
}

/// Widget registrations per (area, scope). Implementations must serialise writes
/// to a given (area, scope) so display orders stay unique.
#[async_trait]
pub trait WidgetRegistry: Send + Sync {
    /// Active widgets ordered by display order
    async fn list_active(&self, area: &str, scope: ScopeId) -> anyhow::Result<Vec<ActiveWidget>>;

    async fn max_display_order(&self, area: &str, scope: ScopeId) -> anyhow::Result<Option<i64>>;

    /// Inserts the block and registers it at max display order + 1
    async fn append(
        &self,
        area: &str,
        scope: ScopeId,
        block: NewBlock,
    ) -> anyhow::Result<WidgetRegistration>;

    /// Reassigns display orders of the whole scope from a submitted sequence
    async fn reorder(&self, area: &str, scope: ScopeId, order: &[BlockId]) -> anyhow::Result<()>;

    async fn find_block(&self, id: BlockId) -> anyhow::Result<Option<Block>>;

    /// Returns false if the block does not exist
    async fn update_block(&self, block: &Block) -> anyhow::Result<bool>;

    /// Deletes the block and all its registrations. Returns false if it did not exist.
    async fn remove(&self, id: BlockId) -> anyhow::Result<bool>;
}
