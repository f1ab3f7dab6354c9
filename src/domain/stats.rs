// Stats domain models - Request-scoped counts shown on the dashboard
use super::user::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Authors,
    PublishedPosts,
    DraftPosts,
    ScheduledPosts,
    ApprovedComments,
    UnapprovedComments,
    SpamComments,
    Tags,
}

/// Whose records a count covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatScope {
    All,
    User(UserId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub author_count: u64,
    pub post_count: u64,
    pub comment_count: u64,
    pub tag_count: u64,
    pub user_draft_count: u64,
    pub unapproved_comment_count: u64,
    pub spam_comment_count: u64,
    pub user_scheduled_count: u64,
}
