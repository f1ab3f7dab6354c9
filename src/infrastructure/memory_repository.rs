// In-memory content, profile and options stores
use crate::application::dashboard_repository::{
    ContentRepository, OptionsStore, StatsProvider, UserProfileStore,
};
use crate::domain::dashboard::UpdateNotice;
use crate::domain::stats::{StatKind, StatScope};
use crate::domain::user::UserId;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    Approved,
    Unapproved,
    Spam,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub author: UserId,
    pub status: PostStatus,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    /// Author of the post the comment was left on
    pub post_author: UserId,
    pub status: CommentStatus,
}

#[derive(Debug, Default)]
struct ContentState {
    authors: BTreeSet<UserId>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    tags: BTreeSet<String>,
}

#[derive(Debug, Default)]
pub struct MemoryContentStore {
    state: RwLock<ContentState>,
}

impl MemoryContentStore {
    /// Store holding the given content; every post author counts as an author
    pub fn with_content(posts: Vec<Post>, comments: Vec<Comment>, tags: Vec<String>) -> Self {
        let state = ContentState {
            authors: posts.iter().map(|p| p.author).collect(),
            posts,
            comments,
            tags: tags.into_iter().collect(),
        };
        Self {
            state: RwLock::new(state),
        }
    }
}

#[cfg(test)]
impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_post(&self, post: Post) {
        let mut state = self.state.write().await;
        state.authors.insert(post.author);
        state.posts.push(post);
    }

    pub async fn add_comment(&self, comment: Comment) {
        self.state.write().await.comments.push(comment);
    }

    pub async fn add_tag(&self, tag: impl Into<String>) {
        self.state.write().await.tags.insert(tag.into());
    }
}

fn in_scope(owner: UserId, scope: StatScope) -> bool {
    match scope {
        StatScope::All => true,
        StatScope::User(id) => owner == id,
    }
}

#[async_trait]
impl StatsProvider for MemoryContentStore {
    async fn count(&self, kind: StatKind, scope: StatScope) -> Result<u64> {
        let state = self.state.read().await;

        let post_status = match kind {
            StatKind::PublishedPosts => Some(PostStatus::Published),
            StatKind::DraftPosts => Some(PostStatus::Draft),
            StatKind::ScheduledPosts => Some(PostStatus::Scheduled),
            _ => None,
        };
        let comment_status = match kind {
            StatKind::ApprovedComments => Some(CommentStatus::Approved),
            StatKind::UnapprovedComments => Some(CommentStatus::Unapproved),
            StatKind::SpamComments => Some(CommentStatus::Spam),
            _ => None,
        };

        let count = match (kind, post_status, comment_status) {
            (StatKind::Authors, _, _) => state.authors.len(),
            (StatKind::Tags, _, _) => state.tags.len(),
            (_, Some(status), _) => state
                .posts
                .iter()
                .filter(|p| p.status == status && in_scope(p.author, scope))
                .count(),
            (_, _, Some(status)) => state
                .comments
                .iter()
                .filter(|c| c.status == status && in_scope(c.post_author, scope))
                .count(),
            _ => 0,
        };

        Ok(count as u64)
    }
}

#[async_trait]
impl ContentRepository for MemoryContentStore {
    async fn earliest_published(&self) -> Result<Option<DateTime<Utc>>> {
        let state = self.state.read().await;
        Ok(state
            .posts
            .iter()
            .filter(|p| p.status == PostStatus::Published)
            .filter_map(|p| p.published_at)
            .min())
    }
}

#[derive(Debug, Default)]
struct ProfileState {
    committed: HashMap<(UserId, String), String>,
    staged: HashMap<UserId, HashMap<String, String>>,
}

#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    state: RwLock<ProfileState>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Durable value only, ignoring anything staged but not committed
    #[cfg(test)]
    pub async fn committed(&self, user: UserId, key: &str) -> Option<String> {
        self.state
            .read()
            .await
            .committed
            .get(&(user, key.to_string()))
            .cloned()
    }
}

#[async_trait]
impl UserProfileStore for MemoryProfileStore {
    async fn get(&self, user: UserId, key: &str) -> Result<Option<String>> {
        let state = self.state.read().await;
        let staged = state.staged.get(&user).and_then(|values| values.get(key));
        Ok(staged
            .or_else(|| state.committed.get(&(user, key.to_string())))
            .cloned())
    }

    async fn set(&self, user: UserId, key: &str, value: &str) -> Result<()> {
        self.state
            .write()
            .await
            .staged
            .entry(user)
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn commit(&self, user: UserId) -> Result<()> {
        let mut state = self.state.write().await;
        if let Some(values) = state.staged.remove(&user) {
            for (key, value) in values {
                state.committed.insert((user, key), value);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryOptionsStore {
    updates: Vec<UpdateNotice>,
}

impl MemoryOptionsStore {
    pub fn new(updates: Vec<UpdateNotice>) -> Self {
        Self { updates }
    }
}

#[async_trait]
impl OptionsStore for MemoryOptionsStore {
    async fn updates_available(&self) -> Result<Vec<UpdateNotice>> {
        Ok(self.updates.clone())
    }
}
