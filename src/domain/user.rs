// User domain model - Explicit requester context passed into every call
use std::collections::HashSet;

pub type UserId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// See and moderate comments of every author, not just your own
    ManageAllComments,
    /// Add, remove, reorder and configure dashboard modules
    ManageDashModules,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ManageAllComments => "manage_all_comments",
            Capability::ManageDashModules => "manage_dash_modules",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        [Capability::ManageAllComments, Capability::ManageDashModules]
            .into_iter()
            .find(|c| c.as_str() == value)
    }
}

#[derive(Debug, Clone)]
pub struct UserContext {
    pub id: UserId,
    pub username: String,
    capabilities: HashSet<Capability>,
}

impl UserContext {
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            capabilities: HashSet::new(),
        }
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}
