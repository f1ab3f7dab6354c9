// Hook bus - Named filter topics folding registered handlers over a payload
use std::collections::HashMap;
use std::sync::Arc;

pub type Hook<P, C> = Arc<dyn Fn(P, &C) -> anyhow::Result<P> + Send + Sync>;

/// Handlers run in registration order; each receives the previous handler's output.
/// Cloning is cheap and yields an independent bus, so request-scoped handlers can be
/// registered on a clone without touching the shared one.
pub struct HookBus<P, C> {
    topics: HashMap<String, Vec<Hook<P, C>>>,
}

impl<P, C> HookBus<P, C> {
    pub fn new() -> Self {
        Self {
            topics: HashMap::new(),
        }
    }

    pub fn register<F>(&mut self, topic: impl Into<String>, handler: F)
    where
        F: Fn(P, &C) -> anyhow::Result<P> + Send + Sync + 'static,
    {
        self.topics
            .entry(topic.into())
            .or_default()
            .push(Arc::new(handler));
    }

    pub fn has_hooks(&self, topic: &str) -> bool {
        self.topics.get(topic).is_some_and(|hooks| !hooks.is_empty())
    }

    /// Passes the payload through every handler of `topic`. The first failing
    /// handler aborts the fold and its error is returned.
    pub fn invoke(&self, topic: &str, payload: P, ctx: &C) -> anyhow::Result<P> {
        let Some(hooks) = self.topics.get(topic) else {
            return Ok(payload);
        };

        tracing::debug!("Invoking {} hook(s) on {}", hooks.len(), topic);
        hooks.iter().try_fold(payload, |acc, hook| hook(acc, ctx))
    }
}

impl<P, C> Default for HookBus<P, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, C> Clone for HookBus<P, C> {
    fn clone(&self) -> Self {
        Self {
            topics: self.topics.clone(),
        }
    }
}
