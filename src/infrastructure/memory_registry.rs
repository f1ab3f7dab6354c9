// In-memory widget registry - Blocks plus their (area, scope) placements
use crate::application::dashboard_repository::WidgetRegistry;
use crate::domain::widget::{
    ActiveWidget, Block, BlockId, NewBlock, ScopeId, WidgetRegistration,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use tokio::sync::Mutex;

#[derive(Debug)]
struct RegistryState {
    next_id: BlockId,
    blocks: BTreeMap<BlockId, Block>,
    placements: Vec<WidgetRegistration>,
}

impl RegistryState {
    fn in_scope<'a>(
        &'a self,
        area: &'a str,
        scope: ScopeId,
    ) -> impl Iterator<Item = &'a WidgetRegistration> + 'a {
        self.placements
            .iter()
            .filter(move |p| p.area == area && p.scope == scope)
    }
}

/// A single lock guards all state, so writes to any (area, scope) are serialised.
#[derive(Debug)]
pub struct MemoryWidgetRegistry {
    state: Mutex<RegistryState>,
}

impl MemoryWidgetRegistry {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                next_id: 1,
                blocks: BTreeMap::new(),
                placements: Vec::new(),
            }),
        }
    }
}

impl Default for MemoryWidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WidgetRegistry for MemoryWidgetRegistry {
    async fn list_active(&self, area: &str, scope: ScopeId) -> Result<Vec<ActiveWidget>> {
        let state = self.state.lock().await;

        let mut active = state
            .in_scope(area, scope)
            .map(|p| -> Result<ActiveWidget> {
                let block = state
                    .blocks
                    .get(&p.block_id)
                    .with_context(|| format!("Placement without block {}", p.block_id))?;
                Ok(ActiveWidget {
                    block_id: p.block_id,
                    kind: block.kind.clone(),
                    title: block.title.clone(),
                    display_order: p.display_order,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        active.sort_by_key(|w| w.display_order);
        Ok(active)
    }

    async fn max_display_order(&self, area: &str, scope: ScopeId) -> Result<Option<i64>> {
        let state = self.state.lock().await;
        Ok(state.in_scope(area, scope).map(|p| p.display_order).max())
    }

    async fn append(&self, area: &str, scope: ScopeId, block: NewBlock) -> Result<WidgetRegistration> {
        let mut state = self.state.lock().await;

        let id = state.next_id;
        state.next_id += 1;
        let display_order = state
            .in_scope(area, scope)
            .map(|p| p.display_order)
            .max()
            .unwrap_or(0)
            + 1;

        state.blocks.insert(
            id,
            Block {
                id,
                title: block.title,
                kind: block.kind.clone(),
                data: BTreeMap::new(),
            },
        );

        let registration = WidgetRegistration {
            block_id: id,
            kind: block.kind,
            area: area.to_string(),
            scope,
            display_order,
        };
        state.placements.push(registration.clone());

        Ok(registration)
    }

    async fn reorder(&self, area: &str, scope: ScopeId, order: &[BlockId]) -> Result<()> {
        let mut state = self.state.lock().await;

        let mut current: Vec<(i64, BlockId)> = state
            .in_scope(area, scope)
            .map(|p| (p.display_order, p.block_id))
            .collect();
        current.sort();

        let known: HashSet<BlockId> = current.iter().map(|(_, id)| *id).collect();
        let mut seen = HashSet::new();
        let mut sequence = Vec::with_capacity(current.len());

        for id in order {
            if !known.contains(id) {
                tracing::warn!("Ignoring unknown block {} while reordering {}", id, area);
                continue;
            }
            if seen.insert(*id) {
                sequence.push(*id);
            }
        }
        // widgets left out of the submission keep their relative order after it
        for (_, id) in &current {
            if seen.insert(*id) {
                sequence.push(*id);
            }
        }

        let positions: BTreeMap<BlockId, i64> = sequence
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i as i64 + 1))
            .collect();

        for placement in state
            .placements
            .iter_mut()
            .filter(|p| p.area == area && p.scope == scope)
        {
            if let Some(order) = positions.get(&placement.block_id) {
                placement.display_order = *order;
            }
        }

        Ok(())
    }

    async fn find_block(&self, id: BlockId) -> Result<Option<Block>> {
        Ok(self.state.lock().await.blocks.get(&id).cloned())
    }

    async fn update_block(&self, block: &Block) -> Result<bool> {
        let mut state = self.state.lock().await;
        match state.blocks.get_mut(&block.id) {
            Some(stored) => {
                stored.title = block.title.clone();
                stored.data = block.data.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: BlockId) -> Result<bool> {
        let mut state = self.state.lock().await;
        let existed = state.blocks.remove(&id).is_some();
        state.placements.retain(|p| p.block_id != id);
        Ok(existed)
    }
}
