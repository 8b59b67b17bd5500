// src/memory/mod.rs
// History store collaborator boundary. The pipeline only ever reads;
// appending the final turns is the caller's job after the pipeline
// returns.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::pipeline::types::Turn;

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// The most recent `limit` turns for a user, ordered oldest first.
    async fn recent_turns(&self, user_id: &str, limit: usize) -> Result<Vec<Turn>>;

    /// Caller-side persistence of a completed turn.
    async fn append_turn(&self, user_id: &str, turn: Turn) -> Result<()>;
}

/// In-memory store backing the demo server and the test suite. Durable
/// persistence lives outside this subsystem.
#[derive(Default)]
pub struct InMemoryHistoryStore {
    inner: RwLock<HashMap<String, Vec<Turn>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn recent_turns(&self, user_id: &str, limit: usize) -> Result<Vec<Turn>> {
        let guard = self.inner.read().await;
        let turns = guard.get(user_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let start = turns.len().saturating_sub(limit);
        Ok(turns[start..].to_vec())
    }

    async fn append_turn(&self, user_id: &str, turn: Turn) -> Result<()> {
        let mut guard = self.inner.write().await;
        guard.entry(user_id.to_string()).or_default().push(turn);
        Ok(())
    }
}
