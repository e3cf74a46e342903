//! Process-local recall store with keyword-overlap relevance.

use async_trait::async_trait;
use squadron_application::{MemoryError, MemoryPort, MemoryRecord, SHARED_NAMESPACE};
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone)]
struct StoredMemory {
    id: String,
    agent: String,
    content: String,
    terms: HashSet<String>,
}

#[derive(Default)]
struct Inner {
    memories: Vec<StoredMemory>,
    next_id: u64,
}

/// Memories live for the life of the process; nothing is persisted.
#[derive(Default)]
pub struct InMemoryRecall {
    inner: Mutex<Inner>,
}

/// Lowercased alphanumeric words of 3+ characters.
fn terms(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= 3)
        .map(str::to_lowercase)
        .collect()
}

impl InMemoryRecall {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a memory from `agent`'s namespace. Returns whether it existed.
    pub fn forget(&self, id: &str, agent: &str) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let before = inner.memories.len();
        inner.memories.retain(|m| !(m.id == id && m.agent == agent));
        inner.memories.len() != before
    }

    /// Number of memories stored under `agent`.
    pub fn count(&self, agent: &str) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .memories
            .iter()
            .filter(|m| m.agent == agent)
            .count()
    }
}

#[async_trait]
impl MemoryPort for InMemoryRecall {
    async fn remember(&self, content: &str, agent: &str) -> Result<String, MemoryError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.next_id += 1;
        let id = format!("{}-{}", agent.to_lowercase(), inner.next_id);
        inner.memories.push(StoredMemory {
            id: id.clone(),
            agent: agent.to_string(),
            content: content.to_string(),
            terms: terms(content),
        });
        debug!("Stored memory {} for {}", id, agent);
        Ok(id)
    }

    async fn recall(
        &self,
        query: &str,
        agent: &str,
        include_shared: bool,
        limit: usize,
    ) -> Result<Vec<MemoryRecord>, MemoryError> {
        let query_terms = terms(query);
        if query_terms.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let mut scored: Vec<(usize, MemoryRecord)> = inner
            .memories
            .iter()
            .enumerate()
            .filter(|(_, m)| m.agent == agent || (include_shared && m.agent == SHARED_NAMESPACE))
            .filter_map(|(position, m)| {
                let overlap = m.terms.intersection(&query_terms).count();
                (overlap > 0).then(|| {
                    (
                        position,
                        MemoryRecord {
                            id: m.id.clone(),
                            content: m.content.clone(),
                            agent: m.agent.clone(),
                            relevance: overlap as f32 / query_terms.len() as f32,
                        },
                    )
                })
            })
            .collect();

        // Most relevant first; newer memories win ties
        scored.sort_by(|(pa, a), (pb, b)| {
            b.relevance
                .total_cmp(&a.relevance)
                .then_with(|| pb.cmp(pa))
        });

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(_, record)| record)
            .collect())
    }
}
