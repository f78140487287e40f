use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use super::JobStore;
use crate::domain::models::JobRecord;
use crate::error::{AppError, Result};

/// Process-local store. Backs dry runs, where it is seeded with the remote
/// store's links so the diff is computed exactly as a real run would.
pub struct MemoryJobStore {
    endpoint: String,
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    links: HashSet<String>,
    created: Vec<JobRecord>,
}

impl MemoryJobStore {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::seeded(endpoint, HashSet::new())
    }

    pub fn seeded(endpoint: impl Into<String>, links: HashSet<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            state: Mutex::new(MemoryState {
                links,
                created: Vec::new(),
            }),
        }
    }

    /// Records created through this store, in creation order.
    pub fn created(&self) -> Vec<JobRecord> {
        self.state
            .lock()
            .map(|state| state.created.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| AppError::store("memory store lock poisoned"))
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn existing_links(&self) -> Result<HashSet<String>> {
        Ok(self.lock()?.links.clone())
    }

    async fn create(&self, job: &JobRecord) -> Result<()> {
        let mut state = self.lock()?;
        state.links.insert(job.link.clone());
        state.created.push(job.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::job_at;

    #[tokio::test]
    async fn test_created_records_become_existing() {
        let store = MemoryJobStore::seeded("memory://", HashSet::from(["https://x/0".to_string()]));
        store.create(&job_at("넥슨", "QA 인턴", "https://x/1")).await.unwrap();

        let links = store.existing_links().await.unwrap();
        assert!(links.contains("https://x/0"));
        assert!(links.contains("https://x/1"));
        assert_eq!(store.created().len(), 1);
    }
}
