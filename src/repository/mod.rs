//! Job store access.
//!
//! The remote store is consumed through a minimal read/write contract: list
//! the links it already holds, create one posting.

mod http_store;
mod memory_store;

pub use http_store::HttpJobStore;
pub use memory_store::MemoryJobStore;

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::models::JobRecord;
use crate::error::Result;

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Address the store reads from and writes to.
    fn endpoint(&self) -> &str;

    /// Links of every record currently held, as stored.
    async fn existing_links(&self) -> Result<HashSet<String>>;

    /// Create one posting. `Ok` only when the store acknowledged it.
    async fn create(&self, job: &JobRecord) -> Result<()>;
}
