//! Reconciles candidates against the job store.
//!
//! Identity is the canonical link. Existing links are read once per sync;
//! a failed read degrades to an empty set, so every candidate is attempted.

use std::collections::HashSet;
use url::Url;

use crate::domain::models::{JobRecord, SyncReport};
use crate::error::{AppError, Result};
use crate::extractor::normalize_link;
use crate::repository::{JobStore, MemoryJobStore};

/// Rejects anything but an absolute http(s) address.
pub fn validate_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint.trim()).map_err(|e| {
        AppError::config(format!(
            "store url must be a full http(s) URL, got {:?} ({})",
            endpoint, e
        ))
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(AppError::config(format!(
            "store url must be a full http(s) URL, got {:?}",
            endpoint
        )));
    }

    Ok(url)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncEngine;

impl SyncEngine {
    pub fn new() -> Self {
        Self
    }

    /// Creates every candidate the store does not hold yet, in input order.
    ///
    /// Returns `Err` only for an invalid store address, before any request is
    /// made. Read and write failures are absorbed into the report.
    pub async fn sync<S>(&self, candidates: &[JobRecord], store: &S) -> Result<SyncReport>
    where
        S: JobStore + ?Sized,
    {
        validate_endpoint(store.endpoint())?;

        let mut report = SyncReport::default();

        tracing::info!("[SYNC] Fetching existing jobs to check duplicates...");
        let mut existing_links: HashSet<String> = match store.existing_links().await {
            Ok(links) => links.iter().map(|l| normalize_link(l)).collect(),
            Err(e) => {
                tracing::warn!("[SYNC] Could not fetch existing jobs, assuming none: {}", e);
                report.existing_read_failed = true;
                HashSet::new()
            }
        };
        tracing::info!(
            "[SYNC] Store holds {} links, processing {} candidates",
            existing_links.len(),
            candidates.len()
        );

        for job in candidates {
            let link = normalize_link(&job.link);
            if existing_links.contains(&link) {
                tracing::trace!("[SYNC] Already stored: {}", link);
                report.skipped += 1;
                continue;
            }

            match store.create(job).await {
                Ok(()) => {
                    tracing::debug!("[SYNC] Created {} | {}", job.company, job.position);
                    existing_links.insert(link);
                    report.created += 1;
                }
                Err(e) => {
                    tracing::warn!("[SYNC] Failed to create {} ({}): {}", job.link, job.company, e);
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            "[SYNC] Done: {} created, {} skipped as duplicates, {} failed",
            report.created,
            report.skipped,
            report.failed
        );
        Ok(report)
    }

    /// Dry run: diffs `candidates` against `store` without writing to it.
    ///
    /// Returns the report a real sync would produce and the records it would
    /// create. A failed read is flagged exactly as in [`SyncEngine::sync`].
    pub async fn preview<S>(
        &self,
        candidates: &[JobRecord],
        store: &S,
    ) -> Result<(SyncReport, Vec<JobRecord>)>
    where
        S: JobStore + ?Sized,
    {
        validate_endpoint(store.endpoint())?;

        let (links, read_failed) = match store.existing_links().await {
            Ok(links) => (links, false),
            Err(e) => {
                tracing::warn!("[SYNC] Could not fetch existing jobs, assuming none: {}", e);
                (HashSet::new(), true)
            }
        };

        let scratch = MemoryJobStore::seeded(store.endpoint(), links);
        let mut report = self.sync(candidates, &scratch).await?;
        report.existing_read_failed |= read_failed;
        Ok((report, scratch.created()))
    }
}
