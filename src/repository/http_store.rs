//! Job store reachable over HTTP.
//!
//! `GET <endpoint>` lists records, either wrapped as `{"data": [...]}` or as a
//! bare array. `POST <endpoint>` creates one record and must answer 200 or 201.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::collections::HashSet;

use super::JobStore;
use crate::domain::models::JobRecord;
use crate::error::{AppError, Result};

pub struct HttpJobStore {
    client: Client,
    endpoint: String,
}

impl HttpJobStore {
    /// The endpoint is not validated here; `SyncEngine` checks it before use.
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

/// Links found in a listing body. Unrecognized shapes hold no records.
fn links_from_body(body: &Value) -> HashSet<String> {
    let records: &[Value] = match body {
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        Value::Array(items) => items.as_slice(),
        _ => &[],
    };

    records
        .iter()
        .filter_map(|record| record.get("link").and_then(Value::as_str))
        .filter(|link| !link.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl JobStore for HttpJobStore {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn existing_links(&self) -> Result<HashSet<String>> {
        tracing::debug!("[STORE] Listing records from {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AppError::store(format!("listing returned {}", status)));
        }

        let body: Value = response.json().await?;
        Ok(links_from_body(&body))
    }

    async fn create(&self, job: &JobRecord) -> Result<()> {
        let response = self.client.post(&self.endpoint).json(job).send().await?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => Ok(()),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AppError::store(format!(
                    "create returned {}: {}",
                    status,
                    body.chars().take(200).collect::<String>()
                )))
            }
        }
    }
}
