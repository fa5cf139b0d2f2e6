//! Elasticsearch search mirror over the REST API

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use endqueue_domain::Record;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::infrastructure::ports::{MirrorError, SearchMirror};

/// Default Elasticsearch base URL.
pub const DEFAULT_ELASTICSEARCH_URL: &str = "http://localhost:9200";

/// Upper bound on hits returned by one search.
pub const MAX_RESULTS: usize = 10_000;

/// Connection settings shared by every mirrored index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElasticsearchConfig {
    pub url: String,
    pub index_prefix: String,
    pub timeout: Duration,
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ELASTICSEARCH_URL.to_string(),
            index_prefix: String::new(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// One index per record type, documents keyed by record id.
pub struct ElasticsearchMirror<R> {
    client: Client,
    base_url: String,
    index: String,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> ElasticsearchMirror<R> {
    pub fn new(config: &ElasticsearchConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            index: index_name::<R>(&config.index_prefix),
            _record: PhantomData,
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index
    }

    fn document_url(&self, id: impl std::fmt::Display) -> String {
        format!("{}/{}/_doc/{}", self.base_url, self.index, id)
    }

    fn search_url(&self) -> String {
        format!("{}/{}/_search", self.base_url, self.index)
    }
}

fn index_name<R: Record>(prefix: &str) -> String {
    format!("{prefix}{}", R::INDEX)
}

fn transport_error(error: reqwest::Error) -> MirrorError {
    if error.is_connect() || error.is_timeout() {
        MirrorError::Unavailable(error.to_string())
    } else {
        MirrorError::Request(error.to_string())
    }
}

async fn failure(response: reqwest::Response) -> MirrorError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    MirrorError::Request(format!("{status}: {body}"))
}

#[derive(Debug, Deserialize)]
struct SearchResponse<R> {
    hits: Hits<R>,
}

#[derive(Debug, Deserialize)]
struct Hits<R> {
    hits: Vec<Hit<R>>,
}

#[derive(Debug, Deserialize)]
struct Hit<R> {
    #[serde(rename = "_source")]
    source: R,
}

/// Decodes the `_source` of every hit, keeping hit order.
fn decode_hits<R: Record>(body: &str) -> Result<Vec<R>, MirrorError> {
    let response: SearchResponse<R> = serde_json::from_str(body)
        .map_err(|e| MirrorError::InvalidResponse(format!("{}: {e}", R::INDEX)))?;
    Ok(response.hits.hits.into_iter().map(|hit| hit.source).collect())
}

#[async_trait]
impl<R: Record> SearchMirror<R> for ElasticsearchMirror<R> {
    async fn index(&self, record: &R) -> Result<(), MirrorError> {
        let id = record.id().ok_or_else(|| {
            MirrorError::InvalidDocument(format!("{} has no id", R::DISPLAY_NAME))
        })?;

        let response = self
            .client
            .put(self.document_url(id))
            .query(&[("refresh", "true")])
            .json(record)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(failure(response).await);
        }
        Ok(())
    }

    async fn remove(&self, id: R::Id) -> Result<(), MirrorError> {
        let response = self
            .client
            .delete(self.document_url(id))
            .query(&[("refresh", "true")])
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Ok(()),
            _ => Err(failure(response).await),
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<R>, MirrorError> {
        if query.trim().is_empty() {
            return Err(MirrorError::InvalidQuery("query cannot be blank".into()));
        }

        let size = MAX_RESULTS.to_string();
        let response = self
            .client
            .get(self.search_url())
            .query(&[("q", query), ("size", size.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(Vec::new()),
            StatusCode::BAD_REQUEST => {
                let body = response.text().await.unwrap_or_default();
                Err(MirrorError::InvalidQuery(body))
            }
            status if status.is_success() => {
                let body = response.text().await.map_err(transport_error)?;
                decode_hits(&body)
            }
            _ => Err(failure(response).await),
        }
    }
}
