//! Retrieval client
//!
//! Stateless HTTP client for the knowledge search backend. Callers decide
//! what to do with errors; the per-turn hook ignores them.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use phone_agent_config::constants::endpoints;
use phone_agent_config::RetrievalConfig;

use crate::RagError;

/// Anything that can answer a knowledge query
#[async_trait]
pub trait KnowledgeSearch: Send + Sync {
    /// Search for `k` hits
    async fn search(&self, query: &str, k: usize) -> Result<SearchResult, RagError>;

    /// Hit count used when the caller has no preference
    fn default_k(&self) -> usize;

    /// Search with the configured hit count
    async fn search_default(&self, query: &str) -> Result<SearchResult, RagError> {
        self.search(query, self.default_k()).await
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct RetrievalClientConfig {
    /// Backend base URL (no trailing path)
    pub backend_url: String,
    pub embedding_provider: String,
    pub hits_k: usize,
    pub timeout: Duration,
}

impl From<&RetrievalConfig> for RetrievalClientConfig {
    fn from(config: &RetrievalConfig) -> Self {
        Self {
            backend_url: config.backend_url.clone(),
            embedding_provider: config.embedding_provider.clone(),
            hits_k: config.hits_k,
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }
}

impl Default for RetrievalClientConfig {
    fn default() -> Self {
        Self::from(&RetrievalConfig::default())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    query: &'a str,
    k: usize,
    embedding_provider: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<SearchData>,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    count: Option<usize>,
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// One retrieved chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub score: f64,
    pub text: String,
    #[serde(default)]
    pub metadata: HitMetadata,
}

/// Provenance of a retrieved chunk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitMetadata {
    pub doc_id: String,
    pub chunk_id: String,
    pub position: u32,
    pub filename: String,
    pub strategy: String,
    pub embedding_provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_chunk_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_chunk_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Search outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub query: String,
    pub hits: Vec<SearchHit>,
    pub count: usize,
}

/// HTTP client for the search backend
pub struct RetrievalClient {
    client: Client,
    config: RetrievalClientConfig,
    search_url: String,
}

impl RetrievalClient {
    pub fn new(config: RetrievalClientConfig) -> Result<Self, RagError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RagError::Client(e.to_string()))?;

        let search_url = format!(
            "{}{}",
            config.backend_url.trim_end_matches('/'),
            endpoints::RETRIEVAL_SEARCH_PATH
        );

        Ok(Self {
            client,
            config,
            search_url,
        })
    }

    pub fn from_settings(settings: &RetrievalConfig) -> Result<Self, RagError> {
        Self::new(RetrievalClientConfig::from(settings))
    }

    pub fn config(&self) -> &RetrievalClientConfig {
        &self.config
    }

    async fn post_search(&self, query: &str, k: usize) -> Result<SearchResult, RagError> {
        let request = SearchRequest {
            query,
            k,
            embedding_provider: &self.config.embedding_provider,
        };

        let response = self
            .client
            .post(&self.search_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RagError::Status { status, body });
        }

        let envelope: SearchEnvelope = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.transport_error(e)
            } else {
                RagError::Parse(e.to_string())
            }
        })?;

        if !envelope.success {
            return Err(RagError::Envelope(
                "backend reported success=false".to_string(),
            ));
        }

        let data = envelope
            .data
            .ok_or_else(|| RagError::Envelope("missing data".to_string()))?;

        let count = data.count.unwrap_or(data.results.len());
        Ok(SearchResult {
            query: data.query.unwrap_or_else(|| query.to_string()),
            hits: data.results,
            count,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> RagError {
        if err.is_timeout() {
            RagError::Timeout(self.config.timeout.as_millis() as u64)
        } else {
            RagError::Connection(err.to_string())
        }
    }
}

#[async_trait]
impl KnowledgeSearch for RetrievalClient {
    async fn search(&self, query: &str, k: usize) -> Result<SearchResult, RagError> {
        tracing::debug!(query = %query, k, "Searching knowledge backend");
        metrics::counter!("phone_agent_rag_searches_total").increment(1);

        match self.post_search(query, k).await {
            Ok(result) => {
                tracing::debug!(hits = result.hits.len(), "Knowledge search complete");
                Ok(result)
            },
            Err(e) => {
                metrics::counter!("phone_agent_rag_failures_total").increment(1);
                Err(e)
            },
        }
    }

    fn default_k(&self) -> usize {
        self.config.hits_k
    }
}
