//! Knowledge search for retrieval augmentation
//!
//! The index lives in an external backend. This crate only speaks its
//! search contract:
//! - `POST /api/search` with `{query, k, embeddingProvider}`
//! - `{success, data: {query, count, results: [{score, text, metadata}]}}`

pub mod client;

pub use client::{
    HitMetadata, KnowledgeSearch, RetrievalClient, RetrievalClientConfig, SearchHit, SearchResult,
};

use thiserror::Error;

/// Retrieval errors
#[derive(Error, Debug)]
pub enum RagError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Search request timed out after {0}ms")]
    Timeout(u64),

    #[error("Search error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Search failed: {0}")]
    Envelope(String),

    #[error("Failed to parse search response: {0}")]
    Parse(String),

    #[error("Client configuration error: {0}")]
    Client(String),
}

impl From<RagError> for phone_agent_core::Error {
    fn from(err: RagError) -> Self {
        phone_agent_core::Error::Rag(err.to_string())
    }
}
