//! Centralized default values
//!
//! Single source of truth for values that would otherwise be repeated
//! between the runtime defaults, process settings and tools.

/// Speech defaults
pub mod voice {
    /// Default TTS voice (English)
    pub const DEFAULT_VOICE_ID: &str = "9626c31c-bec5-4cca-baa8-f8ba9e84c8bc";

    /// Italian TTS voice
    pub const ITALIAN_VOICE_ID: &str = "b7bcd33d-57c7-4e2b-8131-6ea63d63cb60";

    /// Spanish TTS voice
    pub const SPANISH_VOICE_ID: &str = "c6f8d5b0-7d41-409f-92be-61f7a707dc4b";

    pub const DEFAULT_LANGUAGE: &str = "en";
}

/// External service endpoints
pub mod endpoints {
    /// Knowledge search backend
    pub const RETRIEVAL_BACKEND_DEFAULT: &str = "http://localhost:3001";

    /// Path of the search operation on the backend
    pub const RETRIEVAL_SEARCH_PATH: &str = "/api/search";
}

/// Retrieval defaults
pub mod retrieval {
    /// Hits requested per search
    pub const DEFAULT_HITS_K: usize = 3;

    pub const DEFAULT_EMBEDDING_PROVIDER: &str = "gemini";

    /// Request timeout. A stalled lookup must not hold the turn for long.
    pub const DEFAULT_TIMEOUT_MS: u64 = 3_000;
}

/// Transfer defaults
pub mod transfer {
    /// Bound on waiting for a participant and on the transfer RPC
    pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

    /// Address scheme for resolved destinations
    pub const ADDRESS_SCHEME: &str = "tel:";
}

/// Model defaults
pub mod models {
    pub const DEFAULT_LLM_MODEL: &str = "gemini-2.5-flash-lite";
    pub const DEFAULT_TTS_MODEL: &str = "sonic-2";
}
