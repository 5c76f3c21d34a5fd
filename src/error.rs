// WHY: Typed failures at the three fallible boundaries (analyze, fetch, persist)
// Everything below the sentence processor converts these into best-effort defaults

use thiserror::Error;

/// Failures raised by a morphological analyzer
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Analyzer produced no tokens for nonempty input
    #[error("analyzer returned no tokens for {input:?}")]
    NoTokens { input: String },

    /// Dictionary or lexicon could not be loaded
    #[error("failed to load analyzer dictionary: {0}")]
    Dictionary(String),

    #[error("analyzer I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures raised while querying the external reference source.
/// All of them degrade to a lookup miss.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, timeout or body read failure
    #[error("reference transport error: {0}")]
    Transport(String),

    /// Reference answered with a non-success HTTP status
    #[error("reference returned HTTP {0}")]
    Status(u16),

    /// Response did not follow the extraction contract
    #[error("malformed reference response: {0}")]
    Malformed(String),

    /// Reference has no entry for the word
    #[error("no reference entry for {0:?}")]
    NotFound(String),

    /// Configured endpoint is not an absolute http(s) URL
    #[error("invalid reference endpoint {0}")]
    InvalidEndpoint(String),

    /// Reference lookups are switched off in configuration
    #[error("reference lookups are disabled")]
    Disabled,
}

/// Failures reading or rewriting the persistent pitch store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("pitch store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pitch store serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
