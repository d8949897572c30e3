use thiserror::Error;

/// Top-level error type for the `merakisync-api` crate.
///
/// Covers every failure mode of the gateway: authentication, transport,
/// unexpected statuses, and malformed bodies. `merakisync-core` maps these
/// into host-facing diagnostics. No variant is retried at this layer.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// API token rejected by the Dashboard (HTTP 401).
    #[error("Invalid API token")]
    InvalidApiKey,

    /// The token could not be turned into a request header.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    /// before any status code was obtained.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Dashboard API ───────────────────────────────────────────────
    /// Remote record absent (HTTP 404 on a read).
    #[error("Not found: {endpoint}")]
    NotFound { endpoint: String },

    /// Unexpected HTTP status for the attempted verb.
    ///
    /// Carries the endpoint, the submitted body (for mutating verbs), and
    /// the server's raw response body for diagnosis.
    #[error("Unexpected status {status} from {endpoint}: {response}")]
    Conflict {
        endpoint: String,
        status: u16,
        body: Option<String>,
        response: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Decode { message: String, body: String },
}

impl Error {
    /// Returns `true` if the remote record was absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is a transient fault the caller may choose to
    /// retry by re-running the whole reconciliation.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
