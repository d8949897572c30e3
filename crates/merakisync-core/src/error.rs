// ── Core error types ──
//
// Failures surfaced by the reconciliation engine. Gateway errors pass
// through verbatim so the offending URL, request body, and response body
// stay attached for diagnosis -- nothing is retried or swallowed here.

use thiserror::Error;

use crate::model::UnknownProductType;

/// Unified error type for reconciliation transitions.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Desired state requests a change the remote model cannot express
    /// (e.g. altering product types after creation). Detected before any
    /// remote call is made; changing the desired configuration, not
    /// retrying, is the only way forward.
    #[error("configuration violation: {message}")]
    ConfigurationViolation { message: String },

    /// Remote record absent.
    #[error("not found: {endpoint}")]
    NotFound { endpoint: String },

    /// The remote record reported a value outside the fixed enumeration.
    #[error(transparent)]
    UnknownProductType(#[from] UnknownProductType),

    /// Gateway failure, surfaced verbatim with its diagnostic payload.
    #[error(transparent)]
    Api(merakisync_api::Error),
}

impl ReconcileError {
    /// Returns `true` when the desired configuration itself is at fault and
    /// a retry with the same inputs cannot succeed.
    pub fn is_configuration_violation(&self) -> bool {
        matches!(self, Self::ConfigurationViolation { .. })
    }

    /// Returns `true` if the remote record was absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<merakisync_api::Error> for ReconcileError {
    fn from(err: merakisync_api::Error) -> Self {
        match err {
            merakisync_api::Error::NotFound { endpoint } => Self::NotFound { endpoint },
            other => Self::Api(other),
        }
    }
}
