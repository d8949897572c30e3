// ── Host-facing diagnostics ──
//
// The hosting orchestrator receives either updated state or one of these
// structured records. It decides whether to retry the whole reconciliation;
// the core never retries on its own.

use serde::{Deserialize, Serialize};

use crate::error::ReconcileError;

/// Severity of a diagnostic for the host orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Structured report handed back when a transition fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    /// Wrap a transition failure under an operation summary.
    pub fn from_error(summary: &str, err: &ReconcileError) -> Self {
        Self::error(summary, err.to_string())
    }
}
