// ── Organization domain type ──
//
// Pure read projection of remote truth: organizations are never created,
// mutated, or destroyed through this system.

use std::collections::BTreeSet;
use std::fmt;

use merakisync_api::types as wire;

/// Licensing model reported by the Dashboard.
///
/// `Other` passes through values newer than this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicensingModel {
    CoTerm,
    PerDevice,
    Subscription,
    Other(String),
}

impl From<&str> for LicensingModel {
    fn from(raw: &str) -> Self {
        match raw {
            "co-term" => Self::CoTerm,
            "per-device" => Self::PerDevice,
            "subscription" => Self::Subscription,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for LicensingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoTerm => write!(f, "co-term"),
            Self::PerDevice => write!(f, "per-device"),
            Self::Subscription => write!(f, "subscription"),
            Self::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// Observed organization record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    /// Opaque, server-assigned, immutable identifier.
    pub id: String,
    pub name: String,
    pub api_enabled: bool,
    pub licensing_model: LicensingModel,
    pub cloud_region: String,
    /// Labelled management entries ("MSP ID", IP-restriction modes, ...);
    /// possibly empty, order not significant.
    pub management_details: BTreeSet<String>,
    pub url: Option<String>,
}

impl From<wire::Organization> for Organization {
    fn from(org: wire::Organization) -> Self {
        Self {
            id: org.id,
            name: org.name,
            api_enabled: org.api.enabled,
            licensing_model: LicensingModel::from(org.licensing.model.as_str()),
            cloud_region: org.cloud.region.name,
            management_details: org.management.details.into_iter().collect(),
            url: org.url.filter(|u| !u.is_empty()),
        }
    }
}
