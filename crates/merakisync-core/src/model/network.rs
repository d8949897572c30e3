// ── Network domain types ──

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use merakisync_api::types as wire;

use super::product_type::{ProductType, UnknownProductType};

// ── NetworkId ───────────────────────────────────────────────────────

/// Opaque, server-assigned network identifier (e.g. `N_24329156`).
///
/// Assigned once at creation and immutable for the lifetime of the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkId(String);

impl NetworkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NetworkId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NetworkId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ── Plan ────────────────────────────────────────────────────────────

/// Desired configuration for a network, supplied by the caller before
/// reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkPlan {
    /// Owning organization; set at creation, immutable afterwards.
    pub organization_id: String,
    pub name: String,
    /// IANA zone name the Dashboard accepts (e.g. `America/Los_Angeles`).
    pub time_zone: String,
    /// Empty means "default to every supported product type" at creation,
    /// not "no product types".
    pub product_types: BTreeSet<ProductType>,
    pub tags: BTreeSet<String>,
    pub notes: Option<String>,
}

impl NetworkPlan {
    /// The product types this plan actually stands for: an empty set
    /// defaults to the full enumeration.
    pub fn effective_product_types(&self) -> BTreeSet<ProductType> {
        if self.product_types.is_empty() {
            ProductType::all()
        } else {
            self.product_types.clone()
        }
    }
}

// ── State ───────────────────────────────────────────────────────────

/// Last-observed remote state for a managed network, as recorded after the
/// most recent successful operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkState {
    pub id: NetworkId,
    pub organization_id: String,
    pub name: String,
    pub time_zone: String,
    /// Fixed at creation; compared for drift detection, never submitted in
    /// updates.
    pub product_types: BTreeSet<ProductType>,
    pub tags: BTreeSet<String>,
    pub notes: Option<String>,
    /// Dashboard display link. Sticky: once observed it is not overwritten
    /// by later reads unless currently unknown.
    pub url: Option<String>,
    /// Read-only; observed but never submitted.
    pub enrollment_string: Option<String>,
    /// Read-only; observed but never submitted.
    pub bound_to_config_template: bool,
}

impl NetworkState {
    /// Decode a wire record into observed state.
    ///
    /// Empty strings for optional text fields normalize to `None` so "not
    /// set" has a single representation in state and diffs.
    pub fn from_wire(net: wire::Network) -> Result<Self, UnknownProductType> {
        Ok(Self {
            id: NetworkId::new(net.id),
            organization_id: net.organization_id,
            name: net.name,
            time_zone: net.time_zone,
            product_types: ProductType::parse_set(&net.product_types)?,
            tags: net.tags.into_iter().collect(),
            notes: net.notes.filter(|n| !n.is_empty()),
            url: Some(net.url).filter(|u| !u.is_empty()),
            enrollment_string: net.enrollment_string.filter(|s| !s.is_empty()),
            bound_to_config_template: net.is_bound_to_config_template,
        })
    }
}
