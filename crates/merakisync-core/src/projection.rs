// ── State projection layer ──
//
// Maps between the reconciler's internal records and the externally
// persisted document form. Order-insignificant sets are written as sorted
// vectors for deterministic output, optional fields are omitted when unset,
// and fields the reconciler does not own ride along in a flattened
// catch-all map across a round trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{
    LicensingModel, NetworkId, NetworkState, Organization, ProductType, UnknownProductType,
};

// ── Network document ────────────────────────────────────────────────

/// Persisted form of [`NetworkState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDocument {
    pub id: String,
    pub organization_id: String,
    pub name: String,
    pub time_zone: String,
    pub product_types: Vec<String>,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrollment_string: Option<String>,
    #[serde(default)]
    pub is_bound_to_config_template: bool,
    /// Fields owned by other layers; preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NetworkDocument {
    /// Project state into a fresh document with no unowned fields.
    pub fn from_state(state: &NetworkState) -> Self {
        Self::project(state, None)
    }

    /// Project state into a document, carrying forward unowned fields from
    /// the prior persisted document.
    pub fn project(state: &NetworkState, prior: Option<&NetworkDocument>) -> Self {
        Self {
            id: state.id.to_string(),
            organization_id: state.organization_id.clone(),
            name: state.name.clone(),
            time_zone: state.time_zone.clone(),
            product_types: ProductType::to_wire(&state.product_types),
            tags: state.tags.iter().cloned().collect(),
            notes: state.notes.clone(),
            url: state.url.clone(),
            enrollment_string: state.enrollment_string.clone(),
            is_bound_to_config_template: state.bound_to_config_template,
            extra: prior.map_or_else(Map::new, |p| p.extra.clone()),
        }
    }

    /// Restore observed state from a persisted document.
    ///
    /// Vectors become sets; unrecognized product types are rejected rather
    /// than silently dropped.
    pub fn into_state(self) -> Result<NetworkState, UnknownProductType> {
        Ok(NetworkState {
            id: NetworkId::from(self.id),
            organization_id: self.organization_id,
            name: self.name,
            time_zone: self.time_zone,
            product_types: ProductType::parse_set(&self.product_types)?,
            tags: self.tags.into_iter().collect(),
            notes: self.notes.filter(|n| !n.is_empty()),
            url: self.url.filter(|u| !u.is_empty()),
            enrollment_string: self.enrollment_string.filter(|s| !s.is_empty()),
            bound_to_config_template: self.is_bound_to_config_template,
        })
    }
}

// ── Organization document ───────────────────────────────────────────

/// Persisted form of an observed [`Organization`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationDocument {
    pub id: String,
    pub name: String,
    pub api_enabled: bool,
    pub licensing_model: String,
    pub cloud_region_name: String,
    pub management_details: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Fields owned by other layers; preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrganizationDocument {
    pub fn from_record(org: &Organization) -> Self {
        Self::project(org, None)
    }

    /// Project a record into a document, carrying forward unowned fields.
    pub fn project(org: &Organization, prior: Option<&OrganizationDocument>) -> Self {
        Self {
            id: org.id.clone(),
            name: org.name.clone(),
            api_enabled: org.api_enabled,
            licensing_model: org.licensing_model.to_string(),
            cloud_region_name: org.cloud_region.clone(),
            management_details: org.management_details.iter().cloned().collect(),
            url: org.url.clone(),
            extra: prior.map_or_else(Map::new, |p| p.extra.clone()),
        }
    }

    pub fn into_record(self) -> Organization {
        Organization {
            id: self.id,
            name: self.name,
            api_enabled: self.api_enabled,
            licensing_model: LicensingModel::from(self.licensing_model.as_str()),
            cloud_region: self.cloud_region_name,
            management_details: self.management_details.into_iter().collect(),
            url: self.url.filter(|u| !u.is_empty()),
        }
    }
}
