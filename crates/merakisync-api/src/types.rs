//! Wire types for the Meraki Dashboard API (`/api/v1`).
//!
//! All types match the JSON bodies of the organization and network
//! endpoints. Field names use camelCase via `#[serde(rename_all = "camelCase")]`.

use serde::{Deserialize, Serialize};

// ── Organizations ────────────────────────────────────────────────────

/// Organization record — from `GET /organizations` and `GET /organizations/{orgId}`.
///
/// Organizations are read-only through this API surface; there is no
/// create/update/delete lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api: ApiAccess,
    #[serde(default)]
    pub licensing: Licensing,
    #[serde(default)]
    pub cloud: Cloud,
    #[serde(default)]
    pub management: Management,
}

/// `api` sub-object: whether API access is enabled for the organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAccess {
    #[serde(default)]
    pub enabled: bool,
}

/// `licensing` sub-object. `model` is one of `co-term`, `per-device`,
/// `subscription`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Licensing {
    #[serde(default)]
    pub model: String,
}

/// `cloud` sub-object carrying the hosting region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cloud {
    #[serde(default)]
    pub region: Region,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    #[serde(default)]
    pub name: String,
}

/// `management` sub-object. `details` holds labelled entries such as
/// "MSP ID" or IP-restriction modes; possibly empty, order not significant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Management {
    #[serde(default)]
    pub details: Vec<String>,
}

// ── Networks ─────────────────────────────────────────────────────────

/// Network record — returned by every network endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: String,
    pub organization_id: String,
    pub name: String,
    /// Values from the fixed product-type enumeration; fixed at creation.
    #[serde(default)]
    pub product_types: Vec<String>,
    pub time_zone: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Read-only; observed but never submitted.
    #[serde(default)]
    pub enrollment_string: Option<String>,
    /// Dashboard display link. Server-computed and mutated at unpredictable
    /// times; empty means "not reported".
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Read-only; observed but never submitted.
    #[serde(default)]
    pub is_bound_to_config_template: bool,
}

/// Create payload for `POST /organizations/{orgId}/networks`.
///
/// `tags` and `notes` are omitted from the wire entirely when `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkCreateRequest {
    pub name: String,
    pub time_zone: String,
    pub product_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial-update payload for `PUT /networks/{id}`.
///
/// Only fields whose desired value differs from the last-observed value are
/// populated. `None` fields never reach the wire -- the Dashboard leaves
/// unsubmitted fields untouched, so an absent field must not be sent as an
/// empty-string overwrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NetworkUpdateRequest {
    /// `true` when no field would be emitted; the caller should skip the
    /// remote call instead of sending an empty payload.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.time_zone.is_none() && self.tags.is_none() && self.notes.is_none()
    }
}
