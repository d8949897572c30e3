// ── Product types ──

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;

/// A category of capability a network supports (e.g. wireless, switch).
///
/// The enumeration is fixed by the Dashboard and a network's set is fixed at
/// creation -- the API has no way to change it afterwards, which is why the
/// reconciler treats a product-type change as a configuration violation
/// rather than an update.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ProductType {
    Wireless,
    Appliance,
    Switch,
    SystemsManager,
    Camera,
    CellularGateway,
    Sensor,
}

/// Raised when a remote record reports a product type outside the fixed
/// enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized product type: {0:?}")]
pub struct UnknownProductType(pub String);

impl ProductType {
    /// Every product type the Dashboard supports. This is the set substituted
    /// when a create request leaves product types unspecified.
    pub fn all() -> BTreeSet<Self> {
        Self::iter().collect()
    }

    /// Parse a wire-format list into a set, rejecting unknown values.
    pub fn parse_set(raw: &[String]) -> Result<BTreeSet<Self>, UnknownProductType> {
        raw.iter()
            .map(|s| {
                s.parse::<Self>()
                    .map_err(|_| UnknownProductType(s.clone()))
            })
            .collect()
    }

    /// Render a set back into wire-format strings, sorted for deterministic
    /// output.
    pub fn to_wire(set: &BTreeSet<Self>) -> Vec<String> {
        let mut wire: Vec<String> = set.iter().map(ToString::to_string).collect();
        wire.sort();
        wire
    }
}
