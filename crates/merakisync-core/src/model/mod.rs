// ── Domain model ──
//
// Typed desired-configuration and observed-state records for the resources
// the reconciler manages, separated from the raw wire types in
// `merakisync_api::types`.

pub mod network;
pub mod organization;
pub mod product_type;

pub use network::{NetworkId, NetworkPlan, NetworkState};
pub use organization::{LicensingModel, Organization};
pub use product_type::{ProductType, UnknownProductType};
