//! Reconciliation core for merakisync.
//!
//! This crate owns the logic between a caller's desired configuration and
//! the remote truth held by the Meraki Dashboard:
//!
//! - **Domain model** ([`model`]) — typed desired-configuration
//!   ([`NetworkPlan`]) and observed-state ([`NetworkState`]) records, the
//!   fixed [`ProductType`] enumeration, and read-only [`Organization`]
//!   projections.
//!
//! - **[`Resource`]** — the four transition operations of the per-instance
//!   state machine (Absent → Present → Absent with Present → Present
//!   self-loops), implemented for networks by [`NetworkResource`]. Field
//!   diffing, immutability enforcement, and the sticky-URL merge live here.
//!
//! - **[`Reconciler`]** — host-facing driver dispatching one instance's
//!   (desired, observed) pair to the correct transition and translating
//!   failures into [`Diagnostic`] records. Cross-resource ordering stays
//!   with the host; each reconciliation performs one remote call with no
//!   internal retries, timeouts, or caching.
//!
//! - **Projection** ([`projection`]) — mapping between internal records and
//!   the persisted document form, preserving fields this crate does not own.

pub mod diagnostics;
pub mod error;
pub mod model;
pub mod projection;
pub mod reconcile;

// ── Primary re-exports ──────────────────────────────────────────────
pub use diagnostics::{Diagnostic, Severity};
pub use error::ReconcileError;
pub use model::{
    LicensingModel, NetworkId, NetworkPlan, NetworkState, Organization, ProductType,
    UnknownProductType,
};
pub use projection::{NetworkDocument, OrganizationDocument};
pub use reconcile::{NetworkResource, OrganizationReader, Reconciler, Resource, diff};
