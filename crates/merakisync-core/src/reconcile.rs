// ── Reconciliation engine ──
//
// A three-state machine per resource instance: Absent -> Present -> Absent
// (create / delete), plus Present -> Present self-loops for update and
// refresh. Each transition performs at most one remote call and either
// fully succeeds (state fully updated) or fully fails (state untouched,
// safe to retry at the same transition).

use tracing::{debug, info};

use merakisync_api::MerakiClient;
use merakisync_api::types::{NetworkCreateRequest, NetworkUpdateRequest};

use crate::diagnostics::Diagnostic;
use crate::error::ReconcileError;
use crate::model::{NetworkId, NetworkPlan, NetworkState, Organization, ProductType};

// ── Resource trait ──────────────────────────────────────────────────

/// The four transition operations a declaratively managed resource supports.
///
/// Implementations perform exactly one remote call per transition and never
/// retry internally; transient failures propagate for the host to decide.
pub trait Resource {
    type Plan;
    type State;

    /// Absent -> Present.
    fn create(
        &self,
        plan: &Self::Plan,
    ) -> impl Future<Output = Result<Self::State, ReconcileError>> + Send;

    /// Present -> Present, read path: refresh observed state from remote truth.
    fn read(
        &self,
        state: &Self::State,
    ) -> impl Future<Output = Result<Self::State, ReconcileError>> + Send;

    /// Present -> Present, write path: converge remote state toward the plan.
    fn update(
        &self,
        plan: &Self::Plan,
        state: &Self::State,
    ) -> impl Future<Output = Result<Self::State, ReconcileError>> + Send;

    /// Present -> Absent.
    fn delete(
        &self,
        state: &Self::State,
    ) -> impl Future<Output = Result<(), ReconcileError>> + Send;
}

// ── Field diffing ───────────────────────────────────────────────────

/// Compute the field-level diff between desired and observed values.
///
/// Each mutable field (name, time zone, notes, tags) is compared for
/// equality independently; only differing fields are placed into the update
/// request, so server-side drift in non-submitted fields (e.g. URL) never
/// triggers a write. Returns `Ok(None)` when nothing differs -- the remote
/// call should be skipped entirely.
///
/// A product-type difference is a [`ReconcileError::ConfigurationViolation`]:
/// the Dashboard cannot change which product types a network supports after
/// creation. The plan side gets the same empty-means-all normalization as
/// create, so a plan that always omitted product types stays a no-op.
pub fn diff(
    plan: &NetworkPlan,
    state: &NetworkState,
) -> Result<Option<NetworkUpdateRequest>, ReconcileError> {
    if plan.effective_product_types() != state.product_types {
        return Err(ReconcileError::ConfigurationViolation {
            message: format!(
                "product types are fixed at creation: network {} has [{}], desired [{}]",
                state.id,
                ProductType::to_wire(&state.product_types).join(", "),
                ProductType::to_wire(&plan.effective_product_types()).join(", "),
            ),
        });
    }

    let mut request = NetworkUpdateRequest::default();
    if plan.name != state.name {
        request.name = Some(plan.name.clone());
    }
    if plan.time_zone != state.time_zone {
        request.time_zone = Some(plan.time_zone.clone());
    }
    if plan.tags != state.tags {
        request.tags = Some(plan.tags.iter().cloned().collect());
    }
    if plan.notes != state.notes {
        // Clearing notes requires an explicit empty string; omitting the
        // field would leave the old text in place.
        request.notes = Some(plan.notes.clone().unwrap_or_default());
    }

    Ok(if request.is_empty() {
        None
    } else {
        Some(request)
    })
}

// ── Refresh merge ───────────────────────────────────────────────────

/// Merge a freshly read remote record into prior observed state.
///
/// Mutable fields come from the remote record. URL is sticky: kept once
/// known, taken from the read only when currently unknown. Product types
/// and tags are merged only when the remote record reports a non-empty set;
/// an empty set means "not reported", never "cleared", and must not erase
/// previously known values.
fn merge_refresh(prior: &NetworkState, fresh: NetworkState) -> NetworkState {
    NetworkState {
        id: fresh.id,
        organization_id: fresh.organization_id,
        name: fresh.name,
        time_zone: fresh.time_zone,
        product_types: if fresh.product_types.is_empty() {
            prior.product_types.clone()
        } else {
            fresh.product_types
        },
        tags: if fresh.tags.is_empty() {
            prior.tags.clone()
        } else {
            fresh.tags
        },
        notes: fresh.notes,
        url: prior.url.clone().or(fresh.url),
        enrollment_string: fresh.enrollment_string,
        bound_to_config_template: fresh.bound_to_config_template,
    }
}

// ── Network resource ────────────────────────────────────────────────

/// Network resource backed by the Dashboard gateway.
///
/// The gateway (and with it the credential) is constructed once by the
/// caller and passed in by reference, never mutated.
pub struct NetworkResource<'a> {
    client: &'a MerakiClient,
}

impl<'a> NetworkResource<'a> {
    pub fn new(client: &'a MerakiClient) -> Self {
        Self { client }
    }
}

impl Resource for NetworkResource<'_> {
    type Plan = NetworkPlan;
    type State = NetworkState;

    async fn create(&self, plan: &NetworkPlan) -> Result<NetworkState, ReconcileError> {
        let product_types = plan.effective_product_types();
        let request = NetworkCreateRequest {
            name: plan.name.clone(),
            time_zone: plan.time_zone.clone(),
            product_types: ProductType::to_wire(&product_types),
            tags: if plan.tags.is_empty() {
                None
            } else {
                Some(plan.tags.iter().cloned().collect())
            },
            notes: plan.notes.clone(),
        };

        let created = self.client.create_network(&plan.organization_id, &request).await?;
        info!(network_id = %created.id, org_id = %plan.organization_id, "created network");

        // Trust the plan: only the server-assigned identifier and URL are
        // taken from the response. Mid-apply drift surfaces on the next
        // refresh instead of being masked by an echo-back.
        Ok(NetworkState {
            id: NetworkId::new(created.id),
            organization_id: plan.organization_id.clone(),
            name: plan.name.clone(),
            time_zone: plan.time_zone.clone(),
            product_types,
            tags: plan.tags.clone(),
            notes: plan.notes.clone(),
            url: Some(created.url).filter(|u| !u.is_empty()),
            enrollment_string: None,
            bound_to_config_template: false,
        })
    }

    async fn read(&self, state: &NetworkState) -> Result<NetworkState, ReconcileError> {
        let raw = if state.organization_id.is_empty() {
            // Import path: the owning organization is not known yet.
            self.client.get_network(state.id.as_str()).await?
        } else {
            self.client
                .get_organization_network(&state.organization_id, state.id.as_str())
                .await?
        };

        let fresh = NetworkState::from_wire(raw)?;
        Ok(merge_refresh(state, fresh))
    }

    async fn update(
        &self,
        plan: &NetworkPlan,
        state: &NetworkState,
    ) -> Result<NetworkState, ReconcileError> {
        let Some(request) = diff(plan, state)? else {
            debug!(network_id = %state.id, "no changed fields, skipping update");
            return Ok(state.clone());
        };

        self.client.update_network(state.id.as_str(), &request).await?;
        info!(network_id = %state.id, "updated network");

        // Same trust-the-plan merge as create; identifier, URL, and
        // read-only fields carry over from prior state.
        Ok(NetworkState {
            id: state.id.clone(),
            organization_id: state.organization_id.clone(),
            name: plan.name.clone(),
            time_zone: plan.time_zone.clone(),
            product_types: state.product_types.clone(),
            tags: plan.tags.clone(),
            notes: plan.notes.clone(),
            url: state.url.clone(),
            enrollment_string: state.enrollment_string.clone(),
            bound_to_config_template: state.bound_to_config_template,
        })
    }

    async fn delete(&self, state: &NetworkState) -> Result<(), ReconcileError> {
        self.client.delete_network(state.id.as_str()).await?;
        info!(network_id = %state.id, "deleted network");
        Ok(())
    }
}

// ── Organization reader ─────────────────────────────────────────────

/// Read-only projections of remote organization truth. Organizations have
/// no create/update/delete lifecycle through this system.
pub struct OrganizationReader<'a> {
    client: &'a MerakiClient,
}

impl<'a> OrganizationReader<'a> {
    pub fn new(client: &'a MerakiClient) -> Self {
        Self { client }
    }

    /// Fetch a single organization by id.
    pub async fn get(&self, org_id: &str) -> Result<Organization, ReconcileError> {
        Ok(self.client.get_organization(org_id).await?.into())
    }

    /// Enumerate the ids of all organizations visible to the credential.
    pub async fn list_ids(&self) -> Result<Vec<String>, ReconcileError> {
        Ok(self
            .client
            .list_organizations()
            .await?
            .into_iter()
            .map(|org| org.id)
            .collect())
    }
}

// ── Reconciliation driver ───────────────────────────────────────────

/// Host-facing driver dispatching one resource instance's
/// (desired, observed) pair to the correct transition.
///
/// The host triggers reconciliation per resource and owns cross-resource
/// ordering (networks after their owning organization). Instances are
/// independent: each carries its own identifier and is never aliased, so no
/// shared locking is needed when the host runs many concurrently.
pub struct Reconciler<'a> {
    networks: NetworkResource<'a>,
}

impl<'a> Reconciler<'a> {
    pub fn new(client: &'a MerakiClient) -> Self {
        Self {
            networks: NetworkResource::new(client),
        }
    }

    /// Converge one network instance toward its desired configuration.
    ///
    /// Returns the updated observed state -- `None` once the resource is
    /// absent -- or a structured diagnostic. On a delete failure the prior
    /// state remains valid, so the host can retry with the same identifier.
    pub async fn reconcile_network(
        &self,
        desired: Option<&NetworkPlan>,
        observed: Option<&NetworkState>,
    ) -> Result<Option<NetworkState>, Diagnostic> {
        match (desired, observed) {
            (Some(plan), None) => self
                .networks
                .create(plan)
                .await
                .map(Some)
                .map_err(|e| Diagnostic::from_error("failed to create network", &e)),
            (Some(plan), Some(state)) => self
                .networks
                .update(plan, state)
                .await
                .map(Some)
                .map_err(|e| Diagnostic::from_error("failed to update network", &e)),
            (None, Some(state)) => self
                .networks
                .delete(state)
                .await
                .map(|()| None)
                .map_err(|e| Diagnostic::from_error("failed to delete network", &e)),
            (None, None) => Ok(None),
        }
    }

    /// Re-read remote truth for a managed network (refresh transition).
    pub async fn refresh_network(&self, state: &NetworkState) -> Result<NetworkState, Diagnostic> {
        self.networks
            .read(state)
            .await
            .map_err(|e| Diagnostic::from_error("failed to read network", &e))
    }

    /// Re-attach an existing network to management using only its
    /// identifier; the rest of state is populated by the refresh.
    pub async fn import_network(&self, id: &str) -> Result<NetworkState, Diagnostic> {
        let stub = NetworkState {
            id: NetworkId::from(id),
            organization_id: String::new(),
            name: String::new(),
            time_zone: String::new(),
            product_types: std::collections::BTreeSet::new(),
            tags: std::collections::BTreeSet::new(),
            notes: None,
            url: None,
            enrollment_string: None,
            bound_to_config_template: false,
        };
        self.refresh_network(&stub).await
    }
}
