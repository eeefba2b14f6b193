//! Two-step dependent mutation orchestration.
//!
//! Create a resource, pick the first dependent sub-resource it produced,
//! then update that sub-resource. The two calls are strictly sequential and
//! each runs at most once per invocation. Retries belong to the caller and
//! apply to the whole sequence (see [`crate::retry`]).

use std::time::Duration;

use qr_admin_api::{GraphqlClient, GraphqlResponse};
use qr_admin_core::{GenericResultExt, ResourceId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::{Error, Phase, Result};
use crate::mutation::{MutationDocument, MutationRequest};

/// Default bound on a single remote call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// A created resource that owns dependent sub-resources.
pub trait DependentResource {
    /// Id of the created resource.
    fn id(&self) -> &ResourceId;

    /// Ids of the sub-resources created alongside it, in API order.
    fn dependent_ids(&self) -> Vec<ResourceId>;
}

/// A resource returned by the update mutation.
pub trait Identified {
    fn id(&self) -> &ResourceId;
}

/// Outcome of the create mutation.
///
/// Only constructed when at least one dependent id exists, so
/// [`CreateResult::selected_dependent`] is always available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateResult<T> {
    id: ResourceId,
    dependent_ids: Vec<ResourceId>,
    selected: ResourceId,
    resource: T,
}

impl<T: DependentResource> CreateResult<T> {
    /// Wrap a decoded resource, selecting its first dependent id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingDependentResource`] when the resource has no
    /// dependent ids.
    pub fn from_resource(resource: T) -> Result<Self> {
        let id = resource.id().clone();
        let dependent_ids = resource.dependent_ids();
        let selected = dependent_ids
            .first()
            .cloned()
            .ok_or_else(|| Error::missing_dependent_resource(id.clone()))?;

        Ok(Self {
            id,
            dependent_ids,
            selected,
            resource,
        })
    }
}

impl<T> CreateResult<T> {
    #[must_use]
    pub const fn id(&self) -> &ResourceId {
        &self.id
    }

    #[must_use]
    pub fn dependent_ids(&self) -> &[ResourceId] {
        &self.dependent_ids
    }

    /// The dependent id the update mutation targets.
    #[must_use]
    pub const fn selected_dependent(&self) -> &ResourceId {
        &self.selected
    }

    #[must_use]
    pub const fn resource(&self) -> &T {
        &self.resource
    }
}

/// Outcome of the update mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateResult<U> {
    id: ResourceId,
    resource: U,
}

impl<U: Identified> UpdateResult<U> {
    #[must_use]
    pub fn from_resource(resource: U) -> Self {
        Self {
            id: resource.id().clone(),
            resource,
        }
    }
}

impl<U> UpdateResult<U> {
    #[must_use]
    pub const fn id(&self) -> &ResourceId {
        &self.id
    }

    #[must_use]
    pub const fn resource(&self) -> &U {
        &self.resource
    }
}

/// Combined, immutable outcome of a successful run.
///
/// Deserializing rebuilds both halves from the embedded resources, so a
/// stored result is held to the same pairing rules as a fresh one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "WorkflowParts<T, U>",
    bound(deserialize = "T: DependentResource + Deserialize<'de>, U: Identified + Deserialize<'de>")
)]
pub struct WorkflowResult<T, U> {
    created: CreateResult<T>,
    updated: UpdateResult<U>,
}

impl<T: DependentResource, U: Identified> WorkflowResult<T, U> {
    /// Pair a create and an update result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MutationFailed`] in the update phase, carrying the
    /// created id, when the update did not target the selected dependent.
    pub fn new(created: CreateResult<T>, updated: UpdateResult<U>) -> Result<Self> {
        if updated.id() != created.selected_dependent() {
            return Err(Error::mutation_failed(
                Phase::Update,
                format!(
                    "updated {} but {} was requested",
                    updated.id(),
                    created.selected_dependent()
                ),
                Some(created.id().clone()),
            ));
        }
        Ok(Self { created, updated })
    }
}

#[derive(Deserialize)]
struct ResourcePart<R> {
    resource: R,
}

#[derive(Deserialize)]
struct WorkflowParts<T, U> {
    created: ResourcePart<T>,
    updated: ResourcePart<U>,
}

impl<T: DependentResource, U: Identified> TryFrom<WorkflowParts<T, U>> for WorkflowResult<T, U> {
    type Error = Error;

    fn try_from(parts: WorkflowParts<T, U>) -> Result<Self> {
        let created = CreateResult::from_resource(parts.created.resource)?;
        let updated = UpdateResult::from_resource(parts.updated.resource);
        Self::new(created, updated)
    }
}

impl<T, U> WorkflowResult<T, U> {
    #[must_use]
    pub const fn created(&self) -> &CreateResult<T> {
        &self.created
    }

    #[must_use]
    pub const fn updated(&self) -> &UpdateResult<U> {
        &self.updated
    }

    /// Split into the two parts.
    #[must_use]
    pub fn into_parts(self) -> (CreateResult<T>, UpdateResult<U>) {
        (self.created, self.updated)
    }
}

/// Settings for the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Upper bound on each remote call; expiry is a transport failure.
    pub call_timeout: Duration,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

impl WorkflowConfig {
    /// Set the per-call timeout.
    #[must_use]
    pub const fn call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }
}

/// Runs dependent create-then-update mutations.
///
/// Holds only configuration; every call to [`MutationOrchestrator::run`] is
/// independent and may run concurrently with others.
#[derive(Debug, Clone, Default)]
pub struct MutationOrchestrator {
    config: WorkflowConfig,
}

impl MutationOrchestrator {
    #[must_use]
    pub const fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Execute `create`, then `update` with variables derived from the
    /// create result.
    ///
    /// The update mutation is never sent unless the create mutation
    /// succeeded and produced at least one dependent id. No partial result
    /// is returned, and the created resource is not removed when the update
    /// fails.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] when a call cannot reach the API or exceeds
    ///   the call timeout.
    /// - [`Error::MutationFailed`] when a response carries errors, lacks the
    ///   expected object, or the update targets a different id.
    /// - [`Error::MissingDependentResource`] when the created resource has
    ///   no dependent ids.
    pub async fn run<C, T, U, F>(
        &self,
        client: &C,
        create: MutationRequest,
        update: MutationDocument,
        derive_update_input: F,
    ) -> Result<WorkflowResult<T, U>>
    where
        C: GraphqlClient + ?Sized,
        T: DependentResource + DeserializeOwned,
        U: Identified + DeserializeOwned,
        F: FnOnce(&CreateResult<T>) -> Value,
    {
        info!(
            create = create.document.operation_name,
            update = update.operation_name,
            "Starting dependent mutation"
        );

        // Step 1-2: create and decode
        let response = self.execute(client, Phase::Create, &create, None).await?;
        let resource: T = create
            .document
            .decode(response)
            .map_err(|reason| Error::mutation_failed(Phase::Create, reason, None))
            .tap_err(|e| warn!(error = %e, "Create mutation rejected"))?;

        // Step 3: select the dependent sub-resource
        let created = CreateResult::from_resource(resource)
            .tap_err(|e| error!(error = %e, "Created resource has nothing to update"))?;
        info!(
            created_id = %created.id(),
            dependents = created.dependent_ids().len(),
            selected = %created.selected_dependent(),
            "Create mutation succeeded"
        );

        // Step 4-6: derive, update, decode
        let created_id = Some(created.id().clone());
        let request = MutationRequest::new(update, derive_update_input(&created));
        let response = self
            .execute(client, Phase::Update, &request, created_id.clone())
            .await?;
        let resource: U = update
            .decode(response)
            .map_err(|reason| Error::mutation_failed(Phase::Update, reason, created_id.clone()))
            .tap_err(|e| warn!(error = %e, "Update mutation rejected"))?;

        let result = WorkflowResult::new(created, UpdateResult::from_resource(resource))
            .tap_err(|e| warn!(error = %e, "Update targeted the wrong resource"))?;

        info!(
            created_id = %result.created().id(),
            updated_id = %result.updated().id(),
            "Dependent mutation complete"
        );
        Ok(result)
    }

    /// Run one remote call under the call timeout.
    async fn execute<C>(
        &self,
        client: &C,
        phase: Phase,
        request: &MutationRequest,
        created_id: Option<ResourceId>,
    ) -> Result<GraphqlResponse>
    where
        C: GraphqlClient + ?Sized,
    {
        debug!(%phase, operation = request.document.operation_name, "Sending mutation");

        let call = client.execute(request.document.query, request.variables.clone());
        let result = match tokio::time::timeout(self.config.call_timeout, call).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) if e.is_unsent() => Err(Error::transport(phase, e.to_string(), created_id)),
            Ok(Err(e)) if e.is_transport() => {
                Err(Error::transport_uncertain(phase, e.to_string(), created_id))
            }
            Ok(Err(e)) => Err(Error::mutation_failed(phase, e.to_string(), created_id)),
            Err(_) => Err(Error::transport_uncertain(
                phase,
                format!(
                    "no response within {}ms",
                    self.config.call_timeout.as_millis()
                ),
                created_id,
            )),
        };
        result.tap_err(|e| warn!(%phase, error = %e, "Mutation call failed"))
    }
}

/// Run a dependent mutation with the default configuration.
///
/// # Errors
///
/// See [`MutationOrchestrator::run`].
pub async fn run_dependent_mutation<C, T, U, F>(
    client: &C,
    create: MutationRequest,
    update: MutationDocument,
    derive_update_input: F,
) -> Result<WorkflowResult<T, U>>
where
    C: GraphqlClient + ?Sized,
    T: DependentResource + DeserializeOwned,
    U: Identified + DeserializeOwned,
    F: FnOnce(&CreateResult<T>) -> Value,
{
    MutationOrchestrator::default()
        .run(client, create, update, derive_update_input)
        .await
}
