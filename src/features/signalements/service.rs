use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::rest::ResourceClient;
use crate::features::auth::session::SessionStore;
use crate::features::signalements::dto::{
    CreateSignalementDto, CreateSignalementRequest, SignalementFilter, UpdateSignalementDto,
};
use crate::features::signalements::model::Signalement;

pub const SIGNALEMENTS_PATH: &str = "/signalements";

/// Operations on the signalement collection. Mutations return the server's
/// copy; callers decide whether to refetch or patch their own view.
pub struct SignalementService {
    resource: Arc<ResourceClient>,
    session: Arc<SessionStore>,
}

impl SignalementService {
    pub fn new(resource: Arc<ResourceClient>, session: Arc<SessionStore>) -> Self {
        Self { resource, session }
    }

    /// Fetch the collection; any surviving filter routes through the
    /// search endpoint instead.
    pub async fn list(&self, filter: &SignalementFilter) -> Result<Vec<Signalement>> {
        self.resource
            .list(SIGNALEMENTS_PATH, &filter.to_query_params())
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Signalement> {
        self.resource.fetch(SIGNALEMENTS_PATH, id).await
    }

    /// Validate the form, inject the session's citizen id and submit. The
    /// server assigns `id`, `status` (always `nouveau`) and timestamps.
    pub async fn create(&self, form: CreateSignalementDto) -> Result<Signalement> {
        form.validate().map_err(AppError::from_validation)?;

        let session = self
            .session
            .current()
            .ok_or_else(|| AppError::Auth("No active session; log in first".to_string()))?;

        let request = CreateSignalementRequest {
            citizen_id: session.user_id,
            signalement: form,
        };
        self.resource.create(SIGNALEMENTS_PATH, &request).await
    }

    pub async fn update(&self, id: i64, changes: UpdateSignalementDto) -> Result<Signalement> {
        if changes.is_empty() {
            return Err(AppError::Validation(
                "Nothing to update; set at least one field".to_string(),
            ));
        }
        self.resource.update(SIGNALEMENTS_PATH, id, &changes).await
    }

    /// Delete by id. The record may be dropped from a rendered list only
    /// after this returns Ok.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.resource.remove(SIGNALEMENTS_PATH, id).await
    }
}
