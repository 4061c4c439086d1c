use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::rest::ResourceClient;
use crate::features::citizens::dto::{RegisterCitizenDto, UpdateCitizenDto};
use crate::features::citizens::model::Citizen;
use crate::shared::validation::PHONE_REGEX;

pub const CITIZENS_PATH: &str = "/citizens";

/// Operations on the account collection. Registration is the one mutation
/// the service accepts without a session.
pub struct CitizenService {
    resource: Arc<ResourceClient>,
}

impl CitizenService {
    pub fn new(resource: Arc<ResourceClient>) -> Self {
        Self { resource }
    }

    pub async fn list(&self) -> Result<Vec<Citizen>> {
        self.resource.list(CITIZENS_PATH, &[]).await
    }

    pub async fn get(&self, id: i64) -> Result<Citizen> {
        self.resource.fetch(CITIZENS_PATH, id).await
    }

    /// Validate the form locally, then create the account. The
    /// confirmation field never leaves the client.
    pub async fn register(
        &self,
        form: RegisterCitizenDto,
        confirm_password: &str,
    ) -> Result<Citizen> {
        form.validate().map_err(AppError::from_validation)?;

        if form.password != confirm_password {
            return Err(AppError::Validation(
                "Password confirmation does not match".to_string(),
            ));
        }
        if let Some(phone) = form.numero_telephone.as_deref() {
            if !PHONE_REGEX.is_match(phone) {
                return Err(AppError::Validation(
                    "Invalid phone number format".to_string(),
                ));
            }
        }

        self.resource.create(CITIZENS_PATH, &form).await
    }

    pub async fn update(&self, id: i64, changes: UpdateCitizenDto) -> Result<Citizen> {
        if changes.is_empty() {
            return Err(AppError::Validation(
                "Nothing to update; set at least one field".to_string(),
            ));
        }
        if let Some(phone) = changes.numero_telephone.as_deref() {
            if !PHONE_REGEX.is_match(phone) {
                return Err(AppError::Validation(
                    "Invalid phone number format".to_string(),
                ));
            }
        }
        self.resource.update(CITIZENS_PATH, id, &changes).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.resource.remove(CITIZENS_PATH, id).await
    }
}
