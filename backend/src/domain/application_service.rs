//! Job application domain service.
//!
//! Implements the application driving ports over a record store. This is the
//! only place presence and format rules are enforced before persistence, and
//! where missing records become a typed not-found outcome.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, error};

use crate::domain::ports::{
    ApplicationRepository, ApplicationRepositoryError, ApplicationsCommand, ApplicationsQuery,
    CreateApplicationRequest, DeleteApplicationRequest, GetApplicationRequest,
    UpdateApplicationRequest,
};
use crate::domain::{
    ApplicationDetails, ApplicationId, ApplicationPatch, ApplicationValidationError, Error,
    JobApplication, REQUIRED_FIELDS_MESSAGE,
};

fn map_repository_error(err: ApplicationRepositoryError) -> Error {
    error!(error = %err, "application store failure");
    Error::internal(format!("application store error: {err}"))
}

fn map_validation_error(err: ApplicationValidationError) -> Error {
    let (message, details) = match &err {
        ApplicationValidationError::MissingRequired { fields } => (
            REQUIRED_FIELDS_MESSAGE.to_owned(),
            json!({ "fields": fields, "code": "required" }),
        ),
        ApplicationValidationError::EmptyRequired { field } => {
            (err.to_string(), json!({ "field": field, "code": "empty" }))
        }
        ApplicationValidationError::InvalidStatus { value } => (
            err.to_string(),
            json!({ "field": "status", "code": "invalid_status", "value": value }),
        ),
        ApplicationValidationError::InvalidLink { value } => (
            err.to_string(),
            json!({ "field": "link", "code": "invalid_url", "value": value }),
        ),
        ApplicationValidationError::EmptyId => {
            (err.to_string(), json!({ "field": "id", "code": "empty" }))
        }
        ApplicationValidationError::TimestampOrder => (
            err.to_string(),
            json!({ "field": "updatedAt", "code": "timestamp_order" }),
        ),
    };
    Error::invalid_request(message).with_details(details)
}

fn not_found(id: &ApplicationId) -> Error {
    Error::not_found(format!("application {id} not found"))
}

/// Application service implementing the query and command driving ports.
#[derive(Clone)]
pub struct ApplicationService<R: ?Sized> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized> ApplicationService<R> {
    /// Create a service over `repository`, stamping records with `clock`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

#[async_trait]
impl<R> ApplicationsQuery for ApplicationService<R>
where
    R: ApplicationRepository + ?Sized,
{
    async fn list_applications(&self) -> Result<Vec<JobApplication>, Error> {
        self.repository.list().await.map_err(map_repository_error)
    }

    async fn get_application(
        &self,
        request: GetApplicationRequest,
    ) -> Result<JobApplication, Error> {
        self.repository
            .find_by_id(&request.id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(&request.id))
    }
}

#[async_trait]
impl<R> ApplicationsCommand for ApplicationService<R>
where
    R: ApplicationRepository + ?Sized,
{
    async fn create_application(
        &self,
        request: CreateApplicationRequest,
    ) -> Result<JobApplication, Error> {
        let details =
            ApplicationDetails::try_from_input(request.fields).map_err(map_validation_error)?;
        let application = JobApplication::create(ApplicationId::random(), details, self.clock.utc());

        self.repository
            .insert(&application)
            .await
            .map_err(map_repository_error)?;

        debug!(id = %application.id(), "created application");
        Ok(application)
    }

    async fn update_application(
        &self,
        request: UpdateApplicationRequest,
    ) -> Result<JobApplication, Error> {
        let UpdateApplicationRequest { id, changes } = request;
        let existing = self
            .repository
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(&id))?;

        // A missing record wins over a malformed body.
        let patch = ApplicationPatch::try_from_input(changes).map_err(map_validation_error)?;
        let updated = existing.with_changes(&patch, self.clock.utc());
        let replaced = self
            .repository
            .update(&updated)
            .await
            .map_err(map_repository_error)?;

        if !replaced {
            // Deleted between the read and the write.
            return Err(not_found(&id));
        }

        debug!(id = %id, "updated application");
        Ok(updated)
    }

    async fn delete_application(&self, request: DeleteApplicationRequest) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(&request.id)
            .await
            .map_err(map_repository_error)?;

        if removed {
            debug!(id = %request.id, "deleted application");
            Ok(())
        } else {
            Err(not_found(&request.id))
        }
    }
}

#[cfg(test)]
#[path = "application_service_tests.rs"]
mod tests;
