//! Driving port for job application mutations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{ApplicationId, ApplicationInput, Error, JobApplication};

/// Request to create an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub fields: ApplicationInput,
}

/// Request to merge supplied fields into an existing application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    pub id: ApplicationId,
    pub changes: ApplicationInput,
}

/// Request to delete an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteApplicationRequest {
    pub id: ApplicationId,
}

/// Driving port for application write operations.
///
/// Validation failures surface as
/// [`crate::domain::ErrorCode::InvalidRequest`], missing records as
/// [`crate::domain::ErrorCode::NotFound`], and store failures as
/// [`crate::domain::ErrorCode::InternalError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationsCommand: Send + Sync {
    /// Validates and persists a new application, assigning id and timestamps.
    async fn create_application(
        &self,
        request: CreateApplicationRequest,
    ) -> Result<JobApplication, Error>;

    /// Applies a partial update and refreshes `updated_at`.
    async fn update_application(
        &self,
        request: UpdateApplicationRequest,
    ) -> Result<JobApplication, Error>;

    /// Permanently removes an application.
    async fn delete_application(&self, request: DeleteApplicationRequest) -> Result<(), Error>;
}
