//! Driving port for job application reads.
//!
//! Inbound adapters use this port to list and fetch applications without
//! depending on the record store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{ApplicationId, Error, JobApplication};

/// Request to fetch one application by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetApplicationRequest {
    pub id: ApplicationId,
}

/// Driving port for application read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationsQuery: Send + Sync {
    /// Lists every application, newest first.
    async fn list_applications(&self) -> Result<Vec<JobApplication>, Error>;

    /// Fetches one application.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when no record has
    /// the identifier.
    async fn get_application(&self, request: GetApplicationRequest)
    -> Result<JobApplication, Error>;
}
