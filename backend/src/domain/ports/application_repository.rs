//! Port for job application persistence.

use async_trait::async_trait;

use crate::domain::{ApplicationId, JobApplication};

use super::define_port_error;

define_port_error! {
    /// Errors raised by application repository adapters.
    pub enum ApplicationRepositoryError {
        /// The store could not be reached or opened.
        Connection { message: String } =>
            "application repository connection failed: {message}",
        /// A read or write failed during execution.
        Query { message: String } =>
            "application repository query failed: {message}",
    }
}

/// Record store for job applications.
///
/// Adapters own the persisted representation. `list` returns records newest
/// first by `created_at`, later insertions first among equal timestamps.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Every record, newest first.
    async fn list(&self) -> Result<Vec<JobApplication>, ApplicationRepositoryError>;

    /// Look up one record.
    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<JobApplication>, ApplicationRepositoryError>;

    /// Persist a new record.
    async fn insert(&self, application: &JobApplication) -> Result<(), ApplicationRepositoryError>;

    /// Replace an existing record; `false` when no record has its id.
    async fn update(
        &self,
        application: &JobApplication,
    ) -> Result<bool, ApplicationRepositoryError>;

    /// Remove a record; `false` when no record has the id.
    async fn delete(&self, id: &ApplicationId) -> Result<bool, ApplicationRepositoryError>;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ApplicationRepositoryError::connection("refused"), "connection failed: refused")]
    #[case(ApplicationRepositoryError::query("broken sql"), "query failed: broken sql")]
    fn errors_format_message(#[case] err: ApplicationRepositoryError, #[case] expected: &str) {
        assert!(err.to_string().ends_with(expected), "{err}");
    }
}
