//! Process-local record store.
//!
//! Used when no persistence is configured and by tests. Records live in a
//! vector kept in insertion order; the lock serializes mutations.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};
use crate::domain::{ApplicationId, JobApplication, newest_first};

/// In-memory implementation of the application repository port.
#[derive(Debug, Default)]
pub struct InMemoryApplicationRepository {
    records: RwLock<Vec<JobApplication>>,
}

impl InMemoryApplicationRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> ApplicationRepositoryError {
    ApplicationRepositoryError::query("in-memory store lock poisoned")
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn list(&self) -> Result<Vec<JobApplication>, ApplicationRepositoryError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(newest_first(records.iter().cloned()))
    }

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<JobApplication>, ApplicationRepositoryError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.iter().find(|record| record.id() == id).cloned())
    }

    async fn insert(&self, application: &JobApplication) -> Result<(), ApplicationRepositoryError> {
        let mut records = self.records.write().map_err(poisoned)?;
        if records.iter().any(|record| record.id() == application.id()) {
            return Err(ApplicationRepositoryError::query(format!(
                "duplicate application id {}",
                application.id()
            )));
        }
        records.push(application.clone());
        Ok(())
    }

    async fn update(
        &self,
        application: &JobApplication,
    ) -> Result<bool, ApplicationRepositoryError> {
        let mut records = self.records.write().map_err(poisoned)?;
        match records
            .iter_mut()
            .find(|record| record.id() == application.id())
        {
            Some(slot) => {
                *slot = application.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ApplicationId) -> Result<bool, ApplicationRepositoryError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let before = records.len();
        records.retain(|record| record.id() != id);
        Ok(records.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{ApplicationDetails, ApplicationInput};

    fn application(id: &str, second: u32) -> JobApplication {
        let details = ApplicationDetails::try_from_input(ApplicationInput {
            company: Some(format!("Company {id}")),
            role: Some("Engineer".to_owned()),
            status: Some("wishlist".to_owned()),
            ..ApplicationInput::default()
        })
        .expect("valid details");
        let at = Utc
            .with_ymd_and_hms(2026, 2, 1, 8, 0, second)
            .single()
            .expect("valid timestamp");
        JobApplication::create(ApplicationId::new(id).expect("id"), details, at)
    }

    #[fixture]
    fn store() -> InMemoryApplicationRepository {
        InMemoryApplicationRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn list_is_newest_first(store: InMemoryApplicationRepository) {
        for (id, second) in [("a", 1), ("b", 2), ("c", 3)] {
            store.insert(&application(id, second)).await.expect("insert");
        }

        let ids: Vec<String> = store
            .list()
            .await
            .expect("list")
            .iter()
            .map(|app| app.id().to_string())
            .collect();
        assert_eq!(ids, ["c", "b", "a"]);
    }

    #[rstest]
    #[tokio::test]
    async fn same_timestamp_lists_later_insertion_first(store: InMemoryApplicationRepository) {
        store.insert(&application("first", 0)).await.expect("insert");
        store.insert(&application("second", 0)).await.expect("insert");

        let listed = store.list().await.expect("list");
        assert_eq!(listed[0].id().as_str(), "second");
    }

    #[rstest]
    #[tokio::test]
    async fn update_and_delete_report_missing_rows(store: InMemoryApplicationRepository) {
        let app = application("a", 0);
        assert!(!store.update(&app).await.expect("update"));
        assert!(!store.delete(app.id()).await.expect("delete"));

        store.insert(&app).await.expect("insert");
        assert!(store.update(&app).await.expect("update"));
        assert!(store.delete(app.id()).await.expect("delete"));
        assert!(store.find_by_id(app.id()).await.expect("find").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_ids_are_rejected(store: InMemoryApplicationRepository) {
        let app = application("a", 0);
        store.insert(&app).await.expect("insert");
        let err = store.insert(&app).await.expect_err("duplicate");
        assert!(matches!(err, ApplicationRepositoryError::Query { .. }));
    }
}
