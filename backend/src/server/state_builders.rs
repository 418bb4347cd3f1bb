//! Builders for the record store and HTTP state.

use std::sync::Arc;

use tracing::info;

use jobtrack::domain::ApplicationService;
use jobtrack::domain::ports::ApplicationRepository;
use jobtrack::inbound::http::state::HttpState;
use jobtrack::outbound::file_store::JsonFileApplicationRepository;
use jobtrack::outbound::memory::InMemoryApplicationRepository;
use jobtrack::outbound::persistence::{
    DbPool, DieselApplicationRepository, PoolConfig, run_pending_migrations,
};

use super::config::StoreSelection;

/// Open the record store named by `selection`.
///
/// PostgreSQL stores have their migrations applied before the pool is built.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the store cannot be opened.
pub async fn build_repository(
    selection: StoreSelection,
) -> std::io::Result<Arc<dyn ApplicationRepository>> {
    match selection {
        StoreSelection::Postgres {
            database_url,
            max_size,
        } => {
            run_pending_migrations(&database_url)
                .await
                .map_err(std::io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(max_size))
                .await
                .map_err(std::io::Error::other)?;
            info!(store = "postgres", max_size, "record store ready");
            Ok(Arc::new(DieselApplicationRepository::new(pool)))
        }
        StoreSelection::JsonFile { directory } => {
            let repository =
                JsonFileApplicationRepository::open(&directory).map_err(std::io::Error::other)?;
            info!(store = "json_file", path = %repository.path(), "record store ready");
            Ok(Arc::new(repository))
        }
        StoreSelection::Memory => {
            info!(store = "memory", "record store ready; records are lost on exit");
            Ok(Arc::new(InMemoryApplicationRepository::new()))
        }
    }
}

/// Wrap `repository` in the application service and expose it to handlers.
pub fn build_http_state(repository: Arc<dyn ApplicationRepository>) -> HttpState {
    let service = Arc::new(ApplicationService::new(
        repository,
        Arc::new(mockable::DefaultClock),
    ));
    HttpState::new(service.clone(), service)
}

#[cfg(test)]
mod tests {
    use jobtrack::domain::ApplicationInput;
    use jobtrack::domain::ports::CreateApplicationRequest;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn memory_selection_serves_empty_list() {
        let repository = build_repository(StoreSelection::Memory)
            .await
            .expect("memory store");
        let state = build_http_state(repository);

        let listed = state
            .applications_query
            .list_applications()
            .await
            .expect("list");
        assert!(listed.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn json_file_selection_persists_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let directory =
            camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 path");

        let state = build_http_state(
            build_repository(StoreSelection::JsonFile {
                directory: directory.clone(),
            })
            .await
            .expect("file store"),
        );
        let created = state
            .applications
            .create_application(CreateApplicationRequest {
                fields: ApplicationInput {
                    company: Some("Acme".to_owned()),
                    role: Some("Engineer".to_owned()),
                    status: Some("applied".to_owned()),
                    ..ApplicationInput::default()
                },
            })
            .await
            .expect("create");

        let reopened = build_http_state(
            build_repository(StoreSelection::JsonFile { directory })
                .await
                .expect("file store"),
        );
        let listed = reopened
            .applications_query
            .list_applications()
            .await
            .expect("list");
        assert_eq!(listed, vec![created]);
    }
}
