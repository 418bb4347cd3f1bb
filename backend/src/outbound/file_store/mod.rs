//! JSON document record store.
//!
//! All records live in one `applications.json` file inside a directory opened
//! through a cap-std capability handle. Reads parse the whole document;
//! every mutation rewrites it atomically. A missing file is an empty store.
//!
//! The document keeps records in insertion order:
//!
//! ```json
//! { "version": 1, "applications": [ { "id": "...", "company": "..." } ] }
//! ```

mod atomic_io;

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};
use crate::domain::{ApplicationId, JobApplication, newest_first};

use self::atomic_io::write_atomic;

/// File name of the document inside the data directory.
pub const DOCUMENT_FILE_NAME: &str = "applications.json";

const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Document {
    version: u32,
    applications: Vec<JobApplication>,
}

/// File-backed implementation of the application repository port.
#[derive(Debug, Clone)]
pub struct JsonFileApplicationRepository {
    dir: Arc<Dir>,
    path: Utf8PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileApplicationRepository {
    /// Open (creating if needed) `directory` as the data directory.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationRepositoryError::Connection`] when the directory
    /// cannot be created or opened.
    pub fn open(directory: &Utf8Path) -> Result<Self, ApplicationRepositoryError> {
        let connection_error = |err: io::Error| {
            ApplicationRepositoryError::connection(format!("open {directory}: {err}"))
        };
        Dir::create_ambient_dir_all(directory, ambient_authority()).map_err(connection_error)?;
        let dir = Dir::open_ambient_dir(directory, ambient_authority()).map_err(connection_error)?;
        Ok(Self {
            dir: Arc::new(dir),
            path: directory.join(DOCUMENT_FILE_NAME),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Path of the backing document, for diagnostics.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Document, ApplicationRepositoryError> {
        let dir = Arc::clone(&self.dir);
        let path = self.path.clone();
        run_blocking(move || load(&dir, &path)).await
    }

    /// Load, mutate, and persist the document while holding the write lock.
    ///
    /// `mutate` returns the operation result and whether the document changed;
    /// unchanged documents are not rewritten.
    async fn modify<T, F>(&self, mutate: F) -> Result<T, ApplicationRepositoryError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Vec<JobApplication>) -> Result<(T, bool), ApplicationRepositoryError>
            + Send
            + 'static,
    {
        // The guard lives as long as the blocking rewrite, even when the
        // caller is cancelled.
        let guard = Arc::clone(&self.write_lock).lock_owned().await;
        let dir = Arc::clone(&self.dir);
        let path = self.path.clone();
        run_blocking(move || {
            let _guard = guard;
            let mut document = load(&dir, &path)?;
            let (outcome, changed) = mutate(&mut document.applications)?;
            if changed {
                store(&dir, &path, &document)?;
            }
            Ok(outcome)
        })
        .await
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, ApplicationRepositoryError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ApplicationRepositoryError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| ApplicationRepositoryError::query(format!("file store task failed: {err}")))?
}

fn load(dir: &Dir, path: &Utf8Path) -> Result<Document, ApplicationRepositoryError> {
    let raw = match dir.read_to_string(DOCUMENT_FILE_NAME) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(Document {
                version: DOCUMENT_VERSION,
                applications: Vec::new(),
            });
        }
        Err(err) => {
            return Err(ApplicationRepositoryError::connection(format!(
                "read {path}: {err}"
            )));
        }
    };

    let document: Document = serde_json::from_str(&raw)
        .map_err(|err| ApplicationRepositoryError::query(format!("parse {path}: {err}")))?;
    if document.version != DOCUMENT_VERSION {
        return Err(ApplicationRepositoryError::query(format!(
            "{path} has unsupported version {}",
            document.version
        )));
    }
    Ok(document)
}

fn store(dir: &Dir, path: &Utf8Path, document: &Document) -> Result<(), ApplicationRepositoryError> {
    let body = serde_json::to_vec_pretty(document)
        .map_err(|err| ApplicationRepositoryError::query(format!("encode {path}: {err}")))?;
    write_atomic(dir, DOCUMENT_FILE_NAME, &body)
        .map_err(|err| ApplicationRepositoryError::query(format!("write {path}: {err}")))?;
    debug!(path = %path, records = document.applications.len(), "wrote application document");
    Ok(())
}

#[async_trait]
impl ApplicationRepository for JsonFileApplicationRepository {
    async fn list(&self) -> Result<Vec<JobApplication>, ApplicationRepositoryError> {
        let document = self.read_document().await?;
        Ok(newest_first(document.applications))
    }

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<JobApplication>, ApplicationRepositoryError> {
        let document = self.read_document().await?;
        Ok(document
            .applications
            .into_iter()
            .find(|record| record.id() == id))
    }

    async fn insert(&self, application: &JobApplication) -> Result<(), ApplicationRepositoryError> {
        let application = application.clone();
        self.modify(move |records| {
            if records.iter().any(|record| record.id() == application.id()) {
                return Err(ApplicationRepositoryError::query(format!(
                    "duplicate application id {}",
                    application.id()
                )));
            }
            records.push(application);
            Ok(((), true))
        })
        .await
    }

    async fn update(
        &self,
        application: &JobApplication,
    ) -> Result<bool, ApplicationRepositoryError> {
        let application = application.clone();
        self.modify(move |records| {
            match records
                .iter_mut()
                .find(|record| record.id() == application.id())
            {
                Some(slot) => {
                    *slot = application;
                    Ok((true, true))
                }
                None => Ok((false, false)),
            }
        })
        .await
    }

    async fn delete(&self, id: &ApplicationId) -> Result<bool, ApplicationRepositoryError> {
        let id = id.clone();
        self.modify(move |records| {
            let before = records.len();
            records.retain(|record| record.id() != &id);
            let removed = records.len() < before;
            Ok((removed, removed))
        })
        .await
    }
}

#[cfg(test)]
mod tests;
