//! PostgreSQL-backed `ApplicationRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};
use crate::domain::{ApplicationId, JobApplication, JobApplicationRecord};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{JobApplicationRow, JobApplicationUpdate, NewJobApplicationRow};
use super::pool::DbPool;
use super::schema::job_applications;

/// Diesel-backed implementation of the application repository port.
#[derive(Clone)]
pub struct DieselApplicationRepository {
    pool: DbPool,
}

impl DieselApplicationRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_application(row: JobApplicationRow) -> Result<JobApplication, ApplicationRepositoryError> {
    let JobApplicationRow {
        id,
        company,
        role,
        status,
        location,
        link,
        source,
        salary,
        notes,
        created_at,
        updated_at,
    } = row;

    JobApplication::try_from(JobApplicationRecord {
        id,
        company,
        role,
        status,
        location,
        link,
        source,
        salary,
        notes,
        created_at,
        updated_at,
    })
    .map_err(|err| ApplicationRepositoryError::query(format!("invalid stored row: {err}")))
}

fn update_row(application: &JobApplication) -> JobApplicationUpdate<'_> {
    let details = application.details();
    JobApplicationUpdate {
        company: details.company(),
        role: details.role(),
        status: details.status().as_str(),
        location: details.location(),
        link: details.link(),
        source: details.source(),
        salary: details.salary(),
        notes: details.notes(),
        updated_at: application.updated_at(),
    }
}

#[async_trait]
impl ApplicationRepository for DieselApplicationRepository {
    async fn list(&self) -> Result<Vec<JobApplication>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<JobApplicationRow> = job_applications::table
            .order((
                job_applications::created_at.desc(),
                job_applications::seq.desc(),
            ))
            .select(JobApplicationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_application).collect()
    }

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<JobApplication>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = job_applications::table
            .filter(job_applications::id.eq(id.as_str()))
            .select(JobApplicationRow::as_select())
            .first::<JobApplicationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_application).transpose()
    }

    async fn insert(&self, application: &JobApplication) -> Result<(), ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let details = application.details();

        let new_row = NewJobApplicationRow {
            id: application.id().as_str(),
            company: details.company(),
            role: details.role(),
            status: details.status().as_str(),
            location: details.location(),
            link: details.link(),
            source: details.source(),
            salary: details.salary(),
            notes: details.notes(),
            created_at: application.created_at(),
            updated_at: application.updated_at(),
        };

        diesel::insert_into(job_applications::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        application: &JobApplication,
    ) -> Result<bool, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(
            job_applications::table.filter(job_applications::id.eq(application.id().as_str())),
        )
        .set(&update_row(application))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn delete(&self, id: &ApplicationId) -> Result<bool, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(
            job_applications::table.filter(job_applications::id.eq(id.as_str())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}
