//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::job_applications;

/// Row struct for reading from the job applications table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = job_applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobApplicationRow {
    pub id: String,
    pub company: String,
    pub role: String,
    pub status: String,
    pub location: Option<String>,
    pub link: Option<String>,
    pub source: Option<String>,
    pub salary: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for new job application rows; `seq` is assigned by the
/// database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = job_applications)]
pub(crate) struct NewJobApplicationRow<'a> {
    pub id: &'a str,
    pub company: &'a str,
    pub role: &'a str,
    pub status: &'a str,
    pub location: Option<&'a str>,
    pub link: Option<&'a str>,
    pub source: Option<&'a str>,
    pub salary: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset replacing every mutable column.
///
/// `None` writes `NULL` so cleared optional fields are persisted.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = job_applications)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct JobApplicationUpdate<'a> {
    pub company: &'a str,
    pub role: &'a str,
    pub status: &'a str,
    pub location: Option<&'a str>,
    pub link: Option<&'a str>,
    pub source: Option<&'a str>,
    pub salary: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}
