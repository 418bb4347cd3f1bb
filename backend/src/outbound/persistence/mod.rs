//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! The repository only translates between Diesel rows and domain records; row
//! structs (`models.rs`) and table definitions (`schema.rs`) never leave this
//! module. Connections come from a `bb8` pool through `diesel-async`, and the
//! embedded migrations create the schema at startup.
//!
//! # Example
//!
//! ```no_run
//! use jobtrack::outbound::persistence::{
//!     DbPool, DieselApplicationRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://localhost/jobs";
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let repository = DieselApplicationRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_application_repository;
mod diesel_error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_application_repository::DieselApplicationRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
