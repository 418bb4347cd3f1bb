//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local record store
//! - **file_store**: JSON document record store
//! - **persistence**: PostgreSQL record store using Diesel ORM
//! - **http_client**: reqwest client for the applications REST API
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod file_store;
pub mod http_client;
pub mod memory;
pub mod persistence;
