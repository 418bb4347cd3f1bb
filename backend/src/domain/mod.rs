//! Domain primitives, ports, and services.
//!
//! Purpose: define the job application aggregate and the hexagonal boundary
//! the HTTP adapter and record stores plug into. Keep types immutable outside
//! their constructors and document invariants in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - JobApplication and its inputs: the sole entity and its validation.
//! - ApplicationService: implements the driving ports over a repository.
//! - TraceId: request correlation identifier.

pub mod application;
pub mod application_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::application::{
    ApplicationDetails, ApplicationId, ApplicationInput, ApplicationPatch, ApplicationStatus,
    ApplicationValidationError, JobApplication, JobApplicationRecord, REQUIRED_FIELDS_MESSAGE,
    newest_first,
};
pub use self::application_service::ApplicationService;
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
