//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod application_repository;
mod applications_command;
mod applications_query;

#[cfg(test)]
pub use application_repository::MockApplicationRepository;
pub use application_repository::{ApplicationRepository, ApplicationRepositoryError};
#[cfg(test)]
pub use applications_command::MockApplicationsCommand;
pub use applications_command::{
    ApplicationsCommand, CreateApplicationRequest, DeleteApplicationRequest,
    UpdateApplicationRequest,
};
#[cfg(test)]
pub use applications_query::MockApplicationsQuery;
pub use applications_query::{ApplicationsQuery, GetApplicationRequest};
