//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data`, so they depend only
//! on the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ApplicationsCommand, ApplicationsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub applications: Arc<dyn ApplicationsCommand>,
    pub applications_query: Arc<dyn ApplicationsQuery>,
}

impl HttpState {
    /// Bundle the application ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use jobtrack::domain::ApplicationService;
    /// use jobtrack::inbound::http::state::HttpState;
    /// use jobtrack::outbound::memory::InMemoryApplicationRepository;
    ///
    /// let service = Arc::new(ApplicationService::new(
    ///     Arc::new(InMemoryApplicationRepository::new()),
    ///     Arc::new(mockable::DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.applications_query.clone();
    /// ```
    pub fn new(
        applications: Arc<dyn ApplicationsCommand>,
        applications_query: Arc<dyn ApplicationsQuery>,
    ) -> Self {
        Self {
            applications,
            applications_query,
        }
    }
}
