//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the application endpoints, the health probes, and
//! the schema wrappers ([`ErrorSchema`], [`ErrorCodeSchema`],
//! [`ApplicationStatusSchema`]) that describe domain types without coupling
//! them to utoipa. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::applications::{ApplicationRequestBody, ApplicationResponseBody};
use crate::inbound::http::schemas::{ApplicationStatusSchema, ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Job application tracker API",
        description = "CRUD interface for personal job application records and health probes.",
        license(name = "ISC", url = "https://opensource.org/license/isc-license-txt")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::applications::list_applications,
        crate::inbound::http::applications::get_application,
        crate::inbound::http::applications::create_application,
        crate::inbound::http::applications::update_application,
        crate::inbound::http::applications::delete_application,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApplicationRequestBody,
        ApplicationResponseBody,
        ApplicationStatusSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "applications", description = "Job application records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
