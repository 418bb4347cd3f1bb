//! Job application HTTP handlers.
//!
//! ```text
//! GET    /api/applications
//! GET    /api/applications/{id}
//! POST   /api/applications
//! PUT    /api/applications/{id}
//! DELETE /api/applications/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{
    CreateApplicationRequest, DeleteApplicationRequest, GetApplicationRequest,
    UpdateApplicationRequest,
};
use crate::domain::{ApplicationId, ApplicationInput, Error, JobApplication};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ApplicationStatusSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Request payload for create and update.
///
/// On create `company`, `role`, and `status` are required. On update every
/// field is optional: omitted or `null` leaves the stored value unchanged and
/// `""` clears an optional field.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequestBody {
    #[schema(example = "Acme Corp")]
    pub company: Option<String>,
    #[schema(example = "Backend Engineer")]
    pub role: Option<String>,
    #[schema(value_type = Option<ApplicationStatusSchema>, example = "applied")]
    pub status: Option<String>,
    pub location: Option<String>,
    #[schema(format = "uri", example = "https://acme.example/careers/42")]
    pub link: Option<String>,
    pub source: Option<String>,
    pub salary: Option<String>,
    pub notes: Option<String>,
}

impl From<ApplicationRequestBody> for ApplicationInput {
    fn from(value: ApplicationRequestBody) -> Self {
        let ApplicationRequestBody {
            company,
            role,
            status,
            location,
            link,
            source,
            salary,
            notes,
        } = value;
        Self {
            company,
            role,
            status,
            location,
            link,
            source,
            salary,
            notes,
        }
    }
}

/// A stored job application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponseBody {
    #[schema(example = "4d6f3c7e-1b2a-4c3d-9e8f-0a1b2c3d4e5f")]
    pub id: String,
    pub company: String,
    pub role: String,
    #[schema(value_type = ApplicationStatusSchema)]
    pub status: String,
    pub location: Option<String>,
    #[schema(format = "uri")]
    pub link: Option<String>,
    pub source: Option<String>,
    pub salary: Option<String>,
    pub notes: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<&JobApplication> for ApplicationResponseBody {
    fn from(value: &JobApplication) -> Self {
        let details = value.details();
        let owned = |field: Option<&str>| field.map(str::to_owned);
        Self {
            id: value.id().to_string(),
            company: details.company().to_owned(),
            role: details.role().to_owned(),
            status: details.status().to_string(),
            location: owned(details.location()),
            link: owned(details.link()),
            source: owned(details.source()),
            salary: owned(details.salary()),
            notes: owned(details.notes()),
            created_at: value
                .created_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: value
                .updated_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

fn parse_application_id(raw: String) -> Result<ApplicationId, Error> {
    ApplicationId::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "id",
            "code": "empty",
        }))
    })
}

/// List every application, newest first.
#[utoipa::path(
    get,
    path = "/api/applications",
    responses(
        (status = 200, description = "Applications, newest first", body = [ApplicationResponseBody]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "listApplications"
)]
#[get("/applications")]
pub async fn list_applications(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ApplicationResponseBody>>> {
    let applications = state.applications_query.list_applications().await?;
    Ok(web::Json(
        applications
            .iter()
            .map(ApplicationResponseBody::from)
            .collect(),
    ))
}

/// Fetch one application.
#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(("id" = String, Path, description = "Application identifier")),
    responses(
        (status = 200, description = "Application", body = ApplicationResponseBody),
        (status = 404, description = "No application has this id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "getApplication"
)]
#[get("/applications/{id}")]
pub async fn get_application(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ApplicationResponseBody>> {
    let id = parse_application_id(path.into_inner())?;
    let application = state
        .applications_query
        .get_application(GetApplicationRequest { id })
        .await?;
    Ok(web::Json(ApplicationResponseBody::from(&application)))
}

/// Create an application.
#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = ApplicationRequestBody,
    responses(
        (status = 201, description = "Application created", body = ApplicationResponseBody),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "createApplication"
)]
#[post("/applications")]
pub async fn create_application(
    state: web::Data<HttpState>,
    payload: web::Json<ApplicationRequestBody>,
) -> ApiResult<HttpResponse> {
    let application = state
        .applications
        .create_application(CreateApplicationRequest {
            fields: payload.into_inner().into(),
        })
        .await?;
    Ok(HttpResponse::Created().json(ApplicationResponseBody::from(&application)))
}

/// Merge the supplied fields into an application.
#[utoipa::path(
    put,
    path = "/api/applications/{id}",
    params(("id" = String, Path, description = "Application identifier")),
    request_body = ApplicationRequestBody,
    responses(
        (status = 200, description = "Application updated", body = ApplicationResponseBody),
        (status = 400, description = "Invalid fields", body = ErrorSchema),
        (status = 404, description = "No application has this id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "updateApplication"
)]
#[put("/applications/{id}")]
pub async fn update_application(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ApplicationRequestBody>,
) -> ApiResult<web::Json<ApplicationResponseBody>> {
    let id = parse_application_id(path.into_inner())?;
    let application = state
        .applications
        .update_application(UpdateApplicationRequest {
            id,
            changes: payload.into_inner().into(),
        })
        .await?;
    Ok(web::Json(ApplicationResponseBody::from(&application)))
}

/// Delete an application permanently.
#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    params(("id" = String, Path, description = "Application identifier")),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 404, description = "No application has this id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "deleteApplication"
)]
#[delete("/applications/{id}")]
pub async fn delete_application(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_application_id(path.into_inner())?;
    state
        .applications
        .delete_application(DeleteApplicationRequest { id })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "applications_tests.rs"]
mod tests;
