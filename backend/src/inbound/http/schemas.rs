//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`; these
//! wrappers register equivalent schemas from the inbound adapter instead.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested application does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "company, role and status are required")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "6f1c1f5e-8d3a-4b61-9a8e-2f0d7c5b4a39")]
    trace_id: Option<String>,
    /// Supplementary details, such as the offending fields.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::ApplicationStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ApplicationStatus, rename_all = "lowercase")]
pub enum ApplicationStatusSchema {
    Wishlist,
    Applied,
    Interview,
    Offer,
    Rejected,
}

#[cfg(test)]
mod tests {
    use utoipa::PartialSchema;

    use super::*;

    #[test]
    fn error_schema_uses_camel_case_trace_id() {
        let schema = serde_json::to_value(ErrorSchema::schema()).expect("schema serialises");
        let properties = &schema["properties"];
        assert!(properties.get("traceId").is_some(), "{schema}");
        assert!(properties.get("trace_id").is_none());
    }

    #[test]
    fn status_schema_lists_every_status() {
        let schema =
            serde_json::to_value(ApplicationStatusSchema::schema()).expect("schema serialises");
        let values = schema["enum"].as_array().expect("enum values");
        assert_eq!(values.len(), crate::domain::ApplicationStatus::ALL.len());
        assert!(values.contains(&serde_json::json!("interview")));
    }
}
