//! Classification endpoint
//!
//! Suggests a category and priority for a free-text ticket description.
//! Once input validation passes this endpoint always succeeds; the
//! classification service absorbs every downstream failure into its
//! fallback suggestion.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::{ApiError, FieldErrors};
use crate::model::{Category, Priority};
use crate::service::ClassificationService;

const MIN_DESCRIPTION_LENGTH: usize = 10;

/// Request body for classification
#[derive(Debug, Deserialize, ToSchema)]
pub struct ClassifyRequest {
    pub description: Option<String>,
}

/// Suggested triage values for a description
#[derive(Debug, Serialize, ToSchema)]
pub struct ClassifyResponse {
    pub suggested_category: Category,
    pub suggested_priority: Priority,
}

fn validate_classify(request: &ClassifyRequest) -> Result<String, FieldErrors> {
    let mut errors = FieldErrors::new();

    let description = request.description.as_deref().map(str::trim).unwrap_or("");
    if description.chars().count() < MIN_DESCRIPTION_LENGTH {
        errors.add(
            "description",
            format!(
                "Description must be at least {} characters.",
                MIN_DESCRIPTION_LENGTH
            ),
        );
    }

    errors.into_result(description.to_string())
}

/// Suggest a category and priority for a ticket description
#[utoipa::path(
    post,
    path = "/v1/tickets/classify",
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "Suggestion produced", body = ClassifyResponse),
        (status = 400, description = "Description too short", body = crate::api::error::ErrorResponse)
    ),
    tag = "tickets"
)]
#[post("/v1/tickets/classify")]
pub async fn classify_ticket(
    service: web::Data<ClassificationService>,
    request: web::Json<ClassifyRequest>,
) -> Result<HttpResponse, ApiError> {
    let description = validate_classify(&request)?;
    let suggestion = service.classify(&description).await;

    Ok(HttpResponse::Ok().json(ClassifyResponse {
        suggested_category: suggestion.category,
        suggested_priority: suggestion.priority,
    }))
}

/// Configure classification routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(classify_ticket);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(description: Option<&str>) -> ClassifyRequest {
        ClassifyRequest {
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_rejects_missing_description() {
        assert!(validate_classify(&request(None)).is_err());
    }

    #[test]
    fn test_rejects_short_description() {
        assert!(validate_classify(&request(Some("too short"))).is_err());
        // Whitespace padding does not count toward the minimum
        assert!(validate_classify(&request(Some("   short      "))).is_err());
    }

    #[test]
    fn test_accepts_long_enough_description() {
        let description = validate_classify(&request(Some("  my payment failed twice  ")));
        assert_eq!(description.unwrap(), "my payment failed twice");
    }
}
