//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::error::ErrorResponse;
use crate::api::classify::{ClassifyRequest, ClassifyResponse};
use crate::api::health::{DependencyHealth, HealthStatus, ReadinessStatus};
use crate::api::ticket::{CreateTicketRequest, UpdateTicketRequest};
use crate::model::{
    Category, CategoryBreakdown, Priority, PriorityBreakdown, Status, Ticket, TicketStats,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::ticket::create_ticket,
        crate::api::ticket::list_tickets,
        crate::api::ticket::ticket_stats,
        crate::api::ticket::get_ticket,
        crate::api::ticket::update_ticket,
        crate::api::classify::classify_ticket,
        crate::api::health::liveness,
        crate::api::health::readiness,
    ),
    components(schemas(
        Ticket,
        Category,
        Priority,
        Status,
        TicketStats,
        PriorityBreakdown,
        CategoryBreakdown,
        CreateTicketRequest,
        UpdateTicketRequest,
        ClassifyRequest,
        ClassifyResponse,
        ErrorResponse,
        HealthStatus,
        ReadinessStatus,
        DependencyHealth,
    )),
    tags(
        (name = "tickets", description = "Ticket intake, triage and statistics"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => HttpResponse::Ok().content_type("text/yaml").body(yaml),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render OpenAPI YAML");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
