//! REST API endpoints for support tickets

use actix_web::{HttpResponse, get, patch, post, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::api::error::{ApiError, FieldErrors};
use crate::db::repository::TicketRepository;
use crate::model::{
    Category, NewTicket, Priority, Status, Ticket, TicketFilter, TicketPatch, TicketStats,
};

const MAX_TITLE_LENGTH: usize = 200;

/// Request body for creating a ticket
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTicketRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Defaults to `general` when omitted
    pub category: Option<String>,
    /// Defaults to `medium` when omitted
    pub priority: Option<String>,
    /// Defaults to `open` when omitted
    pub status: Option<String>,
}

/// Request body for a partial ticket update; only supplied fields change
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTicketRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

/// Query parameters for listing tickets
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListTicketsParams {
    /// Filter by category (billing, technical, account, general)
    pub category: Option<String>,
    /// Filter by priority (low, medium, high, critical)
    pub priority: Option<String>,
    /// Filter by status (open, in_progress, resolved, closed)
    pub status: Option<String>,
    /// Substring search over title and description
    pub search: Option<String>,
}

fn validate_title(title: &str, errors: &mut FieldErrors) -> Option<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        errors.add("title", "Title cannot be blank.");
        return None;
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        errors.add(
            "title",
            format!("Title cannot exceed {} characters.", MAX_TITLE_LENGTH),
        );
        return None;
    }
    Some(trimmed.to_string())
}

fn validate_description(description: &str, errors: &mut FieldErrors) -> Option<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        errors.add("description", "Description cannot be blank.");
        return None;
    }
    Some(trimmed.to_string())
}

fn validate_category(value: &str, errors: &mut FieldErrors) -> Option<Category> {
    let category = Category::parse(value.trim());
    if category.is_none() {
        let allowed = Category::ALL.map(|c| c.as_str()).join(", ");
        errors.add(
            "category",
            format!("Invalid category. Expected one of: {}.", allowed),
        );
    }
    category
}

fn validate_priority(value: &str, errors: &mut FieldErrors) -> Option<Priority> {
    let priority = Priority::parse(value.trim());
    if priority.is_none() {
        let allowed = Priority::ALL.map(|p| p.as_str()).join(", ");
        errors.add(
            "priority",
            format!("Invalid priority. Expected one of: {}.", allowed),
        );
    }
    priority
}

fn validate_status(value: &str, errors: &mut FieldErrors) -> Option<Status> {
    let status = Status::parse(value.trim());
    if status.is_none() {
        errors.add(
            "status",
            "Invalid status. Expected one of: open, in_progress, resolved, closed.",
        );
    }
    status
}

/// Validate a create request into a `NewTicket` with defaults applied
fn validate_create(request: &CreateTicketRequest) -> Result<NewTicket, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = match request.title.as_deref() {
        Some(title) => validate_title(title, &mut errors),
        None => {
            errors.add("title", "Title is required.");
            None
        }
    };

    let description = match request.description.as_deref() {
        Some(description) => validate_description(description, &mut errors),
        None => {
            errors.add("description", "Description is required.");
            None
        }
    };

    let category = match request.category.as_deref() {
        Some(value) => validate_category(value, &mut errors),
        None => Some(Category::General),
    };

    let priority = match request.priority.as_deref() {
        Some(value) => validate_priority(value, &mut errors),
        None => Some(Priority::Medium),
    };

    let status = match request.status.as_deref() {
        Some(value) => validate_status(value, &mut errors),
        None => Some(Status::Open),
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // All fields are Some once validation collected no errors
    Ok(NewTicket {
        title: title.unwrap_or_default(),
        description: description.unwrap_or_default(),
        category: category.unwrap_or(Category::General),
        priority: priority.unwrap_or(Priority::Medium),
        status: status.unwrap_or(Status::Open),
    })
}

/// Validate an update request into a `TicketPatch`; absent fields stay untouched
fn validate_update(request: &UpdateTicketRequest) -> Result<TicketPatch, FieldErrors> {
    let mut errors = FieldErrors::new();

    let patch = TicketPatch {
        title: request
            .title
            .as_deref()
            .and_then(|title| validate_title(title, &mut errors)),
        description: request
            .description
            .as_deref()
            .and_then(|description| validate_description(description, &mut errors)),
        category: request
            .category
            .as_deref()
            .and_then(|value| validate_category(value, &mut errors)),
        priority: request
            .priority
            .as_deref()
            .and_then(|value| validate_priority(value, &mut errors)),
        status: request
            .status
            .as_deref()
            .and_then(|value| validate_status(value, &mut errors)),
    };

    errors.into_result(patch)
}

/// Validate list query parameters into a `TicketFilter`
fn validate_filter(params: &ListTicketsParams) -> Result<TicketFilter, FieldErrors> {
    let mut errors = FieldErrors::new();

    let filter = TicketFilter {
        category: params
            .category
            .as_deref()
            .and_then(|value| validate_category(value, &mut errors)),
        priority: params
            .priority
            .as_deref()
            .and_then(|value| validate_priority(value, &mut errors)),
        status: params
            .status
            .as_deref()
            .and_then(|value| validate_status(value, &mut errors)),
        search: params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    };

    errors.into_result(filter)
}

/// Create a new ticket
#[utoipa::path(
    post,
    path = "/v1/tickets",
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "Ticket created", body = Ticket),
        (status = 400, description = "Validation error", body = crate::api::error::ErrorResponse)
    ),
    tag = "tickets"
)]
#[post("/v1/tickets")]
pub async fn create_ticket(
    repository: web::Data<TicketRepository>,
    request: web::Json<CreateTicketRequest>,
) -> Result<HttpResponse, ApiError> {
    let new_ticket = validate_create(&request)?;
    let ticket = repository.insert(&new_ticket).await?;

    tracing::info!(id = ticket.id, category = %ticket.category.as_str(), "Ticket created");
    Ok(HttpResponse::Created().json(ticket))
}

/// List tickets, newest first, with optional filters and search
#[utoipa::path(
    get,
    path = "/v1/tickets",
    params(ListTicketsParams),
    responses(
        (status = 200, description = "Tickets retrieved", body = [Ticket]),
        (status = 400, description = "Invalid filter value", body = crate::api::error::ErrorResponse)
    ),
    tag = "tickets"
)]
#[get("/v1/tickets")]
pub async fn list_tickets(
    repository: web::Data<TicketRepository>,
    params: web::Query<ListTicketsParams>,
) -> Result<HttpResponse, ApiError> {
    let filter = validate_filter(&params)?;
    let tickets = repository.list(&filter).await?;
    Ok(HttpResponse::Ok().json(tickets))
}

/// Aggregate ticket metrics
#[utoipa::path(
    get,
    path = "/v1/tickets/stats",
    responses(
        (status = 200, description = "Stats computed", body = TicketStats)
    ),
    tag = "tickets"
)]
#[get("/v1/tickets/stats")]
pub async fn ticket_stats(
    repository: web::Data<TicketRepository>,
) -> Result<HttpResponse, ApiError> {
    let stats = repository.stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Get a ticket by ID
#[utoipa::path(
    get,
    path = "/v1/tickets/{id}",
    params(("id" = i64, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket retrieved", body = Ticket),
        (status = 404, description = "Ticket not found", body = crate::api::error::ErrorResponse)
    ),
    tag = "tickets"
)]
#[get("/v1/tickets/{id}")]
pub async fn get_ticket(
    repository: web::Data<TicketRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let ticket = repository.get(id).await?;
    Ok(HttpResponse::Ok().json(ticket))
}

/// Partially update a ticket
#[utoipa::path(
    patch,
    path = "/v1/tickets/{id}",
    params(("id" = i64, Path, description = "Ticket ID")),
    request_body = UpdateTicketRequest,
    responses(
        (status = 200, description = "Ticket updated", body = Ticket),
        (status = 400, description = "Validation error", body = crate::api::error::ErrorResponse),
        (status = 404, description = "Ticket not found", body = crate::api::error::ErrorResponse)
    ),
    tag = "tickets"
)]
#[patch("/v1/tickets/{id}")]
pub async fn update_ticket(
    repository: web::Data<TicketRepository>,
    path: web::Path<i64>,
    request: web::Json<UpdateTicketRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let patch = validate_update(&request)?;
    let ticket = repository.update(id, &patch).await?;

    tracing::info!(id = id, "Ticket updated");
    Ok(HttpResponse::Ok().json(ticket))
}

/// Configure ticket routes
///
/// The stats route must be registered before the `{id}` route so that
/// `/v1/tickets/stats` is not captured as a path parameter.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_ticket)
        .service(list_tickets)
        .service(ticket_stats)
        .service(get_ticket)
        .service(update_ticket);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(
        title: Option<&str>,
        description: Option<&str>,
    ) -> CreateTicketRequest {
        CreateTicketRequest {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            category: None,
            priority: None,
            status: None,
        }
    }

    #[test]
    fn test_create_applies_defaults() {
        let ticket =
            validate_create(&create_request(Some("Printer on fire"), Some("It is smoking")))
                .unwrap();
        assert_eq!(ticket.category, Category::General);
        assert_eq!(ticket.priority, Priority::Medium);
        assert_eq!(ticket.status, Status::Open);
    }

    #[test]
    fn test_create_trims_fields() {
        let ticket =
            validate_create(&create_request(Some("  Refund  "), Some("  Charged twice  ")))
                .unwrap();
        assert_eq!(ticket.title, "Refund");
        assert_eq!(ticket.description, "Charged twice");
    }

    #[test]
    fn test_create_rejects_blank_title() {
        assert!(validate_create(&create_request(Some(""), Some("valid text"))).is_err());
        assert!(validate_create(&create_request(Some("  "), Some("valid text"))).is_err());
        assert!(validate_create(&create_request(None, Some("valid text"))).is_err());
    }

    #[test]
    fn test_create_rejects_blank_description() {
        assert!(validate_create(&create_request(Some("Title"), Some("   "))).is_err());
        assert!(validate_create(&create_request(Some("Title"), None)).is_err());
    }

    #[test]
    fn test_create_rejects_over_long_title() {
        let long_title = "x".repeat(201);
        assert!(validate_create(&create_request(Some(&long_title), Some("valid"))).is_err());

        let max_title = "x".repeat(200);
        assert!(validate_create(&create_request(Some(&max_title), Some("valid"))).is_ok());
    }

    #[test]
    fn test_create_rejects_invalid_enum_values() {
        let request = CreateTicketRequest {
            title: Some("Title".to_string()),
            description: Some("Description".to_string()),
            category: Some("shipping".to_string()),
            priority: Some("urgent".to_string()),
            status: Some("done".to_string()),
        };
        let errors = validate_create(&request).unwrap_err();
        let message = errors.to_string();
        assert!(message.contains("category"));
        assert!(message.contains("priority"));
        assert!(message.contains("status"));
    }

    #[test]
    fn test_create_accepts_explicit_enums() {
        let request = CreateTicketRequest {
            title: Some("Outage".to_string()),
            description: Some("Everything is down".to_string()),
            category: Some("technical".to_string()),
            priority: Some("critical".to_string()),
            status: Some("in_progress".to_string()),
        };
        let ticket = validate_create(&request).unwrap();
        assert_eq!(ticket.category, Category::Technical);
        assert_eq!(ticket.priority, Priority::Critical);
        assert_eq!(ticket.status, Status::InProgress);
    }

    #[test]
    fn test_update_allows_partial_fields() {
        let request = UpdateTicketRequest {
            title: None,
            description: None,
            category: None,
            priority: None,
            status: Some("resolved".to_string()),
        };
        let patch = validate_update(&request).unwrap();
        assert!(patch.title.is_none());
        assert_eq!(patch.status, Some(Status::Resolved));
    }

    #[test]
    fn test_update_validates_supplied_fields() {
        let request = UpdateTicketRequest {
            title: Some("   ".to_string()),
            description: None,
            category: None,
            priority: None,
            status: None,
        };
        assert!(validate_update(&request).is_err());
    }

    #[test]
    fn test_filter_rejects_unknown_enum_value() {
        let params = ListTicketsParams {
            category: Some("shipping".to_string()),
            priority: None,
            status: None,
            search: None,
        };
        assert!(validate_filter(&params).is_err());
    }

    #[test]
    fn test_filter_ignores_blank_search() {
        let params = ListTicketsParams {
            category: Some("technical".to_string()),
            priority: None,
            status: None,
            search: Some("   ".to_string()),
        };
        let filter = validate_filter(&params).unwrap();
        assert_eq!(filter.category, Some(Category::Technical));
        assert!(filter.search.is_none());
    }
}
