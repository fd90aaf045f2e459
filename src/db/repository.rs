//! Repository for ticket database operations

use sqlx::PgPool;

use super::DbError;
use super::models::TicketRow;
use crate::model::{
    CategoryBreakdown, NewTicket, PriorityBreakdown, Ticket, TicketFilter, TicketPatch,
    TicketStats,
};

/// Repository for ticket operations
#[derive(Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new ticket and return the stored record
    pub async fn insert(&self, ticket: &NewTicket) -> Result<Ticket, DbError> {
        let row: TicketRow = sqlx::query_as(
            r#"
            INSERT INTO tickets (title, description, category, priority, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(ticket.category.as_str())
        .bind(ticket.priority.as_str())
        .bind(ticket.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = row.id, "Inserted ticket");
        Ok(row.into_domain())
    }

    /// Get a ticket by ID
    pub async fn get(&self, id: i64) -> Result<Ticket, DbError> {
        let row: TicketRow = sqlx::query_as("SELECT * FROM tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound(id))?;

        Ok(row.into_domain())
    }

    /// Apply a partial update; only supplied fields change
    pub async fn update(&self, id: i64, patch: &TicketPatch) -> Result<Ticket, DbError> {
        if patch.is_empty() {
            return self.get(id).await;
        }

        // Build dynamic SET clause
        let mut assignments = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(ref title) = patch.title {
            params.push(title.clone());
            assignments.push(format!("title = ${}", params.len()));
        }

        if let Some(ref description) = patch.description {
            params.push(description.clone());
            assignments.push(format!("description = ${}", params.len()));
        }

        if let Some(category) = patch.category {
            params.push(category.as_str().to_string());
            assignments.push(format!("category = ${}", params.len()));
        }

        if let Some(priority) = patch.priority {
            params.push(priority.as_str().to_string());
            assignments.push(format!("priority = ${}", params.len()));
        }

        if let Some(status) = patch.status {
            params.push(status.as_str().to_string());
            assignments.push(format!("status = ${}", params.len()));
        }

        let update_query = format!(
            "UPDATE tickets SET {} WHERE id = ${} RETURNING *",
            assignments.join(", "),
            params.len() + 1
        );

        let row: Option<TicketRow> = {
            let mut q = sqlx::query_as(&update_query);
            for param in &params {
                q = q.bind(param);
            }
            q.bind(id).fetch_optional(&self.pool).await?
        };

        let row = row.ok_or(DbError::NotFound(id))?;

        tracing::debug!(id = id, "Updated ticket");
        Ok(row.into_domain())
    }

    /// List tickets matching the filter, newest first
    pub async fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, DbError> {
        // Build dynamic query
        let mut conditions = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(category) = filter.category {
            params.push(category.as_str().to_string());
            conditions.push(format!("category = ${}", params.len()));
        }

        if let Some(priority) = filter.priority {
            params.push(priority.as_str().to_string());
            conditions.push(format!("priority = ${}", params.len()));
        }

        if let Some(status) = filter.status {
            params.push(status.as_str().to_string());
            conditions.push(format!("status = ${}", params.len()));
        }

        if let Some(ref search) = filter.search {
            params.push(format!("%{}%", escape_like(search)));
            conditions.push(format!(
                "(title ILIKE ${n} OR description ILIKE ${n})",
                n = params.len()
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_query = format!(
            "SELECT * FROM tickets {} ORDER BY created_at DESC, id DESC",
            where_clause
        );

        let rows: Vec<TicketRow> = {
            let mut q = sqlx::query_as(&select_query);
            for param in &params {
                q = q.bind(param);
            }
            q.fetch_all(&self.pool).await?
        };

        Ok(rows.into_iter().map(TicketRow::into_domain).collect())
    }

    /// Compute aggregate ticket metrics
    pub async fn stats(&self) -> Result<TicketStats, DbError> {
        let total_tickets: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tickets")
            .fetch_one(&self.pool)
            .await?;

        let open_tickets: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM tickets WHERE status = 'open'")
                .fetch_one(&self.pool)
                .await?;

        let active_days: i64 =
            sqlx::query_scalar("SELECT COUNT(DISTINCT created_at::date) FROM tickets")
                .fetch_one(&self.pool)
                .await?;

        let priority_rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT priority, COUNT(*) FROM tickets GROUP BY priority")
                .fetch_all(&self.pool)
                .await?;

        let category_rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT category, COUNT(*) FROM tickets GROUP BY category")
                .fetch_all(&self.pool)
                .await?;

        let priority_breakdown = priority_breakdown_from_rows(&priority_rows);
        let category_breakdown = category_breakdown_from_rows(&category_rows);

        tracing::debug!(
            total = total_tickets,
            priority_sum = priority_breakdown.total(),
            category_sum = category_breakdown.total(),
            "Computed ticket stats"
        );

        Ok(TicketStats {
            total_tickets,
            open_tickets,
            avg_tickets_per_day: average_per_day(total_tickets, active_days),
            priority_breakdown,
            category_breakdown,
        })
    }
}

/// Escape LIKE metacharacters in user-supplied search text
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Total tickets divided by the number of distinct days with at least one
/// ticket, rounded to one decimal; 0.0 when there are no tickets
fn average_per_day(total: i64, active_days: i64) -> f64 {
    if active_days == 0 {
        return 0.0;
    }
    let avg = total as f64 / active_days as f64;
    (avg * 10.0).round() / 10.0
}

/// Zero-filled per-priority counts from grouped rows
fn priority_breakdown_from_rows(rows: &[(String, i64)]) -> PriorityBreakdown {
    let mut breakdown = PriorityBreakdown::default();
    for (priority, count) in rows {
        match priority.as_str() {
            "low" => breakdown.low = *count,
            "medium" => breakdown.medium = *count,
            "high" => breakdown.high = *count,
            "critical" => breakdown.critical = *count,
            other => tracing::warn!(priority = %other, "Unexpected priority value in stats"),
        }
    }
    breakdown
}

/// Zero-filled per-category counts from grouped rows
fn category_breakdown_from_rows(rows: &[(String, i64)]) -> CategoryBreakdown {
    let mut breakdown = CategoryBreakdown::default();
    for (category, count) in rows {
        match category.as_str() {
            "billing" => breakdown.billing = *count,
            "technical" => breakdown.technical = *count,
            "account" => breakdown.account = *count,
            "general" => breakdown.general = *count,
            other => tracing::warn!(category = %other, "Unexpected category value in stats"),
        }
    }
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_per_day_no_tickets() {
        assert_eq!(average_per_day(0, 0), 0.0);
    }

    #[test]
    fn test_average_per_day_rounds_to_one_decimal() {
        assert_eq!(average_per_day(7, 3), 2.3);
        assert_eq!(average_per_day(10, 4), 2.5);
        assert_eq!(average_per_day(3, 1), 3.0);
    }

    #[test]
    fn test_priority_breakdown_zero_fills_missing_levels() {
        let rows = vec![("low".to_string(), 1), ("high".to_string(), 2)];
        let breakdown = priority_breakdown_from_rows(&rows);
        assert_eq!(
            breakdown,
            PriorityBreakdown {
                low: 1,
                medium: 0,
                high: 2,
                critical: 0,
            }
        );
        assert_eq!(breakdown.total(), 3);
    }

    #[test]
    fn test_category_breakdown_zero_fills_missing_categories() {
        let rows = vec![("technical".to_string(), 5)];
        let breakdown = category_breakdown_from_rows(&rows);
        assert_eq!(breakdown.technical, 5);
        assert_eq!(breakdown.billing, 0);
        assert_eq!(breakdown.total(), 5);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100% done"), "100\\% done");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
        assert_eq!(escape_like("plain"), "plain");
    }
}
