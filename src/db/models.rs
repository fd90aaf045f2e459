//! Database models for ticket rows

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::model::{Category, Priority, Status, Ticket};

/// Database representation of a support ticket
#[derive(Debug, Clone, FromRow)]
pub struct TicketRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TicketRow {
    /// Convert database row to domain model
    ///
    /// Enum columns are only ever written through `as_str`, so unknown
    /// values can only appear through out-of-band writes; those fall back
    /// to the column defaults.
    pub fn into_domain(self) -> Ticket {
        let category = Category::parse(&self.category).unwrap_or(Category::General);
        let priority = Priority::parse(&self.priority).unwrap_or(Priority::Medium);
        let status = Status::parse(&self.status).unwrap_or(Status::Open);

        Ticket {
            id: self.id,
            title: self.title,
            description: self.description,
            category,
            priority,
            status,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, priority: &str, status: &str) -> TicketRow {
        TicketRow {
            id: 1,
            title: "Login broken".to_string(),
            description: "Cannot sign in since this morning".to_string(),
            category: category.to_string(),
            priority: priority.to_string(),
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_into_domain() {
        let ticket = row("account", "high", "in_progress").into_domain();
        assert_eq!(ticket.category, Category::Account);
        assert_eq!(ticket.priority, Priority::High);
        assert_eq!(ticket.status, Status::InProgress);
    }

    #[test]
    fn test_into_domain_unknown_values_fall_back() {
        let ticket = row("legacy", "p0", "archived").into_domain();
        assert_eq!(ticket.category, Category::General);
        assert_eq!(ticket.priority, Priority::Medium);
        assert_eq!(ticket.status, Status::Open);
    }
}
