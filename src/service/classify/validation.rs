//! Validation of model output against the allowed choice sets

use serde::Deserialize;

use super::error::ClassifyError;
use crate::model::{Category, Priority, Suggestion};

#[derive(Debug, Deserialize)]
struct RawSuggestion {
    #[serde(default)]
    category: String,
    #[serde(default)]
    priority: String,
}

/// Parse a cleaned model reply into a validated suggestion
///
/// Values are matched case-insensitively against the category and priority
/// enums. A single out-of-range field fails the whole reply; the caller
/// falls back to both defaults rather than trusting the other field.
pub fn parse_suggestion(text: &str) -> Result<Suggestion, ClassifyError> {
    let raw: RawSuggestion = serde_json::from_str(text)?;

    let category = Category::parse(&raw.category);
    let priority = Priority::parse(&raw.priority);

    match (category, priority) {
        (Some(category), Some(priority)) => Ok(Suggestion { category, priority }),
        _ => Err(ClassifyError::Validation(format!(
            "category={:?} priority={:?}",
            raw.category, raw.priority
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_reply() {
        let suggestion = parse_suggestion(r#"{"category": "billing", "priority": "high"}"#);
        assert_eq!(
            suggestion.unwrap(),
            Suggestion {
                category: Category::Billing,
                priority: Priority::High,
            }
        );
    }

    #[test]
    fn test_case_insensitive_acceptance() {
        let suggestion = parse_suggestion(r#"{"category": "BILLING", "priority": "High"}"#);
        assert_eq!(
            suggestion.unwrap(),
            Suggestion {
                category: Category::Billing,
                priority: Priority::High,
            }
        );
    }

    #[test]
    fn test_invalid_category_fails_whole_reply() {
        let result = parse_suggestion(r#"{"category": "unknown", "priority": "high"}"#);
        assert!(matches!(result, Err(ClassifyError::Validation(_))));
    }

    #[test]
    fn test_invalid_priority_fails_whole_reply() {
        let result = parse_suggestion(r#"{"category": "technical", "priority": "urgent"}"#);
        assert!(matches!(result, Err(ClassifyError::Validation(_))));
    }

    #[test]
    fn test_missing_fields() {
        let result = parse_suggestion(r#"{"category": "technical"}"#);
        assert!(matches!(result, Err(ClassifyError::Validation(_))));
    }

    #[test]
    fn test_non_json_reply() {
        let result = parse_suggestion("I think this is a billing issue.");
        assert!(matches!(result, Err(ClassifyError::Parse(_))));
    }
}
