//! Sanitization of raw model replies

/// Strip a markdown code fence from a model reply
///
/// Models sometimes wrap their output in a triple-backtick block with an
/// optional `json` tag despite being instructed not to. Returns the inner
/// text with the fence and tag removed; text without a fence passes
/// through trimmed.
pub fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();

    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };

    // Drop everything after the closing fence, if present
    let inner = match inner.find("```") {
        Some(end) => &inner[..end],
        None => inner,
    };

    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(
            strip_code_fence(r#"{"category": "billing"}"#),
            r#"{"category": "billing"}"#
        );
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(strip_code_fence("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_strips_fence_with_json_tag() {
        let raw = "```json\n{\"category\": \"billing\", \"priority\": \"high\"}\n```";
        assert_eq!(
            strip_code_fence(raw),
            "{\"category\": \"billing\", \"priority\": \"high\"}"
        );
    }

    #[test]
    fn test_strips_fence_without_tag() {
        let raw = "```\n{\"category\": \"account\"}\n```";
        assert_eq!(strip_code_fence(raw), "{\"category\": \"account\"}");
    }

    #[test]
    fn test_unterminated_fence() {
        let raw = "```json\n{\"priority\": \"low\"}";
        assert_eq!(strip_code_fence(raw), "{\"priority\": \"low\"}");
    }
}
