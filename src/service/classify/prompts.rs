//! Prompt for ticket classification

/// Classification prompt template
///
/// Each category and priority is defined with concrete examples so the
/// model does not have to guess, and the model is told to output only raw
/// JSON. A tight max_tokens on the request enforces the latter.
const CLASSIFY_PROMPT: &str = r#"You are a support ticket triage assistant. Given a user's support ticket description, classify it into exactly one category and one priority level.

Categories:
- billing   : payment issues, invoices, charges, refunds, subscriptions, pricing
- technical : bugs, errors, crashes, performance problems, API/integration issues
- account   : login, password reset, profile settings, permissions, access control
- general   : anything that does not clearly fit the above three categories

Priority levels:
- critical : system completely down, data loss, active security breach, full outage
- high     : major feature broken, significant business impact, many users affected
- medium   : partial functionality impaired, moderate inconvenience, workaround exists
- low      : cosmetic issue, general question, feature request, no time pressure

Respond with ONLY a valid JSON object - no markdown, no explanation, no extra text:
{"category": "<billing|technical|account|general>", "priority": "<low|medium|high|critical>"}

Ticket description:
"#;

/// Build the classification prompt for a ticket description
pub fn build_classify_prompt(description: &str) -> String {
    format!("{}{}", CLASSIFY_PROMPT, description.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_trimmed_description() {
        let prompt = build_classify_prompt("  checkout page crashes  ");
        assert!(prompt.ends_with("Ticket description:\ncheckout page crashes"));
    }

    #[test]
    fn test_prompt_enumerates_all_choices() {
        let prompt = build_classify_prompt("anything");
        for category in ["billing", "technical", "account", "general"] {
            assert!(prompt.contains(category));
        }
        for priority in ["low", "medium", "high", "critical"] {
            assert!(prompt.contains(priority));
        }
        assert!(prompt.contains("ONLY a valid JSON object"));
    }
}
