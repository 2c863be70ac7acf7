//! Prompt assembly for workflow log analysis

/// System instruction sent with every analysis request
pub const ANALYST_SYSTEM_PROMPT: &str = "You are a technical analyst specializing in workflow optimization and error resolution.\n\
You provide clear, actionable recommendations in structured JSON format.\n\
You always respond with valid JSON only - no additional text, no explanations, no markdown formatting.";

/// Build the analysis prompt embedding the workflow name, a recent-log
/// excerpt, and the user's query, with the response-format contract the
/// normalizer expects: one raw JSON object with exactly three keys.
pub fn analysis_prompt(workflow_name: &str, query_text: &str, logs_text: &str) -> String {
    let logs_text = if logs_text.is_empty() {
        "No recent logs available."
    } else {
        logs_text
    };

    format!(
        r#"Analyze the workflow logs and provide structured recommendations.

WORKFLOW: {workflow_name}
USER QUERY: {query_text}

RECENT LOGS:
{logs_text}

INSTRUCTIONS:
1. Analyze error patterns in the logs
2. Create practical transformation rules
3. Suggest actionable fixes with priorities
4. Keep analysis concise and practical

RESPONSE FORMAT - RAW JSON ONLY (no other text, no markdown):
{{
    "transformation_rules": ["clear rule 1", "specific rule 2", "actionable rule 3"],
    "error_analysis": "brief analysis of main issues",
    "suggested_fixes": [
        {{
            "fix": "specific action to take",
            "priority": "high",
            "impact": "what this will improve"
        }}
    ]
}}

IMPORTANT: Respond with valid JSON only, starting with {{ and ending with }}."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_workflow_context() {
        let prompt = analysis_prompt(
            "Customer Data Migration",
            "why are emails missing?",
            "Error: Missing email addresses for 15 customers",
        );

        assert!(prompt.contains("WORKFLOW: Customer Data Migration"));
        assert!(prompt.contains("USER QUERY: why are emails missing?"));
        assert!(prompt.contains("Missing email addresses for 15 customers"));
        assert!(prompt.contains("\"transformation_rules\""));
        assert!(prompt.contains("\"error_analysis\""));
        assert!(prompt.contains("\"suggested_fixes\""));
    }

    #[test]
    fn test_prompt_substitutes_empty_logs() {
        let prompt = analysis_prompt("wf", "query", "");
        assert!(prompt.contains("No recent logs available."));
    }
}
