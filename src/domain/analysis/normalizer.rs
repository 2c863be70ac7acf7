//! Normalization of loosely-structured model replies
//!
//! Models are instructed to reply with a JSON object carrying exactly three
//! keys, but partial or malformed answers are common. `validate_structure` is
//! the syntactic gate used by the fallback chain; `normalize` coerces whatever
//! came back into a fully-populated [`NormalizedAnalysis`] with field-level
//! defaults. Neither ever fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_RULES_PLACEHOLDER: &str = "No transformation rules generated";
pub const DEFAULT_ANALYSIS_PLACEHOLDER: &str = "No error analysis provided";

/// A single suggested remediation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedFix {
    pub fix: String,
    pub priority: String,
    pub impact: String,
}

impl SuggestedFix {
    pub fn new(
        fix: impl Into<String>,
        priority: impl Into<String>,
        impact: impl Into<String>,
    ) -> Self {
        Self {
            fix: fix.into(),
            priority: priority.into(),
            impact: impact.into(),
        }
    }

    fn placeholder() -> Self {
        Self::new("No specific fixes suggested", "medium", "Unknown")
    }
}

/// Fixed-shape analysis result extracted from a model reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAnalysis {
    pub transformation_rules: Vec<String>,
    pub error_analysis: String,
    pub suggested_fixes: Vec<SuggestedFix>,
}

/// Syntactic gate: true only when the text parses as JSON with an object at
/// the top level. Semantic correctness is not checked here.
pub fn validate_structure(text: &str) -> bool {
    matches!(serde_json::from_str::<Value>(text), Ok(Value::Object(_)))
}

/// Coerce a raw model reply into a [`NormalizedAnalysis`], defaulting each
/// field independently. A reply that does not parse at all yields the
/// parse-failure variant instead of an error.
pub fn normalize(text: &str) -> NormalizedAnalysis {
    let parsed: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, "JSON parsing failed for AI response");
            return NormalizedAnalysis {
                transformation_rules: vec!["JSON parsing error in AI response".to_string()],
                error_analysis: format!("Failed to parse AI response as JSON: {}", e),
                suggested_fixes: vec![SuggestedFix::new(
                    "Check AI response format and prompt engineering",
                    "high",
                    "Ensure consistent JSON output from AI model",
                )],
            };
        }
    };

    NormalizedAnalysis {
        transformation_rules: extract_rules(parsed.get("transformation_rules")),
        error_analysis: extract_analysis(parsed.get("error_analysis")),
        suggested_fixes: extract_fixes(parsed.get("suggested_fixes")),
    }
}

fn extract_rules(field: Option<&Value>) -> Vec<String> {
    match field {
        Some(Value::String(rule)) => vec![rule.clone()],
        Some(Value::Array(rules)) if !rules.is_empty() => rules
            .iter()
            .map(|rule| match rule {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => vec![DEFAULT_RULES_PLACEHOLDER.to_string()],
    }
}

// An empty string counts as missing, same as a wrong type.
fn extract_analysis(field: Option<&Value>) -> String {
    match field {
        Some(Value::String(analysis)) if !analysis.is_empty() => analysis.clone(),
        _ => DEFAULT_ANALYSIS_PLACEHOLDER.to_string(),
    }
}

fn extract_fixes(field: Option<&Value>) -> Vec<SuggestedFix> {
    let fixes = match field {
        Some(Value::Array(fixes)) if !fixes.is_empty() => fixes,
        _ => return vec![SuggestedFix::placeholder()],
    };

    let validated: Vec<SuggestedFix> = fixes
        .iter()
        .filter_map(|fix| match fix {
            Value::Object(entry) => Some(SuggestedFix::new(
                string_or(entry.get("fix"), "Unknown fix"),
                string_or(entry.get("priority"), "medium"),
                string_or(entry.get("impact"), "Unknown impact"),
            )),
            Value::String(fix) => Some(SuggestedFix::new(fix, "medium", "General improvement")),
            _ => None,
        })
        .collect();

    // A list with no usable entries is treated the same as no fixes at all
    if validated.is_empty() {
        vec![SuggestedFix::placeholder()]
    } else {
        validated
    }
}

fn string_or(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_structure_accepts_only_objects() {
        assert!(!validate_structure("not json"));
        assert!(!validate_structure("[1,2,3]"));
        assert!(!validate_structure("\"a string\""));
        assert!(!validate_structure("42"));
        assert!(validate_structure("{}"));
        assert!(validate_structure(r#"{"error_analysis": "fine"}"#));
    }

    #[test]
    fn test_normalize_complete_response() {
        let result = normalize(
            r#"{
                "transformation_rules": ["trim whitespace", "coerce dates to ISO-8601"],
                "error_analysis": "Date columns use three different formats",
                "suggested_fixes": [
                    {"fix": "Normalize dates at ingestion", "priority": "high", "impact": "Removes parse failures"}
                ]
            }"#,
        );

        assert_eq!(
            result.transformation_rules,
            vec!["trim whitespace", "coerce dates to ISO-8601"]
        );
        assert_eq!(
            result.error_analysis,
            "Date columns use three different formats"
        );
        assert_eq!(
            result.suggested_fixes,
            vec![SuggestedFix::new(
                "Normalize dates at ingestion",
                "high",
                "Removes parse failures"
            )]
        );
    }

    #[test]
    fn test_normalize_wraps_single_string_rule() {
        let result =
            normalize(r#"{"transformation_rules": "fix X", "error_analysis": "", "suggested_fixes": []}"#);

        assert_eq!(result.transformation_rules, vec!["fix X"]);
        // Empty analysis string is treated as missing
        assert_eq!(result.error_analysis, DEFAULT_ANALYSIS_PLACEHOLDER);
        // An empty fixes array means no fixes, which gets the placeholder
        assert_eq!(result.suggested_fixes, vec![SuggestedFix::placeholder()]);
    }

    #[test]
    fn test_normalize_defaults_for_missing_fields() {
        let result = normalize("{}");

        assert_eq!(
            result.transformation_rules,
            vec![DEFAULT_RULES_PLACEHOLDER]
        );
        assert_eq!(result.error_analysis, DEFAULT_ANALYSIS_PLACEHOLDER);
        assert_eq!(result.suggested_fixes, vec![SuggestedFix::placeholder()]);
    }

    #[test]
    fn test_normalize_defaults_for_wrong_types() {
        let result = normalize(
            r#"{"transformation_rules": 42, "error_analysis": ["not", "a", "string"], "suggested_fixes": "nope"}"#,
        );

        assert_eq!(
            result.transformation_rules,
            vec![DEFAULT_RULES_PLACEHOLDER]
        );
        assert_eq!(result.error_analysis, DEFAULT_ANALYSIS_PLACEHOLDER);
        assert_eq!(result.suggested_fixes, vec![SuggestedFix::placeholder()]);
    }

    #[test]
    fn test_normalize_fix_entries_element_by_element() {
        let result = normalize(
            r#"{
                "suggested_fixes": [
                    {"fix": "Add retry", "priority": "low"},
                    "Validate emails before load",
                    17,
                    {"impact": "Fewer nulls"}
                ]
            }"#,
        );

        assert_eq!(
            result.suggested_fixes,
            vec![
                SuggestedFix::new("Add retry", "low", "Unknown impact"),
                SuggestedFix::new("Validate emails before load", "medium", "General improvement"),
                SuggestedFix::new("Unknown fix", "medium", "Fewer nulls"),
            ]
        );
    }

    #[test]
    fn test_normalize_parse_failure_variant() {
        let result = normalize("this is not json");

        assert_eq!(
            result.transformation_rules,
            vec!["JSON parsing error in AI response"]
        );
        assert!(result.error_analysis.starts_with("Failed to parse AI response as JSON:"));
        assert_eq!(result.suggested_fixes.len(), 1);
        assert_eq!(result.suggested_fixes[0].priority, "high");
    }

    #[test]
    fn test_normalize_drops_unusable_fix_entries_to_placeholder() {
        let result = normalize(r#"{"suggested_fixes": [17, null, [1, 2]]}"#);
        assert_eq!(result.suggested_fixes, vec![SuggestedFix::placeholder()]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in [
            r#"{"transformation_rules": "fix X", "error_analysis": "", "suggested_fixes": [17]}"#,
            r#"{"suggested_fixes": [{"fix": "f"}, "bare"]}"#,
            "not json at all",
            "{}",
        ] {
            let first = normalize(raw);
            let serialized = serde_json::to_string(&first).unwrap();
            let second = normalize(&serialized);

            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_normalize_preserves_non_string_rule_entries() {
        let result = normalize(r#"{"transformation_rules": ["keep", {"step": 1}]}"#);
        assert_eq!(result.transformation_rules[0], "keep");
        assert_eq!(result.transformation_rules[1], r#"{"step":1}"#);
    }
}
