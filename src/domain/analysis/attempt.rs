//! Per-model attempt bookkeeping for one orchestration call

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of one model invocation within a fallback-chain traversal.
/// Appended once per model tried, in chain order, and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub model: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Attempt {
    pub fn succeeded(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            success: true,
            error: None,
        }
    }

    pub fn failed(model: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            success: false,
            error: Some(error.into()),
        }
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.success, &self.error) {
            (true, _) => write!(f, "{}: ok", self.model),
            (false, Some(error)) => write!(f, "{}: failed ({})", self.model, error),
            (false, None) => write!(f, "{}: failed", self.model),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_display() {
        let ok = Attempt::succeeded("sonar-large-chat");
        assert_eq!(ok.to_string(), "sonar-large-chat: ok");

        let failed = Attempt::failed("sonar-small-online", "connection refused");
        assert_eq!(
            failed.to_string(),
            "sonar-small-online: failed (connection refused)"
        );
    }

    #[test]
    fn test_attempt_serialization_skips_absent_error() {
        let json = serde_json::to_string(&Attempt::succeeded("m")).unwrap();
        assert!(!json.contains("error"));

        let json = serde_json::to_string(&Attempt::failed("m", "boom")).unwrap();
        assert!(json.contains("\"error\":\"boom\""));
    }
}
