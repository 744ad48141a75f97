// Reporting Hint - per-error level/fingerprint overrides

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::level::Level;

/// Level and fingerprint hints attached to a reportable error.
///
/// `level` holds the caller's raw token. It is not validated here; the
/// reporter resolves it at report time and falls back to its minimum level
/// when the token is unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportingHint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<Value>,
}

impl ReportingHint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_fingerprint(mut self, fingerprint: impl Into<Value>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    /// Build a hint from an arbitrary options object.
    ///
    /// Only `level` and `fingerprint` are copied; every other key is dropped.
    /// A non-object input, a non-string `level` or a `null` fingerprint
    /// leave the corresponding field unset.
    pub fn from_value(options: &Value) -> Self {
        let Some(options) = options.as_object() else {
            return Self::default();
        };

        let level = options
            .get("level")
            .and_then(Value::as_str)
            .map(str::to_string);

        let fingerprint = match options.get("fingerprint") {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.clone()),
        };

        Self { level, fingerprint }
    }

    /// The hinted level, if it names one of the known tokens
    pub fn resolved_level(&self) -> Option<Level> {
        self.level.as_deref().and_then(Level::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_keeps_only_allowed_keys() {
        let hint = ReportingHint::from_value(&json!({
            "level": "info",
            "fingerprint": "grp-1",
            "extra": true,
            "report": false
        }));

        assert_eq!(hint.level.as_deref(), Some("info"));
        assert_eq!(hint.fingerprint, Some(json!("grp-1")));

        let round = serde_json::to_value(&hint).unwrap();
        assert_eq!(round, json!({"level": "info", "fingerprint": "grp-1"}));
    }

    #[test]
    fn test_from_value_non_object_defaults() {
        assert_eq!(ReportingHint::from_value(&json!("error")), ReportingHint::default());
        assert_eq!(ReportingHint::from_value(&Value::Null), ReportingHint::default());
        assert_eq!(ReportingHint::from_value(&json!([1, 2])), ReportingHint::default());
    }

    #[test]
    fn test_from_value_ignores_non_string_level() {
        let hint = ReportingHint::from_value(&json!({"level": 50, "fingerprint": null}));
        assert_eq!(hint, ReportingHint::default());
    }

    #[test]
    fn test_structured_fingerprint_is_kept_as_is() {
        let hint = ReportingHint::from_value(&json!({"fingerprint": {"foo": "bar"}}));
        assert_eq!(hint.fingerprint, Some(json!({"foo": "bar"})));
        assert!(hint.level.is_none());
    }

    #[test]
    fn test_resolved_level() {
        assert_eq!(ReportingHint::new().with_level("warn").resolved_level(), Some(Level::Warn));
        assert_eq!(ReportingHint::new().with_level("loud").resolved_level(), None);
        assert_eq!(ReportingHint::new().resolved_level(), None);
    }
}
