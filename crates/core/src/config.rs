// Reporter configuration

use crate::domain::level::{self, Level};
use serde::{Deserialize, Serialize};

/// How an absent fingerprint appears in the outgoing payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerprintPolicy {
    /// Leave the `fingerprint` key out
    #[default]
    Omit,
    /// Emit `"fingerprint": null`
    Null,
}

/// Reporter configuration
///
/// Unknown level tokens fall back to `error` instead of failing to load.
///
/// # Example
/// ```text
/// let config: ReporterConfig = serde_json::from_str(r#"{"minimum_level": "warn"}"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReporterConfig {
    #[serde(default, deserialize_with = "level::deserialize_lenient")]
    pub minimum_level: Level,

    #[serde(default)]
    pub fingerprint_policy: FingerprintPolicy,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            minimum_level: Level::Error,
            fingerprint_policy: FingerprintPolicy::Omit,
        }
    }
}

impl ReporterConfig {
    /// Config with the given minimum level token (unknown tokens become `error`)
    pub fn with_minimum_level(token: &str) -> Self {
        Self {
            minimum_level: Level::normalize(token),
            ..Self::default()
        }
    }

    pub fn fingerprint_policy(mut self, policy: FingerprintPolicy) -> Self {
        self.fingerprint_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReporterConfig::default();
        assert_eq!(config.minimum_level, Level::Error);
        assert_eq!(config.fingerprint_policy, FingerprintPolicy::Omit);

        let parsed: ReporterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_level_falls_back_to_error() {
        let parsed: ReporterConfig =
            serde_json::from_str(r#"{"minimum_level": "chatty"}"#).unwrap();
        assert_eq!(parsed.minimum_level, Level::Error);
        assert_eq!(ReporterConfig::with_minimum_level("chatty").minimum_level, Level::Error);
    }

    #[test]
    fn test_explicit_values() {
        let parsed: ReporterConfig = serde_json::from_str(
            r#"{"minimum_level": "warn", "fingerprint_policy": "null"}"#,
        )
        .unwrap();
        assert_eq!(parsed.minimum_level, Level::Warn);
        assert_eq!(parsed.fingerprint_policy, FingerprintPolicy::Null);
    }
}
