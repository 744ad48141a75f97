// Severity Model

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use super::error::DomainError;

/// Severity level, ordered from least to most urgent.
///
/// `Fatal` and `Critical` share the top weight; they are distinct tokens for
/// the sink but equivalent for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
    Critical = 6,
}

impl Level {
    /// Every level in listed order
    pub const ALL: [Level; 7] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Critical,
    ];

    /// Numeric weight used for minimum-level gating
    pub fn weight(self) -> u8 {
        match self {
            Level::Trace => 10,
            Level::Debug => 20,
            Level::Info => 30,
            Level::Warn => 40,
            Level::Error => 50,
            Level::Fatal | Level::Critical => 60,
        }
    }

    /// Token as understood by the sink
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Critical => "critical",
        }
    }

    /// Parse one of the seven known tokens (exact, lower-case match)
    pub fn parse(token: &str) -> Option<Level> {
        Level::ALL.into_iter().find(|level| level.as_str() == token)
    }

    /// Parse a token, degrading anything unknown to `Error`
    pub fn normalize(token: &str) -> Level {
        Level::parse(token).unwrap_or(Level::Error)
    }

    pub fn is_valid(token: &str) -> bool {
        Level::parse(token).is_some()
    }

    /// Whether an error at `self` passes a `minimum` threshold
    pub fn meets(self, minimum: Level) -> bool {
        self.weight() >= minimum.weight()
    }

    pub(crate) fn from_repr(repr: u8) -> Level {
        Level::ALL
            .get(repr as usize)
            .copied()
            .unwrap_or(Level::Error)
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Error
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::parse(s).ok_or_else(|| DomainError::UnknownLevel(s.to_string()))
    }
}

/// Serde helper: accept any string, normalizing unknown tokens to `Error`.
///
/// ```text
/// #[serde(deserialize_with = "level::deserialize_lenient")]
/// minimum_level: Level,
/// ```
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Level, D::Error>
where
    D: Deserializer<'de>,
{
    let token = String::deserialize(deserializer)?;
    Ok(Level::normalize(&token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_non_decreasing_in_listed_order() {
        for pair in Level::ALL.windows(2) {
            assert!(
                pair[0].weight() <= pair[1].weight(),
                "{} must not outweigh {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_fatal_and_critical_share_top_weight() {
        assert_eq!(Level::Fatal.weight(), Level::Critical.weight());
        assert_eq!(Level::Critical.weight(), 60);
        assert!(Level::ALL.iter().all(|l| l.weight() <= 60));
    }

    #[test]
    fn test_concrete_weights() {
        assert_eq!(Level::Trace.weight(), 10);
        assert_eq!(Level::Debug.weight(), 20);
        assert_eq!(Level::Info.weight(), 30);
        assert_eq!(Level::Warn.weight(), 40);
        assert_eq!(Level::Error.weight(), 50);
    }

    #[test]
    fn test_normalize_known_tokens() {
        for level in Level::ALL {
            assert_eq!(Level::normalize(level.as_str()), level);
        }
    }

    #[test]
    fn test_normalize_unknown_tokens_to_error() {
        for token in ["", "warning", "WARN", "verbose", " info", "panic"] {
            assert_eq!(Level::normalize(token), Level::Error, "token {token:?}");
            assert!(!Level::is_valid(token));
        }
    }

    #[test]
    fn test_from_str_reports_unknown_token() {
        let err = "loud".parse::<Level>().unwrap_err();
        assert!(err.to_string().contains("loud"));
        assert_eq!("warn".parse::<Level>().unwrap(), Level::Warn);
    }

    #[test]
    fn test_meets_threshold() {
        assert!(Level::Error.meets(Level::Warn));
        assert!(Level::Warn.meets(Level::Warn));
        assert!(!Level::Info.meets(Level::Warn));
        assert!(Level::Fatal.meets(Level::Critical));
    }

    #[test]
    fn test_from_repr_round_trips_and_defaults() {
        for level in Level::ALL {
            assert_eq!(Level::from_repr(level as u8), level);
        }
        assert_eq!(Level::from_repr(42), Level::Error);
    }

    #[test]
    fn test_serde_tokens() {
        assert_eq!(serde_json::to_string(&Level::Warn).unwrap(), "\"warn\"");

        #[derive(Deserialize)]
        struct Cfg {
            #[serde(deserialize_with = "deserialize_lenient")]
            level: Level,
        }
        let cfg: Cfg = serde_json::from_str(r#"{"level":"nonsense"}"#).unwrap();
        assert_eq!(cfg.level, Level::Error);
        let cfg: Cfg = serde_json::from_str(r#"{"level":"debug"}"#).unwrap();
        assert_eq!(cfg.level, Level::Debug);
    }
}
