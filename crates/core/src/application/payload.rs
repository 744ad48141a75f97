// Report payload handed to the sink

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::config::FingerprintPolicy;
use crate::domain::Level;

/// Normalized `{level, fingerprint?, custom}` payload.
///
/// Serialization honours the fingerprint policy: with `Omit` an absent
/// fingerprint produces no key, with `Null` it produces `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPayload {
    pub level: Level,
    pub fingerprint: Option<String>,
    pub custom: Map<String, Value>,
    pub fingerprint_policy: FingerprintPolicy,
}

impl ReportPayload {
    pub fn new(level: Level, fingerprint: Option<String>, custom: Map<String, Value>) -> Self {
        Self {
            level,
            fingerprint,
            custom,
            fingerprint_policy: FingerprintPolicy::Omit,
        }
    }

    pub fn with_policy(mut self, policy: FingerprintPolicy) -> Self {
        self.fingerprint_policy = policy;
        self
    }

    pub fn to_value(&self) -> Value {
        // Serializing a map of Values cannot fail
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Serialize for ReportPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("level", &self.level)?;
        match (&self.fingerprint, self.fingerprint_policy) {
            (Some(fingerprint), _) => map.serialize_entry("fingerprint", fingerprint)?,
            (None, FingerprintPolicy::Null) => map.serialize_entry("fingerprint", &Value::Null)?,
            (None, FingerprintPolicy::Omit) => {}
        }
        map.serialize_entry("custom", &self.custom)?;
        map.end()
    }
}

/// Turn a fingerprint hint into the string sent to the sink.
///
/// Strings pass through; any other value is rendered as compact JSON with
/// object keys sorted at every depth, so equal values always produce the
/// same fingerprint. `null` and empty strings count as no fingerprint.
pub fn stringify_fingerprint(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => serde_json::to_string(&canonicalize(other)).ok(),
    }
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(entries) => {
            let mut keys: Vec<&String> = entries.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&entries[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}
