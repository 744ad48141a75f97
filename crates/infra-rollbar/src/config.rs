// Rollbar sink configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rollbar item endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.rollbar.com/api/1/item/";

/// Environment in which nothing is sent
pub const NON_REPORTING_ENVIRONMENT: &str = "test";

/// Default environment when none is configured
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Default request timeout (10s)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Rollbar connection settings
///
/// The sink is available only when an access token is present and the
/// environment is not `test`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollbarConfig {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Code branch reported with each item
    #[serde(default)]
    pub branch: Option<String>,
    /// Commit the running code was built from
    #[serde(default)]
    pub code_version: Option<String>,
    /// Project root directory on the server
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default = "default_timeout", with = "duration_ms")]
    pub timeout: Duration,
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl Default for RollbarConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            environment: default_environment(),
            endpoint: default_endpoint(),
            branch: None,
            code_version: None,
            root: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RollbarConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..Self::default()
        }
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn code_version(mut self, code_version: impl Into<String>) -> Self {
        self.code_version = Some(code_version.into());
        self
    }

    pub fn root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether reports may be sent with these settings
    pub fn can_report(&self) -> bool {
        let has_token = self
            .access_token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty());
        has_token && self.environment != NON_REPORTING_ENVIRONMENT
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
