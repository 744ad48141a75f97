// Rollbar ReportSink implementation
// reason: reqwest for the HTTP item API

use async_trait::async_trait;
use errorcat_core::port::id_provider::UuidProvider;
use errorcat_core::port::time_provider::SystemTimeProvider;
use errorcat_core::port::{IdProvider, ReportSink, SinkError, TimeProvider};
use errorcat_core::{ReportPayload, ReportableError};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::RollbarConfig;
use crate::item::{build_item, ItemStamp};

/// Header carrying the project access token
const ACCESS_TOKEN_HEADER: &str = "X-Rollbar-Access-Token";

/// Sink posting items to the Rollbar API
pub struct RollbarSink {
    client: reqwest::Client,
    config: RollbarConfig,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl RollbarSink {
    /// Create a new Rollbar sink
    ///
    /// # Example
    /// ```ignore
    /// let sink = RollbarSink::new(RollbarConfig::new(token).environment("production"))?;
    /// ```
    pub fn new(config: RollbarConfig) -> Result<Self, SinkError> {
        Self::with_providers(config, Arc::new(UuidProvider), Arc::new(SystemTimeProvider))
    }

    /// Create a sink with injected item id/timestamp sources
    pub fn with_providers(
        config: RollbarConfig,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SinkError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        if config.can_report() {
            info!(
                environment = %config.environment,
                endpoint = %config.endpoint,
                branch = config.branch.as_deref().unwrap_or_default(),
                "Rollbar reporting enabled"
            );
        } else {
            debug!(
                environment = %config.environment,
                "Rollbar reporting disabled (no access token or test environment)"
            );
        }

        Ok(Self {
            client,
            config,
            id_provider,
            time_provider,
        })
    }

    pub fn config(&self) -> &RollbarConfig {
        &self.config
    }

    fn map_transport_error(&self, err: reqwest::Error) -> SinkError {
        if err.is_timeout() {
            SinkError::Timeout(self.config.timeout.as_millis() as u64)
        } else {
            SinkError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl ReportSink for RollbarSink {
    fn name(&self) -> &str {
        "rollbar"
    }

    fn is_available(&self) -> bool {
        self.config.can_report()
    }

    async fn send(
        &self,
        error: &ReportableError,
        payload: &ReportPayload,
        request: Option<&Value>,
    ) -> Result<(), SinkError> {
        let Some(token) = self.config.access_token.as_deref() else {
            return Err(SinkError::Unavailable("missing access token".to_string()));
        };

        let stamp = ItemStamp {
            uuid: self.id_provider.generate_id(),
            timestamp: self.time_provider.now_secs(),
        };
        let uuid = stamp.uuid.clone();
        let item = build_item(&self.config, error, payload, request, stamp);

        let response = self
            .client
            .post(&self.config.endpoint)
            .header(ACCESS_TOKEN_HEADER, token)
            .json(&item)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            debug!(uuid = %uuid, status = status.as_u16(), "Rollbar accepted item");
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or(body);

        Err(SinkError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use errorcat_core::port::id_provider::FixedIdProvider;
    use errorcat_core::port::time_provider::FixedTimeProvider;
    use errorcat_core::Level;
    use httpmock::prelude::*;
    use serde_json::{json, Map};
    use std::time::Duration;

    fn sink_for(server: &MockServer) -> RollbarSink {
        let config = RollbarConfig::new("secret-token")
            .environment("production")
            .endpoint(server.url("/api/1/item/"));
        RollbarSink::with_providers(
            config,
            Arc::new(FixedIdProvider("item-1".to_string())),
            Arc::new(FixedTimeProvider(1_700_000_000)),
        )
        .unwrap()
    }

    fn payload() -> ReportPayload {
        ReportPayload::new(Level::Error, Some("grp".into()), Map::new())
    }

    #[test]
    fn test_availability_follows_config() {
        let sink = RollbarSink::new(RollbarConfig::default()).unwrap();
        assert!(!sink.is_available());

        let sink = RollbarSink::new(RollbarConfig::new("t").environment("test")).unwrap();
        assert!(!sink.is_available());

        let sink = RollbarSink::new(RollbarConfig::new("t").environment("staging")).unwrap();
        assert!(sink.is_available());
    }

    #[tokio::test]
    async fn test_send_posts_item_with_token() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/1/item/")
                .header(ACCESS_TOKEN_HEADER, "secret-token")
                .json_body_partial(
                    r#"{"data": {"uuid": "item-1", "level": "error", "fingerprint": "grp", "environment": "production"}}"#,
                );
            then.status(200)
                .json_body(json!({"err": 0, "result": {"uuid": "item-1"}}));
        });

        let sink = sink_for(&server);
        let result = sink
            .send(&ReportableError::new("boom"), &payload(), None)
            .await;

        assert!(result.is_ok(), "unexpected error: {result:?}");
        mock.assert();
    }

    #[tokio::test]
    async fn test_send_maps_rejection() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST).path("/api/1/item/");
            then.status(403)
                .json_body(json!({"err": 1, "message": "invalid access token"}));
        });

        let sink = sink_for(&server);
        let err = sink
            .send(&ReportableError::new("boom"), &payload(), None)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SinkError::Rejected {
                status: 403,
                message: "invalid access token".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_send_keeps_raw_body_when_not_json() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST).path("/api/1/item/");
            then.status(502).body("bad gateway");
        });

        let sink = sink_for(&server);
        let err = sink
            .send(&ReportableError::new("boom"), &payload(), None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SinkError::Rejected { status: 502, ref message } if message == "bad gateway"
        ));
    }

    #[tokio::test]
    async fn test_send_times_out() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST).path("/api/1/item/");
            then.status(200).delay(Duration::from_millis(500));
        });

        let config = RollbarConfig::new("secret-token")
            .environment("production")
            .endpoint(server.url("/api/1/item/"))
            .timeout(Duration::from_millis(50));
        let sink = RollbarSink::new(config).unwrap();

        let err = sink
            .send(&ReportableError::new("boom"), &payload(), None)
            .await
            .unwrap_err();
        assert_eq!(err, SinkError::Timeout(50));
    }

    #[tokio::test]
    async fn test_send_without_token_is_unavailable() {
        let sink = RollbarSink::new(RollbarConfig::default()).unwrap();
        let err = sink
            .send(&ReportableError::new("boom"), &payload(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SinkError::Unavailable(_)));
    }
}
