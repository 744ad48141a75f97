// Rollbar item body

use errorcat_core::{ReportPayload, ReportableError};
use serde_json::{json, Map, Value};

use crate::config::RollbarConfig;

pub(crate) const NOTIFIER_NAME: &str = "errorcat";

/// Item identity supplied by the sink's id/time providers
pub(crate) struct ItemStamp {
    pub uuid: String,
    pub timestamp: i64,
}

/// Build the JSON body POSTed to the item endpoint.
///
/// The report payload (`level`, `fingerprint`, `custom`) is copied into
/// `data` as-is so the fingerprint policy carries through.
pub(crate) fn build_item(
    config: &RollbarConfig,
    error: &ReportableError,
    payload: &ReportPayload,
    request: Option<&Value>,
    stamp: ItemStamp,
) -> Value {
    let mut data = Map::new();
    data.insert("environment".into(), json!(config.environment));
    data.insert("uuid".into(), json!(stamp.uuid));
    data.insert("timestamp".into(), json!(stamp.timestamp));
    data.insert("language".into(), json!("rust"));
    data.insert("platform".into(), json!(std::env::consts::OS));
    data.insert("title".into(), json!(error.message()));
    data.insert(
        "body".into(),
        json!({
            "message": {
                "body": error.message(),
                "class": error.kind().name(),
            }
        }),
    );
    data.insert(
        "notifier".into(),
        json!({"name": NOTIFIER_NAME, "version": errorcat_core::VERSION}),
    );

    if let Some(code_version) = &config.code_version {
        data.insert("code_version".into(), json!(code_version));
    }

    let mut server = Map::new();
    if let Some(branch) = &config.branch {
        server.insert("branch".into(), json!(branch));
    }
    if let Some(root) = &config.root {
        server.insert("root".into(), json!(root));
    }
    if !server.is_empty() {
        data.insert("server".into(), Value::Object(server));
    }

    if let Some(request) = request {
        data.insert("request".into(), request.clone());
    }

    if let Value::Object(reported) = payload.to_value() {
        data.extend(reported);
    }

    json!({ "data": data })
}
