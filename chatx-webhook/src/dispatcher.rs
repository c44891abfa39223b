//! Activity dispatcher: the contract between the HTTP shim and whatever
//! processes inbound activities, plus the Genie-backed implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use chatx_genie::GenieBackend;

/// Response an activity processor may hand back to the HTTP shim.
#[derive(Debug, Clone)]
pub struct InvokeResponse {
    pub status: u16,
    pub body: Option<Value>,
}

/// Processes one inbound bot-framework activity.
///
/// Contract with the shim: `Ok(None)` means accepted with nothing to return
/// (HTTP 201); `Ok(Some(response))` is passed through as status + optional
/// JSON body; `Err` becomes HTTP 500 with a single logged error.
#[async_trait]
pub trait ActivityProcessor: Send + Sync {
    async fn process_activity(
        &self,
        activity: Value,
        auth_header: &str,
    ) -> anyhow::Result<Option<InvokeResponse>>;
}

/// Dispatcher that sends the activity text to Genie and replies with the
/// formatted query-result activity.
pub struct GenieDispatcher {
    backend: Arc<dyn GenieBackend>,
}

impl GenieDispatcher {
    /// Creates a dispatcher over any Genie backend.
    pub fn new(backend: Arc<dyn GenieBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl ActivityProcessor for GenieDispatcher {
    async fn process_activity(
        &self,
        activity: Value,
        _auth_header: &str,
    ) -> anyhow::Result<Option<InvokeResponse>> {
        let activity_type = activity
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if activity_type != "message" {
            // conversationUpdate and friends: acknowledge without querying.
            debug!(activity_type = %activity_type, "ignoring non-message activity");
            return Ok(None);
        }

        let prompt = activity
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default();
        info!(prompt_len = prompt.len(), "dispatching message activity to Genie");

        let result = self.backend.ask(prompt).await?;
        let reply = result.process_query_results();

        Ok(Some(InvokeResponse {
            status: 200,
            body: Some(serde_json::to_value(&reply)?),
        }))
    }
}
