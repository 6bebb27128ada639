//! Entry point for a single invocation.

use crate::core::{DispatchResult, InvocationContext};
use crate::dispatcher::Dispatcher;
use serde_json::Value;
use tracing::{info, instrument};

/// Handles one alarm event: logs the raw payload for auditing, then hands it
/// to the dispatcher and returns whatever it reports.
#[instrument(skip_all, fields(request_id = %ctx.request_id, invoked_at = %ctx.invoked_at))]
pub async fn handle(dispatcher: &Dispatcher, event: &Value, ctx: &InvocationContext) -> DispatchResult {
    info!(event = %event, "Received alarm event");
    dispatcher.dispatch_value(event).await
}
