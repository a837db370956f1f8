//! Invocation entry point: event + execution context in, status code and
//! JSON-encoded summary out.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::orchestrator::Orchestrator;

/// Host-provided execution context.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub request_id: String,
    pub function_name: String,
    pub memory_limit_mb: u32,
}

impl ExecutionContext {
    /// Context for local runs outside the managed host.
    pub fn local() -> Self {
        Self {
            request_id: format!("local-{}", Uuid::new_v4()),
            function_name: String::from("tickdrop-local"),
            memory_limit_mb: 512,
        }
    }
}

/// Invoker-facing response: status code plus JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

/// Run one collection pass. The event payload is accepted for interface
/// compatibility and ignored.
pub async fn handle(
    orchestrator: &Orchestrator,
    event: &Value,
    context: &ExecutionContext,
) -> Result<InvocationResponse, serde_json::Error> {
    let _ = event;

    tracing::info!(
        request_id = %context.request_id,
        function = %context.function_name,
        memory_mb = context.memory_limit_mb,
        "invocation started"
    );

    let summary = orchestrator.run().await;

    Ok(InvocationResponse {
        status_code: 200,
        body: serde_json::to_string(&summary)?,
    })
}
