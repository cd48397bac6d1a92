//! AWS Lambda entrypoint. Each invocation, typically an EventBridge schedule,
//! runs one sweep. The event payload only acts as a trigger.

use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::rds::DbInstanceProvider;
use crate::sweeper::Sweeper;
use crate::types::SweepReport;

/// Serve the Lambda runtime API until the sandbox is torn down.
/// The sweeper and its RDS client are shared by all warm invocations.
pub async fn serve<P>(sweeper: Sweeper<P>) -> Result<(), Error>
where
    P: DbInstanceProvider + 'static,
{
    let sweeper = Arc::new(sweeper);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let sweeper = Arc::clone(&sweeper);
        async move { handle_event(event, &sweeper).await }
    }))
    .await
}

pub async fn handle_event<P: DbInstanceProvider>(
    event: LambdaEvent<Value>,
    sweeper: &Sweeper<P>,
) -> Result<SweepReport, Error> {
    info!(
        request_id = %event.context.request_id,
        event_source = event
            .payload
            .get("source")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown"),
        "Received trigger event"
    );

    sweeper.run().await.map_err(Error::from)
}
