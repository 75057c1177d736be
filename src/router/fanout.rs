//! Concurrent fan-out of a single message to multiple services.
//!
//! Spawns one task per service; each races the service's send against
//! the router's timeout. Outcomes flow back over an mpsc channel tagged
//! with the originating service index, so aggregators can place results
//! by identity no matter which service answers first.
//!
//! **Timeout behavior:** the race is `tokio::time::timeout`, which
//! drops the losing send future. A send that outlives its timer is
//! therefore cancelled at its next suspension point, not abandoned to
//! run in the background.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::Instrument;

use crate::error::TannoyError;
use crate::service::{Params, Service};

/// One service's outcome, tagged with its registration index.
pub type DispatchResult = (usize, Result<(), TannoyError>);

/// Fan one message out to every service. Returns a channel that yields
/// exactly one [`DispatchResult`] per service, in completion order,
/// then closes.
pub fn dispatch(
    services: &[Arc<dyn Service>],
    message: &str,
    params: &Params,
    timeout: Duration,
    span: &tracing::Span,
) -> mpsc::Receiver<DispatchResult> {
    let (tx, rx) = mpsc::channel(services.len().max(1));

    for (index, service) in services.iter().enumerate() {
        let service = Arc::clone(service);
        let message = message.to_string();
        // Defensive copy: the service must never observe (or mutate)
        // the caller's map.
        let params = params.clone();
        let tx = tx.clone();

        let task = async move {
            let id = service.id().to_string();
            let outcome = match tokio::time::timeout(timeout, service.send(&message, &params))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(TannoyError::Timeout {
                    service: id.clone(),
                }),
            };

            match &outcome {
                Ok(()) => tracing::debug!(service = %id, "message sent"),
                Err(e) => tracing::warn!(service = %id, error = %e, "send failed"),
            }

            // The receiver may have been dropped by a caller that
            // stopped listening; that is not our problem to report.
            let _ = tx.send((index, outcome)).await;
        };

        tokio::spawn(task.instrument(span.clone()));
    }

    rx
}
