//! Cancellable fixed-interval loop.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Runs `cycle` every `period` until `token` is cancelled.
///
/// The first cycle runs immediately. A cycle that overruns delays the next
/// one instead of bursting to catch up. Cycle errors are logged and the loop
/// carries on.
pub async fn run_periodic<F, Fut, E>(
    monitor: &'static str,
    key: String,
    period: Duration,
    token: CancellationToken,
    mut cycle: F,
) where
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Result<(), E>> + Send,
    E: Display,
{
    let mut ticker = interval(period.max(MIN_PERIOD));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(
        monitor,
        key = %key,
        interval_seconds = period.as_secs(),
        "background monitor started"
    );

    loop {
        tokio::select! {
            biased;
            () = token.cancelled() => {
                info!(monitor, key = %key, "background monitor stopped");
                break;
            }
            _ = ticker.tick() => {
                match cycle().await {
                    Ok(()) => debug!(monitor, key = %key, "monitor cycle completed"),
                    Err(err) => warn!(monitor, key = %key, error = %err, "monitor cycle failed"),
                }
            }
        }
    }
}
