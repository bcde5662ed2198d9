//! Run polling with backoff, timeout and cancellation.
//!
//! A run is re-fetched while its status is pending (`queued` or
//! `in_progress`). The delay between checks starts at the policy's initial
//! interval and grows by the backoff multiplier up to a cap. The wait ends
//! early when the timeout elapses or the cancellation token fires.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use gptc_types::config::PollConfig;
use gptc_types::error::ServiceError;
use gptc_types::run::Run;

use crate::client::AssistantsClient;

/// Timing rules for [`wait_for_run`].
#[derive(Debug, Clone, PartialEq)]
pub struct PollPolicy {
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub multiplier: f64,
    /// `None` waits until the run leaves the pending states.
    pub timeout: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::from(&PollConfig::default())
    }
}

impl From<&PollConfig> for PollPolicy {
    /// Values that would stall or break the wait fall back to the defaults
    /// with a warning: a zero interval, or a backoff that is not a finite
    /// number of at least 1.
    fn from(config: &PollConfig) -> Self {
        let defaults = PollConfig::default();

        let interval_ms = if config.interval_ms == 0 {
            warn!(
                default = defaults.interval_ms,
                "poll.interval_ms must be positive, using the default"
            );
            defaults.interval_ms
        } else {
            config.interval_ms
        };

        let multiplier = if config.backoff.is_finite() && config.backoff >= 1.0 {
            config.backoff
        } else {
            warn!(
                backoff = config.backoff,
                default = defaults.backoff,
                "poll.backoff must be a finite number of at least 1, using the default"
            );
            defaults.backoff
        };

        Self {
            initial_interval: Duration::from_millis(interval_ms),
            max_interval: Duration::from_millis(config.max_interval_ms),
            multiplier,
            timeout: (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs)),
        }
    }
}

impl PollPolicy {
    /// Delay to use after `current` when the run is still pending.
    ///
    /// Multipliers below 1.0 are treated as 1.0 so the delay never shrinks.
    /// A product too large (or not a number) to be a delay yields the cap.
    pub fn next_interval(&self, current: Duration) -> Duration {
        let factor = self.multiplier.max(1.0);
        let cap = self.max_interval.max(self.initial_interval);
        Duration::try_from_secs_f64(current.as_secs_f64() * factor)
            .map_or(cap, |next| next.min(cap))
    }
}

/// How a wait ended. Each variant carries the last observed run.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The run left the pending states.
    Finished(Run),
    /// The policy timeout elapsed while the run was still pending.
    TimedOut(Run),
    /// The cancellation token fired while the run was still pending.
    Cancelled(Run),
}

/// Poll `run` until it is no longer pending.
///
/// `on_pending` is called once for every re-fetched status that is still
/// pending. Service errors from the status check end the wait immediately.
pub async fn wait_for_run<C, F>(
    client: &C,
    mut run: Run,
    policy: &PollPolicy,
    cancel: &CancellationToken,
    mut on_pending: F,
) -> Result<PollOutcome, ServiceError>
where
    C: AssistantsClient,
    F: FnMut(&Run),
{
    let started = Instant::now();
    let mut interval = policy.initial_interval;
    let mut checks: u32 = 0;

    while run.status.is_pending() {
        let delay = match policy.timeout {
            Some(timeout) => {
                let elapsed = started.elapsed();
                if elapsed >= timeout {
                    debug!(run_id = %run.id, checks, "Run polling timed out");
                    return Ok(PollOutcome::TimedOut(run));
                }
                interval.min(timeout - elapsed)
            }
            None => interval,
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(run_id = %run.id, checks, "Run polling cancelled");
                return Ok(PollOutcome::Cancelled(run));
            }
            _ = tokio::time::sleep(delay) => {}
        }

        run = client.retrieve_run(&run.thread_id, &run.id).await?;
        checks += 1;
        debug!(run_id = %run.id, status = %run.status, checks, "Polled run status");

        if run.status.is_pending() {
            on_pending(&run);
            interval = policy.next_interval(interval);
        }
    }

    Ok(PollOutcome::Finished(run))
}
