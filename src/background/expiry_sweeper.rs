//! Daily expiry of cached summoner data.
//!
//! Each sweep first strips match history from records older than the
//! match retention, then deletes records older than the record retention.
//! Both steps are single set-based store operations and are no-ops when
//! nothing qualifies. The loop runs outside the request path and stops
//! when its [`CancellationToken`] fires.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use tokio_util::sync::CancellationToken;

use crate::error::GatewayError;
use crate::persistence::SummonerStore;

/// Retention thresholds and the daily run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepPolicy {
    /// Age after which match history is cleared.
    pub match_retention: TimeDelta,
    /// Age after which the whole record is deleted.
    pub record_retention: TimeDelta,
    /// Time of day (UTC) at which the sweep runs.
    pub run_at: NaiveTime,
}

impl Default for SweepPolicy {
    fn default() -> Self {
        Self {
            match_retention: TimeDelta::days(7),
            record_retention: TimeDelta::days(14),
            run_at: NaiveTime::MIN,
        }
    }
}

/// Outcome of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Records whose match history was cleared.
    pub matches_cleared: u64,
    /// Records deleted.
    pub records_purged: u64,
}

/// Background job expiring cached data on a fixed daily schedule.
#[derive(Debug, Clone)]
pub struct ExpirySweeper {
    store: Arc<dyn SummonerStore>,
    policy: SweepPolicy,
}

impl ExpirySweeper {
    /// Creates a sweeper over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn SummonerStore>, policy: SweepPolicy) -> Self {
        Self { store, policy }
    }

    /// Runs one sweep: clear stale match history, then purge expired records.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Persistence`] if either store operation fails.
    /// A failed clear skips the purge for this run.
    pub async fn sweep_once(&self) -> Result<SweepReport, GatewayError> {
        let matches_cleared = self
            .store
            .clear_stale_matches(self.policy.match_retention)
            .await?;
        let records_purged = self
            .store
            .purge_expired(self.policy.record_retention)
            .await?;
        Ok(SweepReport {
            matches_cleared,
            records_purged,
        })
    }

    /// Sweeps once a day at [`SweepPolicy::run_at`] until `cancel` fires.
    ///
    /// Failures are logged and the next run is scheduled as usual.
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(
            run_at = %self.policy.run_at,
            match_retention_days = self.policy.match_retention.num_days(),
            record_retention_days = self.policy.record_retention.num_days(),
            backend = self.store.backend(),
            "Expiry sweeper started"
        );

        loop {
            let now = Utc::now();
            let next = next_run_after(now, self.policy.run_at);
            let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
            tracing::debug!(%next, "Expiry sweeper: next run scheduled");

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Expiry sweeper stopping");
                    break;
                }
                _ = tokio::time::sleep(wait) => {
                    match self.sweep_once().await {
                        Ok(report) if report == SweepReport::default() => {
                            tracing::debug!("Expiry sweeper: nothing to expire");
                        }
                        Ok(report) => {
                            tracing::info!(
                                matches_cleared = report.matches_cleared,
                                records_purged = report.records_purged,
                                "Expiry sweeper: expired cached data"
                            );
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Expiry sweeper: sweep failed");
                        }
                    }
                }
            }
        }
    }
}

/// First instant strictly after `now` whose UTC time of day is `run_at`.
#[must_use]
pub fn next_run_after(now: DateTime<Utc>, run_at: NaiveTime) -> DateTime<Utc> {
    let today = now.date_naive().and_time(run_at).and_utc();
    if today > now {
        today
    } else {
        today + TimeDelta::days(1)
    }
}
