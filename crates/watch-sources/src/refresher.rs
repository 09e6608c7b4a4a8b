use std::{sync::Arc, time::Duration};

use chrono::Utc;
use watch_metrics::{FetchOutcome, SnapshotSource, SourceMetrics};

use crate::{risk_groups::RiskGroupSource, store::SnapshotStore, vaults::VaultSource};

/// Result of one refresh cycle. A failed side leaves its previous snapshot
/// in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub vaults_refreshed: bool,
    pub risk_groups_refreshed: bool,
}

pub struct SnapshotRefresher {
    store: Arc<SnapshotStore>,
    vaults: Arc<dyn VaultSource>,
    risk_groups: Arc<dyn RiskGroupSource>,
    metrics: Arc<SourceMetrics>,
    interval: Duration,
}

impl SnapshotRefresher {
    pub fn new(
        store: Arc<SnapshotStore>,
        vaults: Arc<dyn VaultSource>,
        risk_groups: Arc<dyn RiskGroupSource>,
        metrics: Arc<SourceMetrics>,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            vaults,
            risk_groups,
            metrics,
            interval,
        }
    }

    pub async fn run_forever(&self) -> anyhow::Result<()> {
        // tokio panics on a zero period
        let mut interval = tokio::time::interval(self.interval.max(Duration::from_secs(1)));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let outcome = self.refresh_once().await;
            tracing::info!(
                "[SnapshotRefresher] 🔄 Refresh done (vaults: {}, risk groups: {})",
                outcome.vaults_refreshed,
                outcome.risk_groups_refreshed
            );
        }
    }

    pub async fn refresh_once(&self) -> RefreshOutcome {
        let (vaults, risk_groups) =
            tokio::join!(self.vaults.fetch_vaults(), self.risk_groups.fetch_risk_groups());
        let now = Utc::now();

        let vaults_refreshed = match vaults {
            Ok(vaults) => {
                tracing::debug!(count = vaults.len(), "Vault snapshot replaced");
                self.store.replace_vaults(vaults, now);
                self.metrics
                    .record_snapshot_refresh(SnapshotSource::Vaults, FetchOutcome::Success);
                true
            }
            Err(e) => {
                tracing::error!("[SnapshotRefresher] 🔴 Vault refresh failed, keeping previous snapshot: {e}");
                self.metrics
                    .record_snapshot_refresh(SnapshotSource::Vaults, e.outcome());
                false
            }
        };

        let risk_groups_refreshed = match risk_groups {
            Ok(definitions) => {
                tracing::debug!(count = definitions.len(), "Risk group definitions replaced");
                self.store.replace_risk_groups(definitions, now);
                self.metrics
                    .record_snapshot_refresh(SnapshotSource::RiskGroups, FetchOutcome::Success);
                true
            }
            Err(e) => {
                tracing::error!("[SnapshotRefresher] 🔴 Risk group refresh failed, keeping previous definitions: {e}");
                self.metrics
                    .record_snapshot_refresh(SnapshotSource::RiskGroups, e.outcome());
                false
            }
        };

        RefreshOutcome {
            vaults_refreshed,
            risk_groups_refreshed,
        }
    }
}
