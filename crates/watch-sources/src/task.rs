use std::{sync::Arc, time::Duration};

use pragma_common::services::{Service, ServiceRunner};
use watch_metrics::SourceMetrics;

use crate::{
    refresher::SnapshotRefresher, risk_groups::RiskGroupSource, store::SnapshotStore,
    vaults::VaultSource,
};

pub struct RefreshTask {
    store: Arc<SnapshotStore>,
    vaults: Arc<dyn VaultSource>,
    risk_groups: Arc<dyn RiskGroupSource>,
    metrics: Arc<SourceMetrics>,
    interval: Duration,
}

impl RefreshTask {
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
}

#[async_trait::async_trait]
impl Service for RefreshTask {
    async fn start<'a>(&mut self, mut runner: ServiceRunner<'a>) -> anyhow::Result<()> {
        let store = self.store.clone();
        let vaults = self.vaults.clone();
        let risk_groups = self.risk_groups.clone();
        let metrics = self.metrics.clone();
        let interval = self.interval;

        runner.spawn_loop(move |ctx| async move {
            let refresher = SnapshotRefresher::new(store, vaults, risk_groups, metrics, interval);

            if let Some(result) = ctx.run_until_cancelled(refresher.run_forever()).await {
                result?;
            }

            anyhow::Ok(())
        });

        Ok(())
    }
}
