use std::sync::Arc;

use opentelemetry::{KeyValue, global, metrics::Counter};
use strum::{AsRefStr, Display};

#[derive(Debug)]
pub struct MetricsRegistry {
    pub sources: Arc<SourceMetrics>,
}

impl MetricsRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sources: SourceMetrics::new(),
        })
    }
}

#[derive(Debug)]
pub struct SourceMetrics {
    risk_group_fetches: Counter<u64>,
    snapshot_refreshes: Counter<u64>,
}

impl SourceMetrics {
    fn new() -> Arc<Self> {
        let meter = global::meter("vault-watch");
        let risk_group_fetches = meter
            .u64_counter("risk_group_fetch_total")
            .with_description("Risk group definition fetch attempts, per endpoint")
            .with_unit("count")
            .init();

        let snapshot_refreshes = meter
            .u64_counter("snapshot_refresh_total")
            .with_description("Snapshot refresh cycles, per source")
            .with_unit("count")
            .init();

        Arc::new(Self {
            risk_group_fetches,
            snapshot_refreshes,
        })
    }

    pub fn record_risk_group_fetch(&self, endpoint: &str, outcome: FetchOutcome) {
        self.risk_group_fetches.add(
            1,
            &[
                KeyValue::new("endpoint", endpoint.to_string()),
                KeyValue::new("outcome", outcome.to_string()),
            ],
        );
    }

    pub fn record_snapshot_refresh(&self, source: SnapshotSource, outcome: FetchOutcome) {
        self.snapshot_refreshes.add(
            1,
            &[
                KeyValue::new("source", source.to_string()),
                KeyValue::new("outcome", outcome.to_string()),
            ],
        );
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum FetchOutcome {
    Success,
    HttpStatus,
    Transport,
    InvalidBody,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum SnapshotSource {
    Vaults,
    RiskGroups,
}
