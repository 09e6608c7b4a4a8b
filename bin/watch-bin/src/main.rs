mod cli;

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use pragma_common::{services::ServiceGroup, telemetry::init_telemetry};

use watch_analytics::ScoreTables;
use watch_api::{ApiService, AppState};
use watch_metrics::MetricsRegistry;
use watch_sources::{
    HttpVaultSource, RefreshTask, RiskGroupClient, SnapshotStore, SourceEndpoints, SourcesConfig,
};

use crate::cli::WatchCli;

fn load_score_tables(path: Option<&std::path::Path>) -> Result<ScoreTables> {
    let Some(path) = path else {
        tracing::warn!("SCORE_TABLES_PATH not set; using placeholder score tables");
        return Ok(ScoreTables::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read score tables from {}", path.display()))?;
    let tables = ScoreTables::from_json(&raw)?;
    tracing::info!("Loaded score tables from {}", path.display());
    Ok(tables)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let WatchCli {
        risk_gh_url,
        risk_api_url,
        vaults_url,
        repository_url,
        network_id,
        otel_collector_endpoint,
        api_port,
        refresh_interval_secs,
        score_tables_path,
    } = WatchCli::parse();

    let app_name = "vault_watch";
    if let Err(e) = init_telemetry(app_name, otel_collector_endpoint) {
        panic!("Could not init telemetry: {e}");
    }

    let scoring = Arc::new(load_score_tables(score_tables_path.as_deref())?);

    let config = SourcesConfig {
        refresh_interval: Duration::from_secs(refresh_interval_secs),
        ..SourcesConfig::default()
    };
    let endpoints = SourceEndpoints::parse(&risk_gh_url, &risk_api_url, &vaults_url)?;
    let metrics = MetricsRegistry::new();

    let store = SnapshotStore::new();
    let vault_source = HttpVaultSource::new(endpoints.vaults_url.clone(), &config)?;
    let risk_group_source = RiskGroupClient::new(&endpoints, &config, metrics.sources.clone())?;

    let refresh_task = RefreshTask::new(
        store.clone(),
        Arc::new(vault_source),
        Arc::new(risk_group_source),
        metrics.sources.clone(),
        config.refresh_interval,
    );

    let app_state = AppState {
        store,
        scoring,
        network: network_id,
        repository_url,
    };
    let api_service = ApiService::new(app_state, "0.0.0.0", api_port);

    ServiceGroup::default()
        .with(api_service)
        .with(refresh_task)
        .start_and_drive_to_end()
        .await?;

    Ok(())
}
