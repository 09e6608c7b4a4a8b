use std::sync::Arc;

use axum::response::Response;
use chrono::Utc;
use watch_analytics::ScoreTables;
use watch_sources::SnapshotStore;
use watch_types::{
    Alert, AlertLevel, RiskCriteria, RiskGroupDefinition, Strategy, StrategyDetails,
    StrategyReport, Vault,
};

use crate::AppState;

pub(crate) fn empty_state() -> AppState {
    AppState {
        store: SnapshotStore::new(),
        scoring: Arc::new(ScoreTables::default()),
        network: 1,
        repository_url: Some("https://github.com/org/vault-watch".to_string()),
    }
}

pub(crate) fn loaded_state() -> AppState {
    let state = empty_state();
    state.store.replace_vaults(sample_vaults(), Utc::now());
    state.store.replace_risk_groups(sample_groups(), Utc::now());
    state
}

pub(crate) async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn report(id: &str, timestamp: u64, apr: f64) -> StrategyReport {
    StrategyReport {
        id: id.to_string(),
        timestamp,
        apr,
        ..Default::default()
    }
}

fn strategy(address: &str, name: &str, debt_ratio: u64, tvl: f64, protocols: &[&str]) -> Strategy {
    Strategy {
        address: address.to_string(),
        name: name.to_string(),
        details: StrategyDetails {
            debt_ratio,
            total_debt_usdc: tvl,
            activation: 1_600_000_000,
            protocols: protocols.iter().map(|p| (*p).to_string()).collect(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub(crate) fn sample_vaults() -> Vec<Vault> {
    let mut curve = strategy("0xCurve", "Curve USDC Strategy", 6000, 1_000_000.0, &["Curve"]);
    curve.reports = vec![
        report("0xa-1", 1_000, 0.02),
        report("0xb-1", 3_000, 0.06),
        report("0xc-1", 2_000, 0.04),
    ];
    curve.alerts = vec![Alert {
        level: AlertLevel::Critical,
        message: "Health check disabled".to_string(),
        dismissed: false,
    }];

    vec![
        Vault {
            address: "0xUSDC".to_string(),
            name: "USDC yVault".to_string(),
            strategies: vec![
                curve,
                strategy("0xAave", "Aave Lender", 3000, 20_000_000.0, &["Aave"]),
                strategy("0xIdle", "Idle Strategy", 0, 0.0, &["Idle"]),
            ],
            ..Default::default()
        },
        Vault {
            address: "0xDAI".to_string(),
            name: "DAI yVault".to_string(),
            alerts: vec![Alert {
                level: AlertLevel::Warning,
                message: "Deposit limit reached".to_string(),
                dismissed: true,
            }],
            ..Default::default()
        },
    ]
}

fn group(label: &str, network: u64, name_like: &str, score: f64) -> RiskGroupDefinition {
    RiskGroupDefinition {
        label: label.to_string(),
        network,
        criteria: RiskCriteria {
            name_like: vec![name_like.to_string()],
            ..Default::default()
        },
        audit_score: score,
        code_review_score: score,
        testing_score: score,
        protocol_safety_score: score,
        complexity_score: score,
        team_knowledge_score: score,
    }
}

pub(crate) fn sample_groups() -> Vec<RiskGroupDefinition> {
    vec![
        group("Curve", 1, "curve", 2.0),
        group("Aave", 1, "aave", 1.0),
        group("Fantom Curve", 250, "curve", 3.0),
    ]
}
