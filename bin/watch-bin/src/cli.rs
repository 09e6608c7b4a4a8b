use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct WatchCli {
    /// Static risk group definitions, tried first
    #[arg(long, env = "RISK_GH_URL")]
    pub risk_gh_url: String,

    /// Risk API base URL, definitions are read from `/riskgroups/`
    #[arg(long, env = "RISK_API_URL")]
    pub risk_api_url: String,

    /// Endpoint returning every vault with its strategies
    #[arg(long, env = "VAULTS_URL")]
    pub vaults_url: String,

    /// Project repository linked from the config endpoint
    #[arg(long, env = "REPOSITORY_URL")]
    pub repository_url: Option<String>,

    /// Active chain id. 0 disables risk groups.
    #[arg(long, env = "NETWORK_ID", default_value = "1")]
    pub network_id: u64,

    /// OTEL collector endpoint
    #[arg(long, env = "OTEL_COLLECTOR_ENDPOINT")]
    pub otel_collector_endpoint: Option<String>,

    /// API port
    #[arg(long, env = "API_PORT", default_value = "8080")]
    pub api_port: u16,

    /// Seconds between two snapshot refreshes
    #[arg(long, env = "REFRESH_INTERVAL_SECS", default_value = "300")]
    pub refresh_interval_secs: u64,

    /// JSON file with the longevity, TVL impact and impact score tables
    #[arg(long, env = "SCORE_TABLES_PATH")]
    pub score_tables_path: Option<PathBuf>,
}
