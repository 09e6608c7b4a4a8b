use reqwest::Client;
use url::Url;
use watch_types::Vault;

use crate::{client::http_client, config::SourcesConfig, error::SourceError};

#[async_trait::async_trait]
pub trait VaultSource: Send + Sync {
    async fn fetch_vaults(&self) -> Result<Vec<Vault>, SourceError>;
}

/// Reads the full vault list, strategies included, from a JSON endpoint.
pub struct HttpVaultSource {
    http_client: Client,
    url: Url,
}

impl HttpVaultSource {
    pub fn new(url: Url, config: &SourcesConfig) -> Result<Self, SourceError> {
        Ok(Self {
            http_client: http_client(config.request_timeout)?,
            url,
        })
    }
}

#[async_trait::async_trait]
impl VaultSource for HttpVaultSource {
    async fn fetch_vaults(&self) -> Result<Vec<Vault>, SourceError> {
        let response = self.http_client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                url: self.url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde_json::json;

    use super::*;

    async fn serve(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        Url::parse(&format!("http://{addr}/vaults/all")).unwrap()
    }

    #[tokio::test]
    async fn test_fetches_vaults_with_strategies() {
        let url = serve(Router::new().route(
            "/vaults/all",
            get(|| async {
                Json(json!([{
                    "address": "0xvault",
                    "name": "USDC yVault",
                    "token": {"address": "0xusdc", "symbol": "USDC", "decimals": 6},
                    "strategies": [{
                        "address": "0xstrat",
                        "name": "Curve USDC Strategy",
                        "details": {"debtRatio": 2500, "totalDebtUSDC": 1000000.0, "protocols": ["Curve"]}
                    }]
                }]))
            }),
        ))
        .await;

        let source = HttpVaultSource::new(url, &SourcesConfig::default()).unwrap();
        let vaults = source.fetch_vaults().await.unwrap();
        assert_eq!(vaults.len(), 1);
        assert_eq!(vaults[0].token.symbol, "USDC");
        assert_eq!(vaults[0].strategies[0].details.debt_ratio, 2500);
        assert_eq!(vaults[0].strategies[0].details.total_debt_usdc, 1_000_000.0);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let url = serve(Router::new().route(
            "/vaults/all",
            get(|| async { StatusCode::BAD_GATEWAY }),
        ))
        .await;

        let source = HttpVaultSource::new(url, &SourcesConfig::default()).unwrap();
        let err = source.fetch_vaults().await.unwrap_err();
        assert!(matches!(err, SourceError::UnexpectedStatus { status: 502, .. }));
    }
}
