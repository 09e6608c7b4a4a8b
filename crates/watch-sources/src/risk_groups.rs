use std::sync::Arc;

use reqwest::{Client, StatusCode};
use url::Url;
use watch_metrics::{FetchOutcome, SourceMetrics};
use watch_types::RiskGroupDefinition;

use crate::{
    client::http_client,
    config::{SourceEndpoints, SourcesConfig},
    error::SourceError,
};

#[async_trait::async_trait]
pub trait RiskGroupSource: Send + Sync {
    /// Definitions for every network. Filtering by network is left to the
    /// caller.
    async fn fetch_risk_groups(&self) -> Result<Vec<RiskGroupDefinition>, SourceError>;
}

/// Fetches risk group definitions from an ordered list of endpoints.
///
/// Each endpoint is tried once, in order. The first one answering `200 OK`
/// with a body that parses as a list of definitions wins. Transport errors,
/// other statuses and unparseable bodies fall through to the next endpoint.
pub struct RiskGroupClient {
    http_client: Client,
    endpoints: Vec<Url>,
    metrics: Arc<SourceMetrics>,
}

impl RiskGroupClient {
    pub fn new(
        endpoints: &SourceEndpoints,
        config: &SourcesConfig,
        metrics: Arc<SourceMetrics>,
    ) -> Result<Self, SourceError> {
        Self::with_endpoints(endpoints.risk_group_endpoints()?, config, metrics)
    }

    pub fn with_endpoints(
        endpoints: Vec<Url>,
        config: &SourcesConfig,
        metrics: Arc<SourceMetrics>,
    ) -> Result<Self, SourceError> {
        Ok(Self {
            http_client: http_client(config.request_timeout)?,
            endpoints,
            metrics,
        })
    }

    pub fn endpoints(&self) -> &[Url] {
        &self.endpoints
    }

    async fn fetch_from(&self, endpoint: &Url) -> Result<Vec<RiskGroupDefinition>, SourceError> {
        let response = self.http_client.get(endpoint.clone()).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(SourceError::UnexpectedStatus {
                url: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait::async_trait]
impl RiskGroupSource for RiskGroupClient {
    async fn fetch_risk_groups(&self) -> Result<Vec<RiskGroupDefinition>, SourceError> {
        for endpoint in &self.endpoints {
            match self.fetch_from(endpoint).await {
                Ok(definitions) => {
                    self.metrics
                        .record_risk_group_fetch(endpoint.as_str(), FetchOutcome::Success);
                    tracing::debug!(
                        endpoint = %endpoint,
                        count = definitions.len(),
                        "Fetched risk group definitions"
                    );
                    return Ok(definitions);
                }
                Err(e) => {
                    self.metrics
                        .record_risk_group_fetch(endpoint.as_str(), e.outcome());
                    tracing::warn!(error = %e, endpoint = %endpoint, "Risk group endpoint failed");
                }
            }
        }

        Err(SourceError::AllEndpointsFailed {
            attempted: self.endpoints.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{Json, Router, http::StatusCode as AxumStatus, routing::get};
    use serde_json::json;
    use watch_metrics::MetricsRegistry;

    use super::*;

    async fn serve(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        Url::parse(&format!("http://{addr}/groups")).unwrap()
    }

    async fn unreachable() -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        Url::parse(&format!("http://{addr}/groups")).unwrap()
    }

    fn failing() -> Router {
        Router::new().route("/groups", get(|| async { AxumStatus::INTERNAL_SERVER_ERROR }))
    }

    fn serving(label: &'static str) -> Router {
        Router::new().route(
            "/groups",
            get(move || async move {
                Json(json!([{
                    "label": label,
                    "network": 1,
                    "criteria": {"nameLike": ["curve"], "exclude": [], "strategies": []},
                    "auditScore": 1,
                    "codeReviewScore": 2,
                    "testingScore": 3,
                    "protocolSafetyScore": 4,
                    "complexityScore": 5,
                    "teamKnowledgeScore": 1
                }]))
            }),
        )
    }

    fn client(endpoints: Vec<Url>) -> RiskGroupClient {
        RiskGroupClient::with_endpoints(
            endpoints,
            &SourcesConfig::default(),
            MetricsRegistry::new().sources.clone(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_falls_back_after_server_error() {
        let first = serve(failing()).await;
        let second = serve(serving("Curve")).await;

        let definitions = client(vec![first, second]).fetch_risk_groups().await.unwrap();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].label, "Curve");
        assert_eq!(definitions[0].criteria.name_like, vec!["curve".to_string()]);
        assert_eq!(definitions[0].code_review_score, 2.0);
    }

    #[tokio::test]
    async fn test_first_success_wins_without_contacting_the_rest() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let second = serve(Router::new().route(
            "/groups",
            get(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Json(json!([])) }
            }),
        ))
        .await;
        let first = serve(serving("Primary")).await;

        let definitions = client(vec![first, second]).fetch_risk_groups().await.unwrap();
        assert_eq!(definitions[0].label, "Primary");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unparseable_body_and_transport_errors_fall_through() {
        let garbage = serve(Router::new().route("/groups", get(|| async { "not json" }))).await;
        let down = unreachable().await;
        let good = serve(serving("Last")).await;

        let definitions = client(vec![garbage, down, good])
            .fetch_risk_groups()
            .await
            .unwrap();
        assert_eq!(definitions[0].label, "Last");
    }

    #[tokio::test]
    async fn test_all_endpoints_failing() {
        let first = serve(failing()).await;
        let second = unreachable().await;

        let err = client(vec![first, second])
            .fetch_risk_groups()
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::AllEndpointsFailed { attempted: 2 }));
    }
}
