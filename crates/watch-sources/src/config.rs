use std::time::Duration;

use url::Url;

use crate::error::SourceError;

/// Runtime behaviour of the fetchers and the refresh task.
#[derive(Debug, Clone)]
pub struct SourcesConfig {
    pub refresh_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(5 * 60),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Where snapshots and risk group definitions are published.
#[derive(Debug, Clone)]
pub struct SourceEndpoints {
    /// Static risk group file, tried first.
    pub risk_gh_url: Url,
    /// Base URL of the risk API. Definitions live under `/riskgroups/`.
    pub risk_api_url: Url,
    pub vaults_url: Url,
}

impl SourceEndpoints {
    pub fn parse(risk_gh_url: &str, risk_api_url: &str, vaults_url: &str) -> Result<Self, SourceError> {
        Ok(Self {
            risk_gh_url: Url::parse(risk_gh_url)?,
            risk_api_url: Url::parse(risk_api_url)?,
            vaults_url: Url::parse(vaults_url)?,
        })
    }

    /// Risk group endpoints in fallback order.
    pub fn risk_group_endpoints(&self) -> Result<Vec<Url>, SourceError> {
        let api = Url::parse(&format!(
            "{}/riskgroups/",
            self.risk_api_url.as_str().trim_end_matches('/')
        ))?;
        Ok(vec![self.risk_gh_url.clone(), api])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_group_endpoints_order() {
        let endpoints = SourceEndpoints::parse(
            "https://raw.githubusercontent.com/org/risk/main/groups.json",
            "https://risk.example.org/api/",
            "https://api.example.org/vaults/all",
        )
        .unwrap();
        let urls: Vec<String> = endpoints
            .risk_group_endpoints()
            .unwrap()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://raw.githubusercontent.com/org/risk/main/groups.json",
                "https://risk.example.org/api/riskgroups/",
            ]
        );
    }

    #[test]
    fn test_rejects_relative_urls() {
        assert!(SourceEndpoints::parse("groups.json", "https://a.org", "https://b.org").is_err());
    }
}
