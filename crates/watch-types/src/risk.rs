use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Match strings selecting the strategies of a risk group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskCriteria {
    /// A strategy matching any of these is never part of the group.
    pub exclude: Vec<String>,
    pub name_like: Vec<String>,
    /// Strategy addresses or names. Empty entries are ignored.
    pub strategies: Vec<String>,
}

/// Curated risk group as published by the risk framework data sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskGroupDefinition {
    pub label: String,
    /// Chain id the group applies to.
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub network: u64,
    pub criteria: RiskCriteria,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub audit_score: f64,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub code_review_score: f64,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub testing_score: f64,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub protocol_safety_score: f64,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub complexity_score: f64,
    #[serde(deserialize_with = "crate::de::null_as_default")]
    pub team_knowledge_score: f64,
}

impl RiskGroupDefinition {
    /// The six externally curated sub-scores, in a fixed order.
    pub const fn curated_scores(&self) -> [f64; 6] {
        [
            self.audit_score,
            self.code_review_score,
            self.testing_score,
            self.protocol_safety_score,
            self.complexity_score,
            self.team_knowledge_score,
        ]
    }
}

/// Strategy counted in a risk group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchedStrategy {
    pub address: String,
    pub name: String,
    pub vault_address: String,
    #[serde(rename = "totalDebtUSDC")]
    pub total_debt_usdc: f64,
    pub activation: u64,
}

/// Scores of a risk group computed against one vault snapshot. Never
/// persisted; recomputed whenever an input changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskGroupResult {
    #[serde(flatten)]
    pub definition: RiskGroupDefinition,
    pub tvl: f64,
    pub strategies_count: usize,
    pub strategies: Vec<MatchedStrategy>,
    /// Unix seconds of the oldest matched activation, 0 when unset.
    pub oldest_activation: u64,
    pub longevity_score: f64,
    pub median_score: f64,
    pub tvl_impact: f64,
    pub impact_score: f64,
    /// Share of this group's TVL among the groups of the same pass, in
    /// percent. Not an on-chain debt ratio.
    pub total_debt_ratio: f64,
    /// Query string reproducing the group's criteria, for deep links.
    pub url_params: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_wire_format() {
        let json = r#"{
            "label": "Curve",
            "network": 1,
            "criteria": {"exclude": ["Convex"], "nameLike": ["Curve"], "strategies": [""]},
            "auditScore": 1,
            "codeReviewScore": 2,
            "testingScore": 3,
            "protocolSafetyScore": 2,
            "complexityScore": 4,
            "teamKnowledgeScore": 1
        }"#;
        let def: RiskGroupDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.network, 1);
        assert_eq!(def.criteria.name_like, vec!["Curve".to_string()]);
        assert_eq!(def.curated_scores(), [1.0, 2.0, 3.0, 2.0, 4.0, 1.0]);
    }

    #[test]
    fn test_null_scores_default_to_zero() {
        let json = r#"{
            "label": "Aave",
            "network": 1,
            "auditScore": null,
            "codeReviewScore": 2,
            "testingScore": null,
            "protocolSafetyScore": 3,
            "complexityScore": 4,
            "teamKnowledgeScore": 5
        }"#;
        let def: RiskGroupDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.curated_scores(), [0.0, 2.0, 0.0, 3.0, 4.0, 5.0]);
    }
}
