use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use strum::{AsRefStr, Display, EnumString};
use url::form_urlencoded;

use watch_types::{
    MatchedStrategy, RiskCriteria, RiskGroupDefinition, RiskGroupResult, Strategy, Vault,
};

use crate::{
    score::{LONGEVITY_SENTINEL, RiskScoring, median},
    search::matches_strategy,
    sort::SortState,
};

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Sortable columns of the risk group table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum RiskColumn {
    Name,
    Tvl,
    /// TVL impact bucket.
    Risk,
    /// Median score.
    Likelihood,
    /// Impact score.
    Score,
}

pub const DEFAULT_RISK_SORT: SortState<RiskColumn> = SortState::ascending(RiskColumn::Score);

pub fn compare_groups(column: RiskColumn, a: &RiskGroupResult, b: &RiskGroupResult) -> Ordering {
    match column {
        RiskColumn::Name => a.definition.label.cmp(&b.definition.label),
        RiskColumn::Tvl => a.tvl.total_cmp(&b.tvl),
        RiskColumn::Risk => a.tvl_impact.total_cmp(&b.tvl_impact),
        RiskColumn::Likelihood => a.median_score.total_cmp(&b.median_score),
        RiskColumn::Score => a.impact_score.total_cmp(&b.impact_score),
    }
}

/// Definitions published for `network`. Network 0 means no active network.
pub fn definitions_for_network(
    definitions: &[RiskGroupDefinition],
    network: u64,
) -> Vec<RiskGroupDefinition> {
    if network == 0 {
        return Vec::new();
    }
    definitions
        .iter()
        .filter(|d| d.network == network)
        .cloned()
        .collect()
}

/// Whether `strategy` belongs to the group described by `criteria`.
/// Exclusions always win over inclusions.
pub fn strategy_in_group(criteria: &RiskCriteria, strategy: &Strategy) -> bool {
    if criteria
        .exclude
        .iter()
        .any(|term| matches_strategy(strategy, term))
    {
        return false;
    }

    criteria
        .name_like
        .iter()
        .any(|term| matches_strategy(strategy, term))
        || criteria
            .strategies
            .iter()
            .any(|term| !term.is_empty() && matches_strategy(strategy, term))
}

/// Stable query string for deep links to a group's strategy list. Lists keep
/// their order; empty lists are left out.
pub fn criteria_url_params(criteria: &RiskCriteria) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, values) in [
        ("exclude", &criteria.exclude),
        ("nameLike", &criteria.name_like),
        ("strategies", &criteria.strategies),
    ] {
        for value in values {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

#[derive(Debug, Default)]
struct GroupAccumulator {
    tvl: f64,
    strategies: Vec<MatchedStrategy>,
    oldest_activation: u64,
}

impl GroupAccumulator {
    fn include(&mut self, vault: &Vault, strategy: &Strategy) {
        let details = &strategy.details;
        self.tvl += details.total_debt_usdc;
        if details.activation != 0
            && (self.oldest_activation == 0 || details.activation < self.oldest_activation)
        {
            self.oldest_activation = details.activation;
        }
        self.strategies.push(MatchedStrategy {
            address: strategy.address.clone(),
            name: strategy.name.clone(),
            vault_address: vault.address.clone(),
            total_debt_usdc: details.total_debt_usdc,
            activation: details.activation,
        });
    }
}

fn age_in_days(oldest_activation: u64, now: DateTime<Utc>) -> f64 {
    let activation_ms = oldest_activation as f64 * 1000.0;
    (now.timestamp_millis() as f64 - activation_ms) / MILLIS_PER_DAY
}

fn score_group<S: RiskScoring + ?Sized>(
    definition: &RiskGroupDefinition,
    acc: GroupAccumulator,
    now: DateTime<Utc>,
    scoring: &S,
) -> RiskGroupResult {
    let longevity_score = if acc.strategies.is_empty() {
        LONGEVITY_SENTINEL
    } else {
        scoring.longevity_score(age_in_days(acc.oldest_activation, now))
    };

    let [audit, code_review, testing, protocol_safety, complexity, team_knowledge] =
        definition.curated_scores();
    let median_score = median(&[
        audit,
        code_review,
        testing,
        protocol_safety,
        complexity,
        team_knowledge,
        longevity_score,
    ]);

    let tvl_impact = scoring.tvl_impact(acc.tvl);
    let impact_score = scoring.impact_score(tvl_impact, median_score);

    RiskGroupResult {
        definition: definition.clone(),
        tvl: acc.tvl,
        strategies_count: acc.strategies.len(),
        strategies: acc.strategies,
        oldest_activation: acc.oldest_activation,
        longevity_score,
        median_score,
        tvl_impact,
        impact_score,
        total_debt_ratio: 0.0,
        url_params: criteria_url_params(&definition.criteria),
    }
}

/// Scores every definition against the vault snapshot.
///
/// Strategies are visited vault by vault in snapshot order. A strategy can
/// count towards several groups. `total_debt_ratio` is each group's share of
/// the TVL summed over all groups of this call, so overlapping strategies
/// count once per group in the denominator.
pub fn aggregate_risk_groups<S: RiskScoring + ?Sized>(
    definitions: &[RiskGroupDefinition],
    vaults: &[Vault],
    now: DateTime<Utc>,
    scoring: &S,
) -> Vec<RiskGroupResult> {
    let mut results: Vec<RiskGroupResult> = definitions
        .iter()
        .map(|definition| {
            let acc = vaults
                .iter()
                .flat_map(|vault| vault.strategies.iter().map(move |s| (vault, s)))
                .filter(|(_, strategy)| strategy_in_group(&definition.criteria, strategy))
                .fold(GroupAccumulator::default(), |mut acc, (vault, strategy)| {
                    acc.include(vault, strategy);
                    acc
                });
            score_group(definition, acc, now, scoring)
        })
        .collect();

    let grand_total: f64 = results.iter().map(|r| r.tvl).sum();
    for result in &mut results {
        result.total_debt_ratio = if grand_total == 0.0 {
            0.0
        } else {
            result.tvl / grand_total * 100.0
        };
    }

    results
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use watch_types::StrategyDetails;

    use super::*;
    use crate::score::ScoreTables;

    const T0: u64 = 1_600_000_000;

    fn strategy(name: &str, tvl: f64, activation: u64) -> Strategy {
        Strategy {
            address: format!("0x{}", name.len()),
            name: name.to_string(),
            details: StrategyDetails {
                total_debt_usdc: tvl,
                activation,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn vault(strategies: Vec<Strategy>) -> Vault {
        Vault {
            address: "0xvault".to_string(),
            strategies,
            ..Default::default()
        }
    }

    fn group(label: &str, name_like: &[&str], exclude: &[&str]) -> RiskGroupDefinition {
        RiskGroupDefinition {
            label: label.to_string(),
            network: 1,
            criteria: RiskCriteria {
                exclude: exclude.iter().map(|s| (*s).to_string()).collect(),
                name_like: name_like.iter().map(|s| (*s).to_string()).collect(),
                strategies: Vec::new(),
            },
            audit_score: 1.0,
            code_review_score: 2.0,
            testing_score: 3.0,
            protocol_safety_score: 4.0,
            complexity_score: 5.0,
            team_knowledge_score: 1.0,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(T0 as i64 + 400 * 24 * 60 * 60, 0).unwrap()
    }

    #[test]
    fn test_empty_group_uses_longevity_sentinel() {
        let vaults = vec![vault(vec![strategy("Aave Lender", 10.0, T0)])];
        let results = aggregate_risk_groups(
            &[group("Curve", &["Curve"], &[])],
            &vaults,
            now(),
            &ScoreTables::default(),
        );

        let r = &results[0];
        assert_eq!(r.strategies_count, 0);
        assert_eq!(r.longevity_score, 5.0);
        assert_eq!(r.tvl, 0.0);
        assert_eq!(r.total_debt_ratio, 0.0);
        assert_eq!(r.oldest_activation, 0);
    }

    #[test]
    fn test_exclude_dominates_include() {
        let vaults = vec![vault(vec![
            strategy("Curve Convex Rewards", 50.0, T0),
            strategy("Curve USDC Strategy", 100.0, T0),
        ])];
        let results = aggregate_risk_groups(
            &[group("Curve", &["Curve"], &["Convex"])],
            &vaults,
            now(),
            &ScoreTables::default(),
        );

        assert_eq!(results[0].strategies_count, 1);
        assert_eq!(results[0].strategies[0].name, "Curve USDC Strategy");
        assert_eq!(results[0].tvl, 100.0);
    }

    #[test]
    fn test_strategies_criterion_ignores_empty_entries() {
        let mut definition = group("Explicit", &[], &[]);
        definition.criteria.strategies = vec![String::new(), "0xa1b2".to_string()];
        let mut target = strategy("StrategyGenLevCompUSDC", 10.0, T0);
        target.address = "0xA1B2".to_string();
        let vaults = vec![vault(vec![target, strategy("Other", 20.0, T0)])];

        let results =
            aggregate_risk_groups(&[definition], &vaults, now(), &ScoreTables::default());
        assert_eq!(results[0].strategies_count, 1);
        assert_eq!(results[0].strategies[0].name, "StrategyGenLevCompUSDC");
    }

    #[test]
    fn test_empty_name_like_matches_everything() {
        let vaults = vec![vault(vec![strategy("A", 1.0, T0), strategy("B", 2.0, T0)])];
        let results = aggregate_risk_groups(
            &[group("All", &[""], &[])],
            &vaults,
            now(),
            &ScoreTables::default(),
        );
        assert_eq!(results[0].strategies_count, 2);
    }

    #[test]
    fn test_oldest_activation_ignores_unset_values() {
        let vaults = vec![
            vault(vec![strategy("Curve new", 1.0, T0 + 500)]),
            vault(vec![
                strategy("Curve unset", 1.0, 0),
                strategy("Curve old", 1.0, T0),
            ]),
        ];
        let results = aggregate_risk_groups(
            &[group("Curve", &["curve"], &[])],
            &vaults,
            now(),
            &ScoreTables::default(),
        );
        assert_eq!(results[0].strategies_count, 3);
        assert_eq!(results[0].oldest_activation, T0);
        // 400 days old with the default table
        assert_eq!(results[0].longevity_score, 1.0);
    }

    #[test]
    fn test_overlapping_groups_and_debt_ratio_share() {
        let vaults = vec![vault(vec![
            strategy("Curve sETH", 300.0, T0),
            strategy("Aave Lender", 100.0, T0),
        ])];
        let results = aggregate_risk_groups(
            &[
                group("Curve", &["Curve"], &[]),
                group("Everything", &["Curve", "Aave"], &[]),
            ],
            &vaults,
            now(),
            &ScoreTables::default(),
        );

        assert_eq!(results[0].tvl, 300.0);
        assert_eq!(results[1].tvl, 400.0);
        let shares: f64 = results.iter().map(|r| r.total_debt_ratio).sum();
        assert!((shares - 100.0).abs() < 1e-9);
        assert!((results[0].total_debt_ratio - 300.0 / 700.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_median_uses_seven_scores() {
        let vaults = vec![vault(vec![strategy("Curve", 1.0, T0)])];
        let results = aggregate_risk_groups(
            &[group("Curve", &["Curve"], &[])],
            &vaults,
            now(),
            &ScoreTables::default(),
        );
        // [1, 2, 3, 4, 5, 1] + longevity 1 -> sorted [1, 1, 1, 2, 3, 4, 5]
        assert_eq!(results[0].median_score, 2.0);
    }

    #[test]
    fn test_custom_scoring_is_used() {
        struct Flat;
        impl RiskScoring for Flat {
            fn longevity_score(&self, _: f64) -> f64 {
                3.0
            }
            fn tvl_impact(&self, _: f64) -> f64 {
                4.0
            }
            fn impact_score(&self, tvl_impact: f64, median_score: f64) -> f64 {
                tvl_impact + median_score
            }
        }

        let vaults = vec![vault(vec![strategy("Curve", 1.0, T0)])];
        let results =
            aggregate_risk_groups(&[group("Curve", &["Curve"], &[])], &vaults, now(), &Flat);
        assert_eq!(results[0].longevity_score, 3.0);
        assert_eq!(results[0].tvl_impact, 4.0);
        assert_eq!(results[0].impact_score, 4.0 + results[0].median_score);
    }

    #[test]
    fn test_url_params_are_stable() {
        let mut criteria = RiskCriteria {
            exclude: vec!["Convex".to_string()],
            name_like: vec!["Curve".to_string(), "crv & co".to_string()],
            strategies: Vec::new(),
        };
        assert_eq!(
            criteria_url_params(&criteria),
            "exclude=Convex&nameLike=Curve&nameLike=crv+%26+co"
        );
        criteria.exclude.clear();
        assert_eq!(
            criteria_url_params(&criteria),
            "nameLike=Curve&nameLike=crv+%26+co"
        );
    }

    #[test]
    fn test_definitions_for_network() {
        let mut fantom = group("Fantom", &[], &[]);
        fantom.network = 250;
        let defs = vec![group("Mainnet", &[], &[]), fantom];

        assert_eq!(definitions_for_network(&defs, 1).len(), 1);
        assert_eq!(definitions_for_network(&defs, 250)[0].label, "Fantom");
        assert!(definitions_for_network(&defs, 0).is_empty());
    }

    #[test]
    fn test_sort_by_risk_columns() {
        let vaults = vec![vault(vec![
            strategy("Curve", 5e7, T0),
            strategy("Aave", 10.0, T0),
        ])];
        let mut results = aggregate_risk_groups(
            &[group("Curve", &["Curve"], &[]), group("Aave", &["Aave"], &[])],
            &vaults,
            now(),
            &ScoreTables::default(),
        );

        "-tvl"
            .parse::<SortState<RiskColumn>>()
            .unwrap()
            .sort(&mut results, compare_groups);
        assert_eq!(results[0].definition.label, "Curve");

        SortState::ascending(RiskColumn::Name).sort(&mut results, compare_groups);
        assert_eq!(results[0].definition.label, "Aave");
    }
}
