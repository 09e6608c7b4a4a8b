use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

/// Score given to a group that matched no strategy: "insufficient data".
pub const LONGEVITY_SENTINEL: f64 = 5.0;

/// Median of `values`. Works on a sorted copy, so the caller's order is kept.
/// Returns 0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[middle]
    } else {
        (sorted[middle - 1] + sorted[middle]) / 2.0
    }
}

/// Scoring policy used by the risk group aggregation. All three functions
/// must be total and map onto the same ordinal scale as the curated
/// sub-scores.
pub trait RiskScoring {
    /// Score for a strategy age in days. Must be non-increasing in age.
    fn longevity_score(&self, age_days: f64) -> f64;

    /// Impact bucket for an absolute USD TVL.
    fn tvl_impact(&self, tvl: f64) -> f64;

    /// Composite used for risk matrix placement and ordering.
    fn impact_score(&self, tvl_impact: f64, median_score: f64) -> f64;
}

/// One cut point: inputs strictly below `below` score `score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub below: f64,
    pub score: f64,
}

/// Step function described by ascending cut points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub thresholds: Vec<Threshold>,
    /// Score for inputs at or above the last cut point, and for NaN.
    pub otherwise: f64,
}

impl ThresholdTable {
    pub fn new(
        table: &'static str,
        thresholds: Vec<Threshold>,
        otherwise: f64,
    ) -> Result<Self, AnalyticsError> {
        let this = Self {
            thresholds,
            otherwise,
        };
        this.validate(table)?;
        Ok(this)
    }

    pub fn lookup(&self, value: f64) -> f64 {
        self.thresholds
            .iter()
            .find(|t| value < t.below)
            .map_or(self.otherwise, |t| t.score)
    }

    fn validate(&self, table: &'static str) -> Result<(), AnalyticsError> {
        let invalid = |reason: String| AnalyticsError::InvalidScoreTable { table, reason };

        if !self.otherwise.is_finite() {
            return Err(invalid("fallback score must be finite".to_string()));
        }
        for t in &self.thresholds {
            if !t.below.is_finite() || !t.score.is_finite() {
                return Err(invalid(format!(
                    "cut point {} -> {} is not finite",
                    t.below, t.score
                )));
            }
        }
        if let Some(w) = self
            .thresholds
            .windows(2)
            .find(|w| w[0].below >= w[1].below)
        {
            return Err(invalid(format!(
                "cut points must be strictly ascending, got {} then {}",
                w[0].below, w[1].below
            )));
        }
        Ok(())
    }

    fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.thresholds
            .iter()
            .map(|t| t.score)
            .chain(std::iter::once(self.otherwise))
    }

    fn is_non_increasing(&self) -> bool {
        let scores: Vec<f64> = self.scores().collect();
        scores.windows(2).all(|w| w[0] >= w[1])
    }
}

/// Table-driven [`RiskScoring`].
///
/// `longevity` maps age in days, `tvl_impact` maps USD TVL, and `impact`
/// maps the product `tvl_impact * median_score` to the composite score.
///
/// The defaults are placeholders on the 0..=5 scale; deployments are
/// expected to load their own tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTables {
    pub longevity: ThresholdTable,
    pub tvl_impact: ThresholdTable,
    pub impact: ThresholdTable,
}

impl ScoreTables {
    pub fn new(
        longevity: ThresholdTable,
        tvl_impact: ThresholdTable,
        impact: ThresholdTable,
    ) -> Result<Self, AnalyticsError> {
        let tables = Self {
            longevity,
            tvl_impact,
            impact,
        };
        tables.validate()?;
        Ok(tables)
    }

    /// Parses tables from JSON and validates them.
    pub fn from_json(raw: &str) -> Result<Self, AnalyticsError> {
        let tables: Self =
            serde_json::from_str(raw).map_err(|e| AnalyticsError::InvalidScoreTable {
                table: "score_tables",
                reason: e.to_string(),
            })?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn validate(&self) -> Result<(), AnalyticsError> {
        self.longevity.validate("longevity")?;
        self.tvl_impact.validate("tvl_impact")?;
        self.impact.validate("impact")?;

        if !self.longevity.is_non_increasing() {
            return Err(AnalyticsError::InvalidScoreTable {
                table: "longevity",
                reason: "scores must not increase with age".to_string(),
            });
        }
        Ok(())
    }
}

const fn cut(below: f64, score: f64) -> Threshold {
    Threshold { below, score }
}

impl Default for ScoreTables {
    fn default() -> Self {
        Self {
            longevity: ThresholdTable {
                thresholds: vec![cut(7.0, 5.0), cut(30.0, 4.0), cut(120.0, 3.0), cut(240.0, 2.0)],
                otherwise: 1.0,
            },
            tvl_impact: ThresholdTable {
                thresholds: vec![
                    cut(1.0, 0.0),
                    cut(1_000_000.0, 1.0),
                    cut(10_000_000.0, 2.0),
                    cut(50_000_000.0, 3.0),
                    cut(100_000_000.0, 4.0),
                ],
                otherwise: 5.0,
            },
            impact: ThresholdTable {
                thresholds: vec![
                    cut(1.0, 0.0),
                    cut(3.0, 1.0),
                    cut(6.0, 2.0),
                    cut(10.0, 3.0),
                    cut(15.0, 4.0),
                ],
                otherwise: 5.0,
            },
        }
    }
}

impl RiskScoring for ScoreTables {
    fn longevity_score(&self, age_days: f64) -> f64 {
        self.longevity.lookup(age_days)
    }

    fn tvl_impact(&self, tvl: f64) -> f64 {
        self.tvl_impact.lookup(tvl)
    }

    fn impact_score(&self, tvl_impact: f64, median_score: f64) -> f64 {
        self.impact.lookup(tvl_impact * median_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median() {
        assert_eq!(median(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(median(&[]), 0.0);
        assert_eq!(median(&[7.0]), 7.0);
    }

    #[test]
    fn test_median_keeps_caller_order() {
        let values = vec![3.0, 1.0, 2.0];
        assert_eq!(median(&values), 2.0);
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_default_tables_are_valid() {
        ScoreTables::default().validate().unwrap();
    }

    #[test]
    fn test_longevity_is_non_increasing() {
        let tables = ScoreTables::default();
        let mut previous = f64::INFINITY;
        for age in [0.0, 1.0, 6.9, 7.0, 29.0, 30.0, 119.0, 120.0, 240.0, 10_000.0] {
            let score = tables.longevity_score(age);
            assert!(score <= previous, "score rose at age {age}");
            previous = score;
        }
        assert_eq!(tables.longevity_score(-3.0), 5.0);
    }

    #[test]
    fn test_tvl_impact_buckets() {
        let tables = ScoreTables::default();
        assert_eq!(tables.tvl_impact(0.0), 0.0);
        assert_eq!(tables.tvl_impact(999_999.0), 1.0);
        assert_eq!(tables.tvl_impact(1_000_000.0), 2.0);
        assert_eq!(tables.tvl_impact(5e9), 5.0);
    }

    #[test]
    fn test_lookup_is_total() {
        let tables = ScoreTables::default();
        assert_eq!(tables.tvl_impact(f64::NAN), 5.0);
        assert_eq!(tables.impact_score(0.0, 4.0), 0.0);
        assert_eq!(tables.impact_score(5.0, 5.0), 5.0);
    }

    #[test]
    fn test_rejects_unsorted_cut_points() {
        let err = ThresholdTable::new("tvl_impact", vec![cut(10.0, 1.0), cut(5.0, 2.0)], 3.0)
            .unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::InvalidScoreTable {
                table: "tvl_impact",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_increasing_longevity() {
        let longevity = ThresholdTable::new("longevity", vec![cut(7.0, 1.0)], 5.0).unwrap();
        let defaults = ScoreTables::default();
        let err = ScoreTables::new(longevity, defaults.tvl_impact, defaults.impact).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::InvalidScoreTable {
                table: "longevity",
                reason: "scores must not increase with age".to_string(),
            }
        );
    }

    #[test]
    fn test_tables_from_json() {
        let raw = r#"{
            "longevity": {"thresholds": [{"below": 30, "score": 5}], "otherwise": 1},
            "tvl_impact": {"thresholds": [], "otherwise": 3},
            "impact": {"thresholds": [{"below": 9, "score": 1}], "otherwise": 2}
        }"#;
        let tables = ScoreTables::from_json(raw).unwrap();
        assert_eq!(tables.longevity_score(10.0), 5.0);
        assert_eq!(tables.tvl_impact(1e12), 3.0);
        assert_eq!(tables.impact_score(3.0, 4.0), 2.0);

        assert!(ScoreTables::from_json("{}").is_err());
    }
}
