use watch_types::StrategyReport;

use crate::score::median;

/// Mean APR of the reports, in percent. 0 when there are none.
pub fn average_apr_pct(reports: &[StrategyReport]) -> f64 {
    let total: f64 = reports.iter().map(|r| r.apr).sum();
    total / reports.len().max(1) as f64 * 100.0
}

/// Median APR of the reports, in percent. 0 when there are none.
pub fn median_apr_pct(reports: &[StrategyReport]) -> f64 {
    let aprs: Vec<f64> = reports.iter().map(|r| r.apr * 100.0).collect();
    median(&aprs)
}

/// Up to `limit` reports, newest first. Reports sharing a timestamp keep
/// their input order.
pub fn latest_reports(reports: &[StrategyReport], limit: usize) -> Vec<&StrategyReport> {
    let mut sorted: Vec<&StrategyReport> = reports.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted.truncate(limit);
    sorted
}
