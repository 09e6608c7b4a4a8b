use watch_types::Strategy;

/// Accumulated debt ratio of one protocol tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolAllocation {
    pub protocol: String,
    pub debt_ratio: u64,
}

/// Debt ratio distribution of one vault.
///
/// A strategy tagged with several protocols adds its full debt ratio to each
/// of them, so protocol allocations overlap and only sum to the vault total
/// when every active strategy carries exactly one tag. Percentages computed
/// with [`Allocation::protocol_pct`] are relative to
/// [`Allocation::total_protocols_allocation`], not to the vault.
#[derive(Debug, Clone, Default)]
pub struct Allocation<'a> {
    /// Active strategies, highest debt ratio first.
    pub active: Vec<&'a Strategy>,
    pub zero_allocation: Vec<&'a Strategy>,
    /// Protocol tags in first-seen order.
    pub protocols: Vec<ProtocolAllocation>,
    pub total_protocols_allocation: u64,
    /// Sum of the active strategies' debt ratios, in basis points.
    /// Sums saturate at `u64::MAX` on malformed snapshots.
    pub allocated_bps: u64,
}

impl Allocation<'_> {
    pub fn protocol_pct(&self, protocol: &ProtocolAllocation) -> f64 {
        ratio_pct(protocol.debt_ratio, self.total_protocols_allocation)
    }

    /// Share of the vault left to no strategy, in percent.
    pub fn unallocated_pct(&self) -> f64 {
        100.0 - self.allocated_bps as f64 / 100.0
    }
}

/// Basis points to percent.
pub fn strategy_pct(strategy: &Strategy) -> f64 {
    strategy.details.debt_ratio as f64 / 100.0
}

fn ratio_pct(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

fn add_protocol(
    mut protocols: Vec<ProtocolAllocation>,
    tag: &str,
    debt_ratio: u64,
) -> Vec<ProtocolAllocation> {
    match protocols.iter_mut().find(|p| p.protocol == tag) {
        Some(existing) => existing.debt_ratio = existing.debt_ratio.saturating_add(debt_ratio),
        None => protocols.push(ProtocolAllocation {
            protocol: tag.to_string(),
            debt_ratio,
        }),
    }
    protocols
}

pub fn compute_allocation(strategies: &[Strategy]) -> Allocation<'_> {
    let mut sorted: Vec<&Strategy> = strategies.iter().collect();
    // stable: equal debt ratios keep their original order
    sorted.sort_by(|a, b| b.details.debt_ratio.cmp(&a.details.debt_ratio));

    let (zero_allocation, active): (Vec<&Strategy>, Vec<&Strategy>) = sorted
        .into_iter()
        .partition(|s| s.details.debt_ratio == 0);

    let (protocols, total_protocols_allocation) = active
        .iter()
        .flat_map(|s| {
            s.details
                .protocols
                .iter()
                .map(move |tag| (tag.as_str(), s.details.debt_ratio))
        })
        .fold((Vec::new(), 0_u64), |(protocols, total), (tag, ratio)| {
            (add_protocol(protocols, tag, ratio), total.saturating_add(ratio))
        });

    let allocated_bps = active
        .iter()
        .map(|s| s.details.debt_ratio)
        .fold(0_u64, u64::saturating_add);

    Allocation {
        active,
        zero_allocation,
        protocols,
        total_protocols_allocation,
        allocated_bps,
    }
}
