use watch_types::{Strategy, Vault};

fn contains_folded(haystack: &str, folded_term: &str) -> bool {
    haystack.to_lowercase().contains(folded_term)
}

/// True when `term` is empty or is a case-insensitive substring of the
/// strategy name, address or description.
pub fn matches_strategy(strategy: &Strategy, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    strategy_contains(strategy, &term)
}

fn strategy_contains(strategy: &Strategy, folded_term: &str) -> bool {
    [&strategy.name, &strategy.address, &strategy.description]
        .into_iter()
        .any(|field| contains_folded(field, folded_term))
}

/// True when `term` is empty, is a case-insensitive substring of one of the
/// vault or token identifying fields, or matches one of its strategies.
pub fn matches_vault(vault: &Vault, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();

    let fields = [
        &vault.address,
        &vault.name,
        &vault.display_name,
        &vault.symbol,
        &vault.token.name,
        &vault.token.address,
        &vault.token.display_name,
    ];

    fields.into_iter().any(|field| contains_folded(field, &term))
        || vault.strategies.iter().any(|s| strategy_contains(s, &term))
}

/// Vault list filter driven by the search box and the "only vaults with
/// warnings" switch.
#[derive(Debug, Clone, Default)]
pub struct VaultFilter {
    pub term: String,
    pub only_with_alerts: bool,
}

#[derive(Debug, Clone, Default)]
pub struct VaultSearch<'a> {
    pub vaults: Vec<&'a Vault>,
    pub vaults_found: usize,
    /// Every strategy of every matching vault.
    pub strategies_found: usize,
}

pub fn filter_vaults<'a>(vaults: &'a [Vault], filter: &VaultFilter) -> VaultSearch<'a> {
    let matching: Vec<&Vault> = vaults
        .iter()
        .filter(|v| !filter.only_with_alerts || v.has_alerts())
        .filter(|v| matches_vault(v, &filter.term))
        .collect();

    VaultSearch {
        vaults_found: matching.len(),
        strategies_found: matching.iter().map(|v| v.strategies.len()).sum(),
        vaults: matching,
    }
}
