use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use watch_analytics::{Allocation, ProtocolAllocation, VaultSearch, strategy_pct};
use watch_types::{Strategy, StrategyReport, Vault};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VaultListDTO {
    pub vaults_found: usize,
    pub strategies_found: usize,
    pub vaults: Vec<Vault>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl VaultListDTO {
    pub fn new(search: &VaultSearch<'_>, updated_at: Option<DateTime<Utc>>) -> Self {
        Self {
            vaults_found: search.vaults_found,
            strategies_found: search.strategies_found,
            vaults: search.vaults.iter().map(|v| (*v).clone()).collect(),
            updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StrategyAllocationDTO {
    pub address: String,
    pub name: String,
    pub debt_ratio_bps: u64,
    pub debt_ratio_pct: f64,
    pub protocols: Vec<String>,
}

impl From<&Strategy> for StrategyAllocationDTO {
    fn from(strategy: &Strategy) -> Self {
        Self {
            address: strategy.address.clone(),
            name: strategy.name.clone(),
            debt_ratio_bps: strategy.details.debt_ratio,
            debt_ratio_pct: strategy_pct(strategy),
            protocols: strategy.details.protocols.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProtocolAllocationDTO {
    pub protocol: String,
    pub debt_ratio_bps: u64,
    /// Share of the summed protocol allocations, not of the vault.
    pub pct: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AllocationDTO {
    pub vault_address: String,
    pub allocated_bps: u64,
    pub unallocated_pct: f64,
    /// Active strategies, highest debt ratio first
    pub strategies: Vec<StrategyAllocationDTO>,
    pub zero_allocation: Vec<StrategyAllocationDTO>,
    pub protocols: Vec<ProtocolAllocationDTO>,
    pub total_protocols_allocation_bps: u64,
}

impl AllocationDTO {
    pub fn new(vault: &Vault, allocation: &Allocation<'_>) -> Self {
        let protocol = |p: &ProtocolAllocation| ProtocolAllocationDTO {
            protocol: p.protocol.clone(),
            debt_ratio_bps: p.debt_ratio,
            pct: allocation.protocol_pct(p),
        };

        Self {
            vault_address: vault.address.clone(),
            allocated_bps: allocation.allocated_bps,
            unallocated_pct: allocation.unallocated_pct(),
            strategies: allocation
                .active
                .iter()
                .map(|s| StrategyAllocationDTO::from(*s))
                .collect(),
            zero_allocation: allocation
                .zero_allocation
                .iter()
                .map(|s| StrategyAllocationDTO::from(*s))
                .collect(),
            protocols: allocation.protocols.iter().map(protocol).collect(),
            total_protocols_allocation_bps: allocation.total_protocols_allocation,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StrategyReportsDTO {
    pub vault_address: String,
    pub strategy_address: String,
    pub reports_count: usize,
    pub average_apr_pct: f64,
    pub median_apr_pct: f64,
    /// Newest first
    pub reports: Vec<StrategyReport>,
}
