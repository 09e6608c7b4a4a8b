use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use watch_types::{RiskGroupDefinition, Vault};

/// Immutable view of one fetched list.
#[derive(Debug)]
pub struct Snapshot<T> {
    pub items: Arc<Vec<T>>,
    /// `None` until the first successful refresh.
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            updated_at: self.updated_at,
        }
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            updated_at: None,
        }
    }
}

/// Latest vault list and risk group definitions shared between the refresh
/// task and the API. Writers swap whole snapshots, readers get a cheap clone
/// of the current one.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    vaults: RwLock<Snapshot<Vault>>,
    risk_groups: RwLock<Snapshot<RiskGroupDefinition>>,
}

impl SnapshotStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn vaults(&self) -> Snapshot<Vault> {
        read(&self.vaults)
    }

    pub fn risk_groups(&self) -> Snapshot<RiskGroupDefinition> {
        read(&self.risk_groups)
    }

    pub fn replace_vaults(&self, vaults: Vec<Vault>, at: DateTime<Utc>) {
        write(&self.vaults, vaults, at);
    }

    pub fn replace_risk_groups(&self, definitions: Vec<RiskGroupDefinition>, at: DateTime<Utc>) {
        write(&self.risk_groups, definitions, at);
    }
}

fn read<T>(lock: &RwLock<Snapshot<T>>) -> Snapshot<T> {
    lock.read().unwrap_or_else(PoisonError::into_inner).clone()
}

fn write<T>(lock: &RwLock<Snapshot<T>>, items: Vec<T>, at: DateTime<Utc>) {
    let mut guard = lock.write().unwrap_or_else(PoisonError::into_inner);
    *guard = Snapshot {
        items: Arc::new(items),
        updated_at: Some(at),
    };
}
