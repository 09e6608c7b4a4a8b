use watch_sources::{Snapshot, SnapshotStore};
use watch_types::Vault;

use crate::errors::ApiError;

/// Current vault snapshot, or 503 until the first refresh succeeded.
pub fn loaded_vaults(store: &SnapshotStore) -> Result<Snapshot<Vault>, ApiError> {
    let snapshot = store.vaults();
    if snapshot.updated_at.is_none() {
        return Err(ApiError::ServiceUnavailable(
            "Vault snapshot not loaded yet".to_string(),
        ));
    }
    Ok(snapshot)
}

pub fn find_vault<'a>(vaults: &'a [Vault], address: &str) -> Result<&'a Vault, ApiError> {
    vaults
        .iter()
        .find(|v| v.address.eq_ignore_ascii_case(address))
        .ok_or_else(|| ApiError::NotFound(format!("Vault {address} not found")))
}
