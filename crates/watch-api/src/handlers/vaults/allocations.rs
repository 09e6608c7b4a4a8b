use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use watch_analytics::compute_allocation;

use crate::{
    AppState,
    dto::{AllocationDTO, ApiResponse},
    errors::ApiError,
    helpers::{find_vault, loaded_vaults},
};

#[utoipa::path(
    get,
    path = "/vaults/{address}/allocations",
    tag = "Vaults",
    params(
        ("address" = String, Path, description = "Vault address")
    ),
    responses(
        (status = 200, description = "Debt ratio breakdown by strategy and protocol", body = ApiResponse<AllocationDTO>),
        (status = 404, description = "Vault not found"),
        (status = 503, description = "Vault snapshot not loaded yet")
    )
)]
pub async fn get_vault_allocations(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = loaded_vaults(&state.store)?;
    let vault = find_vault(&snapshot.items, &address)?;
    let allocation = compute_allocation(&vault.strategies);

    Ok(Json(ApiResponse::ok(AllocationDTO::new(vault, &allocation))))
}
