use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use watch_analytics::{VaultFilter, filter_vaults};

use crate::{
    AppState,
    dto::{ApiResponse, VaultListDTO, VaultListQuery},
    errors::ApiError,
    helpers::loaded_vaults,
};

#[utoipa::path(
    get,
    path = "/vaults",
    tag = "Vaults",
    params(VaultListQuery),
    responses(
        (status = 200, description = "Vaults matching the search, with result counts", body = ApiResponse<VaultListDTO>),
        (status = 503, description = "Vault snapshot not loaded yet")
    )
)]
pub async fn list_vaults(
    State(state): State<AppState>,
    Query(query): Query<VaultListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = loaded_vaults(&state.store)?;
    let filter = VaultFilter {
        term: query.search,
        only_with_alerts: query.only_with_alerts,
    };
    let search = filter_vaults(&snapshot.items, &filter);

    Ok(Json(ApiResponse::ok(VaultListDTO::new(
        &search,
        snapshot.updated_at,
    ))))
}
