use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::Utc;
use watch_analytics::{
    DEFAULT_RISK_SORT, RiskColumn, SortState, aggregate_risk_groups, compare_groups,
    definitions_for_network,
};

use crate::{
    AppState,
    dto::{ApiResponse, RiskGroupsDTO, RiskQuery},
    errors::ApiError,
    helpers::loaded_vaults,
};

#[utoipa::path(
    get,
    path = "/risk",
    tag = "Risk",
    params(RiskQuery),
    responses(
        (status = 200, description = "Scored risk groups of the network", body = ApiResponse<RiskGroupsDTO>),
        (status = 400, description = "Invalid sort column"),
        (status = 503, description = "Vault snapshot not loaded yet")
    )
)]
pub async fn get_risk_groups(
    State(state): State<AppState>,
    Query(query): Query<RiskQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let sort = match query.sort.as_deref() {
        None => DEFAULT_RISK_SORT,
        Some(raw) => raw
            .parse::<SortState<RiskColumn>>()
            .map_err(|_| ApiError::BadRequest(format!("Invalid sort column: {raw}")))?,
    };
    let network = query.network.unwrap_or(state.network);

    let vaults = loaded_vaults(&state.store)?;
    let published = state.store.risk_groups();
    let definitions = definitions_for_network(&published.items, network);

    let mut groups = aggregate_risk_groups(
        &definitions,
        &vaults.items,
        Utc::now(),
        state.scoring.as_ref(),
    );
    sort.sort(&mut groups, compare_groups);

    tracing::debug!(network, groups = groups.len(), sort = %sort, "Risk groups computed");

    Ok(Json(ApiResponse::ok(RiskGroupsDTO {
        network,
        sort: sort.to_string(),
        groups,
    })))
}
