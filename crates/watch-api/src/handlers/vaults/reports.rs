use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use watch_analytics::{average_apr_pct, latest_reports, median_apr_pct};

use crate::{
    AppState,
    dto::{ApiResponse, ReportsQuery, StrategyReportsDTO},
    errors::ApiError,
    helpers::{find_vault, loaded_vaults},
};

#[utoipa::path(
    get,
    path = "/vaults/{address}/strategies/{strategy}/reports",
    tag = "Vaults",
    params(
        ("address" = String, Path, description = "Vault address"),
        ("strategy" = String, Path, description = "Strategy address"),
        ReportsQuery
    ),
    responses(
        (status = 200, description = "APR statistics and latest harvest reports", body = ApiResponse<StrategyReportsDTO>),
        (status = 404, description = "Vault or strategy not found"),
        (status = 503, description = "Vault snapshot not loaded yet")
    )
)]
pub async fn get_strategy_reports(
    State(state): State<AppState>,
    Path((address, strategy_address)): Path<(String, String)>,
    Query(query): Query<ReportsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = loaded_vaults(&state.store)?;
    let vault = find_vault(&snapshot.items, &address)?;
    let strategy = vault.strategy(&strategy_address).ok_or_else(|| {
        ApiError::NotFound(format!(
            "Strategy {strategy_address} not found in vault {address}"
        ))
    })?;

    let reports = &strategy.reports;
    let dto = StrategyReportsDTO {
        vault_address: vault.address.clone(),
        strategy_address: strategy.address.clone(),
        reports_count: reports.len(),
        average_apr_pct: average_apr_pct(reports),
        median_apr_pct: median_apr_pct(reports),
        reports: latest_reports(reports, query.limit())
            .into_iter()
            .cloned()
            .collect(),
    };

    Ok(Json(ApiResponse::ok(dto)))
}
