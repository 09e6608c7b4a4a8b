use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    AppState,
    dto::{ApiResponse, ConfigDTO},
    errors::ApiError,
};

#[utoipa::path(
    get,
    path = "/config",
    tag = "Config",
    responses(
        (status = 200, description = "Active network, repository link and snapshot ages", body = ApiResponse<ConfigDTO>)
    )
)]
pub async fn get_config(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let dto = ConfigDTO {
        network: state.network,
        repository_url: state.repository_url.clone(),
        vaults_updated_at: state.store.vaults().updated_at,
        risk_groups_updated_at: state.store.risk_groups().updated_at,
    };
    Ok(Json(ApiResponse::ok(dto)))
}
