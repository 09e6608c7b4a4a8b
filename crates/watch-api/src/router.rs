use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;

use utoipa::OpenApi as OpenApiT;
use utoipa_swagger_ui::SwaggerUi;

use crate::{AppState, handlers};

pub fn api_router<T: OpenApiT>(_state: AppState) -> Router<AppState> {
    let open_api = T::openapi();
    let vaults_router = Router::new()
        .route("/", get(handlers::list_vaults))
        .route("/{address}/allocations", get(handlers::get_vault_allocations))
        .route(
            "/{address}/strategies/{strategy}/reports",
            get(handlers::get_strategy_reports),
        );

    Router::new()
        .route("/health", get(health))
        .route("/v1/config", get(handlers::get_config))
        .route("/v1/alerts", get(handlers::list_alerts))
        .route("/v1/risk", get(handlers::get_risk_groups))
        .nest("/v1/vaults", vaults_router)
        .merge(SwaggerUi::new("/v1/docs").url("/v1/docs/openapi.json", open_api))
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
