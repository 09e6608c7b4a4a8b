use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use watch_analytics::{AlertQuery, collect_alerts};

use crate::{
    AppState,
    dto::{AlertListDTO, AlertSubjectDTO, AlertsQuery, ApiResponse},
    errors::ApiError,
    helpers::loaded_vaults,
};

#[utoipa::path(
    get,
    path = "/alerts",
    tag = "Alerts",
    params(AlertsQuery),
    responses(
        (status = 200, description = "Vaults and strategies carrying matching alerts", body = ApiResponse<AlertListDTO>),
        (status = 503, description = "Vault snapshot not loaded yet")
    )
)]
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = loaded_vaults(&state.store)?;
    let alert_query = AlertQuery {
        term: query.search,
        level: query.level,
        include_dismissed: query.dismissed,
    };

    let subjects: Vec<AlertSubjectDTO> = collect_alerts(&snapshot.items, &alert_query)
        .iter()
        .map(|s| AlertSubjectDTO::new(s, alert_query.include_dismissed))
        .collect();

    Ok(Json(ApiResponse::ok(AlertListDTO {
        results: subjects.len(),
        subjects,
    })))
}

#[cfg(test)]
mod tests {
    use watch_types::AlertLevel;

    use super::*;
    use crate::test_utils::{body_json, loaded_state};

    #[tokio::test]
    async fn test_dismissed_alerts_are_opt_in() {
        let body = body_json(
            list_alerts(State(loaded_state()), Query(AlertsQuery::default()))
                .await
                .into_response(),
        )
        .await;
        assert_eq!(body["data"]["results"], 1);
        assert_eq!(body["data"]["subjects"][0]["kind"], "strategy");
        assert_eq!(body["data"]["subjects"][0]["address"], "0xCurve");

        let query = AlertsQuery {
            dismissed: true,
            ..Default::default()
        };
        let body = body_json(
            list_alerts(State(loaded_state()), Query(query))
                .await
                .into_response(),
        )
        .await;
        assert_eq!(body["data"]["results"], 2);
        assert_eq!(body["data"]["subjects"][1]["kind"], "vault");
        assert_eq!(body["data"]["subjects"][1]["alerts"][0]["isDismissed"], true);
    }

    #[tokio::test]
    async fn test_level_filter() {
        let query = AlertsQuery {
            level: Some(AlertLevel::Warning),
            dismissed: true,
            ..Default::default()
        };
        let body = body_json(
            list_alerts(State(loaded_state()), Query(query))
                .await
                .into_response(),
        )
        .await;
        assert_eq!(body["data"]["results"], 1);
        assert_eq!(body["data"]["subjects"][0]["address"], "0xDAI");
    }
}
