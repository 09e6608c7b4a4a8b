pub mod docs;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod helpers;
pub mod router;

#[cfg(test)]
mod test_utils;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum_tracing_opentelemetry::middleware::{OtelAxumLayer, OtelInResponseLayer};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use pragma_common::services::{Service, ServiceRunner};
use watch_analytics::ScoreTables;
use watch_sources::SnapshotStore;

use docs::ApiDoc;
use router::api_router;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SnapshotStore>,
    pub scoring: Arc<ScoreTables>,
    /// Chain id used when a request does not name one.
    pub network: u64,
    pub repository_url: Option<String>,
}

pub struct ApiService {
    state: AppState,
    host: String,
    port: u16,
}

impl ApiService {
    pub fn new(state: AppState, host: &str, port: u16) -> Self {
        Self {
            state,
            host: host.to_owned(),
            port,
        }
    }
}

fn cors_layer_from_env() -> CorsLayer {
    let Ok(origins) = env::var("CORS_ALLOWED_ORIGINS") else {
        tracing::info!("CORS_ALLOWED_ORIGINS not set; using permissive CORS configuration");
        return CorsLayer::permissive();
    };

    let allowed_origins: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(
                    origin,
                    error = %err,
                    "Invalid origin in CORS_ALLOWED_ORIGINS, skipping",
                );
                None
            }
        })
        .collect();

    if allowed_origins.is_empty() {
        tracing::warn!(
            "CORS_ALLOWED_ORIGINS was set but no valid origins were parsed; falling back to permissive CORS",
        );
        return CorsLayer::permissive();
    }

    tracing::info!(allowed = %origins, "Configured restricted CORS origins from environment");

    CorsLayer::new()
        .allow_headers(AllowHeaders::mirror_request())
        .allow_methods(AllowMethods::list([Method::GET, Method::OPTIONS]))
        .allow_origin(AllowOrigin::list(allowed_origins))
}

#[async_trait::async_trait]
impl Service for ApiService {
    async fn start<'a>(&mut self, mut runner: ServiceRunner<'a>) -> anyhow::Result<()> {
        ApiDoc::generate_openapi_json("./".into())?;

        let host = self.host.clone();
        let port = self.port;
        let state = self.state.clone();

        runner.spawn_loop(move |ctx| async move {
            let address = format!("{host}:{port}");
            let socket_addr: SocketAddr = address.parse()?;
            let listener = TcpListener::bind(socket_addr).await?;

            #[allow(clippy::default_constructed_unit_structs)]
            let app = api_router::<ApiDoc>(state.clone())
                .with_state(state)
                // include trace context as header into the response
                .layer(OtelInResponseLayer::default())
                // start OpenTelemetry trace on incoming request
                .layer(OtelAxumLayer::default())
                .layer(cors_layer_from_env());

            tracing::info!("🧩 API started at http://{}", socket_addr);

            let token = ctx.token.clone();
            let shutdown = async move { token.cancelled().await };

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await
                .context("😱 API server stopped!")
        });

        Ok(())
    }
}
