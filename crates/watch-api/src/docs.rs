#![allow(clippy::needless_for_each)]

use std::path::PathBuf;

use anyhow::Result;
use serde_json::to_string_pretty;
use utoipa::openapi::{ServerBuilder, ServerVariableBuilder};
use utoipa::{Modify, OpenApi};

use crate::{dto, handlers};

pub struct ServerAddon;

impl Modify for ServerAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let version_variable = ServerVariableBuilder::new()
            .default_value("v1")
            .enum_values(Some(vec!["v1"]))
            .build();
        openapi.servers = Some(vec![
            ServerBuilder::new()
                .url("/{version}")
                .parameter("version", version_variable)
                .build(),
        ]);
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::config::get_config,
        handlers::vaults::list::list_vaults,
        handlers::vaults::allocations::get_vault_allocations,
        handlers::vaults::reports::get_strategy_reports,
        handlers::alerts::list_alerts,
        handlers::risk::get_risk_groups,
    ),
    components(schemas(
        dto::ConfigDTO,
        dto::VaultListDTO,
        dto::AllocationDTO,
        dto::StrategyAllocationDTO,
        dto::ProtocolAllocationDTO,
        dto::StrategyReportsDTO,
        dto::AlertListDTO,
        dto::AlertSubjectDTO,
        dto::SubjectKind,
        dto::RiskGroupsDTO,
    )),
    modifiers(&ServerAddon),
    tags(
        (name = "watch_bin", description = "Vault Watch analytics API"),
        (name = "Config", description = "Deployment settings"),
        (name = "Vaults", description = "Vault list, allocations and strategy reports"),
        (name = "Alerts", description = "Vault and strategy alerts"),
        (name = "Risk", description = "Risk framework groups")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn generate_openapi_json(output_path: PathBuf) -> Result<()> {
        let openapi = Self::openapi();
        let json = to_string_pretty(&openapi)?;

        let file_path = output_path.join("openapi.json");

        tracing::info!("Saving OpenAPI specs to {}...", file_path.display());

        std::fs::write(&file_path, json)?;
        tracing::info!("OpenAPI specs saved!");
        Ok(())
    }
}
