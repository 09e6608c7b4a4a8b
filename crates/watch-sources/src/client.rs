use std::time::Duration;

use reqwest::Client;

use crate::error::SourceError;

pub fn http_client(timeout: Duration) -> Result<Client, SourceError> {
    Client::builder().timeout(timeout).build().map_err(|e| {
        tracing::error!("Failed to build HTTP client: {}", e);
        SourceError::ClientBuild(e.to_string())
    })
}
