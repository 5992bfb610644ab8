use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::redfish::{Credentials, RedfishClient};

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub client: Arc<RedfishClient>,
    /// Controller address as given on the command line.
    pub controller: String,
}

impl AppContext {
    pub fn new(config: AppConfig, controller: &str, credentials: Credentials) -> Result<Self> {
        let client = RedfishClient::new(
            &config.base_url(controller),
            credentials,
            config.request_timeout(),
        )
        .context("Failed to build HTTP client")?;

        Ok(Self {
            config: Arc::new(config),
            client: Arc::new(client),
            controller: controller.to_string(),
        })
    }
}
