//! Service config: Genie workspace credentials, bind address, log file.
//! Loaded from environment variables; `main` loads `.env` first via dotenvy.

use anyhow::Result;
use std::env;

/// Webhook service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// DATABRICKS_HOST
    pub databricks_host: String,
    /// DATABRICKS_TOKEN
    pub databricks_token: String,
    /// GENIE_SPACE_ID
    pub genie_space_id: String,
    /// HOST, default 0.0.0.0
    pub host: String,
    /// PORT, default 3978
    pub port: u16,
    /// LOG_FILE, optional tee target for tracing output
    pub log_file: Option<String>,
}

impl AppConfig {
    /// Loads from environment variables. The three Databricks/Genie variables
    /// are required; bind address and log file have defaults.
    pub fn from_env() -> Result<Self> {
        let databricks_host = env::var("DATABRICKS_HOST")
            .map_err(|_| anyhow::anyhow!("DATABRICKS_HOST not set"))?;
        let databricks_token = env::var("DATABRICKS_TOKEN")
            .map_err(|_| anyhow::anyhow!("DATABRICKS_TOKEN not set"))?;
        let genie_space_id =
            env::var("GENIE_SPACE_ID").map_err(|_| anyhow::anyhow!("GENIE_SPACE_ID not set"))?;
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3978);
        let log_file = env::var("LOG_FILE").ok();

        Ok(Self {
            databricks_host,
            databricks_token,
            genie_space_id,
            host,
            port,
            log_file,
        })
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
