use std::env;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub app_url: String,
    pub debug: bool,
    pub spanner_emulator_host: Option<String>,
    pub spanner_project: String,
    pub spanner_instance: String,
    pub spanner_database: String,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let app_url = env::var("APP_URL")
            .unwrap_or_else(|_| "http://localhost".to_string())
            .trim_end_matches('/')
            .to_string();

        let debug = env::var("APP_DEBUG")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        let spanner_emulator_host = env::var("SPANNER_EMULATOR_HOST").ok();

        let spanner_project = env::var("SPANNER_PROJECT")
            .context("SPANNER_PROJECT environment variable is required")?;

        let spanner_instance = env::var("SPANNER_INSTANCE")
            .context("SPANNER_INSTANCE environment variable is required")?;

        let spanner_database = env::var("SPANNER_DATABASE")
            .context("SPANNER_DATABASE environment variable is required")?;

        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Config {
            app_url,
            debug,
            spanner_emulator_host,
            spanner_project,
            spanner_instance,
            spanner_database,
            service_port,
            service_host,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  App URL: {}", self.app_url);
        tracing::info!("  Debug mode: {}", self.debug);
        tracing::info!("  Spanner emulator: {}",
            self.spanner_emulator_host.as_deref().unwrap_or("disabled (using production)"));
        tracing::info!("  Spanner project: {}", self.spanner_project);
        tracing::info!("  Spanner instance: {}", self.spanner_instance);
        tracing::info!("  Spanner database: {}", self.spanner_database);
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}
