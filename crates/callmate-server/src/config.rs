//! Server configuration
//!
//! Loaded from YAML, with every section optional. CLI flags are applied on
//! top of whatever the file provides.

use crate::cli::ServeArgs;
use callmate_classifiers::{AgentConfig, ContextConfig, RedactionConfig, SummaryConfig};
use callmate_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CallmateConfig {
    pub server: ServerConfig,
    pub context: ContextConfig,
    pub agents: AgentConfig,
    pub redaction: RedactionConfig,
    pub summary: SummaryConfig,
    pub storage: StorageConfig,
}

impl CallmateConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &Path, cli: &ServeArgs) -> anyhow::Result<Self> {
        // Missing file means defaults
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_yaml(&content)?
        } else {
            tracing::info!(path = %config_path.display(), "config file not found, using defaults");
            Self::default()
        };

        if let Some(listen) = &cli.listen {
            config.server.listen = listen.clone();
        }
        if let Some(port) = cli.port {
            config.server.port = port;
        }
        if let Some(data_dir) = &cli.data_dir {
            config.storage.data_dir = data_dir.clone();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.context.validate()?;
        self.agents.validate()?;
        self.redaction.validate()?;
        self.summary.validate()
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
    pub port: u16,

    /// Upper bound on one `/suggest` call (milliseconds)
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1".to_string(),
            port: 8000,
            request_timeout_ms: 10_000,
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.listen.trim().is_empty() {
            return Err(Error::config("server listen address must not be empty"));
        }
        if self.request_timeout_ms == 0 {
            return Err(Error::config("request_timeout_ms must be positive"));
        }
        Ok(())
    }
}

/// Where feedback and consent logs live
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl StorageConfig {
    pub fn feedback_path(&self) -> PathBuf {
        self.data_dir.join("feedback.jsonl")
    }

    pub fn consent_path(&self) -> PathBuf {
        self.data_dir.join("consent.jsonl")
    }
}
