//! Configuration management for CovenantCore.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub node: NodeConfig,
    pub ledger: LedgerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Identifier of this validating node.
    pub node_id: String,
    /// Organization the node operates under.
    pub org_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Path to the SQLite-backed ledger state when running standalone.
    pub db_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON-formatted logs for aggregation systems.
    pub json: bool,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            node: NodeConfig {
                node_id: "node-001".to_string(),
                org_id: "org-001".to_string(),
            },
            ledger: LedgerConfig {
                db_path: "data/ledger.db".to_string(),
            },
            logging: LoggingConfig { json: false },
        }
    }
}
