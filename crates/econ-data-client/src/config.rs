//! Client configuration.
//!
//! The library never reads environment variables itself; the CLI layers the
//! environment and flags over what is loaded here and hands the result in.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;
use thiserror::Error;

use crate::constants::DEFAULT_PROGRAM_ID;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("parse {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub rpc_url: String,
    pub program_id: String,
    pub keypair_path: PathBuf,
    /// One of `processed`, `confirmed`, `finalized`.
    pub commitment: String,
    /// Deadline for a single submission. No deadline when unset.
    pub submit_timeout_ms: Option<u64>,
    /// Byte limit for each string field of a record.
    pub max_field_len: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8899".to_string(),
            program_id: DEFAULT_PROGRAM_ID.to_string(),
            keypair_path: default_keypair_path(),
            commitment: "confirmed".to_string(),
            submit_timeout_ms: None,
            max_field_len: 256,
        }
    }
}

fn default_keypair_path() -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
    home.join(".config").join("solana").join("id.json")
}

impl ClientConfig {
    /// Load a TOML file. Missing keys keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let cfg: ClientConfig = toml::from_str(&raw)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        validate_config(&cfg)?;
        Ok(cfg)
    }

    pub fn program_id(&self) -> Result<Pubkey, ConfigError> {
        self.program_id
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("program_id is not a pubkey: {}", self.program_id)))
    }

    pub fn commitment(&self) -> Result<CommitmentConfig, ConfigError> {
        match self.commitment.as_str() {
            "processed" => Ok(CommitmentConfig::processed()),
            "confirmed" => Ok(CommitmentConfig::confirmed()),
            "finalized" => Ok(CommitmentConfig::finalized()),
            other => Err(ConfigError::Invalid(format!("unknown commitment: {other}"))),
        }
    }

    pub fn submit_timeout(&self) -> Option<Duration> {
        self.submit_timeout_ms.map(Duration::from_millis)
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &ClientConfig) -> Result<(), ConfigError> {
    if cfg.rpc_url.trim().is_empty() {
        return Err(ConfigError::Invalid("rpc_url must not be empty".to_string()));
    }
    cfg.program_id()?;
    cfg.commitment()?;
    if cfg.max_field_len == 0 {
        return Err(ConfigError::Invalid("max_field_len must be greater than zero".to_string()));
    }
    if cfg.submit_timeout_ms == Some(0) {
        return Err(ConfigError::Invalid("submit_timeout_ms must be greater than zero".to_string()));
    }
    Ok(())
}
