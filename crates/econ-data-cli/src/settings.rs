//! Layered configuration: defaults, then `--config`, then environment and flags.

use anyhow::{Context, Result};
use econ_data_client::{validate_config, ClientConfig};

use crate::args::Cli;

pub fn resolve(cli: &Cli) -> Result<ClientConfig> {
    let mut cfg = match &cli.config {
        Some(path) => ClientConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ClientConfig::default(),
    };

    // clap has already folded the environment into these.
    if let Some(url) = &cli.url {
        cfg.rpc_url = url.clone();
    }
    if let Some(keypair) = &cli.keypair {
        cfg.keypair_path = keypair.clone();
    }
    if let Some(program_id) = &cli.program_id {
        cfg.program_id = program_id.clone();
    }

    validate_config(&cfg)?;
    Ok(cfg)
}
