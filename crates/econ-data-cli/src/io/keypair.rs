use std::path::Path;

use anyhow::{anyhow, Result};
use solana_sdk::signature::{read_keypair_file, Keypair};

/// Read a Solana CLI keypair file (JSON array of 64 bytes).
pub fn load(path: &Path) -> Result<Keypair> {
    read_keypair_file(path).map_err(|e| anyhow!("failed to read keypair {}: {e}", path.display()))
}
