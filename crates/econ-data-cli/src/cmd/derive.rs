use anyhow::Result;
use econ_data_client::{parse_identity, pda, ClientConfig, SEED_ECONOMIC_DATA};
use serde::Serialize;
use solana_sdk::signature::Signer;

use crate::io::keypair;
use crate::output;

#[derive(Debug, Serialize)]
pub struct DeriveOut {
    pub seed: String,
    pub owner: String,
    pub id: u64,
    pub address: String,
    pub address_hex: String,
    pub bump: u8,
}

pub fn run(cfg: &ClientConfig, id: u64, owner: Option<&str>) -> Result<()> {
    let owner = match owner {
        Some(s) => parse_identity(s)?,
        None => keypair::load(&cfg.keypair_path)?.pubkey(),
    };
    let program_id = cfg.program_id()?;
    let derived = pda::derive_account_address(&program_id, SEED_ECONOMIC_DATA, owner.as_ref(), id)?;

    output::print(&DeriveOut {
        seed: String::from_utf8_lossy(SEED_ECONOMIC_DATA).into_owned(),
        owner: owner.to_string(),
        id,
        address: derived.address.to_string(),
        address_hex: hex::encode(derived.to_bytes()),
        bump: derived.bump,
    })
}
