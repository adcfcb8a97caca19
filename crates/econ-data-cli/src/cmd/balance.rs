use anyhow::Result;
use econ_data_client::{parse_identity, ClientConfig};
use serde::Serialize;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::signature::Signer;

use crate::io::keypair;
use crate::output;

#[derive(Debug, Serialize)]
pub struct BalanceOut {
    pub pubkey: String,
    pub lamports: u64,
    pub sol: f64,
}

pub fn to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

pub async fn run(cfg: &ClientConfig, pubkey: Option<&str>) -> Result<()> {
    let pubkey = match pubkey {
        Some(s) => parse_identity(s)?,
        None => keypair::load(&cfg.keypair_path)?.pubkey(),
    };
    let client = super::rpc_client(cfg)?;
    let lamports = client.balance(&pubkey).await?;

    output::print(&BalanceOut { pubkey: pubkey.to_string(), lamports, sol: to_sol(lamports) })
}
