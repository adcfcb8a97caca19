use std::time::Duration;

use anyhow::{Context, Result};
use econ_data_client::{now_millis, ClientConfig, InvoiceRecord, SubmitOptions};
use serde::Serialize;
use solana_sdk::signature::Signer;
use tracing::info;

use crate::io::keypair;
use crate::output;

use super::balance::to_sol;

#[derive(Debug, Clone)]
pub struct SubmitInput {
    pub id: u64,
    pub invoice_data: String,
    pub hsn: String,
    pub amount: u64,
    pub quantity: u32,
    pub timestamp: Option<u64>,
    pub image_proof: String,
    pub timeout_ms: Option<u64>,
}

impl SubmitInput {
    fn record(&self) -> InvoiceRecord {
        InvoiceRecord {
            invoice_data_hash_id: self.id,
            invoice_data: self.invoice_data.clone(),
            hsn_number: self.hsn.clone(),
            amount: self.amount,
            quantity: self.quantity,
            timestamp: self.timestamp.unwrap_or_else(now_millis),
            image_proof: self.image_proof.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitOut {
    pub ok: bool,
    pub signature: String,
    pub account: String,
    pub authority: String,
    pub id: u64,
}

pub async fn run(cfg: &ClientConfig, input: SubmitInput) -> Result<()> {
    let signer = keypair::load(&cfg.keypair_path)?;
    let client = super::rpc_client(cfg)?;

    let authority = signer.pubkey();
    let lamports = client.balance(&authority).await?;
    info!(address = %authority, balance_sol = to_sol(lamports), "submitter");

    let record = input.record();
    let account = client.account_for(&authority, &record).address;
    let opts = SubmitOptions { deadline: input.timeout_ms.map(Duration::from_millis) };

    let signature = client
        .submit_with(&record, &signer, opts)
        .await
        .context("error calling submit_economic_data")?;

    output::print(&SubmitOut {
        ok: true,
        signature,
        account: account.to_string(),
        authority: authority.to_string(),
        id: record.invoice_data_hash_id,
    })
}
