use anyhow::Result;
use econ_data_client::{ClientConfig, InvoiceSubmissionClient, RpcTransport};

use crate::args::{Cli, Command};
use crate::settings;

mod balance;
mod derive;
mod list;
mod submit;

pub async fn dispatch(cli: Cli) -> Result<()> {
    let cfg = settings::resolve(&cli)?;
    match cli.command {
        Command::Derive { id, owner } => derive::run(&cfg, id, owner.as_deref()),
        Command::Balance { pubkey } => balance::run(&cfg, pubkey.as_deref()).await,
        Command::Submit { id, invoice_data, hsn, amount, quantity, timestamp, image_proof, timeout_ms } => {
            let input = submit::SubmitInput { id, invoice_data, hsn, amount, quantity, timestamp, image_proof, timeout_ms };
            submit::run(&cfg, input).await
        }
        Command::List { from, to, hsn, min_amount, max_amount, stats, typed_only } => {
            let filter = econ_data_client::SubmissionFilter {
                from_timestamp: from,
                to_timestamp: to,
                hsn_number: hsn,
                min_amount,
                max_amount,
            };
            list::run(&cfg, filter, stats, typed_only).await
        }
    }
}

/// Client wired to the configured RPC endpoint.
fn rpc_client(cfg: &ClientConfig) -> Result<InvoiceSubmissionClient<RpcTransport>> {
    let transport = RpcTransport::new(&cfg.rpc_url, cfg.commitment()?);
    tracing::debug!(url = %transport.url(), "using rpc endpoint");
    Ok(InvoiceSubmissionClient::from_config(cfg, transport)?)
}
