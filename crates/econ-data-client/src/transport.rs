//! Network seam between the submission client and a Solana cluster.

use async_trait::async_trait;
use solana_account_decoder::UiAccountEncoding;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::Signer;
use solana_sdk::transaction::Transaction;

use crate::error::TransportError;

/// Signing authority for outgoing instructions.
pub type SubmitSigner = dyn Signer + Send + Sync;

/// The RPC operations the client depends on.
#[async_trait]
pub trait ProgramTransport: Send + Sync {
    /// Lamport balance of `pubkey`.
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, TransportError>;

    /// Sign `instruction` with `signer` as fee payer, send it and wait for
    /// confirmation. Returns the transaction signature.
    async fn send_instruction(
        &self,
        instruction: Instruction,
        signer: &SubmitSigner,
    ) -> Result<String, TransportError>;

    /// All accounts owned by `program_id`, or only those whose data starts
    /// with `prefix` when one is given.
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        prefix: Option<&[u8]>,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, TransportError>;
}

/// [`ProgramTransport`] backed by the nonblocking JSON-RPC client.
pub struct RpcTransport {
    rpc: RpcClient,
}

impl RpcTransport {
    pub fn new(rpc_url: &str, commitment: CommitmentConfig) -> Self {
        Self { rpc: RpcClient::new_with_commitment(rpc_url.to_string(), commitment) }
    }

    pub fn url(&self) -> String {
        self.rpc.url()
    }
}

#[async_trait]
impl ProgramTransport for RpcTransport {
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, TransportError> {
        Ok(self.rpc.get_balance(pubkey).await?)
    }

    async fn send_instruction(
        &self,
        instruction: Instruction,
        signer: &SubmitSigner,
    ) -> Result<String, TransportError> {
        let bh = self.rpc.get_latest_blockhash().await?;
        let payer = signer.pubkey();
        let tx = {
            let signers: [&dyn Signer; 1] = [signer];
            Transaction::new_signed_with_payer(&[instruction], Some(&payer), &signers[..], bh)
        };
        let sig = self.rpc.send_and_confirm_transaction(&tx).await?;
        Ok(sig.to_string())
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        prefix: Option<&[u8]>,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, TransportError> {
        let config = RpcProgramAccountsConfig {
            filters: prefix.map(|p| vec![RpcFilterType::Memcmp(Memcmp::new_raw_bytes(0, p.to_vec()))]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.rpc.commitment()),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };
        let accounts = self.rpc.get_program_accounts_with_config(program_id, config).await?;
        Ok(accounts.into_iter().map(|(address, account)| (address, account.data)).collect())
    }
}
