//! In-memory [`ProgramTransport`] for tests and offline runs.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::Signature;

use crate::error::TransportError;
use crate::transport::{ProgramTransport, SubmitSigner};

/// Stub transport that accepts or rejects every submission.
///
/// Accepted instructions are recorded and get a deterministic signature
/// derived from the instruction data.
#[derive(Default)]
pub struct MockTransport {
    reject_with: Option<String>,
    latency: Option<Duration>,
    balance: u64,
    accounts: Vec<(Pubkey, Vec<u8>)>,
    sent: Mutex<Vec<Instruction>>,
}

impl MockTransport {
    pub fn accepting() -> Self {
        Self::default()
    }

    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self { reject_with: Some(reason.into()), ..Self::default() }
    }

    pub fn with_balance(mut self, lamports: u64) -> Self {
        self.balance = lamports;
        self
    }

    /// Delay each submission, for deadline tests.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_account(mut self, address: Pubkey, data: Vec<u8>) -> Self {
        self.accounts.push((address, data));
        self
    }

    /// Instructions accepted so far.
    pub fn sent(&self) -> Vec<Instruction> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl ProgramTransport for MockTransport {
    async fn get_balance(&self, _pubkey: &Pubkey) -> Result<u64, TransportError> {
        Ok(self.balance)
    }

    async fn send_instruction(
        &self,
        instruction: Instruction,
        signer: &SubmitSigner,
    ) -> Result<String, TransportError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(reason) = &self.reject_with {
            return Err(TransportError::Rejected(reason.clone()));
        }

        let mut hasher = Sha256::new();
        hasher.update(signer.pubkey().as_ref());
        hasher.update(&instruction.data);
        let digest = hasher.finalize();
        let mut raw = [0u8; 64];
        raw[..32].copy_from_slice(&digest);
        raw[32..].copy_from_slice(&digest);

        self.sent.lock().push(instruction);
        Ok(Signature::from(raw).to_string())
    }

    async fn get_program_accounts(
        &self,
        _program_id: &Pubkey,
        prefix: Option<&[u8]>,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, TransportError> {
        if let Some(reason) = &self.reject_with {
            return Err(TransportError::Rejected(reason.clone()));
        }
        // Same memcmp filter the RPC node applies.
        Ok(self
            .accounts
            .iter()
            .filter(|(_, data)| prefix.map_or(true, |p| data.starts_with(p)))
            .cloned()
            .collect())
    }
}
