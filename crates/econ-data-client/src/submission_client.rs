//! Invoice submission client for the economic data program.
//!
//! This client can:
//! - derive economic data account PDAs
//! - build the `submit_economic_data` instruction
//! - submit it through an injected transport, with an optional deadline
//! - enumerate and decode stored accounts
//!
//! It holds no state between calls beyond its configuration.

use std::time::Duration;

use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;
use tracing::{info, warn};

use crate::config::{ClientConfig, ConfigError};
use crate::error::{ClientError, ClientResult, FetchError, TransportError};
use crate::idl;
use crate::listing::Submissions;
use crate::pda::{self, DerivedAddress};
use crate::record::InvoiceRecord;
use crate::transport::{ProgramTransport, SubmitSigner};

/// Per-call submission options.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitOptions {
    /// Give up waiting for the transport after this long.
    pub deadline: Option<Duration>,
}

pub struct InvoiceSubmissionClient<T> {
    program_id: Pubkey,
    transport: T,
    max_field_len: usize,
    default_deadline: Option<Duration>,
}

impl<T: ProgramTransport> InvoiceSubmissionClient<T> {
    pub fn new(program_id: Pubkey, transport: T) -> Self {
        let defaults = ClientConfig::default();
        Self {
            program_id,
            transport,
            max_field_len: defaults.max_field_len,
            default_deadline: None,
        }
    }

    pub fn from_config(cfg: &ClientConfig, transport: T) -> Result<Self, ConfigError> {
        crate::config::validate_config(cfg)?;
        Ok(Self {
            program_id: cfg.program_id()?,
            transport,
            max_field_len: cfg.max_field_len,
            default_deadline: cfg.submit_timeout(),
        })
    }

    /// Deadline applied when [`SubmitOptions::deadline`] is unset.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.default_deadline = deadline;
        self
    }

    pub fn with_max_field_len(mut self, max_field_len: usize) -> Self {
        self.max_field_len = max_field_len;
        self
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Derive an account address under this client's program id.
    pub fn derive_account_address(
        &self,
        seed_tag: &[u8],
        owner: &[u8],
        invoice_data_hash_id: u64,
    ) -> ClientResult<DerivedAddress> {
        pda::derive_account_address(&self.program_id, seed_tag, owner, invoice_data_hash_id)
    }

    /// The economic data account `record` lands in when submitted by `authority`.
    pub fn account_for(&self, authority: &Pubkey, record: &InvoiceRecord) -> DerivedAddress {
        pda::derive_economic_data(&self.program_id, authority, record.invoice_data_hash_id)
    }

    /// Build the submission instruction.
    ///
    /// Accounts: economic data account (writable), authority (writable, signer),
    /// system program.
    pub fn ix_submit(&self, authority: Pubkey, record: &InvoiceRecord) -> ClientResult<Instruction> {
        record.validate(self.max_field_len)?;
        let account = self.account_for(&authority, record).address;
        let data = idl::encode_submit(record)?;

        Ok(Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(account, false),
                AccountMeta::new(authority, true),
                AccountMeta::new_readonly(solana_program::system_program::id(), false),
            ],
            data,
        })
    }

    /// Lamport balance of `pubkey`.
    pub async fn balance(&self, pubkey: &Pubkey) -> ClientResult<u64> {
        self.transport
            .get_balance(pubkey)
            .await
            .map_err(|e| ClientError::Fetch(FetchError::Balance(e)))
    }

    /// Submit `record` signed by `signer`. Returns the transaction signature.
    pub async fn submit(&self, record: &InvoiceRecord, signer: &SubmitSigner) -> ClientResult<String> {
        self.submit_with(record, signer, SubmitOptions::default()).await
    }

    /// Submit with an expected target account.
    ///
    /// Fails with `InvalidInput` before any network call when `account` is not
    /// the address derived from the record id and the signer.
    pub async fn submit_to_account(
        &self,
        record: &InvoiceRecord,
        signer: &SubmitSigner,
        account: &Pubkey,
    ) -> ClientResult<String> {
        let derived = self.account_for(&signer.pubkey(), record);
        if derived.address != *account {
            return Err(ClientError::invalid_input(format!(
                "account {account} does not match {} derived for invoice id {}",
                derived.address, record.invoice_data_hash_id
            )));
        }
        self.submit(record, signer).await
    }

    #[tracing::instrument(skip_all, fields(id = record.invoice_data_hash_id))]
    pub async fn submit_with(
        &self,
        record: &InvoiceRecord,
        signer: &SubmitSigner,
        opts: SubmitOptions,
    ) -> ClientResult<String> {
        let deadline = opts.deadline.or(self.default_deadline);
        if deadline == Some(Duration::ZERO) {
            return Err(ClientError::invalid_input("submission deadline must be greater than zero"));
        }
        let authority = signer.pubkey();
        let ix = self.ix_submit(authority, record)?;
        info!(account = %ix.accounts[0].pubkey, %authority, "submitting economic data");

        let send = self.transport.send_instruction(ix, signer);
        let result = match deadline {
            Some(deadline) => tokio::time::timeout(deadline, send)
                .await
                .unwrap_or(Err(TransportError::Timeout(deadline))),
            None => send.await,
        };

        match result {
            Ok(sig) => {
                info!(signature = %sig, "submission confirmed");
                Ok(sig)
            }
            Err(err) => {
                warn!(error = %err, "submission failed");
                Err(ClientError::Submission(err))
            }
        }
    }

    /// Enumerate every account owned by `program_id`.
    ///
    /// One RPC call; each account is decoded as the returned sequence is consumed.
    /// Any account that is not a well-formed economic data account, including
    /// one with a damaged type tag, decodes to `Fetch(Decode)`.
    pub async fn list_submissions(&self, program_id: &Pubkey) -> ClientResult<Submissions> {
        self.enumerate(program_id, None).await
    }

    /// Like [`Self::list_submissions`], but the node only returns accounts
    /// carrying the economic data account tag.
    ///
    /// Accounts of other types owned by the program are skipped, and so is an
    /// account whose tag bytes are damaged.
    pub async fn list_submissions_filtered(&self, program_id: &Pubkey) -> ClientResult<Submissions> {
        let tag = idl::account_discriminator();
        self.enumerate(program_id, Some(&tag)).await
    }

    async fn enumerate(&self, program_id: &Pubkey, prefix: Option<&[u8]>) -> ClientResult<Submissions> {
        let accounts = self
            .transport
            .get_program_accounts(program_id, prefix)
            .await
            .map_err(|e| ClientError::Fetch(FetchError::Enumerate(e)))?;
        info!(
            program = %program_id,
            count = accounts.len(),
            filtered = prefix.is_some(),
            "enumerated program accounts"
        );
        Ok(Submissions::new(accounts))
    }
}
