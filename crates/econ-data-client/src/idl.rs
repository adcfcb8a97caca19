//! Anchor wire encoding for the economic data program.
//!
//! Instruction data is an 8-byte method discriminator followed by the Borsh
//! encoded arguments. Account data is an 8-byte account discriminator, the
//! authority key, then the record fields. Both discriminators are the first
//! 8 bytes of `sha256("<namespace>:<name>")`.

use borsh::BorshDeserialize;
use sha2::{Digest, Sha256};
use solana_program::pubkey::Pubkey;

use crate::constants::{DISCRIMINATOR_LEN, ECONOMIC_DATA_ACCOUNT, MAX_INSTRUCTION_DATA, SUBMIT_METHOD};
use crate::error::{ClientError, ClientResult, DecodeError};
use crate::record::InvoiceRecord;

pub type Discriminator = [u8; DISCRIMINATOR_LEN];

fn discriminator(namespace: &str, name: &str) -> Discriminator {
    let digest = Sha256::digest(format!("{namespace}:{name}").as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

pub fn submit_discriminator() -> Discriminator {
    discriminator("global", SUBMIT_METHOD)
}

pub fn account_discriminator() -> Discriminator {
    discriminator("account", ECONOMIC_DATA_ACCOUNT)
}

/// Encode `submit_economic_data` instruction data for `record`.
pub fn encode_submit(record: &InvoiceRecord) -> ClientResult<Vec<u8>> {
    let mut out = submit_discriminator().to_vec();
    borsh::to_writer(&mut out, record)
        .map_err(|e| ClientError::invalid_input(format!("serialize: {e}")))?;
    if out.len() > MAX_INSTRUCTION_DATA {
        return Err(ClientError::invalid_input(format!(
            "instruction data is {} bytes, limit is {MAX_INSTRUCTION_DATA}",
            out.len()
        )));
    }
    Ok(out)
}

/// Stored account contents, after the discriminator.
#[derive(Debug, Clone, PartialEq, Eq, BorshDeserialize)]
pub struct EconomicDataAccount {
    pub authority: [u8; 32],
    pub record: InvoiceRecord,
}

impl EconomicDataAccount {
    pub fn authority(&self) -> Pubkey {
        Pubkey::new_from_array(self.authority)
    }
}

/// Decode an economic data account.
///
/// Bytes after the encoded fields are allocation padding and are ignored.
pub fn decode_account(data: &[u8]) -> Result<EconomicDataAccount, DecodeError> {
    if data.len() < DISCRIMINATOR_LEN {
        return Err(DecodeError::TooShort(data.len()));
    }
    let (disc, mut rest) = data.split_at(DISCRIMINATOR_LEN);
    if disc != account_discriminator().as_slice() {
        return Err(DecodeError::Discriminator(hex::encode(disc)));
    }
    EconomicDataAccount::deserialize(&mut rest).map_err(DecodeError::Borsh)
}

/// Encode account bytes the way the program stores them. Used by test stubs.
pub fn encode_account(authority: &Pubkey, record: &InvoiceRecord) -> Vec<u8> {
    let mut out = account_discriminator().to_vec();
    out.extend_from_slice(authority.as_ref());
    // Writing to a Vec cannot fail.
    let _ = borsh::to_writer(&mut out, record);
    out
}
