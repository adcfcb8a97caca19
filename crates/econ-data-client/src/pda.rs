//! PDA derivation helpers for the economic data program.
//!
//! These helpers implement deterministic address derivation and are designed to
//! match the on-chain program's seeds: `[tag, owner, hash_id (u64 LE)]`.

use solana_program::pubkey::{Pubkey, MAX_SEED_LEN};

use crate::constants::{IDENTITY_LEN, SEED_ECONOMIC_DATA};
use crate::error::{ClientError, ClientResult};

/// An economic data account address together with its bump seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedAddress {
    pub address: Pubkey,
    pub bump: u8,
}

impl DerivedAddress {
    pub fn to_bytes(&self) -> [u8; 32] {
        self.address.to_bytes()
    }
}

/// Derive an account address from an arbitrary seed tag and raw owner bytes.
///
/// `owner` must be a 32-byte public key. The id is encoded as 8 little-endian bytes.
pub fn derive_account_address(
    program_id: &Pubkey,
    seed_tag: &[u8],
    owner: &[u8],
    invoice_data_hash_id: u64,
) -> ClientResult<DerivedAddress> {
    if owner.len() != IDENTITY_LEN {
        return Err(ClientError::invalid_input(format!(
            "owner identity must be {IDENTITY_LEN} bytes, got {}",
            owner.len()
        )));
    }
    if seed_tag.is_empty() || seed_tag.len() > MAX_SEED_LEN {
        return Err(ClientError::invalid_input(format!(
            "seed tag must be 1..={MAX_SEED_LEN} bytes, got {}",
            seed_tag.len()
        )));
    }

    let mut key = [0u8; IDENTITY_LEN];
    key.copy_from_slice(owner);
    Ok(find(program_id, seed_tag, &key, invoice_data_hash_id))
}

/// Derive the economic data account for `owner` and `invoice_data_hash_id`.
pub fn derive_economic_data(program_id: &Pubkey, owner: &Pubkey, invoice_data_hash_id: u64) -> DerivedAddress {
    find(program_id, SEED_ECONOMIC_DATA, &owner.to_bytes(), invoice_data_hash_id)
}

/// The one place the seed layout lives. Inputs are already length-checked.
fn find(program_id: &Pubkey, seed_tag: &[u8], owner: &[u8; IDENTITY_LEN], invoice_data_hash_id: u64) -> DerivedAddress {
    let id = invoice_data_hash_id.to_le_bytes();
    let (address, bump) = Pubkey::find_program_address(&[seed_tag, owner.as_slice(), id.as_slice()], program_id);
    DerivedAddress { address, bump }
}

/// Parse a base58 owner identity and check its length.
pub fn parse_identity(input: &str) -> ClientResult<Pubkey> {
    let bytes = bs58::decode(input.trim())
        .into_vec()
        .map_err(|e| ClientError::invalid_input(format!("owner identity is not base58: {e}")))?;
    let arr: [u8; IDENTITY_LEN] = bytes.as_slice().try_into().map_err(|_| {
        ClientError::invalid_input(format!(
            "owner identity must be {IDENTITY_LEN} bytes, got {}",
            bytes.len()
        ))
    })?;
    Ok(Pubkey::new_from_array(arr))
}
