//! Constants shared between the on-chain program and clients.
//!
//! Keep these stable because they affect PDA derivation and wire encoding.

use solana_program::pubkey::Pubkey;

/// PDA seed tag for economic data accounts.
pub const SEED_ECONOMIC_DATA: &[u8] = b"economic_data";

/// Deployed program id of the economic data program.
pub const DEFAULT_PROGRAM_ID: &str = "D8tQBi2nELbNkAzkZz5FQBN28tAQFNpWL73HakbC4qCT";

pub fn default_program_id() -> Pubkey {
    DEFAULT_PROGRAM_ID.parse().unwrap_or_else(|_| Pubkey::default())
}

/// Anchor method name of the submission instruction.
pub const SUBMIT_METHOD: &str = "submit_economic_data";

/// Anchor account type name holding one submitted record.
pub const ECONOMIC_DATA_ACCOUNT: &str = "EconomicDataAccount";

/// Length of Anchor instruction and account discriminators.
pub const DISCRIMINATOR_LEN: usize = 8;

/// Size of an ed25519 public key.
pub const IDENTITY_LEN: usize = 32;

/// Upper bound on encoded instruction data.
///
/// Transactions are capped at 1232 bytes; the rest is left for the signature,
/// message header, account keys and blockhash.
pub const MAX_INSTRUCTION_DATA: usize = 900;
