//! Error types for the submission client.

use std::time::Duration;

use solana_program::pubkey::Pubkey;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced to callers of [`crate::InvoiceSubmissionClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Malformed derivation inputs, a record that failed validation, or an
    /// account that does not match the record.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The submit call failed in transport or was rejected by the program.
    #[error("submission failed: {0}")]
    Submission(#[source] TransportError),

    /// Account enumeration or decoding failed during a listing.
    #[error("fetch failed: {0}")]
    Fetch(#[source] FetchError),
}

impl ClientError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Failures reported by a [`crate::ProgramTransport`].
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("rpc: {0}")]
    Rpc(Box<solana_client::client_error::ClientError>),

    #[error("rejected: {0}")]
    Rejected(String),

    #[error("deadline of {0:?} elapsed")]
    Timeout(Duration),
}

impl From<solana_client::client_error::ClientError> for TransportError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        Self::Rpc(Box::new(err))
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("balance lookup: {0}")]
    Balance(#[source] TransportError),

    #[error("account enumeration: {0}")]
    Enumerate(#[source] TransportError),

    #[error("account {address}: {source}")]
    Decode { address: Pubkey, source: DecodeError },
}

/// Why stored account bytes could not be read as an economic data account.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("account data is {0} bytes, shorter than the type tag")]
    TooShort(usize),

    #[error("unexpected type tag {0}")]
    Discriminator(String),

    #[error("deserialize: {0}")]
    Borsh(#[source] std::io::Error),
}
