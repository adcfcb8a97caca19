//! econ-data-client
//!
//! A small, focused Rust client for submitting invoice records to the economic
//! data on-chain program.
//!
//! It includes:
//! - PDA derivation helpers
//! - the typed `InvoiceRecord` payload and its Anchor wire encoding
//! - a transport seam with an RPC implementation and an in-memory stub
//! - `InvoiceSubmissionClient`, which submits records and lists stored accounts
//!
//! The transport and signer are always injected by the caller.

pub mod config;
pub mod constants;
pub mod error;
pub mod idl;
pub mod listing;
pub mod mock;
pub mod pda;
pub mod record;
pub mod submission_client;
pub mod transport;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use listing::*;
pub use pda::*;
pub use record::*;
pub use submission_client::*;
pub use transport::*;
