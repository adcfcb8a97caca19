//! Lazy decoding of enumerated program accounts.

use serde::Serialize;
use solana_program::pubkey::Pubkey;

use crate::error::{ClientError, ClientResult, FetchError};
use crate::idl;
use crate::record::InvoiceRecord;

/// A decoded economic data account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawAccountRecord {
    #[serde(serialize_with = "as_base58")]
    pub address: Pubkey,
    #[serde(serialize_with = "as_base58")]
    pub authority: Pubkey,
    pub record: InvoiceRecord,
}

fn as_base58<S: serde::Serializer>(key: &Pubkey, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(key)
}

/// Single-pass sequence over enumerated accounts, decoded as it is consumed.
///
/// Order is whatever the node returned.
pub struct Submissions {
    accounts: std::vec::IntoIter<(Pubkey, Vec<u8>)>,
}

impl Submissions {
    pub(crate) fn new(accounts: Vec<(Pubkey, Vec<u8>)>) -> Self {
        Self { accounts: accounts.into_iter() }
    }

    /// Accounts not yet decoded.
    pub fn remaining(&self) -> usize {
        self.accounts.len()
    }

    /// Decode every account, failing on the first one that does not decode.
    ///
    /// No partial result is returned on failure.
    pub fn try_collect_all(self) -> ClientResult<Vec<RawAccountRecord>> {
        self.collect()
    }
}

impl Iterator for Submissions {
    type Item = ClientResult<RawAccountRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let (address, data) = self.accounts.next()?;
        Some(
            idl::decode_account(&data)
                .map(|acc| RawAccountRecord { address, authority: acc.authority(), record: acc.record })
                .map_err(|source| ClientError::Fetch(FetchError::Decode { address, source })),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.accounts.size_hint()
    }
}
