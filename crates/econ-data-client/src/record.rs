//! The invoice record submitted to the program, plus client-side query helpers.

use std::time::{SystemTime, UNIX_EPOCH};

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ClientError, ClientResult};

/// One invoice submission. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct InvoiceRecord {
    pub invoice_data_hash_id: u64,
    pub invoice_data: String,
    pub hsn_number: String,
    /// Smallest currency unit.
    pub amount: u64,
    pub quantity: u32,
    /// Milliseconds since the unix epoch.
    pub timestamp: u64,
    pub image_proof: String,
}

impl InvoiceRecord {
    /// Build a record stamped with the current wall-clock time.
    pub fn stamped_now(
        invoice_data_hash_id: u64,
        invoice_data: impl Into<String>,
        hsn_number: impl Into<String>,
        amount: u64,
        quantity: u32,
        image_proof: impl Into<String>,
    ) -> Self {
        Self {
            invoice_data_hash_id,
            invoice_data: invoice_data.into(),
            hsn_number: hsn_number.into(),
            amount,
            quantity,
            timestamp: now_millis(),
            image_proof: image_proof.into(),
        }
    }

    /// Check string fields against `max_field_len` bytes.
    ///
    /// Contents are opaque; only sizes are checked so the instruction fits in a
    /// single transaction.
    pub fn validate(&self, max_field_len: usize) -> ClientResult<()> {
        for (name, value) in [
            ("invoice_data", &self.invoice_data),
            ("hsn_number", &self.hsn_number),
            ("image_proof", &self.image_proof),
        ] {
            if value.len() > max_field_len {
                return Err(ClientError::invalid_input(format!(
                    "{name} is {} bytes, limit is {max_field_len}",
                    value.len()
                )));
            }
        }
        Ok(())
    }
}

pub fn now_millis() -> u64 {
    millis_since_epoch(SystemTime::now())
}

/// Milliseconds from the unix epoch to `at`.
///
/// A time before the epoch gives 0 and one past `u64::MAX` ms saturates; both log a warning.
pub fn millis_since_epoch(at: SystemTime) -> u64 {
    match at.duration_since(UNIX_EPOCH) {
        Ok(d) => u64::try_from(d.as_millis()).unwrap_or_else(|_| {
            warn!(millis = %d.as_millis(), "clock beyond u64 milliseconds, saturating timestamp");
            u64::MAX
        }),
        Err(e) => {
            warn!(behind_by = ?e.duration(), "clock is before the unix epoch, using timestamp 0");
            0
        }
    }
}

/// Client-side filter over listed records.
///
/// Timestamp and amount bounds are inclusive. An empty or missing HSN matches all.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFilter {
    pub from_timestamp: Option<u64>,
    pub to_timestamp: Option<u64>,
    pub hsn_number: Option<String>,
    pub min_amount: Option<u64>,
    pub max_amount: Option<u64>,
}

impl SubmissionFilter {
    pub fn matches(&self, record: &InvoiceRecord) -> bool {
        if self.from_timestamp.is_some_and(|from| record.timestamp < from) {
            return false;
        }
        if self.to_timestamp.is_some_and(|to| record.timestamp > to) {
            return false;
        }
        if let Some(hsn) = self.hsn_number.as_deref() {
            if !hsn.is_empty() && record.hsn_number != hsn {
                return false;
            }
        }
        if self.min_amount.is_some_and(|min| record.amount < min) {
            return false;
        }
        if self.max_amount.is_some_and(|max| record.amount > max) {
            return false;
        }
        true
    }
}

/// Aggregate counters over a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionStats {
    pub total_transactions: u64,
    pub total_amount: u64,
}

impl SubmissionStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a InvoiceRecord>) -> Self {
        records.into_iter().fold(Self::default(), |acc, r| Self {
            total_transactions: acc.total_transactions + 1,
            total_amount: acc.total_amount.saturating_add(r.amount),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InvoiceRecord {
        InvoiceRecord {
            invoice_data_hash_id: 1,
            invoice_data: "INV12345".into(),
            hsn_number: "HSN998877".into(),
            amount: 100_000,
            quantity: 50,
            timestamp: 1_700_000_000_000,
            image_proof: "https://example.com/proof.jpg".into(),
        }
    }

    #[test]
    fn borsh_layout_follows_field_order() {
        let bytes = borsh::to_vec(&sample()).unwrap();
        assert_eq!(&bytes[..8], &1u64.to_le_bytes());
        assert_eq!(&bytes[8..12], &8u32.to_le_bytes());
        assert_eq!(&bytes[12..20], b"INV12345");
        assert_eq!(&bytes[bytes.len() - 29..], b"https://example.com/proof.jpg");
    }

    #[test]
    fn oversized_field_fails_validation() {
        let mut r = sample();
        r.validate(256).unwrap();
        r.image_proof = "x".repeat(257);
        assert!(matches!(r.validate(256), Err(ClientError::InvalidInput(_))));
    }

    #[test]
    fn stamped_now_uses_wall_clock() {
        let before = now_millis();
        let r = InvoiceRecord::stamped_now(1, "INV", "HSN", 1, 1, "uri");
        assert!(r.timestamp >= before);
    }

    #[test]
    fn clock_before_epoch_falls_back_to_zero() {
        let before = UNIX_EPOCH - std::time::Duration::from_secs(5);
        assert_eq!(millis_since_epoch(before), 0);
        let after = UNIX_EPOCH + std::time::Duration::from_millis(1_700_000_000_123);
        assert_eq!(millis_since_epoch(after), 1_700_000_000_123);
    }

    #[test]
    fn filter_bounds_are_inclusive() {
        let r = sample();
        let f = SubmissionFilter {
            from_timestamp: Some(r.timestamp),
            to_timestamp: Some(r.timestamp),
            hsn_number: Some(String::new()),
            min_amount: Some(100_000),
            max_amount: Some(100_000),
        };
        assert!(f.matches(&r));

        let f = SubmissionFilter { hsn_number: Some("HSN000".into()), ..Default::default() };
        assert!(!f.matches(&r));

        let f = SubmissionFilter { to_timestamp: Some(r.timestamp - 1), ..Default::default() };
        assert!(!f.matches(&r));
    }

    #[test]
    fn stats_sum_and_saturate() {
        let mut big = sample();
        big.amount = u64::MAX;
        let records = vec![sample(), big];
        let stats = SubmissionStats::from_records(&records);
        assert_eq!(stats.total_transactions, 2);
        assert_eq!(stats.total_amount, u64::MAX);
    }
}
