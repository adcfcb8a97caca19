use anyhow::Result;
use econ_data_client::{ClientConfig, RawAccountRecord, SubmissionFilter, SubmissionStats};
use serde::Serialize;

use crate::output;

#[derive(Debug, Serialize)]
pub struct ListOut {
    pub program_id: String,
    pub count: usize,
    pub records: Vec<RawAccountRecord>,
}

#[derive(Debug, Serialize)]
pub struct StatsOut {
    pub program_id: String,
    #[serde(flatten)]
    pub stats: SubmissionStats,
}

pub async fn run(cfg: &ClientConfig, filter: SubmissionFilter, stats: bool, typed_only: bool) -> Result<()> {
    let client = super::rpc_client(cfg)?;
    let program_id = *client.program_id();

    let listing = if typed_only {
        client.list_submissions_filtered(&program_id).await?
    } else {
        client.list_submissions(&program_id).await?
    };
    // One bad account fails the whole listing.
    let records: Vec<RawAccountRecord> = listing
        .try_collect_all()?
        .into_iter()
        .filter(|r| filter.matches(&r.record))
        .collect();

    if stats {
        let stats = SubmissionStats::from_records(records.iter().map(|r| &r.record));
        return output::print(&StatsOut { program_id: program_id.to_string(), stats });
    }

    if !output::is_json() {
        for r in &records {
            println!(
                "{} id={} invoice={} hsn={} amount={} quantity={} timestamp={} proof={}",
                r.address,
                r.record.invoice_data_hash_id,
                r.record.invoice_data,
                r.record.hsn_number,
                r.record.amount,
                r.record.quantity,
                r.record.timestamp,
                r.record.image_proof,
            );
        }
        println!("{} record(s)", records.len());
        return Ok(());
    }

    output::print(&ListOut { program_id: program_id.to_string(), count: records.len(), records })
}
