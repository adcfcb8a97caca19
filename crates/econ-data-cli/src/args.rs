use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "econ-data", version, about = "Economic data program client")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// TOML config file. Flags and environment override its values.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON-RPC endpoint.
    #[arg(long, global = true, env = "SOLANA_URL")]
    pub url: Option<String>,

    /// Keypair file of the submitting identity.
    #[arg(long, global = true, env = "ECON_DATA_KEYPAIR")]
    pub keypair: Option<PathBuf>,

    /// Economic data program id.
    #[arg(long, global = true, env = "ECON_DATA_PROGRAM_ID")]
    pub program_id: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Derive the economic data account for an owner and invoice id.
    Derive {
        #[arg(long)]
        id: u64,
        /// Owner public key (base58). Defaults to the keypair's public key.
        #[arg(long)]
        owner: Option<String>,
    },

    /// Show the lamport and SOL balance of an account.
    Balance {
        /// Defaults to the keypair's public key.
        #[arg(long)]
        pubkey: Option<String>,
    },

    /// Submit one invoice record.
    Submit {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        invoice_data: String,
        #[arg(long)]
        hsn: String,
        /// Amount in the smallest currency unit.
        #[arg(long)]
        amount: u64,
        #[arg(long)]
        quantity: u32,
        /// Milliseconds since the epoch. Defaults to now.
        #[arg(long)]
        timestamp: Option<u64>,
        #[arg(long, default_value = "")]
        image_proof: String,
        /// Give up after this many milliseconds.
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout_ms: Option<u64>,
    },

    /// List submitted records stored by the program.
    List {
        /// Earliest timestamp (ms, inclusive).
        #[arg(long)]
        from: Option<u64>,
        /// Latest timestamp (ms, inclusive).
        #[arg(long)]
        to: Option<u64>,
        #[arg(long)]
        hsn: Option<String>,
        #[arg(long)]
        min_amount: Option<u64>,
        #[arg(long)]
        max_amount: Option<u64>,
        /// Print totals instead of records.
        #[arg(long)]
        stats: bool,
        /// Ask the node for economic data accounts only; other account types are skipped.
        #[arg(long)]
        typed_only: bool,
    },
}
