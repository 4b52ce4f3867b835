//! Command-line interface definitions.
//!
//! Defines the CLI structure for sprinkle using `clap`: `run` disperses
//! transfers, `check` verifies the node and wallets without sending anything.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Disperse small native-currency transfers from funded wallets to fresh addresses
#[derive(Parser, Debug)]
#[command(name = "sprinkle")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send transfers from every configured wallet
    Run(RunArgs),

    /// Verify connectivity and show wallet balances without sending
    Check(NetworkArgs),
}

/// Node overrides shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct NetworkArgs {
    /// Override the JSON-RPC endpoint (RPC_URL)
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Override the expected chain id (CHAIN_ID)
    #[arg(long)]
    pub chain_id: Option<u64>,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub network: NetworkArgs,

    /// Transfers per wallet; prompted for when omitted
    #[arg(short = 'n', long)]
    pub count: Option<u32>,

    /// Wallets processed at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Use JSON log format instead of pretty-printed logs
    #[arg(long)]
    pub json_logs: bool,
}
