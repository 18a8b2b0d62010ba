//! Command-line driver for the absflow contract
//!
//! Runs `init`, stage invocations and queries against a world state kept in
//! a local directory, so a workflow configuration can be exercised without a
//! hosting ledger.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod handlers;

#[derive(Parser)]
#[command(name = "absflow")]
#[command(about = "absflow - business-flow authorization contract", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Contract configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "ABSFLOW_CONFIG",
        default_value = absflow_core::DEFAULT_CONFIG_PATH
    )]
    config: PathBuf,

    /// Directory holding the world state
    #[arg(short, long, global = true, default_value = ".absflow/state")]
    state_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Persist the workflow definition and operator keys
    Init,

    /// Execute a stage (or `query`) as the holder of a certificate
    Invoke {
        /// Stage name, or `query`
        function: String,

        /// MSP identifier recorded in the credential
        #[arg(long, default_value = "LocalMSP")]
        msp_id: String,

        /// PEM certificate of the invoking party
        #[arg(long)]
        cert: Option<PathBuf>,

        /// Transaction id (random when omitted)
        #[arg(long)]
        tx_id: Option<String>,

        /// Positional contract arguments
        args: Vec<String>,
    },

    /// Read an asset's detail string
    Query {
        /// Asset identifier
        asset_id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    match cli.command {
        Commands::Init => {
            handlers::init::handle_init(&cli.config, &cli.state_dir)?;
        }

        Commands::Invoke {
            function,
            msp_id,
            cert,
            tx_id,
            args,
        } => {
            let request = handlers::invoke::InvokeRequest {
                function,
                msp_id,
                cert,
                tx_id,
                args,
            };
            let output = handlers::invoke::handle_invoke(&cli.state_dir, request)?;
            if !output.is_empty() {
                println!("{output}");
            }
        }

        Commands::Query { asset_id } => {
            println!("{}", handlers::query::handle_query(&cli.state_dir, &asset_id)?);
        }
    }

    Ok(())
}
