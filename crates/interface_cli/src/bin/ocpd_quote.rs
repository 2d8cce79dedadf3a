//! OCPD Rating - Command Line Binary
//!
//! Prices OCPD quotes from JSON documents.
//!
//! # Usage
//!
//! ```bash
//! # Price a calculation input
//! ocpd-quote calculate --input input.json
//!
//! # Prepare a quote from stdin, pretty-printed
//! cat request.json | ocpd-quote --pretty quote --input -
//!
//! # Show the ADR class table
//! ocpd-quote tables adr
//! ```
//!
//! # Environment Variables
//!
//! * `OCPD_LOG_LEVEL` - Log level or filter directive (default: warn, `RUST_LOG` wins)
//! * `OCPD_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! * `OCPD_TABLES_PATH` - JSON rule tables replacing the standard ones
//! * `OCPD_DEFAULT_MONTHLY_SHIPMENTS` - Shipments per month when undeclared (default: 50)
//! * `OCPD_REFERRAL_SUM_INSURED_LIMIT` - Referral threshold in PLN (default: 2000000)

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use interface_cli::commands::{read_input, render};
use interface_cli::{telemetry, CliConfig, RatingContext, TableKind};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ocpd-quote",
    about = "Price OCPD carrier liability quotes from JSON input",
    version
)]
struct Cli {
    /// Rule tables JSON file, overrides OCPD_TABLES_PATH
    #[arg(long, global = true)]
    tables: Option<PathBuf>,
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price a calculation input
    Calculate(InputArgs),
    /// Resolve a variant and prepare a quote
    Quote(InputArgs),
    /// Print the active rule tables
    Tables {
        /// Only this table
        #[arg(value_enum)]
        kind: Option<TableKind>,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// JSON input file, or `-` for stdin
    #[arg(long, default_value = "-")]
    input: String,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = CliConfig::from_env().context("invalid OCPD_* configuration")?;

    telemetry::init(&config)?;

    let context = RatingContext::from_config(&config, cli.tables.as_deref())?;

    let output = match cli.command {
        Command::Calculate(args) => {
            let result = context.calculate(&read_input(&args.input)?)?;
            render(&result, cli.pretty)?
        }
        Command::Quote(args) => {
            let summary = context.quote(&read_input(&args.input)?)?;
            render(&summary, cli.pretty)?
        }
        Command::Tables { kind } => render(&context.table_json(kind)?, cli.pretty)?,
    };

    println!("{}", output);
    Ok(())
}
