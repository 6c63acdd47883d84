//! datashare-blob: look up blob storage datasets in Azure Data Share.
//!
//! Given a share id and a dataset name, the lookup fetches the dataset from
//! the Data Share management API and flattens the blob, blob folder, or blob
//! container variant into a single record.
//!
//! # Modules
//!
//! - [`ids`]: Share id parsing and dataset name validation
//! - [`model`]: Wire model of the dataset resource
//! - [`client`]: HTTP client for the management API
//! - [`config`]: Endpoint, credentials, and timeout settings
//! - [`lookup`]: The lookup itself and its output record
//! - [`report`]: Text and JSON rendering
//! - [`error`]: Error types for datashare-blob operations

pub mod client;
pub mod config;
pub mod error;
pub mod ids;
pub mod lookup;
pub mod model;
pub mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use client::{ArmDataSetClient, DataSetClient};
pub use error::DatashareError;
pub use lookup::{read_blob_storage_dataset, BlobStorageDataSet};

use config::{ConfigOverrides, LookupConfig};
use ids::ShareId;
use report::{DataSetReport, OutputFormat, ShareIdReport};

const DEFAULT_LOG_FILTER: &str = "datashare_blob=debug";

/// The datashare-blob CLI application.
#[derive(Parser)]
#[command(name = "datashare-blob")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log progress to stderr (RUST_LOG overrides the filter).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Fetch a blob storage dataset and print its attributes.
    Lookup(LookupArgs),
    /// Parse a Data Share ID offline and print its components.
    ParseShareId(ParseShareIdArgs),
}

/// Arguments for the lookup subcommand.
#[derive(clap::Args)]
struct LookupArgs {
    /// Name of the dataset within the share.
    #[arg(long)]
    name: String,

    /// Resource ID of the Data Share.
    #[arg(long)]
    share_id: String,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// YAML config file with endpoint, api_version, subscription_id, token, read_timeout_secs.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Management API endpoint.
    #[arg(long, env = "ARM_ENDPOINT")]
    endpoint: Option<String>,

    /// Subscription used for the request (defaults to the share's subscription).
    #[arg(long, env = "ARM_SUBSCRIPTION_ID")]
    subscription_id: Option<String>,

    /// Bearer token for the management API.
    #[arg(long, env = "ARM_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Read timeout in seconds (default 300).
    #[arg(long)]
    timeout_secs: Option<u64>,
}

/// Arguments for the parse-share-id subcommand.
#[derive(clap::Args)]
struct ParseShareIdArgs {
    /// Resource ID of the Data Share.
    share_id: String,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the datashare-blob CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), DatashareError> {
    let cli = Cli::parse();
    configure_logging(cli.verbose);

    match cli.command {
        Some(Commands::Lookup(args)) => run_lookup(args),
        Some(Commands::ParseShareId(args)) => run_parse_share_id(args),
        None => {
            println!("datashare-blob {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Look up blob storage datasets in Azure Data Share.");
            println!();
            println!("Run 'datashare-blob --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the lookup subcommand.
fn run_lookup(args: LookupArgs) -> Result<(), DatashareError> {
    let output = OutputFormat::parse(&args.output)?;
    ids::validate_data_set_name(&args.name)?;
    let share = ShareId::parse(&args.share_id)?;

    let config = LookupConfig::resolve(
        args.config.as_deref(),
        ConfigOverrides {
            endpoint: args.endpoint,
            subscription_id: args.subscription_id,
            token: args.token,
            read_timeout_secs: args.timeout_secs,
        },
    )?;
    let subscription_id = config
        .subscription_id
        .clone()
        .unwrap_or_else(|| share.subscription_id.clone());

    let client = ArmDataSetClient::new(&config, &subscription_id)?;
    let record = read_blob_storage_dataset(&client, &args.name, &args.share_id)?;

    match output {
        OutputFormat::Json => println!("{}", report::to_json(&record)?),
        OutputFormat::Text => print!("{}", DataSetReport(&record)),
    }
    Ok(())
}

/// Execute the parse-share-id subcommand.
fn run_parse_share_id(args: ParseShareIdArgs) -> Result<(), DatashareError> {
    let output = OutputFormat::parse(&args.output)?;
    let share = ShareId::parse(&args.share_id)?;

    match output {
        OutputFormat::Json => println!("{}", report::to_json(&share)?),
        OutputFormat::Text => print!("{}", ShareIdReport(&share)),
    }
    Ok(())
}

/// Install a stderr subscriber when asked for, unless one is already set.
fn configure_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    if tracing::dispatcher::has_been_set() {
        return;
    }

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new(DEFAULT_LOG_FILTER),
        Err(_) => return,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
