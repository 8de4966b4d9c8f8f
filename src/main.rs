//! Command-line front end for the gadget catalog.
//!
//! A thin shell over the library: it loads configuration, installs tracing,
//! builds a [`Catalog`] over the REST backend and runs one operation per
//! invocation, printing the result and the operation's final status.
//!
//! # Commands
//!
//! - `list [QUERY]`: fetch all gadgets, optionally filtered by search text
//! - `show <ID>`: fetch one gadget
//! - `create <FILE>`: create a gadget from a JSON file
//! - `update <ID> <FILE>`: replace a gadget's fields from a JSON file
//! - `delete <ID>`: delete a gadget
//!
//! The JSON file uses the wire format without `_id`:
//!
//! ```json
//! {
//!   "name": "Echo Dot",
//!   "brand": "Amazon",
//!   "specs": { "dimensions": "10cm", "category": "Smart Home", "price": 49.99, "batteryLife": 0 },
//!   "keyFeatures": ["Voice control"]
//! }
//! ```

#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use gadget_catalog::app::GadgetForm;
use gadget_catalog::ui::ListViewModel;
use gadget_catalog::{
    initialize, Catalog, Config, Gadget, GadgetInput, HttpGadgetService, OperationKind,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Instrument;

#[derive(Parser)]
#[command(
    name = "gadget-catalog",
    version,
    about = "Browse and edit a gadget catalog served over REST"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,

    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config).
    #[arg(long = "base-url", value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Tracing filter, e.g. `debug` (overrides config; `RUST_LOG` wins).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum CliCommand {
    /// List gadgets, optionally filtered by name, brand or description.
    List {
        /// Search text.
        query: Option<String>,
    },

    /// Show one gadget.
    Show {
        id: String,
    },

    /// Create a gadget from a JSON file.
    Create {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Replace a gadget's fields from a JSON file.
    Update {
        id: String,
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Delete a gadget.
    Delete {
        id: String,
    },
}

impl CliCommand {
    const fn kind(&self) -> OperationKind {
        match self {
            Self::List { .. } => OperationKind::FetchAll,
            Self::Show { .. } => OperationKind::FetchById,
            Self::Create { .. } => OperationKind::Create,
            Self::Update { .. } => OperationKind::Update,
            Self::Delete { .. } => OperationKind::Delete,
        }
    }
}

fn load_config(cli: &Cli) -> gadget_catalog::Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?.with_overrides(&Config::env_overrides()),
        None => Config::load()?,
    };

    let mut flags = BTreeMap::new();
    if let Some(base_url) = &cli.base_url {
        flags.insert("base_url".to_string(), base_url.clone());
    }
    if let Some(level) = &cli.log_level {
        flags.insert("trace_level".to_string(), level.clone());
    }
    Ok(config.with_overrides(&flags))
}

/// Reads a gadget JSON file. Blank features are dropped the same way the
/// edit form drops them on submit.
fn read_input(path: &Path) -> gadget_catalog::Result<GadgetInput> {
    let source = std::fs::read_to_string(path)?;
    let input: GadgetInput = serde_json::from_str(&source)?;

    let cleaned = GadgetForm::from_input(input).to_input();
    cleaned.validate()?;
    Ok(cleaned)
}

fn print_list(vm: &ListViewModel) {
    if vm.fetch_failed {
        println!("Error occurred while fetching the data");
        return;
    }
    if vm.is_empty() {
        println!("No gadgets match \"{}\"", vm.search_query);
        return;
    }
    for card in &vm.cards {
        println!("{}  [{}]", card.name, card.id);
        println!("  Brand:        {}", card.brand);
        println!("  Dimensions:   {}", card.dimensions);
        println!("  Category:     {}", card.category);
        println!("  Price:        {}", card.price);
        println!("  Battery Life: {}", card.battery_life);
        println!("  Details:      {}", card.details_path);
    }
}

fn print_gadget(gadget: &Gadget) {
    match serde_json::to_string_pretty(gadget) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "failed to encode gadget"),
    }
}

async fn run(
    catalog: &Catalog<HttpGadgetService>,
    command: CliCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    use gadget_catalog::OperationOutcome as Outcome;

    let outcome = match command {
        CliCommand::List { query } => {
            let outcome = catalog.fetch_all().await;
            catalog.set_search_filter(query.unwrap_or_default());
            print_list(&catalog.list_viewmodel());
            outcome
        }
        CliCommand::Show { id } => catalog.fetch_by_id(id).await,
        CliCommand::Create { file } => catalog.create(read_input(&file)?).await,
        CliCommand::Update { id, file } => catalog.update(id, read_input(&file)?).await,
        CliCommand::Delete { id } => catalog.delete(id).await,
    };

    match outcome {
        Ok(Outcome::FetchedOne(gadget) | Outcome::Created(gadget) | Outcome::Updated(gadget)) => {
            print_gadget(&gadget);
        }
        Ok(Outcome::Deleted { id }) => println!("Deleted {id}"),
        Ok(Outcome::FetchedAll(_)) => {}
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    gadget_catalog::observability::init_tracing(&config);

    let catalog = match initialize(&config) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let kind = cli.command.kind();
    let span = tracing::info_span!("cli_command", operation = %kind);
    let result = run(&catalog, cli.command).instrument(span).await;

    eprintln!("{kind}: {}", catalog.status(kind));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
