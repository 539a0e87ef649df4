use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use estimate_core::EstimateStore;
use estimate_data::bootstrap::BootstrapData;
use estimate_data::export::{
    ExportDocument, export_estimates, export_everything, export_items, export_templates,
};
use estimate_data::import::import_json;
use estimate_data::price_list::PriceListLoader;
use estimate_db_sqlite::SqliteStore;
use estimate_render::render_quote_html;

/// Move data in and out of an estimate database.
///
/// Exports collections to tagged JSON, imports tagged or legacy JSON
/// documents, loads CSV price lists into the catalog, seeds the default
/// catalog/templates, and renders a stored estimate as a printable quote.
#[derive(Debug, Parser)]
#[command(name = "estimate-data-tool")]
#[command(version, about, long_about = None)]
struct Cli {
    /// SQLite database URL (e.g. sqlite:estimates.db?mode=rwc to create if missing)
    #[arg(short, long, default_value = "sqlite:estimates.db?mode=rwc")]
    database: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Collection {
    Estimates,
    Items,
    Templates,
    All,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Seed the default catalog and templates into empty collections.
    Seed,

    /// Export a collection (or all three) as a tagged JSON document.
    Export {
        /// Which collection to export.
        #[arg(long, value_enum, default_value = "all")]
        collection: Collection,

        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Import a JSON document (tagged export or legacy array).
    Import {
        /// Path to the JSON file.
        file: PathBuf,
    },

    /// Load a CSV price list (name,unit,price,category) into the catalog.
    PriceList {
        /// Path to the CSV file.
        file: PathBuf,
    },

    /// Render a stored estimate as a printable HTML quote.
    Render {
        /// Id of the estimate to render.
        id: String,

        /// Output HTML file.
        #[arg(long)]
        out: PathBuf,

        /// Optional bootstrap JSON supplying the company profile.
        #[arg(long)]
        bootstrap: Option<PathBuf>,
    },
}

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

fn write_document(document: &ExportDocument, out: Option<&PathBuf>) -> Result<()> {
    let json = document.to_json().context("Failed to serialize export")?;
    match out {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let store = SqliteStore::open(&cli.database)
        .await
        .with_context(|| format!("Failed to open database: {}", cli.database))?;

    match cli.command {
        Command::Seed => {
            let outcome = store.seed_defaults().await.context("Failed to seed")?;
            println!(
                "Seeded {} catalog entries and {} templates.",
                outcome.catalog_entries, outcome.templates
            );
        }

        Command::Export { collection, out } => {
            let document = match collection {
                Collection::Estimates => export_estimates(&store).await,
                Collection::Items => export_items(&store).await,
                Collection::Templates => export_templates(&store).await,
                Collection::All => export_everything(&store).await,
            }
            .context("Failed to export")?;
            write_document(&document, out.as_ref())?;
        }

        Command::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to open: {}", file.display()))?;
            let report = import_json(&store, &json)
                .await
                .with_context(|| format!("Failed to import: {}", file.display()))?;
            println!(
                "Imported {} records ({} estimates, {} items, {} templates).",
                report.total(),
                report.estimates,
                report.items,
                report.templates
            );
        }

        Command::PriceList { file } => {
            let reader = File::open(&file)
                .with_context(|| format!("Failed to open: {}", file.display()))?;
            let records = PriceListLoader::parse(reader)
                .with_context(|| format!("Failed to parse CSV: {}", file.display()))?;
            println!("Parsed {} records from CSV", records.len());

            let written = PriceListLoader::load(&store, &records)
                .await
                .context("Failed to load price list into the catalog")?;
            println!("Loaded {written} catalog items.");
        }

        Command::Render { id, out, bootstrap } => {
            let estimate = store
                .get_estimate(&id)
                .await
                .with_context(|| format!("No estimate with id '{id}'"))?;
            let company = bootstrap
                .map(|path| BootstrapData::load_or_default(&path))
                .unwrap_or_default()
                .company();

            let html = render_quote_html(&estimate, &company);
            std::fs::write(&out, html)
                .with_context(|| format!("Failed to write: {}", out.display()))?;
            println!("Rendered quote to {}", out.display());
        }
    }

    Ok(())
}
