//! kns-query CLI
//!
//! Command-line tool for running catalog query templates against a
//! SQLite mirror of the Knesset open-data tables.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use kns_query_core::PaginationSpec;
use kns_query_engine::{
    ExecutionResult, InMemoryCatalog, QueryExecutionService, SqliteExecutor, SqlitePoolProvider,
};

/// Filtered, paginated queries over Knesset open data.
#[derive(Parser)]
#[command(name = "kns-query")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database URL (SQLite path or connection string).
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite:knesset.sqlite3")]
    database: String,

    /// Catalog file with named query templates.
    #[arg(short, long, default_value = "catalog.json")]
    catalog: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the query templates available in the catalog.
    List,

    /// Run a named query template.
    Run {
        /// Template name.
        name: String,

        /// Knesset (session) numbers to filter by.
        #[arg(short, long)]
        knesset: Vec<i64>,

        /// Faction ids to filter by.
        #[arg(short, long)]
        faction: Vec<i64>,

        /// Document-type categories to filter by.
        #[arg(short = 't', long = "doc-type")]
        doc_types: Vec<String>,

        /// Maximum number of rows (template default when omitted).
        #[arg(short, long)]
        limit: Option<i64>,

        /// Row offset for pagination.
        #[arg(short, long, default_value_t = 0)]
        offset: i64,
    },

    /// Run an ad-hoc SELECT over a raw table.
    Explore {
        /// Table name.
        table: String,

        /// Knesset (session) numbers to filter by.
        #[arg(short, long)]
        knesset: Vec<i64>,

        /// Faction ids to filter by.
        #[arg(short, long)]
        faction: Vec<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let catalog = InMemoryCatalog::from_file(&cli.catalog)?;

    if let Commands::List = cli.command {
        for name in catalog.names() {
            println!("{name}");
        }
        return Ok(());
    }

    // Connect to database
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&cli.database)
        .await?;
    let service = QueryExecutionService::new(catalog, SqlitePoolProvider::new(pool), SqliteExecutor);

    match cli.command {
        Commands::List => unreachable!("handled before connecting"),

        Commands::Run {
            name,
            knesset,
            faction,
            doc_types,
            limit,
            offset,
        } => {
            let result = service
                .execute(
                    &name,
                    &knesset,
                    &faction,
                    &doc_types,
                    PaginationSpec::new(limit, offset),
                )
                .await?;

            if result.is_not_found() {
                eprintln!("Unknown query: {name}. Use `kns-query list` to see the catalog.");
                std::process::exit(1);
            }
            print_result(&result)?;
        }

        Commands::Explore {
            table,
            knesset,
            faction,
        } => {
            let result = service.explore_table(&table, &knesset, &faction).await?;
            print_result(&result)?;
        }
    }

    Ok(())
}

/// Prints the audit header and one JSON object per row.
fn print_result(result: &ExecutionResult) -> anyhow::Result<()> {
    info!(sql = %result.executed_sql, "executed");
    for description in &result.applied_filters {
        info!(filter = %description, "applied");
    }

    for row in &result.rows {
        println!("{}", serde_json::to_string(row)?);
    }
    info!(rows = result.rows.len(), "done");

    Ok(())
}
