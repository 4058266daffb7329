// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod commands;
mod render;

use clap::Parser;
use retail_analytics::{AppConfig, GeneratedSales, MemorySession, PersistSummary, ReferenceSummary};
use retail_analytics_domain::SaleId;
use retail_analytics_persistence::{
    CustomerListing, DEFAULT_PAGE_SIZE, Page, PersistenceError, ProductListing, SaleDetail,
    SalesPage, SqlitePersistence, StoreListing, TotalMismatch,
};
use std::path::{Path, PathBuf};
use time::PrimitiveDateTime;
use tracing::{error, info};

use commands::GenerateOverrides;

/// Retail Seed - synthetic data for the retail analytics database
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "DB_URL", global = true)]
    database: Option<PathBuf>,

    /// JSON configuration file. Defaults apply when not provided.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for reproducible runs. Overrides the configuration file.
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Seed regions, categories, stores and products
    SeedReference {
        /// Product catalog CSV with `nome` and `categoria` columns
        #[arg(long)]
        catalog: PathBuf,

        /// Number of stores to create
        #[arg(long)]
        stores: Option<u32>,
    },
    /// Generate customers, salespeople, sales, line items and payments
    Generate(GenerateArgs),
    /// Seed reference data, then generate sales, against the same database
    All {
        /// Product catalog CSV with `nome` and `categoria` columns
        #[arg(long)]
        catalog: PathBuf,

        #[command(flatten)]
        generate: GenerateArgs,
    },
    /// List sales, one page at a time
    Report {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u64,

        /// Sales per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u64,
    },
    /// List customers, one page at a time
    Customers(PageArgs),
    /// List products with their categories, one page at a time
    Products(PageArgs),
    /// List stores with their regions, one page at a time
    Stores(PageArgs),
    /// Show one sale with its line items
    Sale {
        /// Sale identifier
        id: i64,
    },
    /// Audit sale totals and references
    Check,
}

#[derive(clap::Args, Debug, Clone, Copy)]
struct PageArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    page: u64,

    /// Rows per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u64,
}

#[derive(clap::Args, Debug, Clone, Copy, Default)]
struct GenerateArgs {
    /// Number of stores; store ids run from 1 to this value
    #[arg(long)]
    stores: Option<u32>,

    /// Number of consecutive days, ending today
    #[arg(long)]
    days: Option<u32>,

    /// Attach one payment to every sale
    #[arg(long)]
    payments: bool,

    /// Skip the reference data check before generation
    #[arg(long)]
    no_preflight: bool,

    /// Generate without writing anything
    #[arg(long)]
    dry_run: bool,
}

impl GenerateArgs {
    const fn overrides(&self) -> GenerateOverrides {
        GenerateOverrides {
            stores: self.stores,
            days: self.days,
            payments: self.payments,
            no_preflight: self.no_preflight,
        }
    }
}

/// Failures found by `check`.
#[derive(Debug)]
struct AuditFailed {
    mismatches: usize,
    dangling: u64,
}

impl std::fmt::Display for AuditFailed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Audit failed: {} inconsistent total(s), {} dangling reference(s)",
            self.mismatches, self.dangling
        )
    }
}

impl std::error::Error for AuditFailed {}

fn open_database(database: Option<&Path>) -> Result<SqlitePersistence, PersistenceError> {
    if let Some(db_path) = database {
        info!("Using file-based database at: {}", db_path.display());
        SqlitePersistence::new_with_file(db_path)
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()
    }
}

fn build_config(args: &Args) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let mut config: AppConfig = commands::load_config(args.config.as_deref(), args.seed)?;
    match &args.command {
        Command::SeedReference {
            stores: Some(stores),
            ..
        } => config.reference.store_count = *stores,
        Command::Generate(generate) => generate.overrides().apply(&mut config),
        Command::All { generate, .. } => {
            generate.overrides().apply(&mut config);
            config.reference.store_count = config.generator.store_count;
        }
        _ => {}
    }
    config.validate()?;
    Ok(config)
}

/// Runs one command and returns the text to print.
fn run(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    let config: AppConfig = build_config(args)?;
    let now: PrimitiveDateTime = commands::current_time()?;

    match &args.command {
        Command::SeedReference { catalog, .. } => {
            let mut persistence: SqlitePersistence = open_database(args.database.as_deref())?;
            let summary: ReferenceSummary =
                commands::seed_reference(&mut persistence, &config, catalog, now.date())?;
            Ok(render::reference_summary(&summary))
        }
        Command::Generate(generate) if generate.dry_run => {
            let generated: GeneratedSales = commands::preview(&config, now)?;
            Ok(render::dry_run_summary(&generated))
        }
        Command::Generate(_) => {
            let mut persistence: SqlitePersistence = open_database(args.database.as_deref())?;
            let summary: PersistSummary = commands::generate(&mut persistence, &config, now)?;
            Ok(render::persist_summary(&summary))
        }
        Command::All { catalog, generate } => {
            let (reference, sales): (ReferenceSummary, PersistSummary) = if generate.dry_run {
                info!("Dry run: using a scratch in-memory session");
                let mut session: MemorySession = MemorySession::new();
                commands::seed_and_generate(&mut session, &config, catalog, now)?
            } else {
                let mut persistence: SqlitePersistence =
                    open_database(args.database.as_deref())?;
                commands::seed_and_generate(&mut persistence, &config, catalog, now)?
            };
            Ok(format!(
                "{}\n{}",
                render::reference_summary(&reference),
                render::persist_summary(&sales)
            ))
        }
        Command::Report { page, page_size } => {
            let mut persistence: SqlitePersistence = open_database(args.database.as_deref())?;
            let sales: SalesPage = persistence.list_sales_page(*page, *page_size)?;
            Ok(render::sales_page(&sales)?)
        }
        Command::Customers(paging) => {
            let mut persistence: SqlitePersistence = open_database(args.database.as_deref())?;
            let customers: Page<CustomerListing> =
                persistence.list_customers(paging.page, paging.page_size)?;
            Ok(render::customers_page(&customers))
        }
        Command::Products(paging) => {
            let mut persistence: SqlitePersistence = open_database(args.database.as_deref())?;
            let products: Page<ProductListing> =
                persistence.list_products(paging.page, paging.page_size)?;
            Ok(render::products_page(&products))
        }
        Command::Stores(paging) => {
            let mut persistence: SqlitePersistence = open_database(args.database.as_deref())?;
            let stores: Page<StoreListing> =
                persistence.list_stores(paging.page, paging.page_size)?;
            Ok(render::stores_page(&stores))
        }
        Command::Sale { id } => {
            let mut persistence: SqlitePersistence = open_database(args.database.as_deref())?;
            let detail: SaleDetail = persistence.get_sale_detail(SaleId::new(*id))?;
            Ok(render::sale_detail(&detail)?)
        }
        Command::Check => {
            let mut persistence: SqlitePersistence = open_database(args.database.as_deref())?;
            let mismatches: Vec<TotalMismatch> = persistence.find_inconsistent_sale_totals()?;
            let dangling: u64 = persistence.count_dangling_sale_references()?;
            let text: String = render::check_result(&mismatches, dangling);
            if mismatches.is_empty() && dangling == 0 {
                Ok(text)
            } else {
                println!("{text}");
                Err(Box::new(AuditFailed {
                    mismatches: mismatches.len(),
                    dangling,
                }))
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting retail-seed");

    match run(&args) {
        Ok(text) => {
            println!("{text}");
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {}", e);
            Err(e)
        }
    }
}
