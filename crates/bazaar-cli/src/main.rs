//! Bazaar CLI
//!
//! Command-line interface over the SQLite marketplace store

use std::path::PathBuf;

use bazaar_core::logging_facility::{init, Profile};
use bazaar_core::RequestId;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "bazaar")]
#[command(about = "Bazaar - marketplace listings and seller metrics", long_about = None)]
struct Cli {
    /// SQLite database file; its directory is created on demand
    #[arg(long, global = true, default_value = ".bazaar/store.db")]
    db: PathBuf,

    /// development (human-readable) or production (JSON)
    #[arg(long, global = true, default_value = "development")]
    log_profile: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Register sellers
    Seller(commands::catalog::SellerArgs),
    /// Register categories
    Category(commands::catalog::CategoryArgs),
    /// Register uploaded attachments
    Attachment(commands::catalog::AttachmentArgs),
    /// Create, edit and inspect products
    Product(commands::product::ProductArgs),
    /// Record product views
    View(commands::view::ViewArgs),
    /// Seller dashboard metrics
    Metrics(commands::metrics::MetricsArgs),
}

fn main() {
    let cli = Cli::parse();
    init(cli.log_profile);

    let request_id = RequestId::new();
    let _span = tracing::info_span!("cli", request_id = request_id.as_str()).entered();

    let db = cli.db.as_path();
    let result = match cli.command {
        Commands::Migrate => commands::migrate::execute(db),
        Commands::Seller(args) => commands::catalog::execute_seller(args, db),
        Commands::Category(args) => commands::catalog::execute_category(args, db),
        Commands::Attachment(args) => commands::catalog::execute_attachment(args, db),
        Commands::Product(args) => commands::product::execute(args, db),
        Commands::View(args) => commands::view::execute(args, db),
        Commands::Metrics(args) => commands::metrics::execute(args, db),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
