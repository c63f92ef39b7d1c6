//! Seller dashboard metrics
//!
//! Usage:
//!   bazaar metrics views-per-day --seller <ID>
//!   bazaar metrics summary --seller <ID>
//!   bazaar metrics product-week --product <ID>

use std::path::Path;

use bazaar_core::use_cases::{
    fetch_views_per_day_in_month, get_available_products_amount_in_month,
    get_product_views_amount_in_week, get_sold_products_amount_in_month,
    get_views_amount_in_month,
};
use bazaar_core::UniqueEntityId;
use bazaar_store::SqliteRepo;
use chrono::Utc;
use clap::{Args, Subcommand};

use super::{id_arg, CommandResult};

#[derive(Debug, Args)]
pub struct MetricsArgs {
    #[command(subcommand)]
    pub command: MetricsCommand,
}

#[derive(Debug, Subcommand)]
pub enum MetricsCommand {
    /// One line per day for the last 30 days, newest first
    ViewsPerDay {
        #[arg(long, value_parser = id_arg)]
        seller: UniqueEntityId,
    },
    /// Monthly totals for a seller
    Summary {
        #[arg(long, value_parser = id_arg)]
        seller: UniqueEntityId,
    },
    /// Views of one product in the last 7 days
    ProductWeek {
        #[arg(long, value_parser = id_arg)]
        product: UniqueEntityId,
    },
}

pub fn execute(args: MetricsArgs, db: &Path) -> CommandResult {
    let repo = SqliteRepo::open(db)?;
    let now = Utc::now();

    match args.command {
        MetricsCommand::ViewsPerDay { seller } => {
            for bucket in fetch_views_per_day_in_month(&repo, &seller, now)? {
                println!("{} {}", bucket.date.format("%Y-%m-%d"), bucket.amount);
            }
        }
        MetricsCommand::Summary { seller } => {
            let views = get_views_amount_in_month(&repo, &seller, now)?;
            let available = get_available_products_amount_in_month(&repo, &seller, now)?;
            let sold = get_sold_products_amount_in_month(&repo, &seller, now)?;
            println!("views {}", views);
            println!("available {}", available);
            println!("sold {}", sold);
        }
        MetricsCommand::ProductWeek { product } => {
            let views = get_product_views_amount_in_week(&repo, &product, now)?;
            println!("{}", views);
        }
    }
    Ok(())
}
