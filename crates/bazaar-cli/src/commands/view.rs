//! View registration
//!
//! Usage: bazaar view add --product <ID> --viewer <ID>

use std::path::Path;

use bazaar_core::use_cases::{register_view, RegisterViewRequest};
use bazaar_core::UniqueEntityId;
use bazaar_store::SqliteRepo;
use chrono::Utc;
use clap::{Args, Subcommand};

use super::{id_arg, CommandResult};

#[derive(Debug, Args)]
pub struct ViewArgs {
    #[command(subcommand)]
    pub command: ViewCommand,
}

#[derive(Debug, Subcommand)]
pub enum ViewCommand {
    /// Record that a seller viewed a product now
    Add {
        #[arg(long, value_parser = id_arg)]
        product: UniqueEntityId,
        #[arg(long, value_parser = id_arg)]
        viewer: UniqueEntityId,
    },
}

pub fn execute(args: ViewArgs, db: &Path) -> CommandResult {
    let mut repo = SqliteRepo::open(db)?;
    match args.command {
        ViewCommand::Add { product, viewer } => {
            let view = register_view(
                &mut repo,
                RegisterViewRequest {
                    product_id: product,
                    viewer_id: viewer,
                    viewed_at: Utc::now(),
                },
            )?;
            println!("{}", view.id);
        }
    }
    Ok(())
}
