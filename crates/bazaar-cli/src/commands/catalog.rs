//! Seller, category and attachment registration
//!
//! Each `add` prints the new record's id on stdout.

use std::path::Path;

use bazaar_core::model::{Attachment, Category, Seller};
use bazaar_core::ports::{AttachmentRepository, CategoryRepository, SellerRepository};
use bazaar_store::SqliteRepo;
use clap::{Args, Subcommand};

use super::CommandResult;

#[derive(Debug, Args)]
pub struct SellerArgs {
    #[command(subcommand)]
    pub command: SellerCommand,
}

#[derive(Debug, Subcommand)]
pub enum SellerCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
}

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    pub command: CategoryCommand,
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    /// Add a category; the slug is derived from the title
    Add {
        #[arg(long)]
        title: String,
    },
}

#[derive(Debug, Args)]
pub struct AttachmentArgs {
    #[command(subcommand)]
    pub command: AttachmentCommand,
}

#[derive(Debug, Subcommand)]
pub enum AttachmentCommand {
    /// Register an uploaded file by its storage key
    Add {
        #[arg(long)]
        key: String,
    },
}

pub fn execute_seller(args: SellerArgs, db: &Path) -> CommandResult {
    let mut repo = SqliteRepo::open(db)?;
    match args.command {
        SellerCommand::Add { name, email } => {
            let seller = Seller::new(name, email);
            repo.create_seller(&seller)?;
            println!("{}", seller.id);
        }
    }
    Ok(())
}

pub fn execute_category(args: CategoryArgs, db: &Path) -> CommandResult {
    let mut repo = SqliteRepo::open(db)?;
    match args.command {
        CategoryCommand::Add { title } => {
            let category = Category::new(title);
            repo.create_category(&category)?;
            println!("{}", category.id);
        }
    }
    Ok(())
}

pub fn execute_attachment(args: AttachmentArgs, db: &Path) -> CommandResult {
    let mut repo = SqliteRepo::open(db)?;
    match args.command {
        AttachmentCommand::Add { key } => {
            let attachment = Attachment::new(key);
            repo.create_attachment(&attachment)?;
            println!("{}", attachment.id);
        }
    }
    Ok(())
}
