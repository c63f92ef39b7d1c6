//! Product commands
//!
//! Usage:
//!   bazaar product create --seller <ID> --title <T> --category <ID> --price <CENTS> [--attachment <ID>]...
//!   bazaar product edit --product <ID> --seller <ID> --title <T> --category <ID> --price <CENTS> [--attachment <ID>]...
//!   bazaar product status --product <ID> --seller <ID> <available|cancelled|sold>
//!   bazaar product images --product <ID>

use std::path::Path;

use bazaar_core::ports::ProductRepository;
use bazaar_core::use_cases::{
    change_product_status, create_product, edit_product, ChangeProductStatusRequest,
    CreateProductRequest, EditProductRequest,
};
use bazaar_core::{ProductStatus, UniqueEntityId};
use bazaar_store::SqliteRepo;
use clap::{Args, Subcommand};

use super::{id_arg, CommandResult};

#[derive(Debug, Args)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// Create an available product; prints its id
    Create(DetailsArgs),
    /// Replace a product's details and images; prints the image diff
    Edit {
        #[arg(long, value_parser = id_arg)]
        product: UniqueEntityId,
        #[command(flatten)]
        details: DetailsArgs,
    },
    /// Move a product to another status
    Status {
        #[arg(long, value_parser = id_arg)]
        product: UniqueEntityId,
        #[arg(long, value_parser = id_arg)]
        seller: UniqueEntityId,
        status: ProductStatus,
    },
    /// List the product's persisted images, oldest first
    Images {
        #[arg(long, value_parser = id_arg)]
        product: UniqueEntityId,
    },
}

#[derive(Debug, Args)]
pub struct DetailsArgs {
    #[arg(long, value_parser = id_arg)]
    pub seller: UniqueEntityId,
    #[arg(long)]
    pub title: String,
    #[arg(long, value_parser = id_arg)]
    pub category: UniqueEntityId,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Price in cents
    #[arg(long)]
    pub price: i64,
    /// Attachment to show; repeat for several
    #[arg(long = "attachment", value_parser = id_arg)]
    pub attachments: Vec<UniqueEntityId>,
}

pub fn execute(args: ProductArgs, db: &Path) -> CommandResult {
    let mut repo = SqliteRepo::open(db)?;

    match args.command {
        ProductCommand::Create(details) => {
            let product = create_product(
                &mut repo,
                CreateProductRequest {
                    seller_id: details.seller,
                    title: details.title,
                    category_id: details.category,
                    description: details.description,
                    price_in_cents: details.price,
                    attachment_ids: details.attachments,
                },
            )?;
            println!("{}", product.id);
        }
        ProductCommand::Edit { product, details } => {
            let response = edit_product(
                &mut repo,
                EditProductRequest {
                    product_id: product,
                    seller_id: details.seller,
                    title: details.title,
                    category_id: details.category,
                    description: details.description,
                    price_in_cents: details.price,
                    attachment_ids: details.attachments,
                },
            )?;
            for image in &response.new_images {
                println!("+ {} {}", image.id, image.image_id);
            }
            for image in &response.removed_images {
                println!("- {} {}", image.id, image.image_id);
            }
        }
        ProductCommand::Status {
            product,
            seller,
            status,
        } => {
            let product = change_product_status(
                &mut repo,
                ChangeProductStatusRequest {
                    product_id: product,
                    seller_id: seller,
                    status,
                },
            )?;
            println!("{} {}", product.id, product.status);
        }
        ProductCommand::Images { product } => {
            for image in repo.find_product_images(&product)? {
                println!(
                    "{} {} {}",
                    image.id,
                    image.image_id,
                    image.created_at.to_rfc3339()
                );
            }
        }
    }
    Ok(())
}
