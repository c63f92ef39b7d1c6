pub mod catalog;
pub mod metrics;
pub mod migrate;
pub mod product;
pub mod view;

use bazaar_core::UniqueEntityId;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Parse an identifier argument
pub fn id_arg(s: &str) -> Result<UniqueEntityId, String> {
    if s.trim().is_empty() {
        return Err("identifier cannot be empty".to_string());
    }
    Ok(UniqueEntityId::from(s))
}
