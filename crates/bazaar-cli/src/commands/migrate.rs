//! Migrate command
//!
//! Usage: bazaar migrate [--db <PATH>]

use std::path::Path;

use bazaar_store::migrations::applied_migrations;
use bazaar_store::SqliteRepo;

use super::CommandResult;

/// Open (creating if needed) and migrate the database, then list applied migrations
pub fn execute(db: &Path) -> CommandResult {
    let repo = SqliteRepo::open(db)?;

    for migration_id in applied_migrations(repo.connection())? {
        println!("applied {}", migration_id);
    }
    Ok(())
}
