//! SQL migrations compiled into the binary

/// One schema step, identified by the file stem it was loaded from
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// Every migration, oldest first
pub fn get_migrations() -> Vec<Migration> {
    vec![Migration {
        id: "001_initial_schema",
        sql: include_str!("../../migrations/001_initial_schema.sql"),
    }]
}
