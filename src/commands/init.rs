// src/commands/init.rs
//! Database initialization

use anyhow::{Context, Result};
use tracing::info;

/// Create the snapshot database and its schema
pub fn cmd_init(db_path: &str) -> Result<()> {
    info!("Initializing uddcheck database at: {}", db_path);
    uddcheck::db::init(db_path)
        .with_context(|| format!("Failed to initialize database at {}", db_path))?;
    println!("Database initialized successfully at: {}", db_path);
    Ok(())
}
