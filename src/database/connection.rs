use crate::error::StorageError;
use log::{debug, error};
use rusqlite::Connection;

// Embed migrations from the migrations directory
refinery::embed_migrations!("migrations");

/// Opens the database and brings the schema up to date
pub fn init_connection(db_path: &str) -> Result<Connection, StorageError> {
    let mut conn = Connection::open(db_path)?;

    match migrations::runner().run(&mut conn) {
        Ok(report) => {
            debug!(
                "Migrations completed successfully ({} applied)",
                report.applied_migrations().len()
            );
        }
        Err(e) => {
            error!("Refinery migration error: {}", e);
            return Err(StorageError::Migration(e.to_string()));
        }
    }

    Ok(conn)
}
