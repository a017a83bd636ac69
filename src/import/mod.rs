use std::io::Read;

use thiserror::Error;
use tracing::info;

use crate::model::Client;

pub mod mapper;
pub mod parser;

pub use mapper::ImportOptions;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read CSV source: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV has no data rows ({rows} row(s) found)")]
    NoDataRows { rows: usize },
}

/// Reads a whole CSV export and maps it to clients.
pub fn load_clients<R>(mut source: R, options: &ImportOptions) -> Result<Vec<Client>, ImportError>
where
    R: Read,
{
    let mut content = String::new();
    source.read_to_string(&mut content)?;
    let rows = parser::parse(&content);
    let clients = mapper::map_to_clients(&rows, options)?;
    info!(rows = rows.len(), clients = clients.len(), "imported clients from CSV");
    Ok(clients)
}
