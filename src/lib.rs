/// Records the dashboard works on: clients, catalog, inventory, sales and
/// invoices, plus the closed label sets used to classify them.
pub mod model;

/// Accent-insensitive helpers for ids and name ordering.
pub mod text;

/// Client spreadsheet import. A small quote-aware CSV tokenizer followed by
/// a header-driven mapper that tolerates missing columns and bad cells.
pub mod import;

/// In-memory repository. Constructed once and passed by reference to
/// everything that reads records.
pub mod store;

/// Demo data set, used until an import replaces the clients.
pub mod fixtures;

/// Pure reducers feeding charts, tables and KPI cards.
pub mod analytics;

/// Search, filter, sort and pagination for the client table.
pub mod view;

/// Checks on user-entered clients and invoice drafts.
pub mod validation;

/// Persisted dashboard preferences.
pub mod settings;

/// Bootstraps the library for the binary. Kept in the library so the
/// integration tests can drive it too.
pub mod bin_utils;
