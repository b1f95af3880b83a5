//! Domain-wide constants

/// Exact date format accepted by the import boundary (`DD-MM-YYYY HH:mm`).
pub const IMPORT_DATE_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Default page size for listing reads.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Maximum page size accepted for listing reads.
pub const MAX_PAGE_LIMIT: u32 = 200;
