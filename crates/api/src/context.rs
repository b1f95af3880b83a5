//! Application context - dependency injection container

use std::sync::Arc;

use flowtrack_core::{DimensionQueryRepository, HolidayDirectory, ImportService, ListingService};
use flowtrack_domain::Result;
use flowtrack_infra::{
    AppConfig, BrasilApiHolidaySource, DbManager, SqliteDimensionRepository,
    SqliteWorkItemQueryRepository, SqliteWorkItemRepository,
};
use tracing::{info, warn};

/// Holds every service a request handler can reach.
///
/// Built once at startup and shared behind an `Arc` as router state.
pub struct AppContext {
    pub db: Arc<DbManager>,
    pub import: ImportService,
    pub listing: ListingService,
    pub dimensions: Arc<dyn DimensionQueryRepository>,
    /// Bearer token required on every route except the health check.
    /// `None` disables authentication entirely.
    pub api_token: Option<String>,
}

impl AppContext {
    /// Wire the full service graph from configuration: database pool,
    /// migrations, repositories, holiday directory, and both services.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database_path, config.pool_size)?);
        db.run_migrations()?;
        info!(path = %config.database_path.display(), "database ready");

        let work_items = Arc::new(SqliteWorkItemRepository::new(db.pool()));
        let dimensions = Arc::new(SqliteDimensionRepository::new(db.pool()));
        let queries = Arc::new(SqliteWorkItemQueryRepository::new(db.pool()));

        let holiday_source = BrasilApiHolidaySource::new(config.holiday_api_base.clone())?;
        let holidays = Arc::new(HolidayDirectory::new(Arc::new(holiday_source)));

        let import = ImportService::new(work_items, dimensions.clone());
        let listing = ListingService::new(queries, holidays);

        if config.api_token.is_none() {
            warn!("FLOWTRACK_API_TOKEN is unset; the API accepts unauthenticated requests");
        }

        Ok(Self {
            db,
            import,
            listing,
            dimensions,
            api_token: config.api_token.clone(),
        })
    }
}
