//! # Flowtrack Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The import reconciliation engine
//! - The business-day calculator and holiday directory
//! - The listing service with development-time annotation
//! - Port/adapter interfaces (traits) implemented by `flowtrack-infra`
//!
//! ## Architecture Principles
//! - Only depends on `flowtrack-domain`
//! - No database or HTTP code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod calendar;
pub mod import;
pub mod listing;

// Re-export specific items to avoid ambiguity
pub use calendar::business_days::{count_business_days_inclusive, years_between};
pub use calendar::holidays::{HolidayCalendar, HolidayDirectory, HolidaySource};
pub use import::ports::{DimensionRepository, WorkItemRepository};
pub use import::ImportService;
pub use listing::ports::{DimensionQueryRepository, WorkItemQueryRepository};
pub use listing::{ListingService, WorkItemListing, WorkItemsSummary};
