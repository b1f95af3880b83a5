//! Read side: filterable work item listing annotated with development
//! business days, plus dimension listings.

pub mod ports;
pub mod service;

pub use service::{ListingService, WorkItemListing, WorkItemsSummary};
