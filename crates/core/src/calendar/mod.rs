//! Calendar-aware development-time machinery: the pure business-day
//! counter and the process-wide holiday directory it reads from.

pub mod business_days;
pub mod holidays;

pub use business_days::{count_business_days_inclusive, development_business_days, years_between};
pub use holidays::{HolidayCalendar, HolidayDirectory, HolidaySource};
