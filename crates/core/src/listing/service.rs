//! Listing service: joins the filtered read with the business-day
//! calculator and the holiday directory.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use flowtrack_domain::normalize::truncate_to_day;
use flowtrack_domain::{Page, Result, SortDir, WorkItemDates, WorkItemFilter, WorkItemView};
use serde::Serialize;
use tracing::instrument;

use super::ports::WorkItemQueryRepository;
use crate::calendar::business_days::{development_business_days, years_between};
use crate::calendar::holidays::{HolidayCalendar, HolidayDirectory};

/// State label that marks an item as done for the summary average.
const CLOSED_STATE: &str = "Closed";

/// Aggregate figures over the full filtered set (pagination ignored).
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemsSummary {
    pub total: u64,
    pub closed: u64,
    /// Average development time of closed-state items, rounded up;
    /// `None` when the filtered set has no closed items.
    pub avg_development_business_days: Option<u32>,
}

/// One page of annotated work items plus the filtered totals.
#[derive(Debug, Clone, Serialize)]
pub struct WorkItemListing {
    pub items: Vec<WorkItemView>,
    pub total: u64,
    pub summary: WorkItemsSummary,
}

/// Work item listing with development-time annotation.
pub struct ListingService {
    query: Arc<dyn WorkItemQueryRepository>,
    holidays: Arc<HolidayDirectory>,
}

impl ListingService {
    /// Create a listing service over the query port and the shared
    /// holiday directory.
    pub fn new(query: Arc<dyn WorkItemQueryRepository>, holidays: Arc<HolidayDirectory>) -> Self {
        Self { query, holidays }
    }

    /// One page of work items, each annotated with its development
    /// business days, plus summary figures over the whole filtered set.
    #[instrument(skip_all, fields(limit = page.limit, offset = page.offset))]
    pub async fn list_with_development_time(
        &self,
        filter: &WorkItemFilter,
        page: Page,
        sort: SortDir,
    ) -> Result<WorkItemListing> {
        let mut items = self.query.list_filtered(filter, page, sort).await?;
        let total = self.query.count_filtered(filter).await?;
        let closed = self.query.count_closed_filtered(filter).await?;
        let summary_dates = self.query.list_dates_for_summary(filter).await?;

        // One directory pass covering every year any window spans, so the
        // per-item counting below stays synchronous.
        let mut years = BTreeSet::new();
        for item in &items {
            collect_years(&mut years, item.created_date, item.activated_date, item.closed_date);
        }
        for dates in closed_for_average(&summary_dates) {
            collect_years(&mut years, dates.created_date, dates.activated_date, dates.closed_date);
        }
        let years: Vec<i32> = years.into_iter().collect();
        let calendar = self.holidays.calendar_for_years(&years).await;

        for item in &mut items {
            item.development_business_days = development_business_days(
                item.created_date,
                item.activated_date,
                item.closed_date,
                |day| calendar.is_holiday(day),
            );
        }

        let avg = average_development_days(&summary_dates, &calendar);

        Ok(WorkItemListing {
            items,
            total,
            summary: WorkItemsSummary { total, closed, avg_development_business_days: avg },
        })
    }
}

fn collect_years(
    years: &mut BTreeSet<i32>,
    created: DateTime<Utc>,
    activated: Option<DateTime<Utc>>,
    closed: Option<DateTime<Utc>>,
) {
    let Some(closed) = closed else { return };
    let start = truncate_to_day(activated.unwrap_or(created));
    let end = truncate_to_day(closed);
    years.extend(years_between(start, end));
}

fn closed_for_average(dates: &[WorkItemDates]) -> impl Iterator<Item = &WorkItemDates> {
    dates.iter().filter(|dates| dates.state == CLOSED_STATE && dates.closed_date.is_some())
}

/// Ceiling average over the filtered closed-state items.
fn average_development_days(dates: &[WorkItemDates], calendar: &HolidayCalendar) -> Option<u32> {
    let mut sum: u64 = 0;
    let mut count: u64 = 0;
    for item in closed_for_average(dates) {
        let days = development_business_days(
            item.created_date,
            item.activated_date,
            item.closed_date,
            |day| calendar.is_holiday(day),
        )?;
        sum += u64::from(days);
        count += 1;
    }

    if count == 0 {
        None
    } else {
        Some(u32::try_from(sum.div_ceil(count)).unwrap_or(u32::MAX))
    }
}
