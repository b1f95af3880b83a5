//! Process-wide holiday directory.
//!
//! Maps calendar year to the set of jurisdictional holidays, populated on
//! demand from a remote source behind the [`HolidaySource`] port. The
//! cache is monotonic for the process lifetime: year entries are only
//! added, never evicted or refreshed. Holiday data for current and
//! historical years does not change retroactively within a deployment, so
//! expiry would buy nothing.
//!
//! Failure policy: a failed fetch is retried exactly once after a short
//! delay; if the retry also fails the year degrades to an empty set (every
//! day becomes a business day for that year) rather than failing the
//! caller. The degraded set is cached like any other result.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use flowtrack_domain::Result;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Default pause before the single retry of a failed holiday fetch.
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(200);

/// Remote lookup of jurisdictional holidays for one calendar year.
#[async_trait]
pub trait HolidaySource: Send + Sync {
    /// Fetch every holiday date of the given year.
    async fn fetch_holidays(&self, year: i32) -> Result<Vec<NaiveDate>>;
}

/// Year-partitioned holiday cache over a [`HolidaySource`].
///
/// Safe for concurrent use; duplicate concurrent fetches for the same
/// year are acceptable (they are idempotent and produce the same set).
pub struct HolidayDirectory {
    source: Arc<dyn HolidaySource>,
    cache: RwLock<HashMap<i32, Arc<HashSet<NaiveDate>>>>,
    retry_delay: Duration,
}

impl HolidayDirectory {
    /// Create a directory with an empty cache.
    pub fn new(source: Arc<dyn HolidaySource>) -> Self {
        Self { source, cache: RwLock::new(HashMap::new()), retry_delay: DEFAULT_RETRY_DELAY }
    }

    /// Override the retry pause (tests use a zero delay).
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Holiday set for one year, fetching and caching on miss.
    ///
    /// Never fails: an unreachable source degrades to an empty set for
    /// that year after one retry.
    pub async fn holidays_for(&self, year: i32) -> Arc<HashSet<NaiveDate>> {
        if let Some(cached) = self.cache.read().await.get(&year) {
            return Arc::clone(cached);
        }

        let set = Arc::new(self.fetch_with_retry(year).await);
        let mut cache = self.cache.write().await;
        // A concurrent fetch for the same year may have won the race;
        // keep the first entry so repeated reads stay stable.
        Arc::clone(cache.entry(year).or_insert(set))
    }

    /// Snapshot covering every year in `years`, for use as a synchronous
    /// holiday predicate.
    pub async fn calendar_for_years(&self, years: &[i32]) -> HolidayCalendar {
        let mut by_year = HashMap::with_capacity(years.len());
        for &year in years {
            by_year.insert(year, self.holidays_for(year).await);
        }
        HolidayCalendar { by_year }
    }

    async fn fetch_with_retry(&self, year: i32) -> HashSet<NaiveDate> {
        match self.source.fetch_holidays(year).await {
            Ok(dates) => {
                debug!(year, count = dates.len(), "holiday set fetched");
                return dates.into_iter().collect();
            }
            Err(err) => {
                warn!(year, error = %err, "holiday fetch failed, retrying once");
            }
        }

        tokio::time::sleep(self.retry_delay).await;

        match self.source.fetch_holidays(year).await {
            Ok(dates) => {
                debug!(year, count = dates.len(), "holiday set fetched on retry");
                dates.into_iter().collect()
            }
            Err(err) => {
                warn!(year, error = %err, "holiday retry failed, degrading to empty set");
                HashSet::new()
            }
        }
    }
}

/// Immutable multi-year holiday snapshot taken from the directory.
///
/// Lookup for a year that was not prefetched answers `false`; callers are
/// responsible for covering every year their window spans.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    by_year: HashMap<i32, Arc<HashSet<NaiveDate>>>,
}

impl HolidayCalendar {
    /// Whether `day` is a holiday in its (prefetched) year.
    #[must_use]
    pub fn is_holiday(&self, day: NaiveDate) -> bool {
        self.by_year.get(&day.year()).is_some_and(|set| set.contains(&day))
    }
}
