//! Port interfaces for the listing reads.

use async_trait::async_trait;
use flowtrack_domain::{
    Page, Person, Result, SortDir, WorkItemDates, WorkItemFilter, WorkItemType, WorkItemView,
};

/// Filterable, paginated read access to work items.
///
/// Implementations return views with `development_business_days` unset;
/// the listing service fills it in.
#[async_trait]
pub trait WorkItemQueryRepository: Send + Sync {
    /// One page of work items joined with their type and assignee names.
    async fn list_filtered(
        &self,
        filter: &WorkItemFilter,
        page: Page,
        sort: SortDir,
    ) -> Result<Vec<WorkItemView>>;

    /// Total row count under the filter, ignoring pagination.
    async fn count_filtered(&self, filter: &WorkItemFilter) -> Result<u64>;

    /// Count of rows under the filter that have a closed date.
    async fn count_closed_filtered(&self, filter: &WorkItemFilter) -> Result<u64>;

    /// Lifecycle-date projection of every row under the filter, for the
    /// summary average (ignores pagination).
    async fn list_dates_for_summary(&self, filter: &WorkItemFilter) -> Result<Vec<WorkItemDates>>;
}

/// Read access to the dimension tables.
#[async_trait]
pub trait DimensionQueryRepository: Send + Sync {
    /// People, optionally narrowed by exact ID or name substring, ordered
    /// by name.
    async fn list_people(
        &self,
        id: Option<&str>,
        name_contains: Option<&str>,
    ) -> Result<Vec<Person>>;

    /// Work item types, same narrowing, ordered by name.
    async fn list_types(
        &self,
        id: Option<&str>,
        name_contains: Option<&str>,
    ) -> Result<Vec<WorkItemType>>;
}
