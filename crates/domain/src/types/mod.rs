//! Domain data types

pub mod dimensions;
pub mod import;
pub mod query;
pub mod work_item;

pub use dimensions::{Person, WorkItemType};
pub use import::{ImportSummary, ParsedWorkItem, RawWorkItem};
pub use query::{Page, SortDir, WorkItemFilter};
pub use work_item::{WorkItemDates, WorkItemRow, WorkItemView};
