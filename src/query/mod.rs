//! List-view query layer: cache key, freshness cache, controller, paging,
//! period resolution and search debounce.

pub mod cache;
pub mod controller;
pub mod debounce;
pub mod key;
pub mod pagination;
pub mod period;

pub use cache::QueryCache;
pub use controller::{ListController, ListView};
pub use key::{ListParams, QueryKey, SortOrder};
pub use period::{DateRange, Period};
