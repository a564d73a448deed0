//! Core module containing the deal model, query types and store trait

pub mod deal;
pub mod error;
pub mod field;
pub mod predicate;
pub mod query;
pub mod store;

pub use deal::Deal;
pub use error::{ConfigError, DealsError, DealsResult, StorageError, ValidationError};
pub use field::FieldValue;
pub use predicate::{Condition, FilterCriteria, Predicate, build_predicate};
pub use query::{DealQueryParams, Page, SortDirection, SortField, SortSpec, build_sort_spec};
pub use store::{DealQuery, DealStore};
