//! Store trait for executing deal queries

use crate::core::deal::Deal;
use crate::core::predicate::Predicate;
use crate::core::query::{Page, SortSpec};
use anyhow::Result;
use async_trait::async_trait;

/// A fully built read query: filter, pagination window and ordering
#[derive(Debug, Clone, PartialEq)]
pub struct DealQuery {
    pub predicate: Predicate,
    pub skip: i64,
    pub limit: i64,
    pub sort: SortSpec,
}

impl DealQuery {
    pub fn new(predicate: Predicate, page: Page, sort: SortSpec) -> Self {
        Self {
            predicate,
            skip: page.start,
            limit: page.limit,
            sort,
        }
    }
}

/// Read access to a collection of deals
///
/// Implementations run the equivalent of
/// `find(predicate).skip(skip).limit(limit).sort(sort)` and return every
/// record it yields. As in the document store, ordering is applied before the
/// pagination window. A `limit` of 0 means no limit.
///
/// Errors from the underlying store must be returned, not swallowed, and
/// should reach the caller with their original cause intact.
#[async_trait]
pub trait DealStore: Send + Sync {
    /// Execute one read query
    async fn find(&self, query: &DealQuery) -> Result<Vec<Deal>>;
}

#[async_trait]
impl<S: DealStore + ?Sized> DealStore for std::sync::Arc<S> {
    async fn find(&self, query: &DealQuery) -> Result<Vec<Deal>> {
        (**self).find(query).await
    }
}
