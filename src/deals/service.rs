//! Deals query service
//!
//! Turns browse and search requests into one read query against a
//! [`DealStore`]: build the predicate, build the sort spec, hand both to the
//! store together with the pagination window, and return what it yields.

use crate::core::deal::Deal;
use crate::core::predicate::{FilterCriteria, Predicate, build_predicate};
use crate::core::query::{DealQueryParams, Page, SortDirection, SortField, SortSpec, build_sort_spec};
use crate::core::store::{DealQuery, DealStore};
use anyhow::Result;
use std::sync::Arc;

/// Query service for browsing and searching deals
///
/// Stateless apart from the shared store handle: clones are cheap and calls
/// may run concurrently. Each call issues exactly one read query. Store errors
/// are returned unchanged.
///
/// # Example
///
/// ```rust,ignore
/// let service = DealsService::new(InMemoryDealStore::with_deals(deals));
///
/// // 20% off or more in category 1, cheapest first
/// let criteria = FilterCriteria::new(1).with_percent_min(20.0);
/// let deals = service
///     .list_by_category(&criteria, Page::new(0, 10), Some(SortField::Price), SortDirection::Asc)
///     .await?;
/// ```
#[derive(Clone)]
pub struct DealsService {
    store: Arc<dyn DealStore>,
}

impl DealsService {
    pub fn new(store: impl DealStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Create a service over an already shared store
    pub fn from_shared(store: Arc<dyn DealStore>) -> Self {
        Self { store }
    }

    /// Build the filter predicate
    ///
    /// A non-empty `query` replaces the category filter with a text search,
    /// and zero-valued bounds add no clause. See [`Predicate::build`].
    pub fn build_predicate(
        category: i64,
        query: Option<&str>,
        percent_min: Option<f64>,
        price_from: Option<f64>,
        price_to: Option<f64>,
    ) -> Predicate {
        Predicate::build(category, query, percent_min, price_from, price_to)
    }

    /// Build the sort spec; no field means store order
    pub fn build_sort_spec(sort_field: Option<SortField>, sort_direction: SortDirection) -> SortSpec {
        build_sort_spec(sort_field, sort_direction)
    }

    /// Browse one category
    ///
    /// Browsing always filters on `criteria.category`; use
    /// [`search_by_text`](Self::search_by_text) or [`query`](Self::query) when
    /// `criteria.query` should take effect.
    pub async fn list_by_category(
        &self,
        criteria: &FilterCriteria,
        page: Page,
        sort_field: Option<SortField>,
        sort_direction: SortDirection,
    ) -> Result<Vec<Deal>> {
        tracing::debug!(category = criteria.category, "Listing deals by category");

        let predicate = Self::build_predicate(
            criteria.category,
            None,
            criteria.percent_min,
            criteria.price_from,
            criteria.price_to,
        );
        self.execute(predicate, page, Self::build_sort_spec(sort_field, sort_direction))
            .await
    }

    /// Search the text index for `criteria.query`
    ///
    /// When the query is non-empty the category is not filtered on; a missing
    /// or empty query falls back to browsing `criteria.category`.
    pub async fn search_by_text(
        &self,
        criteria: &FilterCriteria,
        page: Page,
        sort_field: Option<SortField>,
        sort_direction: SortDirection,
    ) -> Result<Vec<Deal>> {
        tracing::debug!(
            category = criteria.category,
            query = criteria.query.as_deref(),
            "Searching deals"
        );

        self.execute(
            build_predicate(criteria),
            page,
            Self::build_sort_spec(sort_field, sort_direction),
        )
        .await
    }

    /// Answer a request for `category` described by query-string parameters
    ///
    /// Searches when the parameters carry a query, browses otherwise. Unknown
    /// sort fields leave results unsorted and unknown directions sort
    /// descending.
    pub async fn query(&self, category: i64, params: &DealQueryParams) -> Result<Vec<Deal>> {
        let criteria = params.criteria(category);
        match criteria.search_text() {
            Some(_) => {
                self.search_by_text(
                    &criteria,
                    params.page(),
                    params.sort_field(),
                    params.sort_direction(),
                )
                .await
            }
            None => {
                self.list_by_category(
                    &criteria,
                    params.page(),
                    params.sort_field(),
                    params.sort_direction(),
                )
                .await
            }
        }
    }

    async fn execute(&self, predicate: Predicate, page: Page, sort: SortSpec) -> Result<Vec<Deal>> {
        let query = DealQuery::new(predicate, page, sort);
        self.store.find(&query).await
    }
}
