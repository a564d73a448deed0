//! Macro-generated test suite for `DealStore` contract validation.
//!
//! The `deal_store_tests!` macro generates a test module that drives a
//! `DealsService` over any `DealStore` seeded with the sample catalogue and
//! checks filtering, text search, sorting, pagination and error reporting.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//!
//! use store_harness::*;
//!
//! async fn seeded(deals: Vec<Deal>) -> InMemoryDealStore {
//!     InMemoryDealStore::with_deals(deals)
//! }
//!
//! deal_store_tests!(seeded);
//! ```
//!
//! # Generated Tests
//!
//! ## Filtering
//! - `test_browse_category` — category equality only
//! - `test_percent_min_positive` — 20 becomes `percent <= -20`
//! - `test_percent_min_negative` — -40 kept as is
//! - `test_price_range` — both bounds in one range
//! - `test_zero_bounds_are_ignored` — zeros add no clause
//!
//! ## Text search
//! - `test_text_search_ignores_category`
//! - `test_text_search_with_discount`
//! - `test_text_search_no_results`
//!
//! ## Sorting & pagination
//! - `test_sort_price_asc`, `test_sort_percent_desc`, `test_sort_name_asc`, `test_sort_date_desc`
//! - `test_sort_then_paginate`
//! - `test_empty_category`
//!
//! ## Contract
//! - `test_discount_scenario` — two-deal browse-with-discount scenario
//! - `test_repeated_queries_are_identical`
//! - `test_negative_skip_is_an_error`

/// Generate a full `DealStore` conformance test suite.
///
/// `$seeded` must name an async function taking `Vec<Deal>` and returning a
/// fresh store holding exactly those deals. It is called once per test.
#[macro_export]
macro_rules! deal_store_tests {
    ($seeded:path) => {
        mod deal_store_contract_tests {
            use super::*;
            use deals::core::predicate::FilterCriteria;
            use deals::core::query::{Page, SortDirection, SortField};
            use deals::deals::DealsService;

            async fn service() -> DealsService {
                init_tracing();
                DealsService::new($seeded(sample_deals()).await)
            }

            fn all() -> Page {
                Page::new(0, 0)
            }

            // ==================================================================
            // Filtering
            // ==================================================================

            #[tokio::test]
            async fn test_browse_category() {
                let service = service().await;
                let deals = service
                    .list_by_category(&FilterCriteria::new(1), all(), None, SortDirection::Desc)
                    .await
                    .unwrap();

                assert_eq!(sorted_ids(&deals), vec!["d1", "d2", "d3"]);
                assert!(deals.iter().all(|d| d.category == 1));
            }

            #[tokio::test]
            async fn test_percent_min_positive() {
                let service = service().await;
                let criteria = FilterCriteria::new(1).with_percent_min(20.0);
                let deals = service
                    .list_by_category(&criteria, all(), None, SortDirection::Desc)
                    .await
                    .unwrap();

                assert_eq!(sorted_ids(&deals), vec!["d1", "d3"]);
            }

            #[tokio::test]
            async fn test_percent_min_negative() {
                let service = service().await;
                let criteria = FilterCriteria::new(1).with_percent_min(-40.0);
                let deals = service
                    .list_by_category(&criteria, all(), None, SortDirection::Desc)
                    .await
                    .unwrap();

                assert_eq!(ids(&deals), vec!["d3"]);
            }

            #[tokio::test]
            async fn test_price_range() {
                let service = service().await;
                let criteria = FilterCriteria::new(1)
                    .with_price_from(60.0)
                    .with_price_to(150.0);
                let deals = service
                    .list_by_category(&criteria, all(), None, SortDirection::Desc)
                    .await
                    .unwrap();

                assert_eq!(sorted_ids(&deals), vec!["d2", "d3"]);
            }

            #[tokio::test]
            async fn test_zero_bounds_are_ignored() {
                let service = service().await;
                let criteria = FilterCriteria::new(2)
                    .with_percent_min(0.0)
                    .with_price_from(0.0)
                    .with_price_to(0.0);
                let deals = service
                    .list_by_category(&criteria, all(), None, SortDirection::Desc)
                    .await
                    .unwrap();

                assert_eq!(sorted_ids(&deals), vec!["d4", "d5"]);
            }

            // ==================================================================
            // Text search
            // ==================================================================

            #[tokio::test]
            async fn test_text_search_ignores_category() {
                let service = service().await;
                let deals = service
                    .search_by_text(
                        &FilterCriteria::new(2).with_query("espresso"),
                        all(),
                        None,
                        SortDirection::Desc,
                    )
                    .await
                    .unwrap();

                // d1 is in category 1 and still matches
                assert_eq!(sorted_ids(&deals), vec!["d1", "d5"]);
            }

            #[tokio::test]
            async fn test_text_search_with_discount() {
                let service = service().await;
                let criteria = FilterCriteria::new(1)
                    .with_query("espresso")
                    .with_percent_min(28.0);
                let deals = service
                    .search_by_text(&criteria, all(), None, SortDirection::Desc)
                    .await
                    .unwrap();

                assert_eq!(ids(&deals), vec!["d1"]);
            }

            #[tokio::test]
            async fn test_text_search_no_results() {
                let service = service().await;
                let deals = service
                    .search_by_text(
                        &FilterCriteria::new(1).with_query("toaster"),
                        all(),
                        None,
                        SortDirection::Desc,
                    )
                    .await
                    .unwrap();

                assert!(deals.is_empty());
            }

            // ==================================================================
            // Sorting & pagination
            // ==================================================================

            #[tokio::test]
            async fn test_sort_price_asc() {
                let service = service().await;
                let deals = service
                    .list_by_category(
                        &FilterCriteria::new(1),
                        all(),
                        Some(SortField::Price),
                        SortDirection::Asc,
                    )
                    .await
                    .unwrap();

                assert_eq!(ids(&deals), vec!["d1", "d2", "d3"]);
            }

            #[tokio::test]
            async fn test_sort_percent_desc() {
                let service = service().await;
                let deals = service
                    .list_by_category(
                        &FilterCriteria::new(1),
                        all(),
                        Some(SortField::Percent),
                        SortDirection::Desc,
                    )
                    .await
                    .unwrap();

                assert_eq!(ids(&deals), vec!["d2", "d1", "d3"]);
            }

            #[tokio::test]
            async fn test_sort_name_asc() {
                let service = service().await;
                let deals = service
                    .list_by_category(
                        &FilterCriteria::new(2),
                        all(),
                        Some(SortField::Name),
                        SortDirection::Asc,
                    )
                    .await
                    .unwrap();

                assert_eq!(ids(&deals), vec!["d4", "d5"]);
            }

            #[tokio::test]
            async fn test_sort_date_desc() {
                let service = service().await;
                let deals = service
                    .list_by_category(
                        &FilterCriteria::new(1),
                        all(),
                        Some(SortField::Date),
                        SortDirection::Desc,
                    )
                    .await
                    .unwrap();

                assert_eq!(ids(&deals), vec!["d2", "d1", "d3"]);
            }

            #[tokio::test]
            async fn test_sort_then_paginate() {
                let service = service().await;
                let deals = service
                    .list_by_category(
                        &FilterCriteria::new(1),
                        Page::new(1, 1),
                        Some(SortField::Price),
                        SortDirection::Asc,
                    )
                    .await
                    .unwrap();

                assert_eq!(ids(&deals), vec!["d2"]);
            }

            #[tokio::test]
            async fn test_empty_category() {
                let service = service().await;
                let deals = service
                    .list_by_category(
                        &FilterCriteria::new(42),
                        Page::new(0, 10),
                        None,
                        SortDirection::Desc,
                    )
                    .await
                    .unwrap();

                assert!(deals.is_empty());
            }

            // ==================================================================
            // Contract
            // ==================================================================

            #[tokio::test]
            async fn test_discount_scenario() {
                init_tracing();
                let service = DealsService::new($seeded(discount_scenario_deals()).await);
                let criteria = FilterCriteria::new(1)
                    .with_percent_min(20.0)
                    .with_price_from(0.0)
                    .with_price_to(0.0);

                let deals = service
                    .list_by_category(
                        &criteria,
                        Page::new(0, 10),
                        Some(SortField::Price),
                        SortDirection::Asc,
                    )
                    .await
                    .unwrap();

                assert_eq!(ids(&deals), vec!["a"]);
                assert_eq!(deals[0].percent, Some(-30.0));
                assert_eq!(deals[0].price_new, Some(50.0));
            }

            #[tokio::test]
            async fn test_repeated_queries_are_identical() {
                let service = service().await;
                let criteria = FilterCriteria::new(1).with_price_to(100.0);

                let first = service
                    .list_by_category(&criteria, Page::new(0, 5), Some(SortField::Name), SortDirection::Asc)
                    .await
                    .unwrap();
                let second = service
                    .list_by_category(&criteria, Page::new(0, 5), Some(SortField::Name), SortDirection::Asc)
                    .await
                    .unwrap();

                assert_eq!(first, second);
                assert_eq!(ids(&first), vec!["d1", "d2"]);
            }

            #[tokio::test]
            async fn test_negative_skip_is_an_error() {
                let service = service().await;
                let result = service
                    .list_by_category(
                        &FilterCriteria::new(1),
                        Page::new(-1, 10),
                        None,
                        SortDirection::Desc,
                    )
                    .await;

                assert!(result.is_err(), "A negative skip should be rejected");
            }
        }
    };
}
