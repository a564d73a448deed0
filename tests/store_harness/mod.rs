//! Shared test harness for deal store testing
//!
//! Provides a fixed catalogue of sample deals, a tracing initializer, and
//! the `deal_store_tests!` conformance suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//! use store_harness::*;
//!
//! deal_store_tests!(seeded_store);
//! ```

#![allow(dead_code)]

#[macro_use]
mod deal_store_tests;

use chrono::{DateTime, TimeZone, Utc};
use deals::core::deal::Deal;

// ---------------------------------------------------------------------------
// Sample catalogue
// ---------------------------------------------------------------------------

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 8, 0, 0).unwrap()
}

/// Five deals across two categories with distinct prices, discounts and dates.
///
/// | id | category | name                | date       | percent | priceNew |
/// |----|----------|---------------------|------------|---------|----------|
/// | d1 | 1        | Espresso machine    | 2024-03-01 | -30     | 50       |
/// | d2 | 1        | Milk frother        | 2024-03-05 | -10     | 80       |
/// | d3 | 1        | Coffee grinder burr | 2024-02-20 | -45     | 120      |
/// | d4 | 2        | Coffee beans        | 2024-03-10 | -5      | 18       |
/// | d5 | 2        | Espresso cups       | 2024-01-15 | -25     | 24       |
pub fn sample_deals() -> Vec<Deal> {
    vec![
        Deal::new(1, "Espresso machine", day(2024, 3, 1), -30.0, 50.0).with_id("d1"),
        Deal::new(1, "Milk frother", day(2024, 3, 5), -10.0, 80.0).with_id("d2"),
        Deal::new(1, "Coffee grinder burr", day(2024, 2, 20), -45.0, 120.0).with_id("d3"),
        Deal::new(2, "Coffee beans", day(2024, 3, 10), -5.0, 18.0).with_id("d4"),
        Deal::new(2, "Espresso cups", day(2024, 1, 15), -25.0, 24.0).with_id("d5"),
    ]
}

/// The two-deal catalogue of the browse-with-discount scenario.
pub fn discount_scenario_deals() -> Vec<Deal> {
    vec![
        Deal::new(1, "Deep discount", day(2024, 4, 1), -30.0, 50.0).with_id("a"),
        Deal::new(1, "Shallow discount", day(2024, 4, 2), -10.0, 80.0).with_id("b"),
    ]
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Install a test-friendly tracing subscriber (once per test binary).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Ids of `deals`, in result order.
pub fn ids(deals: &[Deal]) -> Vec<String> {
    deals
        .iter()
        .map(|d| d.id.clone().unwrap_or_default())
        .collect()
}

/// Ids of `deals`, sorted, for order-independent comparisons.
pub fn sorted_ids(deals: &[Deal]) -> Vec<String> {
    let mut ids = ids(deals);
    ids.sort();
    ids
}
