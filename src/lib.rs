//! # Deals Query
//!
//! Browse and search a collection of discounted products ("deals") held in a
//! document database, filtered by category, discount and price, with
//! pagination and sorting.
//!
//! ## Features
//!
//! - **Category browsing**: list the deals of one category
//! - **Free-text search**: query the store's text index instead of a category
//! - **Discount and price filters**: minimum discount, price bounds
//! - **Sorting**: by price, discount, name or date, ascending or descending
//! - **Pluggable stores**: in-memory (default) and MongoDB (`mongodb_backend`)
//!
//! ## Query conventions
//!
//! - Text search and category browsing never combine: a non-empty query
//!   string drops the category filter.
//! - Zero-valued bounds mean "no filter".
//! - Discounts are stored negative, so a minimum discount of `20` matches
//!   deals with `percent <= -20`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use deals::prelude::*;
//!
//! let store = InMemoryDealStore::with_deals(deals);
//! let service = DealsService::new(store);
//!
//! // Category 1, at least 20% off, cheapest first
//! let criteria = FilterCriteria::new(1).with_percent_min(20.0);
//! let page = service
//!     .list_by_category(&criteria, Page::new(0, 10), Some(SortField::Price), SortDirection::Asc)
//!     .await?;
//!
//! // Text search; the category is ignored
//! let found = service
//!     .search_by_text(&criteria.with_query("espresso"), Page::new(0, 10), None, SortDirection::Desc)
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod deals;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        deal::Deal,
        error::{ConfigError, DealsError, DealsResult, StorageError, ValidationError},
        field::FieldValue,
        predicate::{Condition, FilterCriteria, Predicate, build_predicate},
        query::{DealQueryParams, Page, SortDirection, SortField, SortSpec, build_sort_spec},
        store::{DealQuery, DealStore},
    };

    // === Service ===
    pub use crate::deals::DealsService;

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryDealStore;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoDealStore;

    // === Config ===
    pub use crate::config::{DealsConfig, MongoConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
}
