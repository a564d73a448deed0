//! In-memory implementation of DealStore for testing and development

use crate::config::DealsConfig;
use crate::core::deal::Deal;
use crate::core::error::StorageError;
use crate::core::field::FieldValue;
use crate::core::query::SortDirection;
use crate::core::store::{DealQuery, DealStore};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::{Arc, RwLock};

const BACKEND: &str = "in-memory";

/// In-memory deal store
///
/// Evaluates predicates the way the document store does for the subset of
/// operators deal queries use. Free-text search matches a record when any
/// search term equals, ignoring case, a word of one of the text fields;
/// terms prefixed with `-` exclude records containing them.
#[derive(Clone)]
pub struct InMemoryDealStore {
    deals: Arc<RwLock<Vec<Deal>>>,
    text_fields: Arc<Vec<String>>,
}

impl InMemoryDealStore {
    /// Create an empty store searching the `name` field
    pub fn new() -> Self {
        Self {
            deals: Arc::new(RwLock::new(Vec::new())),
            text_fields: Arc::new(vec!["name".to_string()]),
        }
    }

    /// Create an empty store using the configured text fields
    pub fn from_config(config: &DealsConfig) -> Self {
        Self::new().with_text_fields(config.text_fields.clone())
    }

    /// Create a store holding `deals`
    pub fn with_deals(deals: impl IntoIterator<Item = Deal>) -> Self {
        Self {
            deals: Arc::new(RwLock::new(deals.into_iter().collect())),
            ..Self::new()
        }
    }

    pub fn with_text_fields(mut self, text_fields: Vec<String>) -> Self {
        self.text_fields = Arc::new(text_fields);
        self
    }

    /// Append deals, in the order they should be returned when unsorted
    pub fn insert(&self, deals: impl IntoIterator<Item = Deal>) -> Result<()> {
        let mut guard = self
            .deals
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        guard.extend(deals);
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        let guard = self
            .deals
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(guard.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn matches_text(&self, deal: &Deal, search: &str) -> bool {
        let words: Vec<String> = self
            .text_fields
            .iter()
            .filter_map(|field| deal.field_value(field))
            .filter_map(|value| value.as_string().map(str::to_lowercase))
            .flat_map(|text| tokenize(&text).collect::<Vec<_>>())
            .collect();

        let mut matched = false;
        for term in search.split_whitespace() {
            if let Some(excluded) = term.strip_prefix('-') {
                if tokenize(&excluded.to_lowercase()).any(|t| words.contains(&t)) {
                    return false;
                }
            } else if tokenize(&term.to_lowercase()).any(|t| words.contains(&t)) {
                matched = true;
            }
        }
        matched
    }
}

impl Default for InMemoryDealStore {
    fn default() -> Self {
        Self::new()
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Missing values order before present ones, as in the document store
fn compare_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.compare(b).unwrap_or(Ordering::Equal),
    }
}

#[async_trait]
impl DealStore for InMemoryDealStore {
    async fn find(&self, query: &DealQuery) -> Result<Vec<Deal>> {
        let skip = usize::try_from(query.skip).map_err(|_| StorageError::QueryError {
            backend: BACKEND.to_string(),
            message: format!("skip value must be non-negative, got {}", query.skip),
        })?;

        tracing::debug!(
            backend = BACKEND,
            predicate = %query.predicate.to_json(),
            sort = %query.sort.to_json(),
            skip = query.skip,
            limit = query.limit,
            "Executing deals query"
        );

        let deals = self
            .deals
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut matched: Vec<Deal> = deals
            .iter()
            .filter(|deal| query.predicate.matches_conditions(deal))
            .filter(|deal| {
                query
                    .predicate
                    .text_search()
                    .is_none_or(|search| self.matches_text(deal, search))
            })
            .cloned()
            .collect();
        drop(deals);

        if let Some((key, direction)) = query.sort.key() {
            matched.sort_by(|a, b| {
                let ordering =
                    compare_values(a.field_value(key).as_ref(), b.field_value(key).as_ref());
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let limit = match query.limit.unsigned_abs() {
            0 => usize::MAX,
            n => usize::try_from(n).unwrap_or(usize::MAX),
        };

        let page: Vec<Deal> = matched.into_iter().skip(skip).take(limit).collect();
        tracing::debug!(backend = BACKEND, count = page.len(), "Deals query returned");
        Ok(page)
    }
}
