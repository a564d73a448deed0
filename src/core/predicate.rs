//! Query predicates over deals
//!
//! A [`Predicate`] is the filter handed to a [`DealStore`](crate::core::store::DealStore).
//! It is built fresh for every call from a [`FilterCriteria`] and renders to the
//! document-database filter vocabulary:
//!
//! ```text
//! { "category": 1, "percent": { "$lte": -20 }, "priceNew": { "$gte": 10, "$lte": 50 } }
//! { "$text": { "$search": "coffee" }, "percent": { "$lte": -20 } }
//! ```
//!
//! # Contracts
//!
//! Two conventions shape every predicate and change which deals are returned:
//!
//! - **Text search replaces category browsing.** A non-empty query string
//!   produces a `$text` clause and *no* `category` clause, whatever category
//!   was passed. The two never combine.
//! - **Zero means unset.** A numeric bound of `0` (or `NaN`, infinite, or
//!   absent) adds no clause at all. There is no way to ask for "exactly 0%
//!   off" or "costs at least 0".
//!
//! Discounts are stored as negative percentages, so a positive minimum
//! discount is negated: `percent_min = 20` becomes `percent <= -20`.

use crate::core::deal::{Deal, fields};
use crate::core::field::FieldValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::cmp::Ordering;

/// Filter inputs for a single deals query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Category to browse; ignored when a search query is present
    #[serde(default)]
    pub category: i64,

    /// Free-text search over the store's text index
    #[serde(default)]
    pub query: Option<String>,

    /// Minimum discount, in either sign convention (20 and -20 are equivalent)
    #[serde(default)]
    pub percent_min: Option<f64>,

    /// Lower bound on the current price
    #[serde(default)]
    pub price_from: Option<f64>,

    /// Upper bound on the current price
    #[serde(default)]
    pub price_to: Option<f64>,
}

impl FilterCriteria {
    pub fn new(category: i64) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_percent_min(mut self, percent_min: f64) -> Self {
        self.percent_min = Some(percent_min);
        self
    }

    pub fn with_price_from(mut self, price_from: f64) -> Self {
        self.price_from = Some(price_from);
        self
    }

    pub fn with_price_to(mut self, price_to: f64) -> Self {
        self.price_to = Some(price_to);
        self
    }

    /// The search text, if one was given and is not empty
    pub fn search_text(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }
}

/// A comparison applied to one field
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `field == value`
    Equals(FieldValue),

    /// `gte <= field <= lte`, either bound optional
    Range { gte: Option<f64>, lte: Option<f64> },
}

impl Condition {
    fn to_json(&self) -> Value {
        match self {
            Condition::Equals(value) => value.to_json(),
            Condition::Range { gte, lte } => {
                let mut range = Map::new();
                if let Some(gte) = gte {
                    range.insert("$gte".to_string(), json!(gte));
                }
                if let Some(lte) = lte {
                    range.insert("$lte".to_string(), json!(lte));
                }
                Value::Object(range)
            }
        }
    }

    /// Evaluate against a field value read from a deal
    ///
    /// A missing field never satisfies a condition.
    pub fn matches(&self, actual: Option<&FieldValue>) -> bool {
        let Some(actual) = actual else {
            return false;
        };

        match self {
            Condition::Equals(expected) => actual.compare(expected) == Some(Ordering::Equal),
            Condition::Range { gte, lte } => {
                let above = gte.is_none_or(|bound| {
                    matches!(
                        actual.compare(&FieldValue::Float(bound)),
                        Some(Ordering::Greater | Ordering::Equal)
                    )
                });
                let below = lte.is_none_or(|bound| {
                    matches!(
                        actual.compare(&FieldValue::Float(bound)),
                        Some(Ordering::Less | Ordering::Equal)
                    )
                });
                above && below
            }
        }
    }
}

/// Filter for a deals query: an optional text search plus per-field conditions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    text: Option<String>,
    conditions: IndexMap<String, Condition>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the predicate for one query
    ///
    /// See the module docs for the category/text and zero-means-unset rules.
    pub fn build(
        category: i64,
        query: Option<&str>,
        percent_min: Option<f64>,
        price_from: Option<f64>,
        price_to: Option<f64>,
    ) -> Self {
        let mut predicate = Self::new();

        match query.filter(|q| !q.is_empty()) {
            Some(query) => predicate.set_text_search(query),
            None => predicate.set_equals(fields::CATEGORY, FieldValue::Integer(category)),
        }

        if let Some(percent_min) = truthy(percent_min) {
            predicate.set_at_most(fields::PERCENT, as_discount(percent_min));
        }
        if let Some(price_from) = truthy(price_from) {
            predicate.set_at_least(fields::PRICE_NEW, price_from);
        }
        if let Some(price_to) = truthy(price_to) {
            predicate.set_at_most(fields::PRICE_NEW, price_to);
        }

        predicate
    }

    /// Replace any text search with `query`
    pub fn set_text_search(&mut self, query: impl Into<String>) {
        self.text = Some(query.into());
    }

    /// Require `field == value`, replacing any existing condition on `field`
    pub fn set_equals(&mut self, field: impl Into<String>, value: FieldValue) {
        self.conditions
            .insert(field.into(), Condition::Equals(value));
    }

    /// Require `field >= bound`, merging into an existing range on `field`
    pub fn set_at_least(&mut self, field: impl Into<String>, bound: f64) {
        let field = field.into();
        let (_, lte) = self.bounds(&field);
        self.conditions.insert(
            field,
            Condition::Range {
                gte: Some(bound),
                lte,
            },
        );
    }

    /// Require `field <= bound`, merging into an existing range on `field`
    pub fn set_at_most(&mut self, field: impl Into<String>, bound: f64) {
        let field = field.into();
        let (gte, _) = self.bounds(&field);
        self.conditions.insert(
            field,
            Condition::Range {
                gte,
                lte: Some(bound),
            },
        );
    }

    fn bounds(&self, field: &str) -> (Option<f64>, Option<f64>) {
        match self.conditions.get(field) {
            Some(Condition::Range { gte, lte }) => (*gte, *lte),
            _ => (None, None),
        }
    }

    /// The text search, if this predicate has one
    pub fn text_search(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The condition on `field`, if any
    pub fn condition(&self, field: &str) -> Option<&Condition> {
        self.conditions.get(field)
    }

    /// All field conditions in insertion order
    pub fn conditions(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.conditions.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.conditions.is_empty()
    }

    /// Check the field conditions against a deal
    ///
    /// The text search is not evaluated here; matching text depends on which
    /// fields the store has indexed.
    pub fn matches_conditions(&self, deal: &Deal) -> bool {
        self.conditions
            .iter()
            .all(|(field, condition)| condition.matches(deal.field_value(field).as_ref()))
    }

    /// Render in the document-database filter vocabulary
    pub fn to_json(&self) -> Value {
        let mut filter = Map::new();
        if let Some(text) = &self.text {
            filter.insert("$text".to_string(), json!({ "$search": text }));
        }
        for (field, condition) in &self.conditions {
            filter.insert(field.clone(), condition.to_json());
        }
        Value::Object(filter)
    }
}

/// Build the predicate for `criteria`
pub fn build_predicate(criteria: &FilterCriteria) -> Predicate {
    Predicate::build(
        criteria.category,
        criteria.query.as_deref(),
        criteria.percent_min,
        criteria.price_from,
        criteria.price_to,
    )
}

/// Zero, NaN, infinite and absent values all mean "no filter"
///
/// JSON has no infinity, so an infinite bound would reach the store as `null`.
fn truthy(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && v.is_finite())
}

/// Discounts are stored negative; flip a positive minimum into a ceiling
fn as_discount(percent_min: f64) -> f64 {
    if percent_min > 0.0 {
        -percent_min
    } else {
        percent_min
    }
}
