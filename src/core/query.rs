//! Sorting, pagination and query-string parameters

use crate::core::deal::fields;
use crate::core::error::{DealsError, ValidationError};
use crate::core::predicate::FilterCriteria;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Deal attribute to order results by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Price,
    Percent,
    Name,
    Date,
}

impl SortField {
    /// Storage attribute this field sorts on
    ///
    /// The public `price` key addresses the stored `priceNew` attribute.
    pub fn storage_key(self) -> &'static str {
        match self {
            SortField::Price => fields::PRICE_NEW,
            SortField::Percent => fields::PERCENT,
            SortField::Name => fields::NAME,
            SortField::Date => fields::DATE,
        }
    }

    /// Lenient parse for request parameters: unknown names mean "no sort"
    pub fn from_param(value: &str) -> Option<Self> {
        value.parse().ok()
    }

    fn as_str(self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::Percent => "percent",
            SortField::Name => "name",
            SortField::Date => "date",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = DealsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(SortField::Price),
            "percent" => Ok(SortField::Percent),
            "name" => Ok(SortField::Name),
            "date" => Ok(SortField::Date),
            other => Err(ValidationError::UnknownSortField {
                value: other.to_string(),
            }
            .into()),
        }
    }
}

/// Ordering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// The store's order marker: 1 ascending, -1 descending
    pub fn marker(self) -> i32 {
        match self {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        }
    }

    /// Lenient parse for request parameters: anything but `asc` is descending
    pub fn from_param(value: &str) -> Self {
        if value == "asc" {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = DealsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(ValidationError::UnknownSortDirection {
                value: other.to_string(),
            }
            .into()),
        }
    }
}

/// Sort specification handed to the store: at most one key and its order
///
/// An empty spec leaves ordering to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    key: Option<(&'static str, SortDirection)>,
}

impl SortSpec {
    /// A spec that leaves ordering to the store
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self {
            key: Some((field.storage_key(), direction)),
        }
    }

    /// Storage key and direction, if any
    pub fn key(&self) -> Option<(&'static str, SortDirection)> {
        self.key
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_none()
    }

    /// Render as `{ key: 1 | -1 }`, or `{}` when unsorted
    pub fn to_json(&self) -> Value {
        let mut spec = Map::new();
        if let Some((key, direction)) = self.key {
            spec.insert(key.to_string(), Value::from(direction.marker()));
        }
        Value::Object(spec)
    }
}

/// Build the sort specification for a field and direction
///
/// A missing field yields an empty spec.
pub fn build_sort_spec(field: Option<SortField>, direction: SortDirection) -> SortSpec {
    match field {
        Some(field) => SortSpec::new(field, direction),
        None => SortSpec::unsorted(),
    }
}

/// Pagination window: records to skip and maximum to return
///
/// Values are passed to the store as given; a negative or zero value is
/// interpreted by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub start: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(start: i64, limit: i64) -> Self {
        Self { start, limit }
    }
}

/// Query-string parameters for browsing and searching deals
///
/// # Example
/// ```text
/// GET /deals/3?start=20&limit=10&percentMin=25&sortField=price&sortDirection=asc
/// GET /deals/3/search?query=coffee&priceTo=50
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealQueryParams {
    /// Number of deals to skip
    #[serde(default)]
    pub start: i64,

    /// Maximum number of deals to return
    #[serde(default = "default_limit")]
    pub limit: i64,

    pub query: Option<String>,

    pub percent_min: Option<f64>,

    pub price_from: Option<f64>,

    pub price_to: Option<f64>,

    /// One of `price`, `percent`, `name`, `date`; anything else leaves results unsorted
    pub sort_field: Option<String>,

    /// `asc` or `desc`; anything else is treated as `desc`
    pub sort_direction: Option<String>,
}

fn default_limit() -> i64 {
    20
}

impl Default for DealQueryParams {
    fn default() -> Self {
        Self {
            start: 0,
            limit: default_limit(),
            query: None,
            percent_min: None,
            price_from: None,
            price_to: None,
            sort_field: None,
            sort_direction: None,
        }
    }
}

impl DealQueryParams {
    pub fn page(&self) -> Page {
        Page::new(self.start, self.limit)
    }

    /// Filter criteria for `category` using these parameters
    pub fn criteria(&self, category: i64) -> FilterCriteria {
        FilterCriteria {
            category,
            query: self.query.clone(),
            percent_min: self.percent_min,
            price_from: self.price_from,
            price_to: self.price_to,
        }
    }

    pub fn sort_field(&self) -> Option<SortField> {
        self.sort_field.as_deref().and_then(SortField::from_param)
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
            .as_deref()
            .map(SortDirection::from_param)
            .unwrap_or_default()
    }

    pub fn sort_spec(&self) -> SortSpec {
        build_sort_spec(self.sort_field(), self.sort_direction())
    }
}
