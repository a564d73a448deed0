//! The deal record as read from the store

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Storage attribute names queried and sorted on
pub mod fields {
    pub const CATEGORY: &str = "category";
    pub const NAME: &str = "name";
    pub const DATE: &str = "date";
    pub const PERCENT: &str = "percent";
    pub const PRICE_NEW: &str = "priceNew";
}

/// A discounted product as stored in the deals collection
///
/// Deals are owned by the store. This crate only reads them, so every
/// attribute the store returns beyond the ones queried here is kept in
/// `extra` and serialized back out unchanged.
///
/// `percent` is a signed discount: 20% off is stored as `-20`. Documents
/// written by other clients may lack `percent` or `priceNew`, and may store
/// `category` as an integral double; those still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(deserialize_with = "integral")]
    pub category: i64,

    pub name: String,

    pub date: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_new: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Deal {
    pub fn new(
        category: i64,
        name: impl Into<String>,
        date: DateTime<Utc>,
        percent: f64,
        price_new: f64,
    ) -> Self {
        Self {
            id: None,
            category,
            name: name.into(),
            date,
            percent: Some(percent),
            price_new: Some(price_new),
            extra: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Read an attribute by its storage name
    ///
    /// Known attributes use their typed value; anything else is looked up in
    /// `extra`. Returns `None` when the attribute is absent.
    pub fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => self.id.clone().map(FieldValue::String),
            fields::CATEGORY => Some(FieldValue::Integer(self.category)),
            fields::NAME => Some(FieldValue::String(self.name.clone())),
            fields::DATE => Some(FieldValue::DateTime(self.date)),
            fields::PERCENT => self.percent.map(FieldValue::Float),
            fields::PRICE_NEW => self.price_new.map(FieldValue::Float),
            other => self.extra.get(other).and_then(FieldValue::from_json),
        }
    }
}

/// Accept `3` as well as `3.0`, but not `3.5`
fn integral<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(f as i64)
        }
        _ => Err(D::Error::custom(format!("expected an integer, got {}", number))),
    }
}
