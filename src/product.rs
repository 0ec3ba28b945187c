//! Catalog record types.
//!
//! Defines:
//! - `Product`, the normalized catalog record the ranker works on
//! - `CreatedAt`, the creation token carried by a record
//! - `Recency`, the total order used for "newest" and brand representatives

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single catalog entry after loader defaults have been applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: Option<f64>,
    pub rating: Option<f64>,
    pub created_at: Option<CreatedAt>,
    pub sku: Option<String>,
    pub tags: Vec<String>,
}

impl Product {
    /// Bare product with only identity and name, everything else neutral.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            brand: String::new(),
            category: String::new(),
            price: None,
            rating: None,
            created_at: None,
            sku: None,
            tags: Vec::new(),
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_created_at(mut self, created_at: CreatedAt) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// `createdAt` when present, otherwise the id.
    pub fn recency(&self) -> Recency {
        match &self.created_at {
            Some(CreatedAt::Instant(ms)) => Recency::Instant(*ms),
            Some(CreatedAt::Label(label)) => Recency::Label(label.clone()),
            None => Recency::from_token(&self.id),
        }
    }
}

/// Creation token as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreatedAt {
    /// Milliseconds since the Unix epoch.
    Instant(i64),
    /// Anything that is neither a number nor an RFC 3339 date.
    Label(String),
}

impl CreatedAt {
    /// Interpret a string token: integer millis, RFC 3339 date, or opaque label.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if let Ok(ms) = token.parse::<i64>() {
            return CreatedAt::Instant(ms);
        }
        match DateTime::parse_from_rfc3339(token) {
            Ok(dt) => CreatedAt::Instant(dt.timestamp_millis()),
            Err(_) => CreatedAt::Label(token.to_string()),
        }
    }
}

/// Total order over `createdAt`-or-`id` tokens.
///
/// Every label ranks below every instant. Instants compare numerically,
/// labels lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Recency {
    Label(String),
    Instant(i64),
}

impl Recency {
    /// Ids fall back here: numeric ids (server-assigned `Date.now()` values)
    /// become instants.
    pub fn from_token(token: &str) -> Self {
        match token.trim().parse::<i64>() {
            Ok(n) => Recency::Instant(n),
            Err(_) => Recency::Label(token.to_string()),
        }
    }
}

/// Ordering key for an optional number, `missing` standing in for `None`.
pub(crate) fn numeric_key(value: Option<f64>, missing: f64) -> f64 {
    value.filter(|v| !v.is_nan()).unwrap_or(missing)
}

pub(crate) fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}
