//! Result ordering.
//!
//! Only `Relevance` looks at scores; every other mode orders purely by a
//! product field. All sorts are stable so equal keys keep their input order.

use crate::product::{cmp_f64, numeric_key};
use crate::search::ScoredMatch;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    Rating,
    Newest,
}

impl SortMode {
    pub fn name(&self) -> &'static str {
        match self {
            SortMode::Relevance => "relevance",
            SortMode::PriceAsc => "price_asc",
            SortMode::PriceDesc => "price_desc",
            SortMode::Rating => "rating",
            SortMode::Newest => "newest",
        }
    }

    /// Parse a mode name, falling back to relevance for anything unknown.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            log::warn!("Unknown sort mode {:?}, using relevance", s);
            SortMode::Relevance
        })
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sort mode '{0}'")]
pub struct UnknownSortMode(pub String);

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "relevance" => Ok(SortMode::Relevance),
            "price_asc" => Ok(SortMode::PriceAsc),
            "price_desc" => Ok(SortMode::PriceDesc),
            "rating" => Ok(SortMode::Rating),
            "newest" => Ok(SortMode::Newest),
            other => Err(UnknownSortMode(other.to_string())),
        }
    }
}

/// Stable in-place sort of scored matches by `mode`.
pub fn sort_matches(matches: &mut [ScoredMatch], mode: SortMode) {
    match mode {
        SortMode::Relevance => matches.sort_by(|a, b| b.score.cmp(&a.score)),
        SortMode::PriceAsc => matches.sort_by(|a, b| {
            cmp_f64(
                numeric_key(a.product.price, f64::INFINITY),
                numeric_key(b.product.price, f64::INFINITY),
            )
        }),
        SortMode::PriceDesc => matches.sort_by(|a, b| {
            cmp_f64(
                numeric_key(b.product.price, f64::NEG_INFINITY),
                numeric_key(a.product.price, f64::NEG_INFINITY),
            )
        }),
        SortMode::Rating => matches.sort_by(|a, b| {
            cmp_f64(
                numeric_key(b.product.rating, 0.0),
                numeric_key(a.product.rating, 0.0),
            )
        }),
        // Recency keys allocate for labels, so compute them once.
        SortMode::Newest => {
            matches.sort_by_cached_key(|m| std::cmp::Reverse(m.product.recency()))
        }
    }
}
