//! Relevance scoring and query filtering.
//!
//! Defines:
//! - `ScoredMatch`, a product paired with its score for one query
//! - `relevance_score` implementing the banded policy
//! - `filter_products` to score and keep matching products

use crate::distance::within;
use crate::normalize::normalize;
use crate::product::Product;
use serde::Serialize;

/// Edit-distance cap for fuzzy name and token matches.
pub const FUZZY_CAP: usize = 3;

const PREFIX_BASE: i64 = 1000;
const CONTAINS_BASE: i64 = 900;
const TOKEN_BASE: i64 = 800;
const TOKEN_EDIT_PENALTY: i64 = 50;
const HAYSTACK_SCORE: i64 = 600;
const NAME_FUZZY_BASE: i64 = 500;
const NAME_EDIT_PENALTY: i64 = 80;

/// A product with its score for the current query.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredMatch {
    pub product: Product,
    pub score: u32,
}

/// Normalized searchable fields of one product.
struct Fields {
    name: String,
    brand: String,
    category: String,
}

impl Fields {
    fn of(product: &Product) -> Self {
        Fields {
            name: normalize(&product.name),
            brand: normalize(&product.brand),
            category: normalize(&product.category),
        }
    }

    /// Space-joined non-empty fields.
    fn haystack(&self) -> String {
        [&self.name, &self.brand, &self.category]
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn any_contains(&self, q: &str) -> bool {
        self.name.contains(q) || self.brand.contains(q) || self.category.contains(q)
    }
}

pub(crate) fn char_len(s: &str) -> i64 {
    s.chars().count() as i64
}

/// Char index of the first occurrence of `needle`.
pub(crate) fn char_index(haystack: &str, needle: &str) -> Option<i64> {
    haystack
        .find(needle)
        .map(|byte| char_len(&haystack[..byte]))
}

/// Score `product` against an already-normalized, non-empty query.
///
/// Bands, first hit wins: prefix 1000, substring 900, fuzzy token 800,
/// name/brand/category substring 600, fuzzy whole name 500, else 0.
pub fn relevance_score(product: &Product, q: &str) -> u32 {
    if q.is_empty() {
        return 0;
    }
    score_fields(&Fields::of(product), q)
}

fn score_fields(fields: &Fields, q: &str) -> u32 {
    let name = fields.name.as_str();
    let q_len = char_len(q);

    let raw = if name.starts_with(q) {
        PREFIX_BASE - (char_len(name) - q_len)
    } else if let Some(idx) = char_index(name, q) {
        CONTAINS_BASE - idx
    } else if let Some(best) = best_token_score(name, q) {
        best
    } else if fields.haystack().contains(q) {
        HAYSTACK_SCORE
    } else if let Some(d) = within(name, q, FUZZY_CAP) {
        NAME_FUZZY_BASE - d as i64 * NAME_EDIT_PENALTY
    } else {
        0
    };

    raw.clamp(0, u32::MAX as i64) as u32
}

/// Best fuzzy score over whitespace tokens of the name, if any token is close.
fn best_token_score(name: &str, q: &str) -> Option<i64> {
    let q_len = char_len(q);
    name.split_whitespace()
        .filter_map(|token| {
            within(token, q, FUZZY_CAP).map(|d| {
                TOKEN_BASE - d as i64 * TOKEN_EDIT_PENALTY - (char_len(token) - q_len).abs()
            })
        })
        .max()
}

/// Score every product and keep the ones that match `query`.
///
/// The query is normalized here. An empty query keeps everything with score 0
/// in input order.
pub fn filter_products(products: &[Product], query: &str) -> Vec<ScoredMatch> {
    let q = normalize(query);
    if q.is_empty() {
        return products
            .iter()
            .map(|product| ScoredMatch {
                product: product.clone(),
                score: 0,
            })
            .collect();
    }

    products
        .iter()
        .filter_map(|product| {
            let fields = Fields::of(product);
            let score = score_fields(&fields, &q);
            (score > 0 || fields.any_contains(&q)).then(|| ScoredMatch {
                product: product.clone(),
                score,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drill_catalog() -> Vec<Product> {
        vec![
            Product::new("1", "Cordless Drill").with_brand("Acme"),
            Product::new("2", "Drill Bit Set").with_brand("Bosch"),
            Product::new("3", "Hammer").with_brand("Acme"),
        ]
    }

    #[test]
    fn prefix_band() {
        let p = Product::new("2", "Drill Bit Set");
        assert_eq!(relevance_score(&p, "dril"), 1000 - (13 - 4));
    }

    #[test]
    fn substring_band_uses_first_index() {
        let p = Product::new("1", "Cordless Drill");
        assert_eq!(relevance_score(&p, "dril"), 900 - 9);
    }

    #[test]
    fn token_band_takes_closest_token() {
        // "drils" vs token "drill" is one edit, same length
        let p = Product::new("1", "Cordless Drill");
        assert_eq!(relevance_score(&p, "drils"), 800 - 50);
    }

    #[test]
    fn haystack_band_hits_brand_and_category() {
        let p = Product::new("1", "Hammer")
            .with_brand("Stanley")
            .with_category("Hand Tools");
        assert_eq!(relevance_score(&p, "stanley"), 600);
        assert_eq!(relevance_score(&p, "hand tools"), 600);
    }

    #[test]
    fn whole_name_fuzzy_band() {
        // no single token is within 3 edits but the whole name is
        let p = Product::new("1", "Tile Saw");
        assert_eq!(relevance_score(&p, "tilessaw"), 500 - 80);
    }

    #[test]
    fn unrelated_scores_zero() {
        let p = Product::new("1", "Hammer").with_brand("Acme");
        assert_eq!(relevance_score(&p, "screwdriver"), 0);
    }

    #[test]
    fn diacritics_do_not_matter() {
        let p = Product::new("1", "Crème Brûlée Torch");
        assert_eq!(relevance_score(&p, "creme"), 1000 - (18 - 5));
    }

    #[test]
    fn filter_keeps_drills_and_drops_hammer() {
        let kept = filter_products(&drill_catalog(), "Dril");
        let ids: Vec<_> = kept.iter().map(|m| m.product.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(kept[0].score, 891);
        assert_eq!(kept[1].score, 991);
    }

    #[test]
    fn empty_query_keeps_everything_unscored() {
        let kept = filter_products(&drill_catalog(), "   ");
        assert_eq!(kept.len(), 3);
        assert!(kept.iter().all(|m| m.score == 0));
    }

    #[test]
    fn very_long_prefix_name_clamps_but_stays() {
        let long = format!("drill {}", "x".repeat(2000));
        let kept = filter_products(&[Product::new("1", long)], "drill");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].score, 0);
    }
}
