//! Brand autocomplete.
//!
//! Products are grouped by normalized brand; each group becomes one
//! suggestion carrying the first-seen label, the item count and the most
//! recent product as its representative.

use crate::distance::within;
use crate::normalize::normalize;
use crate::product::{Product, Recency};
use crate::search::{char_index, char_len, FUZZY_CAP};
use serde::Serialize;
use std::collections::HashMap;

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 8;

const BRAND_EDIT_PENALTY: i64 = 60;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandSuggestion {
    /// Most recent product carrying this brand.
    pub representative_id: String,
    pub label: String,
    pub item_count: usize,
    pub score: u32,
}

impl BrandSuggestion {
    /// Secondary line such as "1 item" or "3 items".
    pub fn sub(&self) -> String {
        let plural = if self.item_count > 1 { "s" } else { "" };
        format!("{} item{}", self.item_count, plural)
    }
}

struct BrandGroup {
    label: String,
    count: usize,
    representative_id: String,
    recency: Recency,
}

/// Rank brands in `products` against `query`.
pub fn brand_suggestions(products: &[Product], query: &str) -> Vec<BrandSuggestion> {
    let q = normalize(query);
    if q.is_empty() {
        return Vec::new();
    }

    // First-seen order of keys keeps equal scores in input order.
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, BrandGroup> = HashMap::new();

    for product in products {
        let label = product.brand.trim();
        if label.is_empty() {
            continue;
        }
        let key = normalize(label);
        if key.is_empty() {
            continue;
        }

        let recency = product.recency();
        match groups.get_mut(&key) {
            Some(group) => {
                group.count += 1;
                if group.recency < recency {
                    group.recency = recency;
                    group.representative_id = product.id.clone();
                }
            }
            None => {
                order.push(key.clone());
                groups.insert(
                    key,
                    BrandGroup {
                        label: label.to_string(),
                        count: 1,
                        representative_id: product.id.clone(),
                        recency,
                    },
                );
            }
        }
    }

    let mut suggestions: Vec<BrandSuggestion> = order
        .into_iter()
        .filter_map(|key| {
            let score = brand_score(&key, &q);
            let group = groups.remove(&key)?;
            (score > 0).then(|| BrandSuggestion {
                representative_id: group.representative_id,
                label: group.label,
                item_count: group.count,
                score,
            })
        })
        .collect();

    suggestions.sort_by(|a, b| b.score.cmp(&a.score));
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

/// Prefix 1000, substring 900, fuzzy 800, else 0.
fn brand_score(key: &str, q: &str) -> u32 {
    let q_len = char_len(q);
    let key_len = char_len(key);

    let raw = if key.starts_with(q) {
        1000 - (key_len - q_len)
    } else if let Some(idx) = char_index(key, q) {
        900 - idx
    } else if let Some(d) = within(key, q, FUZZY_CAP) {
        800 - d as i64 * BRAND_EDIT_PENALTY - (key_len - q_len).abs()
    } else {
        0
    };

    raw.clamp(0, u32::MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::CreatedAt;

    #[test]
    fn groups_case_insensitively_with_first_label() {
        let products = vec![
            Product::new("1", "Drill").with_brand("Acme"),
            Product::new("2", "Saw").with_brand("acme"),
            Product::new("3", "Sander").with_brand("BOSCH"),
        ];
        let s = brand_suggestions(&products, "ac");
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].label, "Acme");
        assert_eq!(s[0].item_count, 2);
        assert_eq!(s[0].score, 1000 - 2);
        assert_eq!(s[0].sub(), "2 items");
    }

    #[test]
    fn representative_is_most_recent() {
        let products = vec![
            Product::new("old", "A")
                .with_brand("Makita")
                .with_created_at(CreatedAt::Instant(10)),
            Product::new("new", "B")
                .with_brand("Makita")
                .with_created_at(CreatedAt::Instant(20)),
            Product::new("older", "C")
                .with_brand("makita")
                .with_created_at(CreatedAt::Instant(5)),
        ];
        let s = brand_suggestions(&products, "mak");
        assert_eq!(s[0].representative_id, "new");
        assert_eq!(s[0].item_count, 3);
    }

    #[test]
    fn ranks_prefix_over_substring_over_fuzzy() {
        let products = vec![
            Product::new("1", "A").with_brand("Dewalt"),
            Product::new("2", "B").with_brand("Walter"),
            Product::new("3", "C").with_brand("Walt"),
            Product::new("4", "D").with_brand("Ryobi"),
        ];
        let s = brand_suggestions(&products, "walt");
        let labels: Vec<_> = s.iter().map(|x| x.label.as_str()).collect();
        assert_eq!(labels, vec!["Walt", "Walter", "Dewalt"]);
        assert_eq!(s[2].score, 900 - 2);
    }

    #[test]
    fn fuzzy_brand_match() {
        let products = vec![Product::new("1", "A").with_brand("Bosch")];
        let s = brand_suggestions(&products, "bosh");
        assert_eq!(s[0].score, 800 - 60 - 1);
    }

    #[test]
    fn blank_brands_and_empty_query_yield_nothing() {
        let products = vec![Product::new("1", "A").with_brand("   ")];
        assert!(brand_suggestions(&products, "a").is_empty());
        let products = vec![Product::new("1", "A").with_brand("Acme")];
        assert!(brand_suggestions(&products, " ").is_empty());
    }

    #[test]
    fn truncates_to_eight() {
        let products: Vec<_> = (0..12)
            .map(|i| Product::new(i.to_string(), "Item").with_brand(format!("Brand{i:02}")))
            .collect();
        let s = brand_suggestions(&products, "brand");
        assert_eq!(s.len(), MAX_SUGGESTIONS);
        assert_eq!(s[0].label, "Brand00");
    }
}
