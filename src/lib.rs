//! Product search for the storefront catalog.
//!
//! The core is [`rank`]: a pure function from a product snapshot, a free-text
//! query and a [`SortMode`] to the ordered matches plus ranked brand
//! suggestions. Everything else in the crate feeds it (catalog loading,
//! snapshot cache, fetch bookkeeping) or presents its output.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod distance;
pub mod error;
pub mod normalize;
pub mod output;
pub mod panel;
pub mod product;
pub mod search;
pub mod sort;
pub mod state;
pub mod suggest;

pub use distance::bounded_edit_distance;
pub use error::CatalogError;
pub use normalize::normalize;
pub use product::{CreatedAt, Product, Recency};
pub use search::{filter_products, relevance_score, ScoredMatch};
pub use sort::{sort_matches, SortMode};
pub use suggest::{brand_suggestions, BrandSuggestion};

/// Output of one ranking pass.
#[derive(Debug, Clone)]
pub struct Ranking {
    pub matches: Vec<ScoredMatch>,
    pub suggestions: Vec<BrandSuggestion>,
}

impl Ranking {
    /// The ordered products without their scores.
    pub fn products(&self) -> Vec<&Product> {
        self.matches.iter().map(|m| &m.product).collect()
    }
}

/// Filter, score and sort `products` for `query`, and rank brand suggestions.
pub fn rank(products: &[Product], query: &str, mode: SortMode) -> Ranking {
    let mut matches = filter_products(products, query);
    sort_matches(&mut matches, mode);
    let suggestions = brand_suggestions(products, query);

    log::debug!(
        "rank {:?} ({}): {} of {} products, {} suggestions",
        query,
        mode,
        matches.len(),
        products.len(),
        suggestions.len()
    );

    Ranking {
        matches,
        suggestions,
    }
}
