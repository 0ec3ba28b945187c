// src/output.rs
use crate::search::ScoredMatch;
use crate::suggest::BrandSuggestion;
use serde::Serialize;
use std::error::Error;

/// One product row in the output
#[derive(Serialize, Debug)]
pub struct ResultItem {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub brand: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub score: u32,
}

/// One autocomplete row in the output
#[derive(Serialize, Debug)]
pub struct SuggestionItem {
    pub id: String,
    pub label: String,
    pub sub: String,
    pub count: usize,
    pub score: u32,
}

#[derive(Serialize, Debug, Default)]
pub struct Response {
    pub items: Vec<ResultItem>,
    pub suggestions: Vec<SuggestionItem>,
}

impl From<&ScoredMatch> for ResultItem {
    fn from(m: &ScoredMatch) -> Self {
        let p = &m.product;
        ResultItem {
            id: p.id.clone(),
            name: p.name.clone(),
            brand: p.brand.clone(),
            category: p.category.clone(),
            price: p.price,
            rating: p.rating,
            score: m.score,
        }
    }
}

impl From<&BrandSuggestion> for SuggestionItem {
    fn from(s: &BrandSuggestion) -> Self {
        SuggestionItem {
            id: s.representative_id.clone(),
            label: s.label.clone(),
            sub: s.sub(),
            count: s.item_count,
            score: s.score,
        }
    }
}

impl Response {
    pub fn new(items: &[ScoredMatch], suggestions: &[BrandSuggestion]) -> Self {
        Response {
            items: items.iter().map(ResultItem::from).collect(),
            suggestions: suggestions.iter().map(SuggestionItem::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Print the response as a single JSON line
pub fn output_results(response: &Response) -> Result<(), Box<dyn Error>> {
    println!("{}", response.to_json()?);
    Ok(())
}
