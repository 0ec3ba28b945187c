//! Reads the product list from the storefront API or its flat JSON file.
//!
//! Provides:
//! - `fetch_products` for `GET /api/products`
//! - `read_products_file` for the server's `products.json`
//! - `load_catalog` choosing between the two per `Config`, reading several
//!   files in parallel with rayon
//! - `parse_products` / `extract_products` turning raw JSON into `Product`s,
//!   applying the same defaults the storefront client does.

use crate::config::Config;
use crate::error::CatalogError;
use crate::product::{CreatedAt, Product};
use rayon::prelude::*;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use url::Url;

const UNNAMED: &str = "Unnamed";

/// Fetch and normalize the product list from `endpoint`.
pub fn fetch_products(client: &Client, endpoint: &str) -> Result<Vec<Product>, CatalogError> {
    let url = Url::parse(endpoint)
        .map_err(|e| CatalogError::InvalidEndpoint(endpoint.to_string(), e))?;

    log::trace!("GET {}", url);
    let resp = client
        .get(url)
        .header(ACCEPT, "application/json")
        .send()?;

    let status = resp.status();
    if !status.is_success() {
        return Err(CatalogError::Status {
            endpoint: endpoint.to_string(),
            status,
        });
    }

    let body = resp.text()?;
    parse_products(&body)
}

/// Read and normalize the flat JSON file the API server persists to.
pub fn read_products_file(path: &Path) -> Result<Vec<Product>, CatalogError> {
    log::trace!("Reading catalog file {}", path.display());
    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    parse_products(&contents)
}

/// Load the catalog from the configured files, or from the API when none are set.
///
/// Files are read in parallel and concatenated in configuration order. A file
/// that fails to load fails the whole load so a partial catalog never
/// replaces a complete one.
pub fn load_catalog(config: &Config, client: &Client) -> Result<Vec<Product>, CatalogError> {
    if config.products_files.is_empty() {
        return fetch_products(client, &config.endpoint);
    }

    let per_file: Vec<Vec<Product>> = config
        .products_files
        .par_iter()
        .map(|path| {
            read_products_file(path).map_err(|e| {
                log::error!("Error reading {}: {}", path.display(), e);
                e
            })
        })
        .collect::<Result<_, _>>()?;

    Ok(per_file.into_iter().flatten().collect())
}

/// Parse a response body into products.
pub fn parse_products(body: &str) -> Result<Vec<Product>, CatalogError> {
    let value: Value = serde_json::from_str(body)?;
    Ok(extract_products(&value))
}

/// Accepts a bare array, or an object wrapping one under `items` or `products`.
pub fn extract_products(value: &Value) -> Vec<Product> {
    let list = match value {
        Value::Array(list) => list.as_slice(),
        Value::Object(obj) => obj
            .get("items")
            .or_else(|| obj.get("products"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default(),
        _ => &[],
    };

    list.iter()
        .enumerate()
        .filter_map(|(idx, raw)| match raw.as_object() {
            Some(obj) => Some(product_from_record(obj, idx)),
            None => {
                log::warn!("Skipping non-object catalog record at index {}", idx);
                None
            }
        })
        .collect()
}

/// Normalize one raw record. `idx` is the last-resort identifier.
fn product_from_record(obj: &Map<String, Value>, idx: usize) -> Product {
    let id = ["sku", "upc", "id", "_id"]
        .iter()
        .find_map(|key| token(obj.get(*key)))
        .unwrap_or_else(|| idx.to_string());

    Product {
        id,
        name: token(obj.get("name")).unwrap_or_else(|| UNNAMED.to_string()),
        brand: token(obj.get("brand")).unwrap_or_default(),
        category: token(obj.get("category")).unwrap_or_default(),
        price: Some(obj.get("price").and_then(Value::as_f64).unwrap_or(0.0)),
        rating: Some(obj.get("rating").and_then(Value::as_f64).unwrap_or(0.0)),
        created_at: created_at(obj.get("createdAt")),
        sku: token(obj.get("sku")),
        tags: tags(obj.get("tags")),
    }
}

/// Scalars as text; null, arrays and objects are absent.
fn token(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn created_at(value: Option<&Value>) -> Option<CreatedAt> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map(CreatedAt::Instant),
        Value::String(s) => Some(CreatedAt::parse(s)),
        _ => None,
    }
}

fn tags(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|t| t.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn applies_defaults() {
        let products = extract_products(&json!([{ "id": 7 }]));
        let p = &products[0];
        assert_eq!(p.id, "7");
        assert_eq!(p.name, "Unnamed");
        assert_eq!(p.brand, "");
        assert_eq!(p.price, Some(0.0));
        assert_eq!(p.rating, Some(0.0));
        assert_eq!(p.created_at, None);
        assert!(p.tags.is_empty());
    }

    #[test]
    fn identifier_preference() {
        let products = extract_products(&json!([
            { "sku": "SKU-1", "upc": "0001", "id": 1 },
            { "upc": "0002", "id": 2 },
            { "id": 3, "_id": "mongo" },
            { "_id": "mongo-4" },
            { "name": "nothing" },
        ]));
        let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["SKU-1", "0002", "3", "mongo-4", "4"]);
        assert_eq!(products[0].sku.as_deref(), Some("SKU-1"));
        assert_eq!(products[1].sku, None);
    }

    #[test]
    fn non_numeric_price_defaults_to_zero() {
        let products = extract_products(&json!([{ "price": "12.50", "rating": null }]));
        assert_eq!(products[0].price, Some(0.0));
        assert_eq!(products[0].rating, Some(0.0));
    }

    #[test]
    fn wrapped_shapes() {
        assert_eq!(extract_products(&json!({ "items": [{ "id": 1 }] })).len(), 1);
        assert_eq!(extract_products(&json!({ "products": [{ "id": 1 }, { "id": 2 }] })).len(), 2);
        assert!(extract_products(&json!({ "data": [] })).is_empty());
        assert!(extract_products(&json!("nope")).is_empty());
    }

    #[test]
    fn created_at_and_tags() {
        let products = extract_products(&json!([
            { "createdAt": 1700000000000i64, "tags": ["cordless", 5, "18v"] },
            { "createdAt": "2024-01-01T00:00:00Z", "tags": "oops" },
        ]));
        assert_eq!(products[0].created_at, Some(CreatedAt::Instant(1_700_000_000_000)));
        assert_eq!(products[0].tags, vec!["cordless", "18v"]);
        assert_eq!(products[1].created_at, Some(CreatedAt::Instant(1_704_067_200_000)));
        assert!(products[1].tags.is_empty());
    }

    #[test]
    fn skips_non_object_records() {
        let products = extract_products(&json!([1, { "id": "a" }, "x"]));
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "a");
    }

    #[test]
    fn reads_flat_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 1, "name": "Hammer", "price": 9.5}}]"#).unwrap();
        let products = read_products_file(file.path()).unwrap();
        assert_eq!(products[0].name, "Hammer");
        assert_eq!(products[0].price, Some(9.5));
    }

    #[test]
    fn empty_file_is_empty_catalog() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(read_products_file(file.path()).unwrap().is_empty());
    }

    #[test]
    fn loads_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        std::fs::write(&a, r#"[{"id": "a1"}, {"id": "a2"}]"#).unwrap();
        std::fs::write(&b, r#"{"products": [{"id": "b1"}]}"#).unwrap();

        let config = Config {
            products_files: vec![a, b],
            ..Config::default()
        };
        let products = load_catalog(&config, &Client::new()).unwrap();
        let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2", "b1"]);
    }

    #[test]
    fn missing_file_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            products_files: vec![dir.path().join("absent.json")],
            ..Config::default()
        };
        let err = load_catalog(&config, &Client::new()).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn rejects_bad_endpoint() {
        let client = Client::new();
        let err = fetch_products(&client, "not a url").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidEndpoint(..)));
    }
}
