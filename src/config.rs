//! Environment-driven settings, read the way launcher workflows pass them.

use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/products";

/// Read an env var as bool ("1" or "true" = true), `default` when unset.
pub fn get_env_bool(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

/// Read an env var or return `default`.
pub fn get_env_with_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `GET` endpoint returning the product list.
    pub endpoint: String,
    /// When non-empty, read these flat JSON files instead of calling the API.
    pub products_files: Vec<PathBuf>,
    pub use_cache: bool,
    /// 0 means no limit.
    pub max_results: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            products_files: Vec::new(),
            use_cache: true,
            max_results: 0,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let max_results = get_env_with_default("max_results", "0");
        let max_results = max_results.trim().parse().unwrap_or_else(|_| {
            log::warn!("Invalid max_results {:?}, not limiting", max_results);
            0
        });

        Config {
            endpoint: get_env_with_default("products_endpoint", DEFAULT_ENDPOINT),
            products_files: split_paths(&get_env_with_default("products_file", "")),
            use_cache: get_env_bool("use_cache", true),
            max_results,
        }
    }
}

/// Comma-separated list of paths, blanks dropped.
fn split_paths(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test touches its own variables so they can run in parallel.

    #[test]
    fn bool_parsing() {
        std::env::set_var("sfs_test_flag_on", "TRUE");
        std::env::set_var("sfs_test_flag_off", "no");
        assert!(get_env_bool("sfs_test_flag_on", false));
        assert!(!get_env_bool("sfs_test_flag_off", true));
        assert!(get_env_bool("sfs_test_flag_unset", true));
    }

    #[test]
    fn default_points_at_local_api() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.use_cache);
        assert_eq!(config.max_results, 0);
        assert!(config.products_files.is_empty());
    }

    #[test]
    fn splits_file_list() {
        assert_eq!(
            split_paths(" a.json, ,b.json"),
            vec![PathBuf::from("a.json"), PathBuf::from("b.json")]
        );
        assert!(split_paths("").is_empty());
    }
}
