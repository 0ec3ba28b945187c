// src/main.rs
use std::env;
use std::error::Error;
use std::time::Instant;

use reqwest::blocking::Client;
use storefront_search::cache::SnapshotCache;
use storefront_search::catalog::load_catalog;
use storefront_search::config::Config;
use storefront_search::output::{output_results, Response};
use storefront_search::state::{ApplyOutcome, CatalogState};
use storefront_search::{rank, CatalogError, SortMode};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let start = Instant::now();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("");
    let query = args.get(2).map(|s| s.as_str()).unwrap_or("");
    let mode = SortMode::parse_lenient(args.get(3).map(|s| s.as_str()).unwrap_or(""));
    log::debug!("command {:?} query {:?} sort {}", command, query, mode);

    let config = Config::from_env();
    let cache = config.use_cache.then(SnapshotCache::in_data_dir).flatten();

    // Seed with the last good snapshot so a failed load still shows results
    let cached = cache
        .as_ref()
        .and_then(|c| c.load().map_err(|e| log::warn!("Ignoring catalog cache: {}", e)).ok())
        .flatten()
        .unwrap_or_default();
    let mut state = CatalogState::with_products(cached);

    let client = Client::builder().user_agent("storefront_search").build()?;
    let ticket = state.begin_fetch();
    let outcome = state.apply(ticket, load_catalog(&config, &client));

    let products = state.snapshot();
    match outcome {
        ApplyOutcome::Applied => {
            if let Some(cache) = &cache {
                if let Err(e) = cache.save(&products) {
                    log::warn!("Could not save catalog cache: {}", e);
                }
            }
        }
        _ if products.is_empty() => return Err(CatalogError::Unavailable.into()),
        _ => log::warn!(
            "Serving {} cached products (saved at {:?})",
            products.len(),
            cache.as_ref().and_then(SnapshotCache::timestamp)
        ),
    }

    let mut ranking = rank(&products, query, mode);
    if config.max_results > 0 {
        ranking.matches.truncate(config.max_results);
    }

    let response = match command {
        "search" => Response::new(&ranking.matches, &[]),
        "suggest" => Response::new(&[], &ranking.suggestions),
        _ => Response::new(&ranking.matches, &ranking.suggestions),
    };

    output_results(&response)?;
    log::debug!("Search completed in {:?}", start.elapsed());
    Ok(())
}
