//! Holds the current product list across fetches.
//!
//! Every fetch gets a `FetchTicket`. Only the newest ticket may commit, and
//! nothing commits after `close`. A failed fetch leaves the previous list in
//! place so the last good results stay visible.

use crate::error::CatalogError;
use crate::product::Product;
use std::sync::Arc;

/// Identifies one outstanding fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// What happened to a fetch result handed to `CatalogState::apply`.
#[derive(Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer fetch started, or the state was closed.
    Superseded,
    /// The fetch failed; the previous list was kept.
    KeptPrevious,
}

#[derive(Debug, Default)]
pub struct CatalogState {
    products: Arc<Vec<Product>>,
    generation: u64,
    loading: bool,
    closed: bool,
    last_error: Option<String>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded with an already known list, e.g. a cached snapshot.
    pub fn with_products(products: Vec<Product>) -> Self {
        CatalogState {
            products: Arc::new(products),
            ..Self::default()
        }
    }

    /// Immutable snapshot for one ranking pass.
    pub fn snapshot(&self) -> Arc<Vec<Product>> {
        Arc::clone(&self.products)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start a fetch, superseding any earlier one.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket(self.generation)
    }

    /// Stop accepting results. Outstanding tickets become stale.
    pub fn close(&mut self) {
        self.closed = true;
        self.loading = false;
    }

    fn is_current(&self, ticket: FetchTicket) -> bool {
        !self.closed && ticket.0 == self.generation
    }

    /// Commit a fetch result if `ticket` is still current.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Product>, CatalogError>,
    ) -> ApplyOutcome {
        if !self.is_current(ticket) {
            log::debug!("Dropping result of superseded fetch {:?}", ticket);
            return ApplyOutcome::Superseded;
        }

        self.loading = false;
        match result {
            Ok(products) => {
                log::debug!("Loaded {} products", products.len());
                self.products = Arc::new(products);
                self.last_error = None;
                ApplyOutcome::Applied
            }
            Err(e) => {
                log::error!("Failed to load products: {}", e);
                self.last_error = Some(e.to_string());
                ApplyOutcome::KeptPrevious
            }
        }
    }
}
