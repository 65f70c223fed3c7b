//! Time-boxed memoisation of catalogue fetches.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use mak_model::{Catalog, Language};
use tracing::debug;

use crate::error::Result;
use crate::source::RowSource;

/// Cached catalogue data.
struct CachedCatalog {
    catalog: Catalog,
    fetched_at: Instant,
}

/// Wraps a [`RowSource`] and reuses successful fetches per language for `ttl`.
///
/// Failures are never cached. There is no invalidation besides expiry and
/// [`CachedSource::invalidate`].
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    entries: RefCell<HashMap<Language, CachedCatalog>>,
}

impl<S: RowSource> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: RefCell::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Forget every cached catalogue.
    pub fn invalidate(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl<S: RowSource> RowSource for CachedSource<S> {
    fn fetch(&self, language: Language) -> Result<Catalog> {
        if let Some(cached) = self.entries.borrow().get(&language) {
            let age = cached.fetched_at.elapsed();
            if age < self.ttl {
                debug!(language = %language, age_ms = age.as_millis(), "using cached catalogue");
                return Ok(cached.catalog.clone());
            }
        }

        debug!(language = %language, "catalogue cache miss");
        let catalog = self.inner.fetch(language)?;
        self.entries.borrow_mut().insert(
            language,
            CachedCatalog {
                catalog: catalog.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(catalog)
    }
}
