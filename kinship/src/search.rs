//! As-you-type lookups (GIFs, locations).
//!
//! Every keystroke past [`MIN_QUERY_LEN`] issues a request and responses may
//! arrive in any order. [`SearchSequencer`] stamps each request with a
//! generation; only the latest issued request may publish results.

use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::errors::ClientError;

pub const MIN_QUERY_LEN: usize = 2;

/// True when `query` is long enough to hit the server.
pub fn is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_LEN
}

/// Proof that a request was issued, carrying its generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug)]
struct Published<R> {
    generation: u64,
    query: String,
    results: Vec<R>,
}

#[derive(Debug)]
pub struct SearchSequencer<R> {
    issued: AtomicU64,
    published: Mutex<Published<R>>,
}

impl<R> Default for SearchSequencer<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> SearchSequencer<R> {
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            published: Mutex::new(Published {
                generation: 0,
                query: String::new(),
                results: Vec::new(),
            }),
        }
    }

    /// Issues a ticket for `query`, or clears the results and returns `None`
    /// when the query is too short to search.
    pub fn begin(&self, query: &str) -> Option<SearchTicket> {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let query = query.trim();
        if !is_searchable(query) {
            self.publish(generation, query, Vec::new());
            return None;
        }
        Some(SearchTicket {
            generation,
            query: query.to_string(),
        })
    }

    /// Publishes `results` if `ticket` is still the latest issued request.
    /// Returns whether they were applied.
    pub fn complete(&self, ticket: &SearchTicket, results: Vec<R>) -> bool {
        if ticket.generation != self.issued.load(Ordering::SeqCst) {
            log::debug!(
                "discarding stale results for '{}' (generation {})",
                ticket.query,
                ticket.generation
            );
            return false;
        }
        self.publish(ticket.generation, &ticket.query, results)
    }

    fn publish(&self, generation: u64, query: &str, results: Vec<R>) -> bool {
        let mut published = match self.published.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if generation < published.generation {
            return false;
        }
        *published = Published {
            generation,
            query: query.to_string(),
            results,
        };
        true
    }

    /// Query whose results are currently published.
    pub fn current_query(&self) -> String {
        self.with_published(|published| published.query.clone())
    }

    fn with_published<O>(&self, read: impl FnOnce(&Published<R>) -> O) -> O {
        match self.published.lock() {
            Ok(guard) => read(&guard),
            Err(poisoned) => read(&poisoned.into_inner()),
        }
    }
}

impl<R: Clone> SearchSequencer<R> {
    pub fn results(&self) -> Vec<R> {
        self.with_published(|published| published.results.clone())
    }

    /// Runs one lookup end to end: issue a ticket, await `fetch`, publish if still current.
    ///
    /// Returns `Ok(true)` when the results were published. A failed lookup
    /// leaves the published results untouched.
    pub async fn search<F, Fut>(&self, query: &str, fetch: F) -> Result<bool, ClientError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<Vec<R>, ClientError>>,
    {
        let Some(ticket) = self.begin(query) else {
            return Ok(true);
        };
        let results = fetch(ticket.query.clone()).await?;
        Ok(self.complete(&ticket, results))
    }
}
