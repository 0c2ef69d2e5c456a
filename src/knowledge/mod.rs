//! Best-effort ingredient definition lookups
//!
//! Definitions enrich safety findings but are never load-bearing: lookup
//! failures and timeouts are absorbed into placeholder text and must not
//! fail an analysis. The lookup is injected as a trait so core logic tests
//! run without network access.

mod wikipedia;

pub use wikipedia::WikipediaLookup;

use async_trait::async_trait;
use thiserror::Error;

/// Placeholder used when no definition exists for a term
pub const DEFINITION_NOT_FOUND: &str = "Definition not found.";

/// Placeholder used when the lookup service failed or timed out
pub const DEFINITION_UNAVAILABLE: &str = "Could not fetch definition.";

/// Errors from a knowledge-lookup collaborator
#[derive(Debug, Error)]
pub enum LookupError {
    /// The service has no entry for the term
    #[error("No entry found for term: {0}")]
    NotFound(String),

    /// The request timed out
    #[error("Lookup timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// Transport or service failure
    #[error("Lookup request failed: {0}")]
    RequestFailed(String),
}

/// An external encyclopedia-style definition service
#[async_trait]
pub trait KnowledgeLookup: Send + Sync {
    /// Fetches a short definition for a term
    ///
    /// # Errors
    ///
    /// Returns `LookupError` on missing entries, timeouts, or transport
    /// failures; callers absorb all of these into placeholder text.
    async fn definition(&self, term: &str) -> Result<String, LookupError>;

    /// Human-readable name of this lookup service
    fn name(&self) -> &str;
}

/// Lookup that never resolves anything; used when lookups are disabled
#[derive(Debug, Clone, Default)]
pub struct NoopLookup;

#[async_trait]
impl KnowledgeLookup for NoopLookup {
    async fn definition(&self, term: &str) -> Result<String, LookupError> {
        Err(LookupError::NotFound(term.to_string()))
    }

    fn name(&self) -> &str {
        "disabled"
    }
}
