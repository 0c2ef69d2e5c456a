//! Wikipedia REST summary lookup

use super::{KnowledgeLookup, LookupError};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_ENDPOINT: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";

/// Definitions longer than this are truncated
const MAX_DEFINITION_CHARS: usize = 300;

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    extract: String,
}

/// Fetches term summaries from the Wikipedia REST API
///
/// Each request runs under the configured timeout; all failures surface as
/// `LookupError` for the caller to absorb.
#[derive(Debug, Clone)]
pub struct WikipediaLookup {
    client: reqwest::Client,
    endpoint: String,
    timeout_secs: u64,
}

impl WikipediaLookup {
    /// Creates a lookup against the public Wikipedia endpoint
    pub fn new(timeout_secs: u64) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, timeout_secs)
    }

    /// Creates a lookup against a custom endpoint (for testing or mirrors)
    pub fn with_endpoint(endpoint: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(format!("labelscan/{}", crate::VERSION))
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            timeout_secs,
        }
    }
}

#[async_trait]
impl KnowledgeLookup for WikipediaLookup {
    async fn definition(&self, term: &str) -> Result<String, LookupError> {
        let url = format!("{}/{}", self.endpoint, urlencode(term));
        debug!(term = term, "Fetching definition");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout {
                    seconds: self.timeout_secs,
                }
            } else {
                LookupError::RequestFailed(e.to_string())
            }
        })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(term.to_string()));
        }

        if !response.status().is_success() {
            return Err(LookupError::RequestFailed(format!(
                "Unexpected status {} for term {}",
                response.status(),
                term
            )));
        }

        let summary: SummaryResponse = response
            .json()
            .await
            .map_err(|e| LookupError::RequestFailed(e.to_string()))?;

        if summary.extract.trim().is_empty() {
            return Err(LookupError::NotFound(term.to_string()));
        }

        Ok(truncate_chars(&summary.extract, MAX_DEFINITION_CHARS))
    }

    fn name(&self) -> &str {
        "wikipedia"
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Percent-encodes a term for use as a single path segment
fn urlencode(term: &str) -> String {
    let mut encoded = String::with_capacity(term.len());
    for byte in term.replace(' ', "_").bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urlencode_spaces_become_underscores() {
        assert_eq!(urlencode("sodium fluoride"), "sodium_fluoride");
    }

    #[test]
    fn test_urlencode_special_characters() {
        assert_eq!(urlencode("trans/fat"), "trans%2Ffat");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
    }

    #[test]
    fn test_lookup_name() {
        let lookup = WikipediaLookup::new(10);
        assert_eq!(lookup.name(), "wikipedia");
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let lookup = WikipediaLookup::with_endpoint("http://localhost:1234/", 5);
        assert_eq!(lookup.endpoint, "http://localhost:1234");
    }
}
