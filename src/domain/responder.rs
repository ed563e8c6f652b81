//! ResponseSelector: picks a bot reply from a fixed corpus.

use rand::{Rng, seq::IndexedRandom};

use super::error::ResponderError;

/// Selects a reply uniformly at random from an immutable corpus.
///
/// The corpus is loaded once at startup and validated to be non-empty with
/// non-empty entries, so `select` can never return a string outside the
/// configured set. The randomness source is pluggable for deterministic
/// tests.
#[derive(Debug, Clone)]
pub struct ResponseSelector {
    responses: Vec<String>,
}

impl ResponseSelector {
    /// Create a new ResponseSelector from the given corpus.
    ///
    /// # Errors
    ///
    /// Returns `ResponderError::EmptyCorpus` if the corpus has no entries,
    /// or `ResponderError::EmptyResponse` if an entry is an empty string.
    pub fn new(responses: Vec<String>) -> Result<Self, ResponderError> {
        if responses.is_empty() {
            return Err(ResponderError::EmptyCorpus);
        }
        if let Some(index) = responses.iter().position(|r| r.is_empty()) {
            return Err(ResponderError::EmptyResponse { index });
        }
        Ok(Self { responses })
    }

    /// Pick a reply using the thread-local random source.
    pub fn select(&self) -> &str {
        self.select_with(&mut rand::rng())
    }

    /// Pick a reply using the given random source.
    pub fn select_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // Corpus is non-empty by construction
        self.responses
            .choose(rng)
            .map(String::as_str)
            .expect("response corpus is non-empty")
    }

    /// The configured corpus.
    pub fn responses(&self) -> &[String] {
        &self.responses
    }
}
