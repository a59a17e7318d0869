/*!
 * Mock content provider.
 *
 * Serves editions from memory so the loader and the player can be exercised
 * without network access:
 * - `MockProvider::new()` - Serves whatever editions were registered
 * - `MockProvider::failing_on(..)` - Fails for one edition identifier
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::{ContentProvider, Edition, EditionItem, EditionSection};

/// In-memory provider for tests
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    /// Registered editions by identifier
    editions: Arc<Mutex<HashMap<String, Edition>>>,
    /// Edition identifiers that fail with an API error
    failing: Arc<Mutex<Vec<String>>>,
    /// Number of fetches served or refused
    request_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create an empty mock provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider that refuses one edition
    pub fn failing_on(edition: &str) -> Self {
        let provider = Self::new();
        provider.failing.lock().push(edition.to_string());
        provider
    }

    /// Register an edition
    pub fn with_edition(self, edition: Edition) -> Self {
        self.editions.lock().insert(edition.identifier.clone(), edition);
        self
    }

    /// Number of fetch calls made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Build an edition from `(number, english name, item texts)` triples.
    ///
    /// When `with_audio` is set every item gets a locator derived from its position.
    pub fn edition(identifier: &str, sections: &[(u32, &str, Vec<&str>)], with_audio: bool) -> Edition {
        Edition {
            identifier: identifier.to_string(),
            sections: sections
                .iter()
                .map(|(number, english_name, texts)| EditionSection {
                    number: *number,
                    name: format!("surah-{}", number),
                    english_name: english_name.to_string(),
                    items: texts
                        .iter()
                        .enumerate()
                        .map(|(i, text)| EditionItem {
                            number_in_section: i as u32 + 1,
                            text: text.to_string(),
                            audio: with_audio.then(|| format!("mock://{}/{}/{}", identifier, number, i + 1)),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl ContentProvider for MockProvider {
    async fn fetch_edition(&self, edition: &str) -> Result<Edition, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        if self.failing.lock().iter().any(|e| e == edition) {
            return Err(ProviderError::ApiError {
                status_code: 500,
                message: format!("Simulated failure for {}", edition),
            });
        }

        self.editions
            .lock()
            .get(edition)
            .cloned()
            .ok_or_else(|| ProviderError::ApiError {
                status_code: 404,
                message: format!("Unknown edition {}", edition),
            })
    }
}
