/*!
 * Content loading.
 *
 * Fetches the recitation, transliteration and translation editions and
 * merges them into one ordered item list. Editions are combined by position:
 * item N of section K in one edition is paired with item N of section K in
 * the others. Counterparts that do not exist are left empty.
 */

use futures::future::try_join3;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::app_config::EditionsConfig;
use crate::content::cache::ContentCache;
use crate::content::model::{Item, Section, SectionRef};
use crate::errors::LoadError;
use crate::providers::{ContentProvider, Edition};

/// Loads and merges the three editions
#[derive(Debug, Clone)]
pub struct ContentLoader {
    provider: Arc<dyn ContentProvider>,
}

impl ContentLoader {
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self { provider }
    }

    /// Fetch all three editions concurrently and merge them.
    ///
    /// Any failure aborts the whole load.
    pub async fn load(&self, editions: &EditionsConfig) -> Result<ContentCache, LoadError> {
        info!(
            "Loading editions {}, {}, {}",
            editions.recitation, editions.transliteration, editions.translation
        );

        let (recitation, transliteration, translation) = try_join3(
            self.fetch(&editions.recitation),
            self.fetch(&editions.transliteration),
            self.fetch(&editions.translation),
        )
        .await?;

        merge_editions(&recitation, &transliteration, &translation)
    }

    async fn fetch(&self, edition: &str) -> Result<Edition, LoadError> {
        let result = self.provider.fetch_edition(edition).await;
        result.map_err(|source| LoadError::Fetch {
            edition: edition.to_string(),
            source,
        })
    }
}

/// Merge three editions positionally into a content store.
///
/// The recitation edition defines the sections and items; the other two only
/// contribute their text at the same positions.
pub fn merge_editions(
    recitation: &Edition,
    transliteration: &Edition,
    translation: &Edition,
) -> Result<ContentCache, LoadError> {
    if recitation.sections.is_empty() {
        return Err(LoadError::EmptyContent(recitation.identifier.clone()));
    }

    for other in [transliteration, translation] {
        if other.sections.len() != recitation.sections.len() {
            warn!(
                "Edition {} has {} sections, {} has {}",
                other.identifier,
                other.sections.len(),
                recitation.identifier,
                recitation.sections.len()
            );
        }
    }

    let mut sections = Vec::with_capacity(recitation.sections.len());
    let mut items = Vec::new();

    for (k, source) in recitation.sections.iter().enumerate() {
        let section = Section::new(source.number, source.name.clone(), source.english_name.clone());
        let section_ref = SectionRef::from(&section);

        let translit_section = transliteration.sections.get(k);
        let translation_section = translation.sections.get(k);

        for other in [translit_section, translation_section].into_iter().flatten() {
            if other.items.len() != source.items.len() {
                warn!(
                    "Section {} has {} items in one edition and {} in the recitation",
                    source.number,
                    other.items.len(),
                    source.items.len()
                );
            }
        }

        for (n, entry) in source.items.iter().enumerate() {
            items.push(Item {
                id: entry.number_in_section,
                audio: entry.audio.clone().unwrap_or_default(),
                text: entry.text.clone(),
                transliteration: translit_section
                    .and_then(|s| s.items.get(n))
                    .map(|i| i.text.clone()),
                translation: translation_section
                    .and_then(|s| s.items.get(n))
                    .map(|i| i.text.clone()),
                section: section_ref.clone(),
            });
        }

        sections.push(section);
    }

    debug!("Merged {} sections and {} items", sections.len(), items.len());
    Ok(ContentCache::new(sections, items))
}
