/*!
 * Content data model.
 *
 * Sections and items are built once when the content loads and are never
 * mutated afterwards.
 */

use serde::{Deserialize, Serialize};

/// A named, ordered group of items (a chapter-like division of the text)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Positive, unique identifier; sections are ordered by it
    pub id: u32,

    /// Native-script label
    pub name: String,

    /// Romanized label
    pub english_name: String,
}

impl Section {
    pub fn new(id: u32, name: impl Into<String>, english_name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            english_name: english_name.into(),
        }
    }
}

/// Denormalized copy of the owning section, kept on every item for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRef {
    pub id: u32,
    pub name: String,
    pub english_name: String,
}

impl From<&Section> for SectionRef {
    fn from(section: &Section) -> Self {
        Self {
            id: section.id,
            name: section.name.clone(),
            english_name: section.english_name.clone(),
        }
    }
}

/// One playable unit of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier, unique within its section
    pub id: u32,

    /// Audio locator; empty when no audio is available
    pub audio: String,

    /// Native-script text
    pub text: String,

    /// Romanized rendering
    pub transliteration: Option<String>,

    /// Translated rendering
    pub translation: Option<String>,

    /// Owning section
    pub section: SectionRef,
}

impl Item {
    /// Whether this item has a locator worth sending to the playback device
    pub fn has_audio(&self) -> bool {
        !self.audio.trim().is_empty()
    }

    /// Lines shown for this item in the item list, native text first
    pub fn display_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{:>4}. {}", self.id, self.text)];
        if let Some(transliteration) = &self.transliteration {
            lines.push(format!("      {}", transliteration));
        }
        if let Some(translation) = &self.translation {
            lines.push(format!("      {}", translation));
        }
        lines
    }
}
