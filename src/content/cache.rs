/*!
 * In-memory content store.
 *
 * Holds the merged item list grouped by section together with the ordered
 * section list. The store is immutable once built and is shared through an
 * `Arc` by the sequencer, the focus synchronizer and the terminal UI.
 */

use std::collections::HashMap;

use crate::content::model::{Item, Section};

/// Loaded sections and items
#[derive(Debug, Clone, Default)]
pub struct ContentCache {
    /// Sections in ascending identifier order
    sections: Vec<Section>,

    /// All items, in the order they were received
    items: Vec<Item>,

    /// Indices into `items` for every section, in received order
    by_section: HashMap<u32, Vec<usize>>,
}

impl ContentCache {
    /// Build the store from already-ordered sections and items
    pub fn new(sections: Vec<Section>, items: Vec<Item>) -> Self {
        let mut by_section: HashMap<u32, Vec<usize>> = HashMap::new();
        for (index, item) in items.iter().enumerate() {
            by_section.entry(item.section.id).or_default().push(index);
        }

        Self {
            sections,
            items,
            by_section,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Look up a section by identifier
    pub fn section(&self, id: u32) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Row of a section in the section selector
    pub fn section_row(&self, id: u32) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// The filtered item list of one section
    pub fn section_items(&self, id: u32) -> Vec<&Item> {
        self.by_section
            .get(&id)
            .map(|indices| indices.iter().map(|&i| &self.items[i]).collect())
            .unwrap_or_default()
    }

    /// Number of items in a section (zero for unknown sections)
    pub fn section_len(&self, id: u32) -> usize {
        self.by_section.get(&id).map_or(0, Vec::len)
    }

    /// Item `index` of a section's filtered list
    pub fn item(&self, section_id: u32, index: usize) -> Option<&Item> {
        self.by_section
            .get(&section_id)
            .and_then(|indices| indices.get(index))
            .map(|&i| &self.items[i])
    }

    /// The section with the smallest identifier greater than `id`
    pub fn next_section_after(&self, id: u32) -> Option<&Section> {
        self.sections
            .iter()
            .filter(|s| s.id > id)
            .min_by_key(|s| s.id)
    }

    /// The section with the smallest identifier
    pub fn first_section(&self) -> Option<&Section> {
        self.sections.iter().min_by_key(|s| s.id)
    }
}
