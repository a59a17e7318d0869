/*!
 * Content provider implementations.
 *
 * This module contains clients for services that return a full edition of
 * the text:
 * - AlQuranCloud: the public alquran.cloud REST API
 * - Mock: in-memory editions for tests and offline runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// One edition of the text, as returned by a provider
#[derive(Debug, Clone, PartialEq)]
pub struct Edition {
    /// Edition identifier (e.g. `ar.alafasy`)
    pub identifier: String,

    /// Sections in the order received
    pub sections: Vec<EditionSection>,
}

/// A section of an edition
#[derive(Debug, Clone, PartialEq)]
pub struct EditionSection {
    /// Section number
    pub number: u32,

    /// Native-script name
    pub name: String,

    /// Romanized name
    pub english_name: String,

    /// Items in the order received
    pub items: Vec<EditionItem>,
}

/// An item of an edition section
#[derive(Debug, Clone, PartialEq)]
pub struct EditionItem {
    /// Item number within its section
    pub number_in_section: u32,

    /// Text in this edition's language or script
    pub text: String,

    /// Audio locator, present only for audio editions
    pub audio: Option<String>,
}

/// Common trait for all content providers
///
/// This trait defines the interface every content source must follow,
/// allowing them to be used interchangeably by the content loader.
#[async_trait]
pub trait ContentProvider: Send + Sync + Debug {
    /// Fetch the full text of one edition
    ///
    /// # Arguments
    /// * `edition` - The edition identifier
    ///
    /// # Returns
    /// * `Result<Edition, ProviderError>` - The edition or an error
    async fn fetch_edition(&self, edition: &str) -> Result<Edition, ProviderError>;
}

pub mod alquran;
pub mod mock;
