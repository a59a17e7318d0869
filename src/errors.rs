/*!
 * Error types for the tilawa application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the content API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code (or the `code` field of the response envelope)
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors that prevent the content from being loaded.
///
/// Any of these leaves the player idle; partial content is never used.
#[derive(Error, Debug)]
pub enum LoadError {
    /// One of the editions could not be fetched
    #[error("Failed to fetch edition '{edition}': {source}")]
    Fetch {
        /// Edition identifier that failed
        edition: String,
        /// Underlying provider error
        #[source]
        source: ProviderError,
    },

    /// The recitation edition came back without any sections
    #[error("Edition '{0}' contains no sections")]
    EmptyContent(String),
}

/// Errors raised by a playback device when asked to play a locator
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// The item has no audio locator
    #[error("No audio available")]
    NoAudio,

    /// The player process could not be started
    #[error("Failed to start player '{command}': {message}")]
    SpawnFailed {
        /// Command that was launched
        command: String,
        /// Reason reported by the OS
        message: String,
    },

    /// The device refused the locator
    #[error("Playback rejected for '{locator}': {reason}")]
    Rejected {
        /// Locator that was refused
        locator: String,
        /// Reason given by the device
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content could not be loaded
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the playback device
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// Requested start section does not exist
    #[error("Section {0} does not exist")]
    SectionNotFound(u32),

    /// Requested start item (1-based) is outside its section
    #[error("Section {section} has no item {item}")]
    ItemNotFound {
        /// Section identifier
        section: u32,
        /// 1-based item number
        item: usize,
    },

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Config(error.to_string())
    }
}
