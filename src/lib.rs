/*!
 * # tilawa - a terminal player for recited scripture
 *
 * Fetches the text, a transliteration and a translation from a public
 * content API and plays the recitation item by item, keeping the text panes
 * in step with the audio.
 *
 * ## Features
 *
 * - Three editions merged into one list of playable items
 * - Automatic advance with a short pause between items and a longer one
 *   between sections
 * - Manual selection that always wins over a pending automatic advance
 * - Centred scrolling of the section and item lists, instant when reduced
 *   motion is requested
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `providers`: Content API clients:
 *   - `providers::alquran`: alquran.cloud client
 *   - `providers::mock`: In-memory editions
 * - `content`: Sections, items, the content store and the edition loader
 * - `playback`: The playback sequencer and playback devices
 * - `focus`: Scroll synchronization for the terminal views
 * - `app_controller`: The player event loop and interactive commands
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

pub mod app_config;
pub mod app_controller;
pub mod content;
pub mod errors;
pub mod focus;
pub mod playback;
pub mod providers;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, PlayerSession, SessionHandle};
pub use content::{ContentCache, Item, Section};
pub use errors::{AppError, LoadError, PlaybackError, ProviderError};
pub use focus::{scroll_offset, FocusSynchronizer, ScrollBehavior};
pub use playback::{PlaybackPosition, PlayerEvent, Sequencer};
