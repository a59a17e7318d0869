/*!
 * Content model, store and loader.
 *
 * - `content::model`: sections and items
 * - `content::cache`: immutable store grouping items by section
 * - `content::loader`: fetches and merges the three editions
 */

pub mod cache;
pub mod loader;
pub mod model;

pub use cache::ContentCache;
pub use loader::{merge_editions, ContentLoader};
pub use model::{Item, Section, SectionRef};
