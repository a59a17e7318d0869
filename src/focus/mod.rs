/*!
 * Focus synchronization.
 *
 * Keeps the section selector and the item list scrolled so the active
 * section and item sit in the middle of their viewports. Scrolling is
 * smooth unless reduced motion is requested, in which case it is instant.
 */

use log::trace;
use tokio::sync::watch;

use crate::content::ContentCache;
use crate::playback::PlaybackPosition;

pub mod view;

pub use view::TerminalListView;

/// How a scroll command should be carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Placement of an element inside its scroll container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBounds {
    pub top: f64,
    pub height: f64,
}

/// A scrollable container holding one element per row
pub trait ScrollView {
    /// Visible height of the container, `None` if it cannot be resolved
    fn container_height(&self) -> Option<f64>;

    /// Placement of the element at `row`, `None` if there is no such element
    fn element_bounds(&self, row: usize) -> Option<ElementBounds>;

    /// Move the viewport to `offset`
    fn scroll_to(&mut self, offset: f64, behavior: ScrollBehavior);
}

/// Offset that centres an element in its container, never negative
pub fn scroll_offset(container_height: f64, element_top: f64, element_height: f64) -> f64 {
    (element_top - container_height / 2.0 + element_height / 2.0).max(0.0)
}

/// Applies the centring scroll to the two views whenever the position changes
#[derive(Debug, Clone)]
pub struct FocusSynchronizer {
    reduced_motion: watch::Receiver<bool>,
}

impl FocusSynchronizer {
    /// Track the live reduced-motion preference
    pub fn new(reduced_motion: watch::Receiver<bool>) -> Self {
        Self { reduced_motion }
    }

    pub fn reduced_motion(&self) -> bool {
        *self.reduced_motion.borrow()
    }

    pub fn behavior(&self) -> ScrollBehavior {
        if self.reduced_motion() {
            ScrollBehavior::Instant
        } else {
            ScrollBehavior::Smooth
        }
    }

    /// Centre one row of one view; returns the applied offset
    pub fn focus(&self, view: &mut dyn ScrollView, row: usize) -> Option<f64> {
        let container_height = view.container_height()?;
        let bounds = view.element_bounds(row)?;
        let offset = scroll_offset(container_height, bounds.top, bounds.height);
        view.scroll_to(offset, self.behavior());
        Some(offset)
    }

    /// Bring both views in line with a playback position.
    ///
    /// The two views are handled independently; a view whose target cannot be
    /// resolved is left where it is.
    pub fn sync(
        &self,
        position: PlaybackPosition,
        content: &ContentCache,
        sections: &mut dyn ScrollView,
        items: &mut dyn ScrollView,
    ) {
        let Some(section) = position.section else {
            return;
        };

        if let Some(row) = content.section_row(section) {
            let offset = self.focus(sections, row);
            trace!("Section selector row {} -> {:?}", row, offset);
        }

        if let Some(row) = position.item {
            let offset = self.focus(items, row);
            trace!("Item list row {} -> {:?}", row, offset);
        }
    }
}
