/*!
 * Tests for scroll offsets and focus synchronization
 */

use tokio::sync::watch;

use tilawa::focus::{
    scroll_offset, ElementBounds, FocusSynchronizer, ScrollBehavior, ScrollView, TerminalListView,
};
use tilawa::playback::PlaybackPosition;

use crate::common;

/// A view with fixed geometry that records scroll commands
struct FixedView {
    height: Option<f64>,
    rows: Vec<ElementBounds>,
    scrolls: Vec<(f64, ScrollBehavior)>,
}

impl FixedView {
    fn new(height: Option<f64>, row_height: f64, rows: usize) -> Self {
        Self {
            height,
            rows: (0..rows)
                .map(|r| ElementBounds { top: r as f64 * row_height, height: row_height })
                .collect(),
            scrolls: Vec::new(),
        }
    }
}

impl ScrollView for FixedView {
    fn container_height(&self) -> Option<f64> {
        self.height
    }

    fn element_bounds(&self, row: usize) -> Option<ElementBounds> {
        self.rows.get(row).copied()
    }

    fn scroll_to(&mut self, offset: f64, behavior: ScrollBehavior) {
        self.scrolls.push((offset, behavior));
    }
}

#[test]
fn test_scrollOffset_withReferenceGeometry_shouldBe825() {
    assert_eq!(scroll_offset(400.0, 1000.0, 50.0), 825.0);
}

#[test]
fn test_scrollOffset_whenNegative_shouldClampToZero() {
    assert_eq!(scroll_offset(400.0, 0.0, 50.0), 0.0);
    assert_eq!(scroll_offset(1000.0, 100.0, 10.0), 0.0);
}

#[test]
fn test_focus_shouldCentreRowWithCurrentBehavior() {
    let (motion_tx, motion_rx) = watch::channel(false);
    let focus = FocusSynchronizer::new(motion_rx);
    let mut view = FixedView::new(Some(400.0), 50.0, 30);

    assert_eq!(focus.focus(&mut view, 20), Some(825.0));
    motion_tx.send_replace(true);
    assert_eq!(focus.focus(&mut view, 1), Some(0.0));

    assert_eq!(
        view.scrolls,
        vec![(825.0, ScrollBehavior::Smooth), (0.0, ScrollBehavior::Instant)]
    );
}

#[test]
fn test_focus_withUnresolvableTarget_shouldNotScroll() {
    let (_motion_tx, motion_rx) = watch::channel(false);
    let focus = FocusSynchronizer::new(motion_rx);

    let mut detached = FixedView::new(None, 50.0, 10);
    assert!(focus.focus(&mut detached, 3).is_none());
    assert!(detached.scrolls.is_empty());

    let mut short = FixedView::new(Some(400.0), 50.0, 2);
    assert!(focus.focus(&mut short, 5).is_none());
    assert!(short.scrolls.is_empty());
}

/// The section selector and the item list are scrolled independently
#[test]
fn test_sync_shouldScrollBothViewsIndependently() {
    let content = common::staircase(10);
    let (_motion_tx, motion_rx) = watch::channel(true);
    let focus = FocusSynchronizer::new(motion_rx);

    let mut sections = FixedView::new(Some(100.0), 20.0, 10);
    let mut items = FixedView::new(None, 30.0, 9);

    focus.sync(PlaybackPosition::new(9, Some(4)), &content, &mut sections, &mut items);

    // Row 8 of the selector: 160 - 50 + 10
    assert_eq!(sections.scrolls, vec![(120.0, ScrollBehavior::Instant)]);
    // The item list has no resolvable container
    assert!(items.scrolls.is_empty());
}

#[test]
fn test_sync_whenIdleOrWithoutItem_shouldOnlyTouchWhatExists() {
    let content = common::staircase(3);
    let (_motion_tx, motion_rx) = watch::channel(false);
    let focus = FocusSynchronizer::new(motion_rx);
    let mut sections = FixedView::new(Some(100.0), 20.0, 3);
    let mut items = FixedView::new(Some(100.0), 20.0, 3);

    focus.sync(PlaybackPosition::IDLE, &content, &mut sections, &mut items);
    assert!(sections.scrolls.is_empty());
    assert!(items.scrolls.is_empty());

    focus.sync(PlaybackPosition::new(2, None), &content, &mut sections, &mut items);
    assert_eq!(sections.scrolls.len(), 1);
    assert!(items.scrolls.is_empty());
}

#[test]
fn test_terminalListView_shouldCentreTallRows() {
    let (_motion_tx, motion_rx) = watch::channel(false);
    let focus = FocusSynchronizer::new(motion_rx);

    let mut view = TerminalListView::new(10);
    view.set_rows((0..20).map(|r| vec![format!("{}a", r), format!("{}b", r), format!("{}c", r)]).collect());

    // Row 10 starts at line 30 and is 3 lines tall: 30 - 5 + 1.5
    assert_eq!(focus.focus(&mut view, 10), Some(26.5));
    assert_eq!(view.offset(), 26.5);
    assert_eq!(view.last_behavior(), Some(ScrollBehavior::Smooth));
    assert_eq!(view.visible_lines().first().copied(), Some("9a"));
}
