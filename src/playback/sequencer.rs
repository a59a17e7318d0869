/*!
 * Playback sequencer.
 *
 * Owns the playback position and turns "one item finished" into "what plays
 * next". Pauses between items are not awaited here: `on_playback_finished`
 * returns a `ScheduledAdvance` that the caller delivers back through `fire`
 * once its delay has elapsed. Every manual selection bumps the generation
 * marker, so an advance scheduled before it is discarded when it fires.
 */

use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::content::ContentCache;
use crate::playback::device::PlaybackDevice;
use crate::playback::PlaybackPosition;

/// Fixed pauses inserted between transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlingDelays {
    /// Between two items of the same section
    pub item: Duration,
    /// Before entering the next section
    pub section: Duration,
}

impl Default for SettlingDelays {
    fn default() -> Self {
        Self {
            item: Duration::from_secs(1),
            section: Duration::from_secs(2),
        }
    }
}

/// What a delayed advance does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceAction {
    /// Play an item the position already points at
    PlayItem { section: u32, index: usize },
    /// Move to the first item of a section and play it
    EnterSection { section: u32 },
}

/// A delayed action tagged with the generation it was scheduled in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAdvance {
    pub generation: u64,
    pub delay: Duration,
    pub action: AdvanceAction,
}

/// Decides what plays, in which order and with which pauses
#[derive(Debug)]
pub struct Sequencer {
    content: Arc<ContentCache>,
    device: Arc<dyn PlaybackDevice>,
    delays: SettlingDelays,
    position: PlaybackPosition,
    generation: u64,
    position_tx: watch::Sender<PlaybackPosition>,
}

impl Sequencer {
    pub fn new(content: Arc<ContentCache>, device: Arc<dyn PlaybackDevice>, delays: SettlingDelays) -> Self {
        let (position_tx, _) = watch::channel(PlaybackPosition::IDLE);
        Self {
            content,
            device,
            delays,
            position: PlaybackPosition::IDLE,
            generation: 0,
            position_tx,
        }
    }

    pub fn position(&self) -> PlaybackPosition {
        self.position
    }

    /// Current generation marker
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn content(&self) -> &Arc<ContentCache> {
        &self.content
    }

    /// Observe every position change, including auto-advances
    pub fn subscribe(&self) -> watch::Receiver<PlaybackPosition> {
        self.position_tx.subscribe()
    }

    /// Make a section active and play its first item.
    ///
    /// Unknown sections are ignored and yield `None`.
    pub fn select_section(&mut self, id: u32) -> Option<PlaybackPosition> {
        if self.content.section(id).is_none() {
            warn!("Section {} not found", id);
            return None;
        }

        self.generation += 1;
        Some(self.enter_section(id))
    }

    /// Make an item of the active section current and play it.
    ///
    /// Without an active section, or with an out-of-range index, nothing happens.
    pub fn select_item(&mut self, index: usize) -> Option<PlaybackPosition> {
        let section = self.position.section?;
        if index >= self.content.section_len(section) {
            warn!("Item {} is out of range for section {}", index, section);
            return None;
        }

        self.generation += 1;
        self.set_position(PlaybackPosition::new(section, Some(index)));
        self.play(section, index);
        Some(self.position)
    }

    /// React to the natural end of the current item's audio.
    ///
    /// Within a section the position moves on immediately and the returned
    /// advance plays the item after the item delay. At the end of a section the
    /// returned advance enters the next one after the section delay. At the end
    /// of the content nothing is returned.
    pub fn on_playback_finished(&mut self) -> Option<ScheduledAdvance> {
        let section = self.position.section?;
        let len = self.content.section_len(section);
        if len == 0 {
            return None;
        }
        let current = self.position.item?;

        let next = current + 1;
        if next < len {
            self.set_position(PlaybackPosition::new(section, Some(next)));
            return Some(ScheduledAdvance {
                generation: self.generation,
                delay: self.delays.item,
                action: AdvanceAction::PlayItem { section, index: next },
            });
        }

        match self.content.next_section_after(section) {
            Some(next_section) => Some(ScheduledAdvance {
                generation: self.generation,
                delay: self.delays.section,
                action: AdvanceAction::EnterSection { section: next_section.id },
            }),
            None => {
                info!("Reached the end of the content");
                None
            }
        }
    }

    /// Apply an advance whose delay has elapsed.
    ///
    /// Returns `false` when the advance was stale and got discarded.
    pub fn fire(&mut self, advance: ScheduledAdvance) -> bool {
        if advance.generation != self.generation {
            debug!(
                "Discarding stale {:?} (generation {}, now {})",
                advance.action, advance.generation, self.generation
            );
            return false;
        }

        match advance.action {
            AdvanceAction::PlayItem { section, index } => {
                if self.position != PlaybackPosition::new(section, Some(index)) {
                    debug!("Discarding {:?}, position moved to {}", advance.action, self.position);
                    return false;
                }
                self.play(section, index);
            }
            AdvanceAction::EnterSection { section } => {
                self.enter_section(section);
            }
        }
        true
    }

    fn enter_section(&mut self, id: u32) -> PlaybackPosition {
        if self.content.section_len(id) == 0 {
            self.set_position(PlaybackPosition::new(id, None));
        } else {
            self.set_position(PlaybackPosition::new(id, Some(0)));
            self.play(id, 0);
        }
        self.position
    }

    fn set_position(&mut self, position: PlaybackPosition) {
        self.position = position;
        self.position_tx.send_replace(position);
    }

    /// Send an item's audio to the device; failures are logged, never raised
    fn play(&self, section: u32, index: usize) {
        let Some(item) = self.content.item(section, index) else {
            return;
        };

        if !item.has_audio() {
            debug!("Item {}:{} has no audio", section, item.id);
            self.device.stop();
            return;
        }

        if let Err(e) = self.device.play(&item.audio) {
            warn!("Could not play {}:{}: {}", section, item.id, e);
        }
    }
}
