/*!
 * Playback sequencing.
 *
 * - `playback::sequencer`: decides what plays next and when
 * - `playback::device`: the single audio output handle
 */

pub mod device;
pub mod sequencer;

pub use device::{ExternalPlayer, PlaybackDevice, RecordingDevice};
pub use sequencer::{AdvanceAction, ScheduledAdvance, Sequencer, SettlingDelays};

/// What is currently active: a section and an item index within its list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackPosition {
    pub section: Option<u32>,
    pub item: Option<usize>,
}

impl PlaybackPosition {
    /// Nothing selected yet
    pub const IDLE: PlaybackPosition = PlaybackPosition { section: None, item: None };

    pub fn new(section: u32, item: Option<usize>) -> Self {
        Self {
            section: Some(section),
            item,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.section.is_none()
    }
}

impl std::fmt::Display for PlaybackPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.section, self.item) {
            (None, _) => write!(f, "idle"),
            (Some(section), None) => write!(f, "{}:-", section),
            (Some(section), Some(item)) => write!(f, "{}:{}", section, item),
        }
    }
}

/// Events consumed by the player loop, one at a time
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// User picked a section
    SelectSection(u32),
    /// User picked an item of the active section
    SelectItem(usize),
    /// User asked for the section after the active one
    NextSection,
    /// The current audio reached its natural end
    PlaybackFinished,
    /// A player process ended; `play` is the token its `play` call was issued
    PlayerExited { play: u64 },
    /// A settling delay elapsed
    AdvanceDue(ScheduledAdvance),
    /// Stop the loop
    Quit,
}
