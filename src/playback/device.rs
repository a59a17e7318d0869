/*!
 * Playback devices.
 *
 * Only the sequencer commands the device. `ExternalPlayer` hands each locator
 * to an external command-line player and reports the natural end of playback
 * back to the player loop; `RecordingDevice` just remembers what it was asked
 * to play.
 *
 * Every `play` call takes a new token. An exit report carries the token of the
 * play it belongs to, so the loop can drop reports from superseded players.
 */

use log::{debug, error, warn};
use parking_lot::Mutex;
use std::fmt::Debug;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::process::Command;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::errors::PlaybackError;
use crate::playback::PlayerEvent;

/// The audio output
pub trait PlaybackDevice: Send + Sync + Debug {
    /// Load the locator and start playing it, replacing whatever was playing
    fn play(&self, locator: &str) -> Result<(), PlaybackError>;

    /// Silence the output; whatever was playing is superseded
    fn stop(&self);

    /// Whether `play` is the token of the most recent `play` call
    fn is_current(&self, play: u64) -> bool;
}

/// Plays locators with an external command such as `mpv`
#[derive(Debug)]
pub struct ExternalPlayer {
    /// Player executable
    command: String,
    /// Arguments placed before the locator
    args: Vec<String>,
    /// Where "playback finished" is reported
    events: UnboundedSender<PlayerEvent>,
    /// Task waiting on the running player process
    current: Mutex<Option<JoinHandle<()>>>,
    /// Token of the latest play call
    latest: AtomicU64,
}

impl ExternalPlayer {
    pub fn new(command: impl Into<String>, args: Vec<String>, events: UnboundedSender<PlayerEvent>) -> Self {
        Self {
            command: command.into(),
            args,
            events,
            current: Mutex::new(None),
            latest: AtomicU64::new(0),
        }
    }

    /// Kill the running player, if any, without reporting a finish
    fn kill_current(&self) {
        if let Some(handle) = self.current.lock().take() {
            // Dropping the waiting future drops the child, which kills it
            handle.abort();
        }
    }
}

impl PlaybackDevice for ExternalPlayer {
    fn play(&self, locator: &str) -> Result<(), PlaybackError> {
        // Whatever played before is superseded, even when nothing replaces it
        let play = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.kill_current();

        if locator.trim().is_empty() {
            return Err(PlaybackError::NoAudio);
        }

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .arg(locator)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| PlaybackError::SpawnFailed {
                command: self.command.clone(),
                message: e.to_string(),
            })?;

        debug!("Playing {} (play {})", locator, play);

        let events = self.events.clone();
        let locator = locator.to_string();
        let handle = tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => {
                    let _ = events.send(PlayerEvent::PlayerExited { play });
                }
                Ok(status) => {
                    // A broken link must not stall the sequence
                    warn!("Player exited with {} for {}", status, locator);
                    let _ = events.send(PlayerEvent::PlayerExited { play });
                }
                Err(e) => {
                    error!("Failed to wait for player: {}", e);
                }
            }
        });

        *self.current.lock() = Some(handle);
        Ok(())
    }

    fn stop(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
        self.kill_current();
    }

    fn is_current(&self, play: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == play
    }
}

impl Drop for ExternalPlayer {
    fn drop(&mut self) {
        self.kill_current();
    }
}

/// Device that records play commands instead of producing sound
#[derive(Debug, Default)]
pub struct RecordingDevice {
    played: Mutex<Vec<String>>,
    rejected: Mutex<Vec<String>>,
    latest: AtomicU64,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the device refuse a locator, as a dead link would
    pub fn reject(&self, locator: impl Into<String>) {
        self.rejected.lock().push(locator.into());
    }

    /// Locators accepted so far, in order
    pub fn played(&self) -> Vec<String> {
        self.played.lock().clone()
    }

    pub fn play_count(&self) -> usize {
        self.played.lock().len()
    }

    /// Token of the latest play call, 0 before any
    pub fn latest_play(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

impl PlaybackDevice for RecordingDevice {
    fn play(&self, locator: &str) -> Result<(), PlaybackError> {
        self.latest.fetch_add(1, Ordering::SeqCst);

        if locator.trim().is_empty() {
            return Err(PlaybackError::NoAudio);
        }

        if self.rejected.lock().iter().any(|r| r == locator) {
            return Err(PlaybackError::Rejected {
                locator: locator.to_string(),
                reason: "simulated dead link".to_string(),
            });
        }

        self.played.lock().push(locator.to_string());
        Ok(())
    }

    fn stop(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    fn is_current(&self, play: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == play
    }
}
