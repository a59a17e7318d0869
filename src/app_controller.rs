use log::{debug, info, warn};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};

use crate::app_config::Config;
use crate::content::{ContentCache, ContentLoader};
use crate::errors::AppError;
use crate::focus::{FocusSynchronizer, TerminalListView};
use crate::playback::{
    ExternalPlayer, PlaybackDevice, PlaybackPosition, PlayerEvent, ScheduledAdvance, Sequencer,
    SettlingDelays,
};
use crate::providers::ContentProvider;

// @module: Application controller for the recitation player

/// Main application controller: loads the content and runs the player
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Loaded content
    content: Arc<ContentCache>,
}

impl Controller {
    /// Load all editions through `provider`; fails as a whole if any edition fails
    pub async fn load(config: Config, provider: Arc<dyn ContentProvider>) -> Result<Self, AppError> {
        let content = ContentLoader::new(provider).load(&config.editions).await?;

        info!(
            "Loaded {} sections, {} items",
            content.sections().len(),
            content.items().len()
        );

        Ok(Self::with_content(config, Arc::new(content)))
    }

    /// Create a controller over already-loaded content
    pub fn with_content(config: Config, content: Arc<ContentCache>) -> Self {
        Self { config, content }
    }

    pub fn content(&self) -> &Arc<ContentCache> {
        &self.content
    }

    /// Lines listing every section, one per line
    pub fn section_listing(&self) -> Vec<String> {
        section_lines(&self.content)
    }

    /// Play interactively from `start_section`, reading commands from stdin
    pub async fn play(&self, start_section: u32, start_item: Option<usize>) -> Result<(), AppError> {
        if self.content.section(start_section).is_none() {
            return Err(AppError::SectionNotFound(start_section));
        }
        if let Some(index) = start_item {
            if index >= self.content.section_len(start_section) {
                return Err(AppError::ItemNotFound {
                    section: start_section,
                    item: index + 1,
                });
            }
        }

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (motion_tx, motion_rx) = watch::channel(self.config.display.reduced_motion);

        let device = Arc::new(ExternalPlayer::new(
            self.config.playback.player_command.clone(),
            self.config.playback.player_args.clone(),
            events_tx.clone(),
        ));

        let delays = SettlingDelays {
            item: self.config.playback.item_delay(),
            section: self.config.playback.section_delay(),
        };

        let session = PlayerSession::new(
            self.content.clone(),
            device,
            delays,
            motion_rx,
            self.config.display.viewport_rows,
            events_tx,
        )
        .with_echo(true);
        let handle = session.handle(motion_tx);

        handle.select_section(start_section);
        if let Some(item) = start_item {
            handle.select_item(item);
        }

        print_help();
        let input = tokio::spawn(read_commands(handle.clone(), self.content.clone()));

        tokio::select! {
            _ = session.run(events_rx) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
            }
        }

        input.abort();
        Ok(())
    }
}

/// Sender side of the player loop, cheap to clone
#[derive(Debug, Clone)]
pub struct SessionHandle {
    events: mpsc::UnboundedSender<PlayerEvent>,
    reduced_motion: Arc<watch::Sender<bool>>,
}

impl SessionHandle {
    fn send(&self, event: PlayerEvent) {
        if self.events.send(event).is_err() {
            debug!("Player loop has stopped");
        }
    }

    pub fn select_section(&self, id: u32) {
        self.send(PlayerEvent::SelectSection(id));
    }

    pub fn select_item(&self, index: usize) {
        self.send(PlayerEvent::SelectItem(index));
    }

    pub fn next_section(&self) {
        self.send(PlayerEvent::NextSection);
    }

    pub fn playback_finished(&self) {
        self.send(PlayerEvent::PlaybackFinished);
    }

    pub fn quit(&self) {
        self.send(PlayerEvent::Quit);
    }

    /// Update the live reduced-motion preference
    pub fn set_reduced_motion(&self, enabled: bool) {
        self.reduced_motion.send_replace(enabled);
    }
}

/// The single event loop driving the sequencer, its timers and the views
#[derive(Debug)]
pub struct PlayerSession {
    sequencer: Sequencer,
    /// Same device the sequencer plays on; asked whether exit reports are current
    device: Arc<dyn PlaybackDevice>,
    focus: FocusSynchronizer,
    section_view: TerminalListView,
    item_view: TerminalListView,
    /// Section currently shown in the item list
    listed_section: Option<u32>,
    events_tx: mpsc::UnboundedSender<PlayerEvent>,
    positions: watch::Receiver<PlaybackPosition>,
    echo: bool,
}

impl PlayerSession {
    pub fn new(
        content: Arc<ContentCache>,
        device: Arc<dyn PlaybackDevice>,
        delays: SettlingDelays,
        reduced_motion: watch::Receiver<bool>,
        viewport_rows: usize,
        events_tx: mpsc::UnboundedSender<PlayerEvent>,
    ) -> Self {
        let mut section_view = TerminalListView::new(viewport_rows);
        section_view.set_rows(
            section_lines(&content)
                .into_iter()
                .map(|line| vec![line])
                .collect(),
        );

        let sequencer = Sequencer::new(content, device.clone(), delays);
        let positions = sequencer.subscribe();

        Self {
            sequencer,
            device,
            focus: FocusSynchronizer::new(reduced_motion),
            section_view,
            item_view: TerminalListView::new(viewport_rows),
            listed_section: None,
            events_tx,
            positions,
            echo: false,
        }
    }

    /// Print the frame on every position change
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Handle for feeding events into this session
    pub fn handle(&self, reduced_motion: watch::Sender<bool>) -> SessionHandle {
        SessionHandle {
            events: self.events_tx.clone(),
            reduced_motion: Arc::new(reduced_motion),
        }
    }

    pub fn position(&self) -> PlaybackPosition {
        self.sequencer.position()
    }

    pub fn generation(&self) -> u64 {
        self.sequencer.generation()
    }

    /// Observe position changes from outside the loop
    pub fn subscribe(&self) -> watch::Receiver<PlaybackPosition> {
        self.sequencer.subscribe()
    }

    pub fn section_view(&self) -> &TerminalListView {
        &self.section_view
    }

    pub fn item_view(&self) -> &TerminalListView {
        &self.item_view
    }

    /// Run until `Quit` arrives or every sender is gone
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<PlayerEvent>) {
        loop {
            tokio::select! {
                biased;

                changed = self.positions.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let position = *self.positions.borrow_and_update();
                    self.on_position_changed(position);
                }
                event = events.recv() => {
                    match event {
                        Some(event) => {
                            if !self.handle_event(event) {
                                break;
                            }
                        }
                        None => break,
                    }
                }
            }
        }
        debug!("Player loop finished at {}", self.sequencer.position());
    }

    /// Handle one event; returns `false` when the loop should stop
    pub fn handle_event(&mut self, event: PlayerEvent) -> bool {
        match event {
            PlayerEvent::SelectSection(id) => {
                self.sequencer.select_section(id);
            }
            PlayerEvent::SelectItem(index) => {
                self.sequencer.select_item(index);
            }
            PlayerEvent::NextSection => {
                let content = self.sequencer.content();
                let next = match self.sequencer.position().section {
                    Some(current) => content.next_section_after(current),
                    None => content.first_section(),
                }
                .map(|s| s.id);

                match next {
                    Some(id) => {
                        self.sequencer.select_section(id);
                    }
                    None => info!("Already at the last section"),
                }
            }
            PlayerEvent::PlaybackFinished => self.finish_current(),
            PlayerEvent::PlayerExited { play } => {
                if self.device.is_current(play) {
                    self.finish_current();
                } else {
                    debug!("Ignoring exit of superseded play {}", play);
                }
            }
            PlayerEvent::AdvanceDue(advance) => {
                self.sequencer.fire(advance);
            }
            PlayerEvent::Quit => return false,
        }
        true
    }

    fn finish_current(&mut self) {
        if let Some(advance) = self.sequencer.on_playback_finished() {
            self.schedule(advance);
        }
    }

    /// Deliver `advance` back to the loop once its delay has elapsed
    fn schedule(&self, advance: ScheduledAdvance) {
        debug!("Scheduling {:?} in {:?}", advance.action, advance.delay);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(advance.delay).await;
            let _ = events.send(PlayerEvent::AdvanceDue(advance));
        });
    }

    /// Refresh the item list when the section changes, then re-centre both views
    pub fn on_position_changed(&mut self, position: PlaybackPosition) {
        let content = self.sequencer.content().clone();

        if position.section != self.listed_section {
            let rows = position
                .section
                .map(|id| {
                    content
                        .section_items(id)
                        .into_iter()
                        .map(|item| item.display_lines())
                        .collect()
                })
                .unwrap_or_default();
            self.item_view.set_rows(rows);
            self.listed_section = position.section;
        }

        self.section_view
            .set_highlight(position.section.and_then(|id| content.section_row(id)));
        self.item_view.set_highlight(position.item);
        self.focus.sync(position, &content, &mut self.section_view, &mut self.item_view);

        if self.echo {
            println!();
            for line in self.frame() {
                println!("{}", line);
            }
        }
    }

    /// What the terminal shows: both list windows and a status line
    pub fn frame(&self) -> Vec<String> {
        let content = self.sequencer.content();
        let position = self.position();

        let mut lines = vec!["Sections".to_string()];
        lines.extend(self.section_view.render());
        lines.push(String::new());

        if let Some(section) = position.section.and_then(|id| content.section(id)) {
            lines.push(format!("{} ({})", section.english_name, section.name));
        }
        lines.extend(self.item_view.render());
        lines.push(status_line(content, position));
        lines
    }
}

/// A command typed at the player prompt
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// `s <id>`
    Section(u32),
    /// `i <n>`, 1-based on input, stored 0-based
    Item(usize),
    /// `n`
    Next,
    /// `m on|off`
    Motion(bool),
    /// `l`
    List,
    /// `h` or `?`
    Help,
    /// `q`
    Quit,
}

impl UserCommand {
    /// Parse one input line; `None` for anything unrecognised
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let command = parts.next()?.to_lowercase();
        let argument = parts.next();

        match (command.as_str(), argument) {
            ("s" | "section", Some(arg)) => arg.parse().ok().map(UserCommand::Section),
            ("i" | "item", Some(arg)) => arg
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(|n| UserCommand::Item(n - 1)),
            ("n" | "next", None) => Some(UserCommand::Next),
            ("m" | "motion", Some("on")) => Some(UserCommand::Motion(true)),
            ("m" | "motion", Some("off")) => Some(UserCommand::Motion(false)),
            ("l" | "list", None) => Some(UserCommand::List),
            ("h" | "help" | "?", None) => Some(UserCommand::Help),
            ("q" | "quit", None) => Some(UserCommand::Quit),
            _ => None,
        }
    }
}

async fn read_commands(handle: SessionHandle, content: Arc<ContentCache>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read input: {}", e);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match UserCommand::parse(&line) {
            Some(UserCommand::Section(id)) => handle.select_section(id),
            Some(UserCommand::Item(index)) => handle.select_item(index),
            Some(UserCommand::Next) => handle.next_section(),
            Some(UserCommand::Motion(enabled)) => {
                handle.set_reduced_motion(enabled);
                info!("Reduced motion {}", if enabled { "on" } else { "off" });
            }
            Some(UserCommand::List) => {
                for line in section_lines(&content) {
                    println!("{}", line);
                }
            }
            Some(UserCommand::Help) => print_help(),
            Some(UserCommand::Quit) => {
                handle.quit();
                break;
            }
            None => warn!("Unknown command: {}", line.trim()),
        }
    }
}

fn section_lines(content: &ContentCache) -> Vec<String> {
    content
        .sections()
        .iter()
        .map(|s| {
            format!(
                "{:>3}. {} ({}) - {} items",
                s.id,
                s.english_name,
                s.name,
                content.section_len(s.id)
            )
        })
        .collect()
}

fn status_line(content: &ContentCache, position: PlaybackPosition) -> String {
    let Some(section) = position.section.and_then(|id| content.section(id)) else {
        return "Idle. Type s <section> to start".to_string();
    };

    match position.item.and_then(|index| content.item(section.id, index)) {
        Some(item) if item.has_audio() => {
            format!("[{} {}:{}]", section.english_name, section.id, item.id)
        }
        // Nothing will report the end of a silent item
        Some(item) => format!(
            "[{} {}:{}] (no audio) type n or i <item> to continue",
            section.english_name, section.id, item.id
        ),
        None => format!("[{} {}] has no items", section.english_name, section.id),
    }
}

fn print_help() {
    println!("Commands: s <section>, i <item>, n (next section), m on|off (reduced motion), l (list), q (quit)");
}
