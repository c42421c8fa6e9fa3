//! The card session
//!
//! One owning object per card run. It wires the two components together
//! and applies the only two cross-component policies in the system:
//!
//! - opening the envelope is the user gesture expected to unblock
//!   autoplay, so `EnvelopeOpened` retries playback when it is blocked
//!   or was never attempted;
//! - the finale on the last page is paired with a soft music fade-out.
//!
//! Everything else is plain forwarding.

use tracing::info;

use keepsake_navigation::{NavigationEvent, PageDeck, PageNavigator};
use keepsake_playback::{
    AudioSink, PlaybackConfig, PlaybackController, PreferenceStore, TrackRegistry,
};

use crate::events::{SessionEvent, SessionSnapshot};

/// The owning session object for one card run
///
/// The presentation layer binds every gesture to a method here, pumps
/// [`advance`](Self::advance) from its timer, and renders from
/// [`snapshot`](Self::snapshot) plus [`take_events`](Self::take_events).
/// Dropping the session releases the audio resource (the controller's
/// `Drop` guarantees it even without an explicit `teardown`).
pub struct CardSession {
    playback: PlaybackController,
    navigator: PageNavigator,
    started: bool,
    pending_events: Vec<SessionEvent>,
}

impl CardSession {
    /// Assemble a session from a deck, a track registry and the host seams
    pub fn new(
        deck: PageDeck,
        registry: TrackRegistry,
        sink: Box<dyn AudioSink>,
        prefs: Box<dyn PreferenceStore>,
        config: PlaybackConfig,
    ) -> Self {
        Self {
            playback: PlaybackController::new(registry, sink, prefs, config),
            navigator: PageNavigator::new(deck),
            started: false,
            pending_events: Vec::new(),
        }
    }

    /// Start the session: seed the entry page (optionally from a
    /// deep-link fragment), restore preferences and attempt playback
    ///
    /// Idempotent; repeated calls are no-ops.
    pub fn start(&mut self, deep_link: Option<&str>, now_ms: u64) {
        if self.started {
            return;
        }
        self.started = true;
        info!("Card session starting");
        self.navigator.start(deep_link, now_ms);
        self.playback.start(now_ms);
        self.sync(now_ms);
    }

    // ========================================================================
    // Navigation gestures
    // ========================================================================

    /// Open the sealed envelope
    pub fn open_envelope(&mut self, now_ms: u64) {
        self.navigator.open_envelope(now_ms);
        self.sync(now_ms);
    }

    /// Go forward one page
    pub fn next_page(&mut self, now_ms: u64) {
        self.navigator.next(now_ms);
        self.sync(now_ms);
    }

    /// Go back one page
    pub fn back_page(&mut self, now_ms: u64) {
        self.navigator.back(now_ms);
        self.sync(now_ms);
    }

    /// Jump to a page (clamped into the deck)
    pub fn go_to_page(&mut self, page: u32, now_ms: u64) {
        self.navigator.navigate_to(page, now_ms);
        self.sync(now_ms);
    }

    /// Start over at the sealed envelope
    pub fn start_over(&mut self, now_ms: u64) {
        self.navigator.restart(now_ms);
        self.sync(now_ms);
    }

    /// Toggle the hidden bonus message on the final page
    pub fn toggle_hidden_message(&mut self, now_ms: u64) {
        self.navigator.toggle_hidden_message();
        self.sync(now_ms);
    }

    // ========================================================================
    // Playback gestures
    // ========================================================================

    /// Select a background track
    pub fn select_track(&mut self, id: &str, now_ms: u64) {
        self.playback.select_track(id, now_ms);
        self.sync(now_ms);
    }

    /// Move the volume slider
    pub fn set_volume_pct(&mut self, pct: u8, now_ms: u64) {
        self.playback.set_volume_pct(pct, now_ms);
        self.sync(now_ms);
    }

    /// Toggle mute (a play retry while blocked)
    pub fn toggle_mute(&mut self, now_ms: u64) {
        self.playback.toggle_mute(now_ms);
        self.sync(now_ms);
    }

    /// Replay the music from the start
    pub fn replay_music(&mut self, now_ms: u64) {
        self.playback.restart(now_ms);
        self.sync(now_ms);
    }

    /// Act on the "tap to enable sound" notice
    pub fn enable_sound(&mut self, now_ms: u64) {
        self.playback.enable_sound(now_ms);
        self.sync(now_ms);
    }

    // ========================================================================
    // Clock & lifecycle
    // ========================================================================

    /// Pump both components' timed work up to `now_ms`
    pub fn advance(&mut self, now_ms: u64) {
        self.navigator.advance(now_ms);
        // Navigator-driven effects (the finale fade-out) must land before
        // the playback ticks run
        self.sync(now_ms);
        self.playback.advance(now_ms);
        self.collect_playback();
    }

    /// Release the audio resource; idempotent
    pub fn teardown(&mut self) {
        self.playback.teardown();
    }

    // ========================================================================
    // Observability
    // ========================================================================

    /// Drain the merged event stream
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Combined read-only view of both components
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            playback: self.playback.snapshot(),
            navigation: self.navigator.snapshot(),
        }
    }

    /// The playback controller (read-only)
    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    /// The page navigator (read-only)
    pub fn navigator(&self) -> &PageNavigator {
        &self.navigator
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Drain navigator events, apply cross-component policies, then merge
    /// both streams into the session queue
    fn sync(&mut self, now_ms: u64) {
        let nav_events = self.navigator.take_events();
        for event in &nav_events {
            match event {
                NavigationEvent::EnvelopeOpened => {
                    if self.playback.is_blocked() || !self.playback.has_attempted_play() {
                        self.playback.play(now_ms);
                    }
                }
                NavigationEvent::FinaleStarted => self.playback.fade_out(now_ms),
                _ => {}
            }
        }
        self.pending_events
            .extend(nav_events.into_iter().map(SessionEvent::Navigation));
        self.collect_playback();
    }

    fn collect_playback(&mut self) {
        self.pending_events.extend(
            self.playback
                .take_events()
                .into_iter()
                .map(SessionEvent::Playback),
        );
    }
}

impl std::fmt::Debug for CardSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardSession")
            .field("started", &self.started)
            .field("navigator", &self.navigator)
            .field("playback", &self.playback)
            .finish_non_exhaustive()
    }
}
