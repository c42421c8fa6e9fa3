//! Playback controller
//!
//! Owns the single looping background-audio session: track selection with
//! fallback-candidate probing, the audibility-floored volume, fade ramps,
//! mute, and recovery from host autoplay rejection.
//!
//! Every timed operation takes `now_ms`, milliseconds on a monotonic clock
//! supplied by the host; `advance` pumps due fade ticks. Nothing blocks
//! and nothing here owns a thread or a timer.

use tracing::{debug, info, warn};

use crate::error::SinkError;
use crate::events::{PlaybackEvent, PlaybackNotice};
use crate::fade::{FadeDirection, FadeRamp, FadeTick};
use crate::sink::AudioSink;
use crate::store::{PreferenceStore, KEY_SELECTED_TRACK, KEY_VOLUME_PCT};
use crate::track::{Track, TrackRegistry};
use crate::types::{PlaybackConfig, PlaybackSnapshot};
use crate::volume::{self, Volume};

/// The single audio session for a card run
///
/// All mutation of the underlying sink goes through this controller;
/// that is what keeps the one-ramp and one-probe invariants honest.
/// Dropping the controller releases the sink.
pub struct PlaybackController {
    registry: TrackRegistry,
    config: PlaybackConfig,
    sink: Box<dyn AudioSink>,
    prefs: Box<dyn PreferenceStore>,

    /// Registry index of the current track
    current: usize,
    volume: Volume,
    blocked: bool,
    playing: bool,
    /// Whether any play attempt has ever been made this session
    attempted_play: bool,
    /// Whether some candidate for the current track loaded
    source_loaded: bool,
    notice: Option<PlaybackNotice>,
    fade: Option<FadeRamp>,
    torn_down: bool,

    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create a controller over a sink and preference store
    ///
    /// No audio is touched until [`start`](Self::start) or an explicit
    /// operation runs.
    pub fn new(
        registry: TrackRegistry,
        sink: Box<dyn AudioSink>,
        prefs: Box<dyn PreferenceStore>,
        config: PlaybackConfig,
    ) -> Self {
        let volume = Volume::new(config.default_volume_pct);
        Self {
            registry,
            config,
            sink,
            prefs,
            current: 0,
            volume,
            blocked: false,
            playing: false,
            attempted_play: false,
            source_loaded: false,
            notice: None,
            fade: None,
            torn_down: false,
            pending_events: Vec::new(),
        }
    }

    /// Session start: restore preferences and make the first play attempt
    ///
    /// Stale persisted track ids fall back to the default silently; the
    /// configuration warning is reserved for explicit selection of an
    /// unknown id.
    pub fn start(&mut self, now_ms: u64) {
        if self.torn_down {
            return;
        }

        let pct = volume::parse_pct(
            self.prefs
                .get(KEY_VOLUME_PCT)
                .ok()
                .flatten()
                .as_deref(),
        );
        self.volume = Volume::new(pct);

        let saved = self.prefs.get(KEY_SELECTED_TRACK).ok().flatten();
        let track_id = saved
            .filter(|id| self.registry.resolve(id).is_some())
            .unwrap_or_else(|| self.registry.default_track().id.clone());

        info!(track = %track_id, volume_pct = pct, "Starting playback session");
        self.select_track(&track_id, now_ms);
    }

    /// Select a track by id and try to play it
    ///
    /// Unknown ids fall back to the default track (with a warning event).
    /// Resource candidates are probed strictly in order; if none loads,
    /// the sound notice is raised and no play attempt is made.
    pub fn select_track(&mut self, id: &str, now_ms: u64) {
        if self.torn_down {
            return;
        }

        let index = match self.registry.resolve(id) {
            Some(index) => index,
            None => {
                warn!(requested = %id, "Unknown track id, falling back to default");
                self.push(PlaybackEvent::ConfigurationWarning {
                    requested: id.to_string(),
                });
                0
            }
        };
        self.current = index;

        // Probing supersedes any ramp in flight
        self.fade = None;

        let track = self
            .registry
            .get(index)
            .cloned()
            .unwrap_or_else(|| self.registry.default_track().clone());
        self.push(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            label: track.label.clone(),
        });

        self.source_loaded = false;
        for url in &track.candidates {
            match self.sink.load(url) {
                Ok(()) => {
                    debug!(url = %url, "Audio source loaded");
                    self.source_loaded = true;
                    self.push(PlaybackEvent::SourceLoaded { url: url.clone() });
                    break;
                }
                Err(err) => {
                    debug!(url = %url, error = %err, "Audio candidate failed, trying next");
                    self.push(PlaybackEvent::CandidateFailed { url: url.clone() });
                }
            }
        }

        if self.config.persist_preferences {
            self.prefs.set(KEY_SELECTED_TRACK, &track.id).ok();
        }

        if self.source_loaded {
            self.play(now_ms);
        } else {
            warn!(track = %track.id, "All audio candidates failed to load");
            self.playing = false;
            self.raise_notice(PlaybackNotice::NoPlayableSource);
        }
    }

    /// Attempt to start or resume looped playback
    ///
    /// The attempt may be rejected by host autoplay policy; rejection is
    /// recorded in the `blocked` flag and the sound notice, never raised
    /// as an error.
    pub fn play(&mut self, now_ms: u64) {
        if self.torn_down {
            return;
        }
        if !self.source_loaded {
            self.raise_notice(PlaybackNotice::NoPlayableSource);
            return;
        }

        self.sink.set_looping(true);
        let base = self.volume.playback_base();
        self.volume.set_applied(base);
        self.sink.set_volume(base);
        self.attempted_play = true;

        match self.sink.play() {
            Ok(()) => {
                self.blocked = false;
                self.playing = true;
                self.clear_notice();
                self.push_state_changed();
                self.begin_fade_in(now_ms);
            }
            Err(err) => {
                match err {
                    SinkError::AutoplayBlocked => {
                        debug!("Playback blocked by autoplay policy, awaiting user gesture");
                    }
                    other => warn!(error = %other, "Play attempt failed"),
                }
                self.blocked = true;
                self.playing = false;
                self.push_state_changed();
                self.raise_notice(PlaybackNotice::AutoplayBlocked);
            }
        }
    }

    /// Start a soft fade-out toward silence, then pause
    ///
    /// Replaces any ramp in flight. Terminates within the fade-out tick
    /// budget even if volume arithmetic stalls.
    pub fn fade_out(&mut self, now_ms: u64) {
        if self.torn_down {
            return;
        }
        self.fade = Some(FadeRamp::fade_out(now_ms));
        self.push(PlaybackEvent::FadeStarted {
            direction: FadeDirection::Out,
        });
    }

    /// User-driven volume change from the slider
    ///
    /// Clamps to 20-100, persists, cancels any ramp, applies immediately.
    /// Changing volume while paused (and not blocked) resumes playback.
    pub fn set_volume_pct(&mut self, pct: u8, now_ms: u64) {
        if self.torn_down {
            return;
        }
        let pct = self.volume.set_preferred_pct(pct);
        if self.config.persist_preferences {
            self.prefs.set(KEY_VOLUME_PCT, &pct.to_string()).ok();
        }

        self.fade = None;
        let applied = self.volume.preferred();
        self.volume.set_applied(applied);
        self.sink.set_volume(applied);
        self.push_volume_changed();

        if !self.playing && !self.blocked {
            self.play(now_ms);
        }
    }

    /// Toggle mute
    ///
    /// While blocked, the mute button and the blocked state are observably
    /// identical, so the toggle is reinterpreted as a play retry.
    /// Unmuting while paused resumes playback.
    pub fn toggle_mute(&mut self, now_ms: u64) {
        if self.torn_down {
            return;
        }
        if self.blocked {
            self.play(now_ms);
            return;
        }

        let muted = self.volume.toggle_mute();
        self.sink.set_muted(muted);
        self.push_volume_changed();

        if !muted && !self.playing {
            self.play(now_ms);
        }
    }

    /// Seek to the start of the track and play again
    pub fn restart(&mut self, now_ms: u64) {
        if self.torn_down {
            return;
        }
        self.sink.seek_to_start();
        self.play(now_ms);
    }

    /// User acted on the sound notice: clear it and retry
    pub fn enable_sound(&mut self, now_ms: u64) {
        if self.torn_down {
            return;
        }
        self.clear_notice();
        self.play(now_ms);
    }

    /// Pump every fade tick that has come due at `now_ms`
    pub fn advance(&mut self, now_ms: u64) {
        if self.torn_down {
            return;
        }

        while let Some(ramp) = self.fade.as_mut() {
            if !ramp.is_due(now_ms) {
                break;
            }
            match ramp.tick(self.volume.applied()) {
                FadeTick::Stepped(v) => {
                    self.volume.set_applied(v);
                    self.sink.set_volume(v);
                }
                FadeTick::Finished(v) => {
                    let direction = ramp.direction();
                    self.volume.set_applied(v);
                    self.sink.set_volume(v);
                    self.fade = None;
                    self.push(PlaybackEvent::FadeCompleted { direction });
                    if direction == FadeDirection::Out {
                        self.sink.pause();
                        self.playing = false;
                        self.push_state_changed();
                    }
                }
            }
        }
    }

    /// Release the audio resource
    ///
    /// Idempotent; every later operation is a no-op. Also invoked by `Drop`.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.fade = None;
        self.playing = false;
        self.sink.release();
        self.torn_down = true;
        debug!("Audio sink released");
    }

    // ========================================================================
    // Observability
    // ========================================================================

    /// Drain all pending events
    pub fn take_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Read-only view of the current state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        let track = self
            .registry
            .get(self.current)
            .unwrap_or_else(|| self.registry.default_track());
        PlaybackSnapshot {
            track_id: track.id.clone(),
            track_label: track.label.clone(),
            volume: self.volume.applied(),
            volume_pct: self.volume.preferred_pct(),
            muted: self.volume.is_muted(),
            blocked: self.blocked,
            playing: self.playing,
            effectively_muted: self.volume.is_muted() || self.blocked || !self.playing,
            notice: self.notice,
        }
    }

    /// Current track
    pub fn current_track(&self) -> &Track {
        self.registry
            .get(self.current)
            .unwrap_or_else(|| self.registry.default_track())
    }

    /// Whether playback is blocked awaiting a user gesture
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Whether audio is currently playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether any play attempt has been made this session
    pub fn has_attempted_play(&self) -> bool {
        self.attempted_play
    }

    /// Active sound notice, if any
    pub fn notice(&self) -> Option<PlaybackNotice> {
        self.notice
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn begin_fade_in(&mut self, now_ms: u64) {
        // A near-silent element ramps from true zero
        if self.volume.applied() < 0.01 {
            self.volume.set_applied(0.0);
            self.sink.set_volume(0.0);
        }
        let target = self.volume.fade_in_target();
        if self.volume.applied() >= target {
            self.fade = None;
            return;
        }
        self.fade = Some(FadeRamp::fade_in(target, now_ms));
        self.push(PlaybackEvent::FadeStarted {
            direction: FadeDirection::In,
        });
    }

    fn raise_notice(&mut self, notice: PlaybackNotice) {
        if self.notice != Some(notice) {
            self.notice = Some(notice);
            self.push(PlaybackEvent::NoticeRaised { notice });
        }
    }

    fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.push(PlaybackEvent::NoticeCleared);
        }
    }

    fn push_state_changed(&mut self) {
        let (playing, blocked) = (self.playing, self.blocked);
        self.push(PlaybackEvent::StateChanged { playing, blocked });
    }

    fn push_volume_changed(&mut self) {
        let (pct, muted) = (self.volume.preferred_pct(), self.volume.is_muted());
        self.push(PlaybackEvent::VolumeChanged { pct, muted });
    }

    fn push(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("current", &self.current)
            .field("volume", &self.volume)
            .field("blocked", &self.blocked)
            .field("playing", &self.playing)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}
