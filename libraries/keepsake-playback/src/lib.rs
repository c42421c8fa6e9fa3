//! Keepsake - Playback Controller
//!
//! Platform-agnostic background-music management for the greeting card.
//!
//! This crate provides:
//! - A track registry with ordered fallback candidates per track
//! - Volume control with a 20% audibility floor and mute
//! - Tick-driven fade ramps (soft fade-in on play, capped fade-out)
//! - Autoplay-rejection recovery (the `blocked` flag + sound notice)
//! - Preference persistence for the selected track and volume slider
//!
//! # Architecture
//!
//! `keepsake-playback` holds no UI references and owns no thread or timer.
//! The host supplies:
//! - an [`AudioSink`] over its audio element,
//! - a [`PreferenceStore`] over its key-value storage,
//! - the clock, by calling operations with `now_ms` and pumping
//!   [`PlaybackController::advance`] on its own cadence.
//!
//! All scheduling is deadline arithmetic on `now_ms`, so behavior is
//! deterministic under test.
//!
//! # Example
//!
//! ```rust
//! use keepsake_playback::{
//!     MemoryStore, NullSink, PlaybackConfig, PlaybackController, TrackRegistry,
//! };
//!
//! let mut controller = PlaybackController::new(
//!     TrackRegistry::keepsake(),
//!     Box::new(NullSink),
//!     Box::new(MemoryStore::new()),
//!     PlaybackConfig::default(),
//! );
//!
//! // Session start: restores preferences, probes candidates, tries to play
//! controller.start(0);
//!
//! // Host timer pumps fade ticks
//! controller.advance(200);
//!
//! // User gestures
//! controller.set_volume_pct(60, 400);
//! controller.toggle_mute(500);
//!
//! let snapshot = controller.snapshot();
//! assert!(snapshot.volume >= 0.2 || !snapshot.playing);
//! ```

mod controller;
mod error;
mod events;
mod fade;
mod sink;
mod store;
mod track;
mod types;
mod volume;

// Public exports
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result, SinkError, StoreError};
pub use events::{PlaybackEvent, PlaybackNotice};
pub use fade::{FadeDirection, FADE_OUT_FLOOR, FADE_OUT_MAX_TICKS, FADE_STEP, FADE_TICK_MS};
pub use sink::{AudioSink, NullSink};
pub use store::{MemoryStore, PreferenceStore, KEY_SELECTED_TRACK, KEY_VOLUME_PCT};
pub use track::{Track, TrackRegistry};
pub use types::{PlaybackConfig, PlaybackSnapshot};
pub use volume::{
    Volume, COMFORT_TARGET, DEFAULT_VOLUME_PCT, MAX_VOLUME_PCT, MIN_VOLUME, MIN_VOLUME_PCT,
};
