//! Playback events
//!
//! Event-based communication for UI synchronization. The controller queues
//! events as side effects of its operations; the binding layer drains them
//! with `take_events` after each call and mirrors them into the view.

use serde::{Deserialize, Serialize};

use crate::fade::FadeDirection;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Play/pause/blocked state changed
    StateChanged {
        /// Whether audio is currently playing
        playing: bool,
        /// Whether playback is blocked awaiting a user gesture
        blocked: bool,
    },

    /// A different track became current
    TrackChanged {
        /// Id of the now-current track
        track_id: String,
        /// Display label of the now-current track
        label: String,
    },

    /// An unknown track id was requested; the default track took over
    ConfigurationWarning {
        /// The id that failed to resolve
        requested: String,
    },

    /// A single resource candidate failed to load; probing continues
    CandidateFailed {
        /// The candidate that failed
        url: String,
    },

    /// A resource candidate loaded successfully; probing stopped
    SourceLoaded {
        /// The candidate that loaded
        url: String,
    },

    /// The persistent sound notice was raised
    NoticeRaised {
        /// Why sound is unavailable
        notice: PlaybackNotice,
    },

    /// The sound notice was cleared
    NoticeCleared,

    /// Volume or mute changed
    VolumeChanged {
        /// Slider position (20-100)
        pct: u8,
        /// Whether audio is muted
        muted: bool,
    },

    /// A fade ramp started
    FadeStarted {
        /// Ramp direction
        direction: FadeDirection,
    },

    /// A fade ramp ran to completion (not superseded)
    FadeCompleted {
        /// Ramp direction
        direction: FadeDirection,
    },
}

/// The persistent "sound unavailable" notice
///
/// Shown as a "tap to enable sound" banner. Stays raised until a play
/// attempt succeeds or the user acts on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackNotice {
    /// Host rejected automatic playback; a user gesture will retry
    AutoplayBlocked,
    /// Every resource candidate for the current track failed to load
    NoPlayableSource,
}
