//! Configuration and snapshot types for the playback controller

use serde::{Deserialize, Serialize};

use crate::events::PlaybackNotice;
use crate::volume::DEFAULT_VOLUME_PCT;

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Slider position used when no preference is persisted (default: 40)
    pub default_volume_pct: u8,

    /// Whether to persist track/volume choices to the preference store
    /// (default: true; disabled by kiosk-style hosts)
    pub persist_preferences: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            default_volume_pct: DEFAULT_VOLUME_PCT,
            persist_preferences: true,
        }
    }
}

/// Read-only view of controller state for UI bindings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Id of the current track
    pub track_id: String,

    /// Display label of the current track
    pub track_label: String,

    /// Applied linear volume (0.0-1.0)
    pub volume: f32,

    /// Volume slider position (20-100)
    pub volume_pct: u8,

    /// User-toggled mute flag
    pub muted: bool,

    /// Playback blocked awaiting a user gesture
    pub blocked: bool,

    /// Audio currently playing
    pub playing: bool,

    /// What the mute button shows: muted, blocked and paused all render
    /// the same "unmute" affordance
    pub effectively_muted: bool,

    /// Active sound notice, if any
    pub notice: Option<PlaybackNotice>,
}
