//! Unified session event stream

use serde::{Deserialize, Serialize};

use keepsake_navigation::{NavigationEvent, NavigationSnapshot};
use keepsake_playback::{PlaybackEvent, PlaybackSnapshot};

/// Events from either component, merged into one stream for the binding
/// layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// From the playback controller
    Playback(PlaybackEvent),
    /// From the page navigator
    Navigation(NavigationEvent),
}

/// Combined read-only view of the whole session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Playback controller state
    pub playback: PlaybackSnapshot,
    /// Navigator state
    pub navigation: NavigationSnapshot,
}
