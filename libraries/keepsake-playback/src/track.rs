//! Track registry with fallback candidates

use serde::{Deserialize, Serialize};

use crate::error::{PlaybackError, Result};

/// A background track with an ordered fallback chain of resource locators
///
/// Candidates are tried strictly in order until one loads; assets get
/// renamed or dropped between deployments, so each track carries every
/// location it has ever lived at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Stable identifier, also the persisted preference value
    pub id: String,

    /// Display label for the track selector
    pub label: String,

    /// Resource locators tried in order until one loads
    pub candidates: Vec<String>,
}

impl Track {
    /// Create a track from an id, label and candidate list
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        candidates: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            candidates,
        }
    }
}

/// Immutable, ordered, non-empty collection of tracks
///
/// The first entry is the default track: unknown or stale identifiers
/// resolve to it.
#[derive(Debug, Clone)]
pub struct TrackRegistry {
    tracks: Vec<Track>,
}

impl TrackRegistry {
    /// Create a registry from an ordered track list
    ///
    /// # Errors
    /// Returns [`PlaybackError::EmptyRegistry`] if `tracks` is empty.
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(PlaybackError::EmptyRegistry);
        }
        Ok(Self { tracks })
    }

    /// The registry shipped with the card: two songs, each with the
    /// locations the audio files have historically been served from
    pub fn keepsake() -> Self {
        Self {
            tracks: vec![
                Track::new(
                    "song-1",
                    "Song 1",
                    vec![
                        "assets/audio/song1.mp3".to_string(),
                        "assets/audio/with-a-smile.mp3".to_string(),
                        "with-a-smile.mp3".to_string(),
                        "SpotiDown.App - With A Smile - Eraserheads.mp3".to_string(),
                    ],
                ),
                Track::new(
                    "song-2",
                    "Song 2",
                    vec![
                        "assets/audio/song2.mp3".to_string(),
                        "assets/audio/umaaraw-umuulan.mp3".to_string(),
                        "Umaaraw Umuulan.mp3".to_string(),
                    ],
                ),
            ],
        }
    }

    /// Resolve a track id to its registry index
    pub fn resolve(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Get a track by registry index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// The default track (first registry entry)
    pub fn default_track(&self) -> &Track {
        &self.tracks[0]
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false; an empty registry cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Iterate over tracks in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }
}
