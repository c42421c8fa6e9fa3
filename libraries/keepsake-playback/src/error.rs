//! Error types for the playback controller

use thiserror::Error;

/// Playback errors
///
/// Only construction can fail hard. Runtime audio and preference failures
/// are absorbed into controller state (the `blocked` flag, the sound
/// notice) and never propagate.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Track registry has no tracks
    #[error("Track registry is empty")]
    EmptyRegistry,
}

/// Errors from the host audio element
#[derive(Debug, Error)]
pub enum SinkError {
    /// Host rejected automatic playback; a user gesture is required
    #[error("Automatic playback rejected by host")]
    AutoplayBlocked,

    /// A resource candidate failed to load
    #[error("Failed to load audio source: {0}")]
    LoadFailed(String),

    /// The audio element is gone or unusable
    #[error("Audio sink unavailable: {0}")]
    Unavailable(String),
}

/// Errors from the host preference store
///
/// The store "may fail silently"; every call site swallows these with `.ok()`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Read or write failed
    #[error("Preference store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
