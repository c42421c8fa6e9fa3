//! Audio sink trait - the seam to the host audio element
//!
//! The controller is platform-agnostic; the presentation shell (web view,
//! mobile bridge, native backend) implements [`AudioSink`] over whatever
//! audio element it owns.

use crate::error::SinkError;

/// Host audio element abstraction
///
/// Exactly one sink exists per session and it is owned exclusively by the
/// playback controller. `play` is where autoplay policy shows up: hosts
/// that require a user gesture return [`SinkError::AutoplayBlocked`].
pub trait AudioSink: Send {
    /// Point the element at a resource and begin loading it
    fn load(&mut self, url: &str) -> Result<(), SinkError>;

    /// Start or resume playback
    fn play(&mut self) -> Result<(), SinkError>;

    /// Pause playback
    fn pause(&mut self);

    /// Apply a linear volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32);

    /// Set the muted flag
    fn set_muted(&mut self, muted: bool);

    /// Enable or disable looping
    fn set_looping(&mut self, looping: bool);

    /// Seek to position zero
    fn seek_to_start(&mut self);

    /// Release the underlying audio resource
    ///
    /// Called at most once by the controller; the element must be safe to
    /// drop afterwards.
    fn release(&mut self);
}

/// No-op sink for headless hosts and tests that don't care about audio
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn load(&mut self, _url: &str) -> Result<(), SinkError> {
        Ok(())
    }

    fn play(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn set_volume(&mut self, _volume: f32) {}

    fn set_muted(&mut self, _muted: bool) {}

    fn set_looping(&mut self, _looping: bool) {}

    fn seek_to_start(&mut self) {}

    fn release(&mut self) {}
}
