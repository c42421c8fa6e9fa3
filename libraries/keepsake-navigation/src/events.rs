//! Navigation events

use serde::{Deserialize, Serialize};

/// Events emitted by the page navigator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NavigationEvent {
    /// Landed on a page
    PageChanged {
        /// New current page (1-based)
        page: u32,
    },

    /// The envelope was opened; the transition to page 2 is scheduled
    ///
    /// This is the primary user gesture; the session uses it to retry
    /// blocked playback.
    EnvelopeOpened,

    /// The finale fired on the last page (visual fade-out cue; the
    /// session pairs it with a music fade-out)
    FinaleStarted,

    /// The word reveal progressed
    RevealProgressed {
        /// Currently visible prefix of the page text
        visible: String,
    },

    /// The hidden bonus message was toggled
    HiddenMessageToggled {
        /// Whether it is now visible
        visible: bool,
    },
}
