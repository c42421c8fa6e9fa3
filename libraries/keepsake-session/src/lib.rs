//! Keepsake - Card Session
//!
//! The facade a presentation shell talks to: one [`CardSession`] per card
//! run, owning the playback controller and the page navigator and
//! applying the two cross-component policies (envelope-open play retry,
//! finale music fade-out).
//!
//! # Example
//!
//! ```rust
//! use keepsake_navigation::{DeckConfig, Page, PageDeck};
//! use keepsake_playback::{MemoryStore, NullSink, PlaybackConfig, TrackRegistry};
//! use keepsake_session::CardSession;
//!
//! let deck = PageDeck::new(
//!     vec![
//!         Page::blank(),
//!         Page::with_text("my dearest friend"),
//!         Page::with_text("always yours"),
//!     ],
//!     DeckConfig::default(),
//! )
//! .unwrap();
//!
//! let mut session = CardSession::new(
//!     deck,
//!     TrackRegistry::keepsake(),
//!     Box::new(NullSink),
//!     Box::new(MemoryStore::new()),
//!     PlaybackConfig::default(),
//! );
//!
//! session.start(None, 0);
//! session.open_envelope(100);
//! session.advance(800); // lands on page 2
//!
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.navigation.page, 2);
//! ```

mod events;
mod session;

// Public exports
pub use events::{SessionEvent, SessionSnapshot};
pub use session::CardSession;

// Re-export the component crates so a shell needs only this one
pub use keepsake_navigation;
pub use keepsake_playback;
