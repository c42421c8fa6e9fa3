//! Keepsake - Page Navigation
//!
//! The state machine behind the card's pages: a sealed envelope that
//! opens into a sequence of message pages, ending on a finale page.
//!
//! This crate provides:
//! - A data-driven [`PageDeck`] (page count, texts and the effect page
//!   come from the host, nothing is hard-coded)
//! - Clamped `next`/`back`/`navigate_to` transitions with a back floor
//!   that keeps Back away from the sealed envelope
//! - The gated [`PageNavigator::open_envelope`] action with its delayed
//!   transition to page 2
//! - Word-by-word text reveal and the floating-particle effect layer
//! - Finale scheduling on the last page
//! - Deep-link entry seeding from a fragment identifier
//!
//! Like `keepsake-playback`, the navigator owns no timer: the host calls
//! operations with `now_ms` and pumps [`PageNavigator::advance`].
//!
//! # Example
//!
//! ```rust
//! use keepsake_navigation::{DeckConfig, Page, PageDeck, PageNavigator};
//!
//! let deck = PageDeck::new(
//!     vec![
//!         Page::blank(), // sealed envelope
//!         Page::with_text("my dearest friend"),
//!         Page::with_text("thank you for everything").with_effect(),
//!         Page::with_text("always yours"),
//!     ],
//!     DeckConfig::default(),
//! )
//! .unwrap();
//!
//! let mut navigator = PageNavigator::new(deck);
//! navigator.start(None, 0);
//! assert_eq!(navigator.page(), 1);
//!
//! navigator.open_envelope(0);
//! navigator.advance(700); // host timer catches the delayed transition
//! assert_eq!(navigator.page(), 2);
//! ```

mod deck;
mod error;
mod events;
mod navigator;
mod particles;
mod reveal;

// Public exports
pub use deck::{DeckConfig, Page, PageDeck};
pub use error::{DeckError, Result};
pub use events::NavigationEvent;
pub use navigator::{NavigationSnapshot, PageNavigator};
pub use particles::{Particle, ParticleGlyph, ParticleLayer};
pub use reveal::WordReveal;
