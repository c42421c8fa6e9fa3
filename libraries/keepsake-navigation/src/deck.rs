//! Page deck: the data-driven list of card pages
//!
//! The navigator is a state machine over whatever deck the host supplies;
//! nothing about page count, effect pages or copy text is hard-coded.

use serde::{Deserialize, Serialize};

use crate::error::{DeckError, Result};

/// One card page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Message text revealed word by word on entry, if any
    pub text: Option<String>,

    /// Whether entering this page spawns the floating-particle layer
    pub effect: bool,
}

impl Page {
    /// A page with no text and no effect (e.g. the sealed envelope)
    pub fn blank() -> Self {
        Self::default()
    }

    /// A page with a message revealed word by word
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            effect: false,
        }
    }

    /// Mark this page as the particle-effect page
    pub fn with_effect(mut self) -> Self {
        self.effect = true;
        self
    }
}

/// Timing and presentation knobs for the navigator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Lowest page reachable via Back; Back never reaches the sealed
    /// envelope (default: 2)
    pub back_floor: u32,

    /// Delay between opening the envelope and landing on page 2 (default: 700)
    pub open_delay_ms: u64,

    /// Delay between entering the final page and the finale (default: 2000)
    pub finale_delay_ms: u64,

    /// Cadence of the word-by-word reveal (default: 160)
    pub reveal_tick_ms: u64,

    /// Particles spawned on the effect page (default: 14)
    pub particle_count: usize,

    /// Footer text on every page but the last
    pub footer_default: String,

    /// Footer text on the final page
    pub footer_finale: String,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            back_floor: 2,
            open_delay_ms: 700,
            finale_delay_ms: 2000,
            reveal_tick_ms: 160,
            particle_count: 14,
            footer_default: "\u{1f48c} Made with care, for you.".to_string(),
            footer_finale: "\u{1f48c} Always here, even in silence.".to_string(),
        }
    }
}

/// An ordered, validated deck of pages
///
/// Page numbers are 1-based throughout; page 1 is the sealed envelope and
/// the last page is the finale page.
#[derive(Debug, Clone)]
pub struct PageDeck {
    pages: Vec<Page>,
    config: DeckConfig,
}

impl PageDeck {
    /// Build a deck from ordered pages and a config
    ///
    /// # Errors
    /// Rejects decks of fewer than two pages and back floors that point
    /// outside the deck.
    pub fn new(pages: Vec<Page>, config: DeckConfig) -> Result<Self> {
        if pages.len() < 2 {
            return Err(DeckError::TooFewPages(pages.len()));
        }
        if !(1..=pages.len() as u32).contains(&config.back_floor) {
            return Err(DeckError::InvalidBackFloor {
                floor: config.back_floor,
                pages: pages.len(),
            });
        }
        Ok(Self { pages, config })
    }

    /// Number of pages (N); the final page is page N
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by 1-based number
    pub fn page(&self, number: u32) -> Option<&Page> {
        if number == 0 {
            return None;
        }
        self.pages.get(number as usize - 1)
    }

    /// Clamp a requested page number into `[1, N]`
    pub fn clamp(&self, requested: u32) -> u32 {
        requested.clamp(1, self.page_count())
    }

    /// Whether `number` is the final page
    pub fn is_final(&self, number: u32) -> bool {
        number == self.page_count()
    }

    /// Whether `number` is the particle-effect page
    pub fn is_effect(&self, number: u32) -> bool {
        self.page(number).is_some_and(|p| p.effect)
    }

    /// Navigator config
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }
}
