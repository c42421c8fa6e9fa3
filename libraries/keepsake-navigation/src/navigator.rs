//! Page navigator
//!
//! A finite state machine over the pages of a deck, 1-based. Owns the
//! envelope seal, the word reveal, the particle layer and the two timed
//! transitions (envelope opening, finale). Like the playback controller,
//! it is host-clocked: timed work is deadline arithmetic on `now_ms`
//! pumped through `advance`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::deck::PageDeck;
use crate::events::NavigationEvent;
use crate::particles::ParticleLayer;
use crate::reveal::WordReveal;

/// Read-only view of navigator state for UI bindings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationSnapshot {
    /// Current page (1-based)
    pub page: u32,

    /// Total pages in the deck
    pub page_count: u32,

    /// Whether the envelope has been opened this seal
    pub envelope_opened: bool,

    /// Whether the finale visual cue is active
    pub finale_active: bool,

    /// Whether the hidden bonus message is visible
    pub hidden_message_visible: bool,

    /// Visible prefix of the current page's text, if it has text
    pub visible_text: Option<String>,

    /// Footer text for the current page
    pub footer: String,

    /// Active particle layer, on the effect page only
    pub particles: Option<ParticleLayer>,
}

/// The navigation state machine
pub struct PageNavigator {
    deck: PageDeck,
    page: u32,
    envelope_opened: bool,
    finale_active: bool,
    hidden_message_visible: bool,

    reveal: Option<WordReveal>,
    particles: Option<ParticleLayer>,
    /// Deadline for the envelope-open transition to page 2
    pending_open_ms: Option<u64>,
    /// Deadline for the finale on the last page
    pending_finale_ms: Option<u64>,

    pending_events: Vec<NavigationEvent>,
}

impl PageNavigator {
    /// Create a navigator at the sealed envelope (page 1)
    pub fn new(deck: PageDeck) -> Self {
        Self {
            deck,
            page: 1,
            envelope_opened: false,
            finale_active: false,
            hidden_message_visible: false,
            reveal: None,
            particles: None,
            pending_open_ms: None,
            pending_finale_ms: None,
            pending_events: Vec::new(),
        }
    }

    /// Session start, optionally seeded from a deep-link fragment
    ///
    /// Accepts `"#3"` or `"3"`; anything invalid or out of range lands on
    /// page 1. Entry side effects run, so deep-linking straight to the
    /// last page schedules the finale.
    pub fn start(&mut self, fragment: Option<&str>, now_ms: u64) {
        let entry = fragment
            .map(|f| f.trim_start_matches('#'))
            .and_then(|f| f.parse::<u32>().ok())
            .filter(|n| (1..=self.deck.page_count()).contains(n))
            .unwrap_or(1);
        info!(page = entry, "Starting navigation session");
        self.navigate_to(entry, now_ms);
    }

    /// The single transition operation
    ///
    /// Clamps `requested` into the deck, supersedes every in-flight timed
    /// production for the page being left, and runs the new page's entry
    /// side effects.
    pub fn navigate_to(&mut self, requested: u32, now_ms: u64) {
        let page = self.deck.clamp(requested);
        debug!(from = self.page, to = page, "Navigating");
        self.page = page;

        // Supersede anything in flight for the page being left
        self.reveal = None;
        self.pending_open_ms = None;
        self.pending_finale_ms = None;
        // The finale cue replays on re-entry
        self.finale_active = false;

        if page == 1 {
            // Returning to the start reseals the envelope
            self.envelope_opened = false;
        }

        let config = self.deck.config().clone();
        self.particles = if self.deck.is_effect(page) {
            Some(ParticleLayer::spawn(config.particle_count))
        } else {
            None
        };

        // The binding layer must learn the page before any of its content
        self.push(NavigationEvent::PageChanged { page });

        if let Some(text) = self.deck.page(page).and_then(|p| p.text.clone()) {
            let reveal = WordReveal::new(&text, now_ms, config.reveal_tick_ms);
            self.push(NavigationEvent::RevealProgressed {
                visible: reveal.visible(),
            });
            self.reveal = Some(reveal);
        }

        if self.deck.is_final(page) {
            self.pending_finale_ms = Some(now_ms + config.finale_delay_ms);
        }
    }

    /// Go forward one page; a no-op on the last page
    pub fn next(&mut self, now_ms: u64) {
        if self.page < self.deck.page_count() {
            self.navigate_to(self.page + 1, now_ms);
        }
    }

    /// Go back one page; never below the back floor, so Back cannot
    /// reach the sealed envelope
    pub fn back(&mut self, now_ms: u64) {
        if self.page > self.deck.config().back_floor {
            self.navigate_to(self.page - 1, now_ms);
        }
    }

    /// Open the sealed envelope
    ///
    /// Only on page 1 and only once per seal: marks the envelope opened
    /// and schedules the transition to page 2.
    pub fn open_envelope(&mut self, now_ms: u64) {
        if self.page != 1 || self.envelope_opened {
            return;
        }
        self.envelope_opened = true;
        self.pending_open_ms = Some(now_ms + self.deck.config().open_delay_ms);
        self.push(NavigationEvent::EnvelopeOpened);
        debug!("Envelope opened");
    }

    /// Start over: back to the sealed envelope
    pub fn restart(&mut self, now_ms: u64) {
        self.navigate_to(1, now_ms);
    }

    /// Toggle the hidden bonus message (last page only)
    pub fn toggle_hidden_message(&mut self) {
        if !self.deck.is_final(self.page) {
            return;
        }
        self.hidden_message_visible = !self.hidden_message_visible;
        let visible = self.hidden_message_visible;
        self.push(NavigationEvent::HiddenMessageToggled { visible });
    }

    /// Fire every timed production that has come due at `now_ms`
    pub fn advance(&mut self, now_ms: u64) {
        if self
            .pending_open_ms
            .is_some_and(|due| now_ms >= due)
        {
            self.pending_open_ms = None;
            self.navigate_to(2, now_ms);
        }

        if self
            .pending_finale_ms
            .is_some_and(|due| now_ms >= due)
        {
            self.pending_finale_ms = None;
            self.finale_active = true;
            self.push(NavigationEvent::FinaleStarted);
            debug!("Finale started");
        }

        while let Some(reveal) = self.reveal.as_mut() {
            if !reveal.is_due(now_ms) {
                break;
            }
            reveal.tick();
            let visible = reveal.visible();
            self.push(NavigationEvent::RevealProgressed { visible });
        }
    }

    // ========================================================================
    // Observability
    // ========================================================================

    /// Drain all pending events
    pub fn take_events(&mut self) -> Vec<NavigationEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Read-only view of the current state
    pub fn snapshot(&self) -> NavigationSnapshot {
        let config = self.deck.config();
        let footer = if self.deck.is_final(self.page) {
            config.footer_finale.clone()
        } else {
            config.footer_default.clone()
        };
        NavigationSnapshot {
            page: self.page,
            page_count: self.deck.page_count(),
            envelope_opened: self.envelope_opened,
            finale_active: self.finale_active,
            hidden_message_visible: self.hidden_message_visible,
            visible_text: self.reveal.as_ref().map(WordReveal::visible),
            footer,
            particles: self.particles.clone(),
        }
    }

    /// Current page (1-based)
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Whether the envelope has been opened this seal
    pub fn is_envelope_opened(&self) -> bool {
        self.envelope_opened
    }

    /// Whether the finale cue is active
    pub fn is_finale_active(&self) -> bool {
        self.finale_active
    }

    fn push(&mut self, event: NavigationEvent) {
        self.pending_events.push(event);
    }
}

impl std::fmt::Debug for PageNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageNavigator")
            .field("page", &self.page)
            .field("envelope_opened", &self.envelope_opened)
            .field("finale_active", &self.finale_active)
            .finish_non_exhaustive()
    }
}
