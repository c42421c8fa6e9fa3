//! End-to-end session scenarios
//!
//! Exercises the full wiring: gestures in, events and snapshots out, with
//! a scriptable sink and a virtual clock stepped at the fade cadence.

use std::sync::{Arc, Mutex};

use keepsake_navigation::{DeckConfig, NavigationEvent, Page, PageDeck};
use keepsake_playback::{
    AudioSink, MemoryStore, PlaybackConfig, PlaybackEvent, PreferenceStore, SinkError,
    TrackRegistry, FADE_TICK_MS, KEY_VOLUME_PCT,
};
use keepsake_session::{CardSession, SessionEvent};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

// ===== Test sink =====

#[derive(Debug, Default)]
struct SinkState {
    plays: u32,
    pauses: u32,
    releases: u32,
    seeks: u32,
    reject_next_plays: u32,
}

#[derive(Debug, Clone, Default)]
struct TestSink {
    state: Arc<Mutex<SinkState>>,
}

impl TestSink {
    fn new() -> Self {
        Self::default()
    }

    fn reject_next_plays(&self, count: u32) {
        self.state.lock().unwrap().reject_next_plays = count;
    }

    fn plays(&self) -> u32 {
        self.state.lock().unwrap().plays
    }

    fn pauses(&self) -> u32 {
        self.state.lock().unwrap().pauses
    }

    fn releases(&self) -> u32 {
        self.state.lock().unwrap().releases
    }

    fn seeks(&self) -> u32 {
        self.state.lock().unwrap().seeks
    }
}

impl AudioSink for TestSink {
    fn load(&mut self, _url: &str) -> Result<(), SinkError> {
        Ok(())
    }

    fn play(&mut self) -> Result<(), SinkError> {
        let mut s = self.state.lock().unwrap();
        s.plays += 1;
        if s.reject_next_plays > 0 {
            s.reject_next_plays -= 1;
            Err(SinkError::AutoplayBlocked)
        } else {
            Ok(())
        }
    }

    fn pause(&mut self) {
        self.state.lock().unwrap().pauses += 1;
    }

    fn set_volume(&mut self, _volume: f32) {}

    fn set_muted(&mut self, _muted: bool) {}

    fn set_looping(&mut self, _looping: bool) {}

    fn seek_to_start(&mut self) {
        self.state.lock().unwrap().seeks += 1;
    }

    fn release(&mut self) {
        self.state.lock().unwrap().releases += 1;
    }
}

// ===== Helpers =====

fn card_deck() -> PageDeck {
    PageDeck::new(
        vec![
            Page::blank(),
            Page::with_text("my dearest friend"),
            Page::with_text("you make everything brighter"),
            Page::with_text("thank you for being you"),
            Page::with_text("a sky full of hearts").with_effect(),
            Page::with_text("one more thing"),
            Page::with_text("always yours in every season"),
        ],
        DeckConfig::default(),
    )
    .unwrap()
}

fn session_with(sink: &TestSink, store: MemoryStore) -> CardSession {
    init_tracing();
    CardSession::new(
        card_deck(),
        TrackRegistry::keepsake(),
        Box::new(sink.clone()),
        Box::new(store),
        PlaybackConfig::default(),
    )
}

/// Step the virtual clock at the fade cadence
fn pump(session: &mut CardSession, from_ms: u64, to_ms: u64) -> u64 {
    let mut now = from_ms;
    while now < to_ms {
        now += FADE_TICK_MS;
        session.advance(now);
    }
    now
}

// ===== Scenarios =====

#[test]
fn fresh_session_has_expected_defaults() {
    let sink = TestSink::new();
    let mut session = session_with(&sink, MemoryStore::new());

    session.start(None, 0);

    let snap = session.snapshot();
    assert_eq!(snap.playback.track_id, "song-1");
    assert_eq!(snap.playback.volume_pct, 40);
    assert_eq!(snap.navigation.page, 1);
    assert!(!snap.navigation.envelope_opened);
}

#[test]
fn start_is_idempotent() {
    let sink = TestSink::new();
    let mut session = session_with(&sink, MemoryStore::new());

    session.start(None, 0);
    let plays = sink.plays();
    session.start(None, 100);
    assert_eq!(sink.plays(), plays, "second start must not retrigger playback");
}

#[test]
fn opening_the_envelope_lands_on_page_two_and_unblocks_audio() {
    let sink = TestSink::new();
    sink.reject_next_plays(1);
    let mut session = session_with(&sink, MemoryStore::new());

    session.start(None, 0);
    assert!(session.snapshot().playback.blocked);
    session.take_events();

    // The open gesture doubles as the autoplay retry
    session.open_envelope(100);
    assert!(session.snapshot().playback.playing);
    assert!(!session.snapshot().playback.blocked);
    assert_eq!(session.snapshot().navigation.page, 1);

    session.advance(800);
    assert_eq!(session.snapshot().navigation.page, 2);

    let events = session.take_events();
    assert!(events.contains(&SessionEvent::Navigation(NavigationEvent::EnvelopeOpened)));
    assert!(events.contains(&SessionEvent::Navigation(NavigationEvent::PageChanged {
        page: 2
    })));
}

#[test]
fn finale_page_fades_the_music_out() {
    let sink = TestSink::new();
    let mut session = session_with(&sink, MemoryStore::new());
    session.start(None, 0);
    assert!(session.snapshot().playback.playing);

    session.go_to_page(7, 0);
    session.take_events();

    // Finale fires at 2000ms, the fade then needs at most 20 ticks (4s)
    pump(&mut session, 0, 2000);
    assert!(session.snapshot().navigation.finale_active);

    pump(&mut session, 2000, 6000);
    let snap = session.snapshot();
    assert!(!snap.playback.playing);
    assert!(snap.playback.volume <= 0.01);
    assert_eq!(sink.pauses(), 1);

    let events = session.take_events();
    assert!(events.contains(&SessionEvent::Navigation(NavigationEvent::FinaleStarted)));
    assert!(events
        .iter()
        .any(|e| matches!(e, SessionEvent::Playback(PlaybackEvent::FadeStarted { .. }))));
}

#[test]
fn leaving_the_finale_page_early_keeps_the_music_up() {
    let sink = TestSink::new();
    let mut session = session_with(&sink, MemoryStore::new());
    session.start(None, 0);

    session.go_to_page(7, 0);
    session.go_to_page(3, 500);

    pump(&mut session, 500, 8000);
    let snap = session.snapshot();
    assert!(snap.playback.playing, "cancelled finale must not fade audio");
    assert!(snap.playback.volume >= 0.2);
    assert_eq!(sink.pauses(), 0);
}

#[test]
fn slider_below_floor_clamps_and_persists_through_the_session() {
    let sink = TestSink::new();
    let store = MemoryStore::new();
    let mut session = session_with(&sink, store);
    session.start(None, 0);

    session.set_volume_pct(15, 100);

    let snap = session.snapshot();
    assert_eq!(snap.playback.volume_pct, 20);
    assert_eq!(snap.playback.volume, 0.2);
}

#[test]
fn deep_link_entry_lands_on_the_effect_page() {
    let sink = TestSink::new();
    let mut session = session_with(&sink, MemoryStore::new());

    session.start(Some("#5"), 0);

    let snap = session.snapshot();
    assert_eq!(snap.navigation.page, 5);
    let layer = snap.navigation.particles.expect("effect page particles");
    assert_eq!(layer.particles.len(), 14);
}

#[test]
fn replay_music_seeks_to_the_start() {
    let sink = TestSink::new();
    let mut session = session_with(&sink, MemoryStore::new());
    session.start(None, 0);

    session.replay_music(1000);
    assert_eq!(sink.seeks(), 1);
    assert!(session.snapshot().playback.playing);
}

#[test]
fn hidden_message_toggles_through_the_session() {
    let sink = TestSink::new();
    let mut session = session_with(&sink, MemoryStore::new());
    session.start(None, 0);

    session.go_to_page(7, 0);
    session.toggle_hidden_message(100);
    assert!(session.snapshot().navigation.hidden_message_visible);
}

#[test]
fn teardown_releases_audio_once() {
    let sink = TestSink::new();
    let mut session = session_with(&sink, MemoryStore::new());
    session.start(None, 0);

    session.teardown();
    session.teardown();
    assert_eq!(sink.releases(), 1);
}

#[test]
fn dropping_the_session_releases_audio() {
    let sink = TestSink::new();
    {
        let mut session = session_with(&sink, MemoryStore::new());
        session.start(None, 0);
    }
    assert_eq!(sink.releases(), 1);
}

#[test]
fn snapshot_serializes_for_the_binding_layer() {
    let sink = TestSink::new();
    let mut session = session_with(&sink, MemoryStore::new());
    session.start(None, 0);

    let json = serde_json::to_string(&session.snapshot()).unwrap();
    assert!(json.contains("\"page\":1"));
    assert!(json.contains("song-1"));
}

#[test]
fn word_reveal_flows_through_session_events() {
    let sink = TestSink::new();
    let mut session = session_with(&sink, MemoryStore::new());
    session.start(None, 0);

    session.go_to_page(2, 0);
    session.take_events();
    session.advance(160);

    let events = session.take_events();
    assert!(events.contains(&SessionEvent::Navigation(
        NavigationEvent::RevealProgressed {
            visible: "my dearest".to_string()
        }
    )));
}

#[test]
fn volume_pct_persists_to_the_store_key() {
    // Store handle shared so we can read back what the session wrote
    #[derive(Debug, Clone, Default)]
    struct SharedStore(Arc<Mutex<MemoryStore>>);
    impl keepsake_playback::PreferenceStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>, keepsake_playback::StoreError> {
            self.0.lock().unwrap().get(key)
        }
        fn set(&mut self, key: &str, value: &str) -> Result<(), keepsake_playback::StoreError> {
            self.0.lock().unwrap().set(key, value)
        }
    }

    init_tracing();
    let store = SharedStore::default();
    let sink = TestSink::new();
    let mut session = CardSession::new(
        card_deck(),
        TrackRegistry::keepsake(),
        Box::new(sink),
        Box::new(store.clone()),
        PlaybackConfig::default(),
    );
    session.start(None, 0);

    session.set_volume_pct(15, 100);
    assert_eq!(
        store.0.lock().unwrap().get(KEY_VOLUME_PCT).unwrap(),
        Some("20".to_string())
    );
}
