//! Word-by-word text reveal
//!
//! A lazy, cancellable, finite production: the text splits on whitespace
//! and one more word becomes visible per tick. Restarting a reveal
//! replaces the sequence, it never appends.

/// One in-flight word reveal
#[derive(Debug, Clone)]
pub struct WordReveal {
    words: Vec<String>,
    /// Words currently visible (the first is shown immediately)
    shown: usize,
    next_due_ms: u64,
    tick_ms: u64,
}

impl WordReveal {
    /// Start revealing `text`, first word visible immediately
    pub fn new(text: &str, now_ms: u64, tick_ms: u64) -> Self {
        let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        let shown = usize::from(!words.is_empty());
        Self {
            words,
            shown,
            next_due_ms: now_ms + tick_ms,
            tick_ms,
        }
    }

    /// The currently visible prefix
    pub fn visible(&self) -> String {
        self.words[..self.shown].join(" ")
    }

    /// Whether every word is visible
    pub fn is_complete(&self) -> bool {
        self.shown >= self.words.len()
    }

    /// Whether the next word is due at `now_ms`
    pub fn is_due(&self, now_ms: u64) -> bool {
        !self.is_complete() && now_ms >= self.next_due_ms
    }

    /// Reveal one more word
    ///
    /// Callers must only invoke this when [`is_due`](Self::is_due).
    pub fn tick(&mut self) {
        self.shown = (self.shown + 1).min(self.words.len());
        self.next_due_ms += self.tick_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_word_visible_immediately() {
        let reveal = WordReveal::new("my dearest friend", 0, 160);
        assert_eq!(reveal.visible(), "my");
        assert!(!reveal.is_complete());
    }

    #[test]
    fn words_appear_one_per_tick() {
        let mut reveal = WordReveal::new("my dearest friend", 0, 160);
        assert!(!reveal.is_due(100));
        assert!(reveal.is_due(160));

        reveal.tick();
        assert_eq!(reveal.visible(), "my dearest");
        reveal.tick();
        assert_eq!(reveal.visible(), "my dearest friend");
        assert!(reveal.is_complete());
        assert!(!reveal.is_due(10_000));
    }

    #[test]
    fn restart_replaces_rather_than_appends() {
        let mut reveal = WordReveal::new("one two three four", 0, 160);
        reveal.tick();
        assert_eq!(reveal.visible(), "one two");

        // Re-entering the page builds a fresh reveal
        let mut reveal = WordReveal::new("one two three four", 1000, 160);
        assert_eq!(reveal.visible(), "one");
        while !reveal.is_complete() {
            reveal.tick();
        }
        assert_eq!(reveal.visible(), "one two three four");
    }

    #[test]
    fn empty_text_is_complete_at_once() {
        let reveal = WordReveal::new("", 0, 160);
        assert!(reveal.is_complete());
        assert_eq!(reveal.visible(), "");
    }

    #[test]
    fn whitespace_collapses() {
        let mut reveal = WordReveal::new("  so   much\n love ", 0, 160);
        while !reveal.is_complete() {
            reveal.tick();
        }
        assert_eq!(reveal.visible(), "so much love");
    }
}
