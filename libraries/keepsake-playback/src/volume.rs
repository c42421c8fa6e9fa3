//! Volume state with an audibility floor
//!
//! The card always plays audibly or not at all: whenever audio is audible
//! the applied volume is floored at 20%, even when the user drags the
//! slider to its minimum. Near-silence is expressed through mute, never
//! through volume.

/// Minimum audible volume (20%)
pub const MIN_VOLUME: f32 = 0.2;

/// Comfort target the fade-in ramps toward when the user preference is lower
pub const COMFORT_TARGET: f32 = 0.4;

/// Lowest slider position (percent)
pub const MIN_VOLUME_PCT: u8 = 20;

/// Highest slider position (percent)
pub const MAX_VOLUME_PCT: u8 = 100;

/// Default slider position when no preference is persisted (percent)
pub const DEFAULT_VOLUME_PCT: u8 = 40;

/// Volume state: the applied linear volume plus the mute flag
///
/// The slider position (`preferred_pct`) is kept separately from the
/// applied volume because fades move the applied volume underneath a
/// stationary slider.
#[derive(Debug, Clone)]
pub struct Volume {
    /// Applied linear volume (0.0-1.0); fades mutate this
    applied: f32,

    /// Mute state (preserves the applied volume)
    muted: bool,

    /// Slider position (20-100), restored from and persisted to preferences
    preferred_pct: u8,
}

impl Volume {
    /// Create volume state from a slider position
    pub fn new(preferred_pct: u8) -> Self {
        let preferred_pct = clamp_pct(preferred_pct);
        Self {
            applied: f32::from(preferred_pct) / 100.0,
            muted: false,
            preferred_pct,
        }
    }

    /// Applied linear volume (0.0-1.0)
    pub fn applied(&self) -> f32 {
        self.applied
    }

    /// Set the applied volume, clamped to 0.0-1.0
    pub fn set_applied(&mut self, volume: f32) {
        self.applied = volume.clamp(0.0, 1.0);
    }

    /// Slider position (20-100)
    pub fn preferred_pct(&self) -> u8 {
        self.preferred_pct
    }

    /// The user-preferred volume as a linear value
    pub fn preferred(&self) -> f32 {
        f32::from(self.preferred_pct) / 100.0
    }

    /// Set the slider position, clamped to 20-100
    pub fn set_preferred_pct(&mut self, pct: u8) -> u8 {
        self.preferred_pct = clamp_pct(pct);
        self.preferred_pct
    }

    /// Base volume applied at every play attempt: the preference, floored
    pub fn playback_base(&self) -> f32 {
        self.preferred().max(MIN_VOLUME)
    }

    /// Target the fade-in ramp converges to
    pub fn fade_in_target(&self) -> f32 {
        self.preferred().max(MIN_VOLUME).max(COMFORT_TARGET)
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Toggle mute, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME_PCT)
    }
}

/// Clamp a slider position into 20-100
pub fn clamp_pct(pct: u8) -> u8 {
    pct.clamp(MIN_VOLUME_PCT, MAX_VOLUME_PCT)
}

/// Parse a persisted slider position, falling back to the default
///
/// Invalid strings fall back to 40; out-of-range values clamp.
pub fn parse_pct(raw: Option<&str>) -> u8 {
    raw.and_then(|s| s.trim().parse::<u16>().ok())
        .map_or(DEFAULT_VOLUME_PCT, |pct| {
            clamp_pct(pct.min(u16::from(u8::MAX)) as u8)
        })
}
