//! Floating-particle effect layer
//!
//! Decorative hearts and blossoms drifting over the effect page. The
//! layer is pure data; the presentation layer animates it.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Particle glyph, picked 50/50
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleGlyph {
    /// "♥"
    Heart,
    /// "❀"
    Blossom,
}

/// One floating particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Glyph to render
    pub glyph: ParticleGlyph,

    /// Horizontal position, percent of viewport width (0-100)
    pub left_pct: f32,

    /// Animation start delay (0-10000ms)
    pub delay_ms: u32,

    /// Render opacity (0.2-0.5)
    pub opacity: f32,
}

/// The particle layer active on the effect page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleLayer {
    /// Spawned particles
    pub particles: Vec<Particle>,
}

impl ParticleLayer {
    /// Spawn a layer of `count` randomized particles
    pub fn spawn(count: usize) -> Self {
        Self::spawn_with(count, &mut rand::thread_rng())
    }

    /// Spawn with a caller-supplied RNG (deterministic in tests)
    pub fn spawn_with<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|_| Particle {
                glyph: if rng.gen_bool(0.5) {
                    ParticleGlyph::Heart
                } else {
                    ParticleGlyph::Blossom
                },
                left_pct: rng.gen_range(0.0..100.0),
                delay_ms: rng.gen_range(0..10_000),
                opacity: rng.gen_range(0.2..0.5),
            })
            .collect();
        Self { particles }
    }
}
