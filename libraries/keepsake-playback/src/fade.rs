//! Tick-driven volume fade ramps
//!
//! A ramp moves the applied volume toward a target in fixed steps on a
//! fixed cadence. At most one ramp exists per session; starting a new one
//! replaces (and thereby cancels) the old one. Scheduling is deadline
//! arithmetic on a host-supplied clock, so ticks never race state.

use serde::{Deserialize, Serialize};

/// Volume change per tick
pub const FADE_STEP: f32 = 0.04;

/// Milliseconds between ticks
pub const FADE_TICK_MS: u64 = 200;

/// Hard tick budget for fade-out, so it terminates even if volume
/// arithmetic stalls (20 ticks at 200ms = 4s)
pub const FADE_OUT_MAX_TICKS: u32 = 20;

/// Fade-out finishes once volume drops to or below this
pub const FADE_OUT_FLOOR: f32 = 0.01;

/// Ramp direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FadeDirection {
    /// Ramp up toward the fade-in target
    In,
    /// Ramp down toward silence, then pause
    Out,
}

/// Outcome of a single ramp tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeTick {
    /// Volume stepped to this value; ramp continues
    Stepped(f32),
    /// Volume stepped to this value and the ramp is done
    Finished(f32),
}

/// One in-flight fade ramp
#[derive(Debug, Clone)]
pub struct FadeRamp {
    direction: FadeDirection,
    target: f32,
    next_due_ms: u64,
    ticks_run: u32,
}

impl FadeRamp {
    /// Start a fade-in toward `target`, first tick due one cadence from now
    pub fn fade_in(target: f32, now_ms: u64) -> Self {
        Self {
            direction: FadeDirection::In,
            target,
            next_due_ms: now_ms + FADE_TICK_MS,
            ticks_run: 0,
        }
    }

    /// Start a fade-out toward silence
    pub fn fade_out(now_ms: u64) -> Self {
        Self {
            direction: FadeDirection::Out,
            target: 0.0,
            next_due_ms: now_ms + FADE_TICK_MS,
            ticks_run: 0,
        }
    }

    /// Ramp direction
    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    /// Whether the next tick is due at `now_ms`
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.next_due_ms
    }

    /// Run one tick against the current volume
    ///
    /// Callers must only invoke this when [`is_due`](Self::is_due); the
    /// returned volume is what the caller applies to the sink.
    pub fn tick(&mut self, current: f32) -> FadeTick {
        self.next_due_ms += FADE_TICK_MS;
        self.ticks_run += 1;

        match self.direction {
            FadeDirection::In => {
                let next = (current + FADE_STEP).min(self.target);
                if next >= self.target {
                    FadeTick::Finished(self.target)
                } else {
                    FadeTick::Stepped(next)
                }
            }
            FadeDirection::Out => {
                let next = (current - FADE_STEP).max(0.0);
                if next <= FADE_OUT_FLOOR || self.ticks_run >= FADE_OUT_MAX_TICKS {
                    FadeTick::Finished(next)
                } else {
                    FadeTick::Stepped(next)
                }
            }
        }
    }
}
