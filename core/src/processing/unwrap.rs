//! Phase unwrapping: wrapped arctangent phase to continuous cumulative phase.
//!
//! The scan is a left fold over the wrapped phases with state
//! [`UnwrapState`]. Each output depends on the cycle count carried from the
//! previous sample, so the fold must run in order.
//!
//! A wrap is only detected when two neighbouring wrapped phases differ by at
//! least pi. Signals whose true phase advances by pi or more per sample will
//! have their cycles miscounted.

use std::f64::consts::{PI, TAU};

use num_complex::Complex64;

use crate::prelude::{WaveError, WaveResult};

/// Four-quadrant arctangent of each sample, in (-pi, pi].
pub fn wrapped_phase(samples: &[Complex64]) -> Vec<f64> {
    samples.iter().map(|c| c.im.atan2(c.re)).collect()
}

/// Magnitude `sqrt(re^2 + im^2)` of each sample.
pub fn amplitude(samples: &[Complex64]) -> Vec<f64> {
    samples.iter().map(|c| c.norm_sqr().sqrt()).collect()
}

/// Fold state for one unwrapping pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnwrapState {
    pub cycles: i64,
    pub last_phase: f64,
    /// Wraps that moved the cycle count.
    pub wrap_events: usize,
    /// Jumps of at least pi that landed on exactly zero and were left alone.
    pub zero_landings: usize,
}

impl UnwrapState {
    /// Initial state; the first sample is compared against itself.
    pub fn seeded(first_phase: f64) -> Self {
        Self {
            cycles: 0,
            last_phase: first_phase,
            wrap_events: 0,
            zero_landings: 0,
        }
    }

    /// Consumes one wrapped phase and returns the next state along with the
    /// cumulative phase for this sample.
    pub fn step(self, phase: f64) -> (Self, f64) {
        let mut next = Self {
            last_phase: phase,
            ..self
        };

        if (phase - self.last_phase).abs() >= PI {
            if phase > 0.0 {
                next.cycles -= 1;
                next.wrap_events += 1;
            } else if phase < 0.0 {
                next.cycles += 1;
                next.wrap_events += 1;
            } else {
                next.zero_landings += 1;
            }
        }

        (next, phase + TAU * next.cycles as f64)
    }
}

/// Output of [`unwrap_phase`]: the cumulative sequence and the final fold state.
#[derive(Debug, Clone)]
pub struct UnwrappedPhase {
    pub cumulative: Vec<f64>,
    pub state: UnwrapState,
}

/// Unwraps a wrapped phase sequence in a single forward pass.
pub fn unwrap_phase(wrapped: &[f64]) -> WaveResult<UnwrappedPhase> {
    let first = *wrapped.first().ok_or(WaveError::InsufficientSamples {
        provided: 0,
        minimum: 1,
    })?;

    let (state, cumulative) = wrapped.iter().fold(
        (UnwrapState::seeded(first), Vec::with_capacity(wrapped.len())),
        |(state, mut cumulative), &phase| {
            let (next, value) = state.step(phase);
            cumulative.push(value);
            (next, cumulative)
        },
    );

    Ok(UnwrappedPhase { cumulative, state })
}
