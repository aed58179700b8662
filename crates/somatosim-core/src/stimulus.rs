//! Mechanical Stimulus Generation
//!
//! Produces the sampled vibratory stimulus driving the receptor model.
//! The stimulus is a continuous sinusoid with no onset ramp or envelope:
//! once enabled it exists for the entire duration. A disabled stimulus
//! is an exact all-zero signal, independent of amplitude and frequency.

use core::f32::consts::PI;

use crate::types::{StimulusParameters, TimeAxis, Waveform};

/// Generate the stimulus waveform over the shared time axis
///
/// For each sample at time `t` ms the value is
/// `amplitude * sin(2π * (frequency_hz / 1000) * t)`; the frequency is
/// converted from Hz to cycles per millisecond because the axis is in ms.
#[must_use]
pub fn generate(axis: &TimeAxis, params: &StimulusParameters) -> Waveform {
    if !params.enabled {
        return Waveform::from_fn(axis, |_| 0.0);
    }

    let cycles_per_ms = params.frequency_hz / 1000.0;
    let amplitude = params.amplitude;
    Waveform::from_fn(axis, |t_ms| amplitude * libm::sinf(2.0 * PI * cycles_per_ms * t_ms))
}

// ============================================================================
// Tests
// ============================================================================
