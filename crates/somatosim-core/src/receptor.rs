//! Receptor Filtering and Adaptation
//!
//! Transforms the mechanical stimulus into a receptor potential by
//! applying a static frequency-dependent bandpass gain and a phasic
//! adaptation envelope. The gain is computed once per run (it depends
//! only on the stimulus frequency, not on time); the adaptation is a
//! monotone exponential decay `exp(-t/τ)`, so the output envelope fades
//! even under sustained stimulation, as in a rapidly adapting
//! mechanoreceptor.

use crate::types::{AdaptationParameters, ReceptorClass, TimeAxis, Waveform};

// ============================================================================
// Bandpass Gain
// ============================================================================

/// Dimensionless bandpass gain in `[0, 1]` for a stimulus frequency
///
/// - `f <= 0` → 0 (guards the division below; never NaN)
/// - `f < low` → `f / low`, a linear ramp toward the band edge
/// - `f > high` → `high / f`, a reciprocal roll-off
/// - otherwise → 1 (full pass)
///
/// The two edge formulas both evaluate to 1 at their boundary, so the
/// gain is continuous across the whole frequency range.
#[must_use]
pub fn bandpass_gain(frequency_hz: f32, low_hz: f32, high_hz: f32) -> f32 {
    if frequency_hz <= 0.0 {
        return 0.0;
    }
    if frequency_hz < low_hz {
        return (frequency_hz / low_hz).max(0.0);
    }
    if frequency_hz > high_hz {
        return (high_hz / frequency_hz).max(0.0);
    }
    1.0
}

impl ReceptorClass {
    /// Bandpass gain of this receptor class at a stimulus frequency
    #[inline]
    #[must_use]
    pub fn gain_at(self, frequency_hz: f32) -> f32 {
        let (low, high) = self.passband_hz();
        bandpass_gain(frequency_hz, low, high)
    }
}

// ============================================================================
// Receptor Potential
// ============================================================================

/// Compute the receptor potential waveform
///
/// `vrec[i] = stim[i] * gain * exp(-t_i / τ)` with the gain held constant
/// across the run. The caller supplies the stimulus frequency the gain is
/// evaluated at; there is no modeled interaction between frequency and
/// adaptation rate beyond this product.
#[must_use]
pub fn receptor_potential(
    axis: &TimeAxis,
    stim: &Waveform,
    receptor: ReceptorClass,
    stimulus_frequency_hz: f32,
    adaptation: &AdaptationParameters,
) -> Waveform {
    let gain = receptor.gain_at(stimulus_frequency_hz);
    let tau = adaptation.tau_ms;
    let stim_values = stim.values();

    let mut i = 0;
    Waveform::from_fn(axis, |t_ms| {
        let s = stim_values.get(i).copied().unwrap_or(0.0);
        i += 1;
        s * gain * libm::expf(-t_ms / tau)
    })
}

// ============================================================================
// Tests
// ============================================================================
