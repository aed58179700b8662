//! Spike Detection
//!
//! Edge-triggered threshold detector with absolute refractory masking.
//! A spike fires at sample `i` when the receptor potential crosses the
//! threshold from below (`vrec[i-1] < θ` and `vrec[i] >= θ`) and the
//! previous accepted spike is at least one refractory period in the
//! past. Falling edges and crossings inside the refractory window are
//! ignored. The model does not track sub-threshold membrane dynamics
//! beyond the supplied waveform.

use crate::error::SimResult;
use crate::types::{SpikeParameters, SpikeTrain, TimeAxis, Waveform};

/// Scan a receptor potential for threshold crossings
///
/// Iterates samples from index 1 (no comparison is possible before the
/// first sample, so index 0 can never fire). The last-spike time starts
/// as `None`, so the first crossing is always accepted.
///
/// # Errors
/// [`crate::SimError::SpikeCapacityExceeded`] if more spikes fire than
/// the train can hold.
pub fn detect(axis: &TimeAxis, vrec: &Waveform, params: &SpikeParameters) -> SimResult<SpikeTrain> {
    let mut train = SpikeTrain::new();
    let mut last_spike_ms: Option<f32> = None;

    let times = axis.samples();
    let values = vrec.values();
    let len = times.len().min(values.len());

    for i in 1..len {
        let rising = values[i - 1] < params.threshold && values[i] >= params.threshold;
        if !rising {
            continue;
        }

        let t = times[i];
        let masked = match last_spike_ms {
            Some(last) => (t - last) < params.refractory_ms,
            None => false,
        };
        if masked {
            continue;
        }

        train.push(t)?;
        last_spike_ms = Some(t);
    }

    Ok(train)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn square_wave(axis: &TimeAxis, period_ms: f32) -> Waveform {
        // Alternates between 0 and 1 every half period, crossing any
        // threshold in (0, 1] on every rising half-cycle
        Waveform::from_fn(axis, |t| {
            if (t / (period_ms / 2.0)) as u32 % 2 == 1 { 1.0 } else { 0.0 }
        })
    }

    #[test]
    fn test_no_spike_at_index_zero() {
        let axis = TimeAxis::with_duration(10.0).unwrap();
        // Starts above threshold: no rising edge ever occurs
        let vrec = Waveform::from_fn(&axis, |_| 1.0);
        let params = SpikeParameters { threshold: 0.5, refractory_ms: 0.0 };

        let train = detect(&axis, &vrec, &params).unwrap();
        assert!(train.is_empty());
    }

    #[test]
    fn test_rising_edges_only() {
        let axis = TimeAxis::with_duration(20.0).unwrap();
        let vrec = square_wave(&axis, 10.0);
        let params = SpikeParameters { threshold: 0.5, refractory_ms: 0.0 };

        let train = detect(&axis, &vrec, &params).unwrap();
        // Rising edges at t=5 and t=15; falling edges at 10 and 20 ignored
        assert_eq!(train.times(), &[5.0, 15.0]);
    }

    #[test]
    fn test_refractory_never_violated() {
        let axis = TimeAxis::with_duration(400.0).unwrap();
        let vrec = square_wave(&axis, 4.0); // rising edge every 4 ms

        for refractory_ms in [0.0, 3.0, 8.0, 25.0] {
            let params = SpikeParameters { threshold: 0.5, refractory_ms };
            let train = detect(&axis, &vrec, &params).unwrap();
            assert!(!train.is_empty());

            for pair in train.times().windows(2) {
                assert!(pair[1] - pair[0] >= refractory_ms);
                assert!(pair[1] > pair[0]);
            }
        }
    }

    #[test]
    fn test_refractory_masks_crossings() {
        let axis = TimeAxis::with_duration(20.0).unwrap();
        let vrec = square_wave(&axis, 10.0); // rising edges at 5 and 15
        let params = SpikeParameters { threshold: 0.5, refractory_ms: 12.0 };

        let train = detect(&axis, &vrec, &params).unwrap();
        // The second crossing falls inside the refractory window and is
        // suppressed outright, not deferred
        assert_eq!(train.times(), &[5.0]);
    }

    #[test]
    fn test_exact_threshold_touch_fires() {
        let axis = TimeAxis::with_duration(3.0).unwrap();
        let vrec = Waveform::from_fn(&axis, |t| if t == 2.0 { 0.5 } else { 0.0 });
        let params = SpikeParameters { threshold: 0.5, refractory_ms: 0.0 };

        let train = detect(&axis, &vrec, &params).unwrap();
        assert_eq!(train.times(), &[2.0]);
    }

    #[test]
    fn test_subthreshold_waveform_is_silent() {
        let axis = TimeAxis::with_duration(100.0).unwrap();
        let vrec = Waveform::from_fn(&axis, |t| libm::sinf(t) * 0.4);
        let params = SpikeParameters { threshold: 0.5, refractory_ms: 5.0 };

        let train = detect(&axis, &vrec, &params).unwrap();
        assert!(train.is_empty());
    }
}
