//! Simulation Error Types
//!
//! Error types for the tactile pipeline, compatible with `no_std`.
//! Configuration errors are raised at the orchestration boundary before
//! any computation begins; the pipeline never produces partial output.

use core::fmt;

/// Simulation error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// A parameter violates its domain constraint
    InvalidParameter {
        /// Parameter name
        parameter: &'static str,
        /// Offending value, rounded to the nearest integer for `Eq`
        value_milli: i64,
        /// Human-readable constraint (e.g. "must be > 0")
        constraint: &'static str,
    },

    /// Requested duration implies more samples than the waveform buffers hold
    SampleCapacityExceeded {
        /// Number of samples the duration would require
        requested: usize,
        /// Maximum supported sample count
        capacity: usize,
    },

    /// Spike detector output would overflow the spike buffer
    SpikeCapacityExceeded {
        /// Number of spikes detected so far
        spikes: usize,
        /// Maximum supported spike count
        capacity: usize,
    },
}

impl SimError {
    /// Build an [`SimError::InvalidParameter`] from an `f32` value
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn invalid(parameter: &'static str, value: f32, constraint: &'static str) -> Self {
        Self::InvalidParameter {
            parameter,
            value_milli: (value as f64 * 1000.0) as i64,
            constraint,
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { parameter, value_milli, constraint } => {
                write!(
                    f,
                    "Invalid parameter '{}': value {} {}",
                    parameter,
                    *value_milli as f64 / 1000.0,
                    constraint
                )
            }
            Self::SampleCapacityExceeded { requested, capacity } => {
                write!(
                    f,
                    "Sample capacity exceeded: duration requires {} samples, max {}",
                    requested, capacity
                )
            }
            Self::SpikeCapacityExceeded { spikes, capacity } => {
                write!(f, "Spike buffer overflow: {} spikes, capacity {}", spikes, capacity)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SimError {}

/// Result type for simulation operations
pub type SimResult<T> = Result<T, SimError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = SimError::invalid("tau_ms", -5.0, "must be > 0");
        let msg = format!("{}", err);
        assert!(msg.contains("tau_ms"));
        assert!(msg.contains("-5"));
        assert!(msg.contains("must be > 0"));
    }

    #[test]
    fn test_capacity_display() {
        let err = SimError::SampleCapacityExceeded { requested: 5001, capacity: 4096 };
        let msg = format!("{}", err);
        assert!(msg.contains("5001"));
        assert!(msg.contains("4096"));
    }
}
