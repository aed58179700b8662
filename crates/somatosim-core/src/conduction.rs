//! Peripheral Conduction
//!
//! Computes the fixed propagation delay along the afferent fiber and
//! shifts the spike train by it. Conduction is a pure translation:
//! order and pairwise spacing are preserved, with no jitter and no
//! conduction failure. Fiber velocities are carried by the closed
//! [`FiberType`] enum, so an undefined fiber is unrepresentable.

use crate::types::{ConductionParameters, FiberType, SpikeTrain};

/// Propagation delay in milliseconds for a fiber over a path distance
///
/// `delay_ms = (distance_cm / 100) / velocity_m_per_s * 1000`: distance
/// to meters, divide by velocity for seconds, convert to ms.
#[inline]
#[must_use]
pub fn delay_ms(fiber: FiberType, path_distance_cm: f32) -> f32 {
    (path_distance_cm / 100.0) / fiber.velocity_m_per_s() * 1000.0
}

/// Propagation delay for a full conduction parameter set
#[inline]
#[must_use]
pub fn delay_ms_for(params: &ConductionParameters) -> f32 {
    delay_ms(params.fiber, params.path_distance_cm)
}

/// Shift every spike in a train by a conduction delay
#[must_use]
pub fn shift(train: &SpikeTrain, delay_ms: f32) -> SpikeTrain {
    let mut arrived = SpikeTrain::new();
    for &t in train.times() {
        // Same capacity as the source train, cannot overflow
        arrived.push(t + delay_ms).ok();
    }
    arrived
}

// ============================================================================
// Tests
// ============================================================================
