//! Two-Point Discrimination
//!
//! Stateless comparison of a probe separation against the fixed acuity
//! threshold of a body region. No hysteresis; the decision depends only
//! on the discrimination parameters, never on the waveform pipeline.

use crate::types::{BodyRegion, DiscriminationParameters};

/// Whether two probe tips are perceived as two distinct points
///
/// Non-strict inequality: a separation exactly equal to the region
/// threshold counts as resolved.
#[inline]
#[must_use]
pub fn perceived_as_two(region: BodyRegion, probe_separation_mm: f32) -> bool {
    probe_separation_mm >= region.two_point_threshold_mm()
}

/// Decision for a full discrimination parameter set
#[inline]
#[must_use]
pub fn perceived_as_two_for(params: &DiscriminationParameters) -> bool {
    perceived_as_two(params.region, params.probe_separation_mm)
}

// ============================================================================
// Tests
// ============================================================================
