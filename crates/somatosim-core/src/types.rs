//! Core types for the tactile transduction pipeline
//!
//! This module defines the fundamental types shared across the pipeline:
//! - Closed enums with associated constants (receptor class, fiber type,
//!   body region) so that an invalid key is a compile-time impossibility
//! - Parameter structs making up the immutable simulation snapshot
//! - The shared time axis, waveforms, and spike trains

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

// ============================================================================
// Capacities and Sampling Constants
// ============================================================================

/// Maximum number of time samples per waveform (duration up to ~4 s at 1 ms)
pub const MAX_SAMPLES: usize = 4096;

/// Maximum number of spikes per train
pub const MAX_SPIKES: usize = 1024;

/// Fixed sample interval of the time axis (ms)
pub const DT_MS: f32 = 1.0;

// ============================================================================
// Receptor Class
// ============================================================================

/// Cutaneous mechanoreceptor class
///
/// Each class carries a closed frequency passband; stimulation outside
/// the band is attenuated by the bandpass gain (see [`crate::receptor`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReceptorClass {
    /// Meissner corpuscle: rapid adaptation (RA-I), flutter, 2-40 Hz
    Meissner,
    /// Pacinian corpuscle: very rapid adaptation (RA-II), vibration, 40-500 Hz
    Pacinian,
}

impl ReceptorClass {
    /// Get the closed frequency passband `[low, high]` in Hz
    #[inline]
    #[must_use]
    pub const fn passband_hz(self) -> (f32, f32) {
        match self {
            Self::Meissner => (2.0, 40.0),
            Self::Pacinian => (40.0, 500.0),
        }
    }

    /// Get the conventional adaptation label for this class
    #[inline]
    #[must_use]
    pub const fn adaptation_label(self) -> &'static str {
        match self {
            Self::Meissner => "RA-I (rapid)",
            Self::Pacinian => "RA-II (very rapid)",
        }
    }
}

// ============================================================================
// Fiber Type
// ============================================================================

/// Peripheral afferent fiber type
///
/// Each variant carries a fixed conduction velocity. The velocities obey
/// the invariant `ABeta > ADelta > C`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FiberType {
    /// Aβ fiber: large myelinated, discriminative touch (50 m/s)
    ABeta,
    /// Aδ fiber: thin myelinated, fast pain and cold (15 m/s)
    ADelta,
    /// C fiber: unmyelinated, slow pain and warmth (1.5 m/s)
    C,
}

impl FiberType {
    /// Get the conduction velocity in meters per second
    #[inline]
    #[must_use]
    pub const fn velocity_m_per_s(self) -> f32 {
        match self {
            Self::ABeta => 50.0,
            Self::ADelta => 15.0,
            Self::C => 1.5,
        }
    }

    /// Whether the fiber is myelinated
    #[inline]
    #[must_use]
    pub const fn myelinated(self) -> bool {
        match self {
            Self::ABeta | Self::ADelta => true,
            Self::C => false,
        }
    }
}

// ============================================================================
// Body Region
// ============================================================================

/// Body region probed in the two-point discrimination task
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyRegion {
    /// Fingertip (highest acuity)
    Finger,
    /// Thumb pad
    Thumb,
    /// Palm
    Palm,
    /// Wrist
    Wrist,
    /// Forearm
    Forearm,
    /// Upper arm
    UpperArm,
    /// Shoulder (lowest acuity)
    Shoulder,
}

impl BodyRegion {
    /// Get the two-point discrimination threshold in millimeters
    #[inline]
    #[must_use]
    pub const fn two_point_threshold_mm(self) -> f32 {
        match self {
            Self::Finger => 2.0,
            Self::Thumb => 3.0,
            Self::Palm => 10.0,
            Self::Wrist => 20.0,
            Self::Forearm => 35.0,
            Self::UpperArm => 40.0,
            Self::Shoulder => 45.0,
        }
    }

    /// Get the approximate mechanoreceptor density per square centimeter
    #[inline]
    #[must_use]
    pub const fn receptor_density_per_cm2(self) -> u16 {
        match self {
            Self::Finger => 240,
            Self::Thumb => 200,
            Self::Palm => 60,
            Self::Wrist => 25,
            Self::Forearm => 15,
            Self::UpperArm => 10,
            Self::Shoulder => 10,
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

/// Mechanical stimulus parameters
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StimulusParameters {
    /// Vibration frequency in Hz (must be > 0)
    pub frequency_hz: f32,
    /// Peak amplitude in arbitrary units (must be >= 0)
    pub amplitude: f32,
    /// Whether the stimulus is applied at all; when false the generated
    /// signal is exactly zero regardless of amplitude and frequency
    pub enabled: bool,
}

impl Default for StimulusParameters {
    fn default() -> Self {
        Self { frequency_hz: 10.0, amplitude: 1.0, enabled: true }
    }
}

/// Receptor adaptation parameters
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdaptationParameters {
    /// Exponential decay time constant τ in ms (must be > 0)
    pub tau_ms: f32,
}

impl Default for AdaptationParameters {
    fn default() -> Self {
        Self { tau_ms: 120.0 }
    }
}

/// Spike detection parameters
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpikeParameters {
    /// Firing threshold θ, in receptor potential units
    pub threshold: f32,
    /// Absolute refractory period in ms (must be >= 0)
    pub refractory_ms: f32,
}

impl Default for SpikeParameters {
    fn default() -> Self {
        Self { threshold: 0.5, refractory_ms: 8.0 }
    }
}

/// Conduction parameters for the afferent pathway
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConductionParameters {
    /// Path distance from receptor to readout point in cm (must be > 0)
    pub path_distance_cm: f32,
    /// Afferent fiber type carrying the spike train
    pub fiber: FiberType,
}

impl Default for ConductionParameters {
    fn default() -> Self {
        Self { path_distance_cm: 60.0, fiber: FiberType::ABeta }
    }
}

/// Two-point discrimination task parameters
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscriminationParameters {
    /// Probed body region
    pub region: BodyRegion,
    /// Separation between the two probe tips in mm (must be >= 0)
    pub probe_separation_mm: f32,
}

impl Default for DiscriminationParameters {
    fn default() -> Self {
        Self { region: BodyRegion::Finger, probe_separation_mm: 2.0 }
    }
}

// ============================================================================
// Time Axis
// ============================================================================

/// Evenly spaced time samples in milliseconds
///
/// The axis starts at 0, advances in steps of [`DT_MS`], and contains
/// `floor(duration / DT_MS) + 1` samples. It is strictly increasing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeAxis {
    samples: heapless::Vec<f32, MAX_SAMPLES>,
}

impl TimeAxis {
    /// Build a time axis covering `duration_ms`
    ///
    /// # Errors
    /// [`SimError::InvalidParameter`] if the duration is not positive,
    /// [`SimError::SampleCapacityExceeded`] if it needs more than
    /// [`MAX_SAMPLES`] samples.
    pub fn with_duration(duration_ms: f32) -> SimResult<Self> {
        if duration_ms <= 0.0 || !duration_ms.is_finite() {
            return Err(SimError::invalid("duration_ms", duration_ms, "must be > 0"));
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let len = (duration_ms / DT_MS) as usize + 1;
        if len > MAX_SAMPLES {
            return Err(SimError::SampleCapacityExceeded { requested: len, capacity: MAX_SAMPLES });
        }

        let mut samples = heapless::Vec::new();
        for i in 0..len {
            #[allow(clippy::cast_precision_loss)]
            samples.push(i as f32 * DT_MS).ok();
        }
        Ok(Self { samples })
    }

    /// Number of samples
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the axis is empty (never true for a constructed axis)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time samples in milliseconds
    #[inline]
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Iterate over `(index, time_ms)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.samples.iter().copied().enumerate()
    }
}

// ============================================================================
// Waveform
// ============================================================================

/// Sampled signal values parallel to a shared [`TimeAxis`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    values: heapless::Vec<f32, MAX_SAMPLES>,
}

impl Waveform {
    /// Build a waveform by evaluating `f(time_ms)` at every axis sample
    #[must_use]
    pub fn from_fn(axis: &TimeAxis, mut f: impl FnMut(f32) -> f32) -> Self {
        let mut values = heapless::Vec::new();
        for &t in axis.samples() {
            values.push(f(t)).ok();
        }
        Self { values }
    }

    /// Number of samples
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the waveform has no samples
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Signal values
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Largest absolute sample value (0 for an empty waveform)
    #[must_use]
    pub fn peak_abs(&self) -> f32 {
        let mut peak = 0.0f32;
        for &v in &self.values {
            let a = if v < 0.0 { -v } else { v };
            if a > peak {
                peak = a;
            }
        }
        peak
    }
}

// ============================================================================
// Spike Train
// ============================================================================

/// Ordered sequence of spike times in milliseconds
///
/// Invariants: strictly increasing, pairwise separation at least the
/// refractory period the detector was run with.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpikeTrain {
    times: heapless::Vec<f32, MAX_SPIKES>,
}

impl SpikeTrain {
    /// Create an empty spike train
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { times: heapless::Vec::new() }
    }

    /// Append a spike time
    ///
    /// # Errors
    /// [`SimError::SpikeCapacityExceeded`] if the train is full.
    pub fn push(&mut self, time_ms: f32) -> SimResult<()> {
        self.times.push(time_ms).map_err(|_| SimError::SpikeCapacityExceeded {
            spikes: self.times.len(),
            capacity: MAX_SPIKES,
        })
    }

    /// Number of spikes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the train contains no spikes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Spike times in milliseconds
    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    /// Latency of the first spike, if any fired
    #[inline]
    #[must_use]
    pub fn first_spike_ms(&self) -> Option<f32> {
        self.times.first().copied()
    }

    /// Mean firing rate in Hz over a window of `duration_ms`
    #[must_use]
    pub fn mean_rate_hz(&self, duration_ms: f32) -> f32 {
        if duration_ms <= 0.0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.times.len() as f32;
        count / (duration_ms / 1000.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passbands() {
        assert_eq!(ReceptorClass::Meissner.passband_hz(), (2.0, 40.0));
        assert_eq!(ReceptorClass::Pacinian.passband_hz(), (40.0, 500.0));
    }

    #[test]
    fn test_fiber_velocity_ordering() {
        assert!(FiberType::ABeta.velocity_m_per_s() > FiberType::ADelta.velocity_m_per_s());
        assert!(FiberType::ADelta.velocity_m_per_s() > FiberType::C.velocity_m_per_s());
        assert!(!FiberType::C.myelinated());
    }

    #[test]
    fn test_region_thresholds_increase_proximally() {
        let order = [
            BodyRegion::Finger,
            BodyRegion::Thumb,
            BodyRegion::Palm,
            BodyRegion::Wrist,
            BodyRegion::Forearm,
            BodyRegion::UpperArm,
            BodyRegion::Shoulder,
        ];
        for pair in order.windows(2) {
            assert!(pair[0].two_point_threshold_mm() < pair[1].two_point_threshold_mm());
        }
    }

    #[test]
    fn test_time_axis_shape() {
        let axis = TimeAxis::with_duration(500.0).unwrap();
        assert_eq!(axis.len(), 501);
        assert_eq!(axis.samples()[0], 0.0);
        assert_eq!(axis.samples()[500], 500.0);

        for pair in axis.samples().windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_time_axis_rejects_bad_duration() {
        assert!(matches!(
            TimeAxis::with_duration(0.0),
            Err(SimError::InvalidParameter { parameter: "duration_ms", .. })
        ));
        assert!(matches!(
            TimeAxis::with_duration(-10.0),
            Err(SimError::InvalidParameter { .. })
        ));
        assert!(matches!(
            TimeAxis::with_duration(10_000.0),
            Err(SimError::SampleCapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_waveform_peak() {
        let axis = TimeAxis::with_duration(10.0).unwrap();
        let wave = Waveform::from_fn(&axis, |t| if t == 5.0 { -3.0 } else { 1.0 });
        assert_eq!(wave.len(), axis.len());
        assert_eq!(wave.peak_abs(), 3.0);
    }

    #[test]
    fn test_spike_train_queries() {
        let mut train = SpikeTrain::new();
        assert!(train.first_spike_ms().is_none());

        train.push(10.0).unwrap();
        train.push(30.0).unwrap();
        assert_eq!(train.first_spike_ms(), Some(10.0));
        // 2 spikes in 500 ms = 4 Hz
        assert!((train.mean_rate_hz(500.0) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_parameter_json_round_trip() {
        let params = StimulusParameters { frequency_hz: 250.0, amplitude: 0.5, enabled: false };
        let json = serde_json::to_string(&params).unwrap();
        let back: StimulusParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
