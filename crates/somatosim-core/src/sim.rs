//! Simulation Orchestrator
//!
//! Wires the pipeline stages into one deterministic recomputation:
//! time axis → stimulus → receptor potential → local spikes → conducted
//! spikes, plus the independent two-point decision. Every invocation
//! recomputes everything from the immutable parameter snapshot; there is
//! no retained or shared state, so identical parameters yield
//! bit-identical output.
//!
//! Validation is all-or-nothing: an invalid configuration is rejected
//! before any stage runs and no partial output is ever produced.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::types::{
    AdaptationParameters, ConductionParameters, DiscriminationParameters, ReceptorClass,
    SpikeParameters, SpikeTrain, StimulusParameters, TimeAxis, Waveform,
};
use crate::{conduction, discrimination, receptor, spikes, stimulus};

// ============================================================================
// Parameter Snapshot
// ============================================================================

/// Complete immutable parameter snapshot for one simulation run
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Simulated duration in ms (must be > 0, sampled at 1 ms)
    pub duration_ms: f32,
    /// Receptor class doing the transduction
    pub receptor: ReceptorClass,
    /// Mechanical stimulus
    pub stimulus: StimulusParameters,
    /// Receptor adaptation
    pub adaptation: AdaptationParameters,
    /// Spike detection
    pub spike: SpikeParameters,
    /// Afferent conduction
    pub conduction: ConductionParameters,
    /// Two-point discrimination task
    pub discrimination: DiscriminationParameters,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            duration_ms: 500.0,
            receptor: ReceptorClass::Meissner,
            stimulus: StimulusParameters::default(),
            adaptation: AdaptationParameters::default(),
            spike: SpikeParameters::default(),
            conduction: ConductionParameters::default(),
            discrimination: DiscriminationParameters::default(),
        }
    }
}

impl SimulationParameters {
    /// Check every domain constraint before computation
    ///
    /// # Errors
    /// [`SimError::InvalidParameter`] naming the first violated field.
    pub fn validate(&self) -> SimResult<()> {
        if self.duration_ms <= 0.0 || !self.duration_ms.is_finite() {
            return Err(SimError::invalid("duration_ms", self.duration_ms, "must be > 0"));
        }
        if self.stimulus.frequency_hz <= 0.0 || !self.stimulus.frequency_hz.is_finite() {
            return Err(SimError::invalid(
                "stimulus.frequency_hz",
                self.stimulus.frequency_hz,
                "must be > 0",
            ));
        }
        if self.stimulus.amplitude < 0.0 || !self.stimulus.amplitude.is_finite() {
            return Err(SimError::invalid(
                "stimulus.amplitude",
                self.stimulus.amplitude,
                "must be >= 0",
            ));
        }
        if self.adaptation.tau_ms <= 0.0 || !self.adaptation.tau_ms.is_finite() {
            return Err(SimError::invalid("adaptation.tau_ms", self.adaptation.tau_ms, "must be > 0"));
        }
        if !self.spike.threshold.is_finite() {
            return Err(SimError::invalid("spike.threshold", self.spike.threshold, "must be finite"));
        }
        if self.spike.refractory_ms < 0.0 || !self.spike.refractory_ms.is_finite() {
            return Err(SimError::invalid(
                "spike.refractory_ms",
                self.spike.refractory_ms,
                "must be >= 0",
            ));
        }
        if self.conduction.path_distance_cm <= 0.0 || !self.conduction.path_distance_cm.is_finite() {
            return Err(SimError::invalid(
                "conduction.path_distance_cm",
                self.conduction.path_distance_cm,
                "must be > 0",
            ));
        }
        if self.discrimination.probe_separation_mm < 0.0
            || !self.discrimination.probe_separation_mm.is_finite()
        {
            return Err(SimError::invalid(
                "discrimination.probe_separation_mm",
                self.discrimination.probe_separation_mm,
                "must be >= 0",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Output Snapshot
// ============================================================================

/// Complete output of one simulation run
///
/// Fresh, independently owned structures; the presentation layer reads
/// them and discards them. Superseded runs are simply dropped by the
/// caller since there is no partial or streaming output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    /// Shared time axis in ms
    pub time_axis: TimeAxis,
    /// Mechanical stimulus waveform
    pub stimulus: Waveform,
    /// Receptor potential waveform
    pub receptor_potential: Waveform,
    /// Spike train at the receptor site
    pub spikes_local: SpikeTrain,
    /// Spike train after conduction to the readout point
    pub spikes_arrived: SpikeTrain,
    /// Conduction delay applied to the arrived train, in ms
    pub conduction_delay_ms: f32,
    /// Two-point discrimination verdict
    pub two_point_perceived: bool,
}

// ============================================================================
// Pipeline
// ============================================================================

/// Run the full pipeline from a parameter snapshot
///
/// Stage order matters only through data dependencies: the time axis
/// depends on the duration alone, the stimulus on the axis, the receptor
/// potential on the stimulus, the local train on the potential, the
/// arrived train on the local train and the conduction parameters. The
/// discrimination verdict is computed independently of the waveforms.
///
/// # Errors
/// [`SimError::InvalidParameter`] for a rejected configuration,
/// [`SimError::SampleCapacityExceeded`] or
/// [`SimError::SpikeCapacityExceeded`] if a buffer bound is hit.
pub fn simulate(params: &SimulationParameters) -> SimResult<SimulationOutput> {
    params.validate()?;

    let time_axis = TimeAxis::with_duration(params.duration_ms)?;
    let stim = stimulus::generate(&time_axis, &params.stimulus);
    let vrec = receptor::receptor_potential(
        &time_axis,
        &stim,
        params.receptor,
        params.stimulus.frequency_hz,
        &params.adaptation,
    );
    let spikes_local = spikes::detect(&time_axis, &vrec, &params.spike)?;

    let conduction_delay_ms = conduction::delay_ms_for(&params.conduction);
    let spikes_arrived = conduction::shift(&spikes_local, conduction_delay_ms);

    let two_point_perceived = discrimination::perceived_as_two_for(&params.discrimination);

    Ok(SimulationOutput {
        time_axis,
        stimulus: stim,
        receptor_potential: vrec,
        spikes_local,
        spikes_arrived,
        conduction_delay_ms,
        two_point_perceived,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BodyRegion, FiberType};

    fn reference_params() -> SimulationParameters {
        // 10 Hz flutter on a Meissner receptor, 500 ms run
        SimulationParameters {
            duration_ms: 500.0,
            receptor: ReceptorClass::Meissner,
            stimulus: StimulusParameters { frequency_hz: 10.0, amplitude: 1.0, enabled: true },
            adaptation: AdaptationParameters { tau_ms: 120.0 },
            spike: SpikeParameters { threshold: 0.5, refractory_ms: 8.0 },
            conduction: ConductionParameters { path_distance_cm: 60.0, fiber: FiberType::C },
            discrimination: DiscriminationParameters {
                region: BodyRegion::Finger,
                probe_separation_mm: 2.0,
            },
        }
    }

    #[test]
    fn test_reference_run_shape() {
        let output = simulate(&reference_params()).unwrap();

        assert_eq!(output.time_axis.len(), 501);
        assert_eq!(output.stimulus.len(), 501);
        assert_eq!(output.receptor_potential.len(), 501);

        // 10 Hz is inside the Meissner band: gain 1, so vrec at t=0 equals stim
        assert_eq!(output.stimulus.values()[0], output.receptor_potential.values()[0]);

        // The envelope decays, but the first cycles clear θ=0.5 before it does
        assert!(!output.spikes_local.is_empty());
        for pair in output.spikes_local.times().windows(2) {
            assert!(pair[1] - pair[0] >= 8.0);
        }
    }

    #[test]
    fn test_reference_run_is_deterministic() {
        let params = reference_params();
        let a = simulate(&params).unwrap();
        let b = simulate(&params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_conduction_outputs() {
        let output = simulate(&reference_params()).unwrap();

        // C fiber over 60 cm: exactly 400 ms
        assert!((output.conduction_delay_ms - 400.0).abs() < 1e-4);

        assert_eq!(output.spikes_arrived.len(), output.spikes_local.len());
        for (local, arrived) in
            output.spikes_local.times().iter().zip(output.spikes_arrived.times())
        {
            assert!((arrived - local - 400.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_two_point_boundary() {
        let mut params = reference_params();

        params.discrimination.probe_separation_mm = 1.0;
        assert!(!simulate(&params).unwrap().two_point_perceived);

        params.discrimination.probe_separation_mm = 2.0;
        assert!(simulate(&params).unwrap().two_point_perceived);
    }

    #[test]
    fn test_disabled_stimulus_silences_pipeline() {
        let mut params = reference_params();
        params.stimulus.enabled = false;

        let output = simulate(&params).unwrap();
        assert!(output.stimulus.values().iter().all(|&v| v == 0.0));
        assert!(output.receptor_potential.values().iter().all(|&v| v == 0.0));
        assert!(output.spikes_local.is_empty());
        assert!(output.spikes_arrived.is_empty());
        // The discrimination verdict does not depend on the waveforms
        assert!(output.two_point_perceived);
    }

    #[test]
    fn test_invalid_configurations_rejected() {
        let base = reference_params();

        let mut p = base;
        p.duration_ms = 0.0;
        assert!(matches!(simulate(&p), Err(SimError::InvalidParameter { .. })));

        let mut p = base;
        p.stimulus.frequency_hz = -10.0;
        assert!(matches!(simulate(&p), Err(SimError::InvalidParameter { .. })));

        let mut p = base;
        p.adaptation.tau_ms = 0.0;
        assert!(matches!(simulate(&p), Err(SimError::InvalidParameter { .. })));

        let mut p = base;
        p.spike.refractory_ms = -1.0;
        assert!(matches!(simulate(&p), Err(SimError::InvalidParameter { .. })));

        let mut p = base;
        p.conduction.path_distance_cm = 0.0;
        assert!(matches!(simulate(&p), Err(SimError::InvalidParameter { .. })));

        let mut p = base;
        p.duration_ms = 1e9;
        assert!(matches!(simulate(&p), Err(SimError::SampleCapacityExceeded { .. })));
    }

    #[test]
    fn test_parameters_json_round_trip() {
        let params = reference_params();
        let json = serde_json::to_string(&params).unwrap();
        let back: SimulationParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);

        // And the full output snapshot round-trips too
        let output = simulate(&params).unwrap();
        let json = serde_json::to_string(&output).unwrap();
        let back: SimulationOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, output);
    }
}
