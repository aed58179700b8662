//! Somatosim Core - `no_std` compatible tactile transduction pipeline
//!
//! This crate implements a simplified model of the cutaneous tactile
//! pathway as a deterministic numeric pipeline:
//!
//! ```text
//! Stimulus → Receptor Filtering → Adaptation → Spike Generation
//!          → Conduction Delay → Two-Point Discrimination
//! ```
//!
//! The pipeline is pure computation over bounded in-memory sequences:
//! no I/O, no hidden state, no randomness. The same parameter snapshot
//! always yields bit-identical output. Presentation layers (plots,
//! rasters, indicators) consume the [`sim::SimulationOutput`] snapshot
//! and live outside this crate.
//!
//! # Modules
//!
//! - [`types`]: Closed enums (receptor class, fiber type, body region),
//!   parameter structs, time axis, waveforms, spike trains
//! - [`error`]: Error types for configuration and capacity violations
//! - [`stimulus`]: Sinusoidal mechanical stimulus generation
//! - [`receptor`]: Bandpass gain and adapting receptor potential
//! - [`spikes`]: Rising-edge spike detection with refractory masking
//! - [`conduction`]: Fiber conduction delay and spike-train shifting
//! - [`discrimination`]: Two-point discrimination decision
//! - [`sim`]: Orchestrator wiring the pipeline end to end
//!
//! # Example
//!
//! ```rust
//! use somatosim_core::sim::{simulate, SimulationParameters};
//!
//! let params = SimulationParameters::default();
//! let output = simulate(&params).unwrap();
//! assert_eq!(output.time_axis.len(), output.stimulus.len());
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod conduction;
pub mod discrimination;
pub mod error;
pub mod receptor;
pub mod sim;
pub mod spikes;
pub mod stimulus;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{SimError, SimResult};
pub use sim::{simulate, SimulationOutput, SimulationParameters};
pub use types::{
    AdaptationParameters, BodyRegion, ConductionParameters, DiscriminationParameters, FiberType,
    ReceptorClass, SpikeParameters, SpikeTrain, StimulusParameters, TimeAxis, Waveform,
};
