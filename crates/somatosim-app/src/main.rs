//! Somatosim Application
//!
//! Command-line front end for the tactile transduction pipeline. Parses
//! a parameter snapshot from flags, runs the core simulation once, and
//! renders the output as a text summary (with an ASCII spike raster) or
//! as JSON for downstream tooling.
//!
//! # Usage
//!
//! ```bash
//! # Default run: 10 Hz flutter on a Meissner fingertip receptor
//! somatosim
//!
//! # Slow-pain pathway: C fiber over 60 cm
//! somatosim --fiber c --distance 60
//!
//! # Vibration on a Pacinian receptor, JSON output
//! somatosim --receptor pacinian --frequency 250 --json
//! ```

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use somatosim_core::sim::{simulate, SimulationOutput, SimulationParameters};
use somatosim_core::types::{BodyRegion, FiberType, ReceptorClass};

/// Receptor class flag
#[derive(Copy, Clone, Debug, ValueEnum)]
enum ReceptorArg {
    /// Meissner corpuscle (2-40 Hz flutter)
    Meissner,
    /// Pacinian corpuscle (40-500 Hz vibration)
    Pacinian,
}

impl From<ReceptorArg> for ReceptorClass {
    fn from(arg: ReceptorArg) -> Self {
        match arg {
            ReceptorArg::Meissner => Self::Meissner,
            ReceptorArg::Pacinian => Self::Pacinian,
        }
    }
}

/// Fiber type flag
#[derive(Copy, Clone, Debug, ValueEnum)]
enum FiberArg {
    /// Aβ fiber, 50 m/s
    ABeta,
    /// Aδ fiber, 15 m/s
    ADelta,
    /// C fiber, 1.5 m/s
    C,
}

impl From<FiberArg> for FiberType {
    fn from(arg: FiberArg) -> Self {
        match arg {
            FiberArg::ABeta => Self::ABeta,
            FiberArg::ADelta => Self::ADelta,
            FiberArg::C => Self::C,
        }
    }
}

/// Body region flag
#[derive(Copy, Clone, Debug, ValueEnum)]
enum RegionArg {
    Finger,
    Thumb,
    Palm,
    Wrist,
    Forearm,
    UpperArm,
    Shoulder,
}

impl From<RegionArg> for BodyRegion {
    fn from(arg: RegionArg) -> Self {
        match arg {
            RegionArg::Finger => Self::Finger,
            RegionArg::Thumb => Self::Thumb,
            RegionArg::Palm => Self::Palm,
            RegionArg::Wrist => Self::Wrist,
            RegionArg::Forearm => Self::Forearm,
            RegionArg::UpperArm => Self::UpperArm,
            RegionArg::Shoulder => Self::Shoulder,
        }
    }
}

/// Somatosim tactile pathway simulator
#[derive(Parser, Debug)]
#[command(name = "somatosim")]
#[command(author, version, about = "Tactile transduction pathway simulator", long_about = None)]
struct Cli {
    /// Logging verbosity level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Simulated duration in ms
    #[arg(long, default_value_t = 500.0)]
    duration: f32,

    /// Receptor class
    #[arg(long, value_enum, default_value_t = ReceptorArg::Meissner)]
    receptor: ReceptorArg,

    /// Stimulus frequency in Hz
    #[arg(short, long, default_value_t = 10.0)]
    frequency: f32,

    /// Stimulus amplitude (arbitrary units)
    #[arg(short, long, default_value_t = 1.0)]
    amplitude: f32,

    /// Disable the stimulus (flat zero signal)
    #[arg(long)]
    no_stimulus: bool,

    /// Adaptation time constant τ in ms
    #[arg(long, default_value_t = 120.0)]
    tau: f32,

    /// Spike threshold θ (receptor potential units)
    #[arg(long, default_value_t = 0.5)]
    threshold: f32,

    /// Refractory period in ms
    #[arg(long, default_value_t = 8.0)]
    refractory: f32,

    /// Afferent fiber type
    #[arg(long, value_enum, default_value_t = FiberArg::ABeta)]
    fiber: FiberArg,

    /// Conduction path distance in cm
    #[arg(short, long, default_value_t = 60.0)]
    distance: f32,

    /// Body region for the two-point task
    #[arg(long, value_enum, default_value_t = RegionArg::Finger)]
    region: RegionArg,

    /// Two-point probe separation in mm
    #[arg(short, long, default_value_t = 2.0)]
    separation: f32,

    /// Emit the full output snapshot as JSON instead of a text summary
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn to_parameters(&self) -> SimulationParameters {
        SimulationParameters {
            duration_ms: self.duration,
            receptor: self.receptor.into(),
            stimulus: somatosim_core::StimulusParameters {
                frequency_hz: self.frequency,
                amplitude: self.amplitude,
                enabled: !self.no_stimulus,
            },
            adaptation: somatosim_core::AdaptationParameters { tau_ms: self.tau },
            spike: somatosim_core::SpikeParameters {
                threshold: self.threshold,
                refractory_ms: self.refractory,
            },
            conduction: somatosim_core::ConductionParameters {
                path_distance_cm: self.distance,
                fiber: self.fiber.into(),
            },
            discrimination: somatosim_core::DiscriminationParameters {
                region: self.region.into(),
                probe_separation_mm: self.separation,
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let params = cli.to_parameters();
    info!(
        "somatosim v{}: {:?} receptor, {:?} fiber, {} ms run",
        env!("CARGO_PKG_VERSION"),
        params.receptor,
        params.conduction.fiber,
        params.duration_ms
    );

    let output = simulate(&params).context("simulation rejected the parameter set")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(&params, &output);
    }

    Ok(())
}

fn print_summary(params: &SimulationParameters, output: &SimulationOutput) {
    let gain = params.receptor.gain_at(params.stimulus.frequency_hz);
    let (low, high) = params.receptor.passband_hz();

    println!("Stimulus      : {} Hz x {} over {} ms", params.stimulus.frequency_hz, params.stimulus.amplitude, params.duration_ms);
    println!(
        "Receptor      : {:?} ({}) band [{}, {}] Hz, gain {:.3}",
        params.receptor,
        params.receptor.adaptation_label(),
        low,
        high,
        gain
    );
    println!("Peak potential: {:.4}", output.receptor_potential.peak_abs());
    println!(
        "Local spikes  : {} (first at {:?} ms, mean rate {:.1} Hz)",
        output.spikes_local.len(),
        output.spikes_local.first_spike_ms(),
        output.spikes_local.mean_rate_hz(params.duration_ms)
    );
    println!(
        "Conduction    : {:?} over {} cm -> delay {:.1} ms",
        params.conduction.fiber, params.conduction.path_distance_cm, output.conduction_delay_ms
    );
    println!("Raster local  : {}", raster(output.spikes_local.times(), params.duration_ms));
    println!(
        "Raster arrived: {}",
        raster(
            output.spikes_arrived.times(),
            params.duration_ms + output.conduction_delay_ms
        )
    );
    println!(
        "Two-point     : {:?} at {} mm (threshold {} mm) -> {}",
        params.discrimination.region,
        params.discrimination.probe_separation_mm,
        params.discrimination.region.two_point_threshold_mm(),
        if output.two_point_perceived { "two points" } else { "one point" }
    );
}

/// Render spike times as a fixed-width ASCII raster line
fn raster(times: &[f32], span_ms: f32) -> String {
    const WIDTH: usize = 60;
    let mut line = vec!['.'; WIDTH];
    if span_ms > 0.0 {
        for &t in times {
            let col = ((t / span_ms) * WIDTH as f32) as usize;
            line[col.min(WIDTH - 1)] = '|';
        }
    }
    line.into_iter().collect()
}

// ============================================================================
// Tests
// ============================================================================
