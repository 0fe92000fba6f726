//! Core phase-reconstruction engine for gravitational-wave strain post-processing.
//!
//! Complex strain samples are turned into a cumulative (unwrapped) phase, an
//! instantaneous amplitude and the angular frequency omega. A quadratic fit over
//! a window of omega estimates its extremum and the implied value at t = 0.

pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use prelude::{PhaseProducts, StrainSeries, WaveError, WaveResult};
pub use processing::{fit_quadratic, process_wave_data, FitReport, FitWindow, PhasePipeline};
