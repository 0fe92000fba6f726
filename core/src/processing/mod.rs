pub mod fit;
pub mod pipeline;
pub mod unwrap;

pub use fit::{fit_quadratic, FitReport, FitWindow, QuadraticFit};
pub use pipeline::{process_wave_data, PhasePipeline};
pub use unwrap::{amplitude, unwrap_phase, wrapped_phase, UnwrapState, UnwrappedPhase};
