use std::f64::consts::PI;

use crate::math::derivative::derivative;
use crate::math::stats::StatsHelper;
use crate::prelude::{PhaseProducts, StrainSeries, WaveResult};
use crate::processing::unwrap::{amplitude, unwrap_phase, wrapped_phase};
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::{Metrics, MetricsRecorder};

/// Turns complex strain into cumulative phase, amplitude and omega.
///
/// Holds no per-signal state; the recorder only accumulates counters, so one
/// pipeline may be shared across threads.
pub struct PhasePipeline {
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl PhasePipeline {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new("phase"),
            metrics: MetricsRecorder::new(),
        }
    }

    pub fn process(&self, series: &StrainSeries) -> WaveResult<PhaseProducts> {
        let result = self.run(series);
        if result.is_err() {
            self.metrics.record_error();
        }
        result
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.snapshot()
    }

    fn run(&self, series: &StrainSeries) -> WaveResult<PhaseProducts> {
        let samples = series.samples();
        let amplitude = amplitude(samples);
        let unwrapped = unwrap_phase(&wrapped_phase(samples))?;
        let omega = derivative(series.time(), &unwrapped.cumulative)?;

        let state = unwrapped.state;
        self.logger.record(&format!(
            "unwrapped {} samples, {} wraps, net cycles {}",
            series.len(),
            state.wrap_events,
            state.cycles
        ));

        if state.zero_landings > 0 {
            self.logger.caution(&format!(
                "{} phase jumps landed on exactly zero and were not counted as wraps",
                state.zero_landings
            ));
        }

        let max_step = StatsHelper::max_step(&unwrapped.cumulative);
        if max_step >= PI {
            self.logger.caution(&format!(
                "cumulative phase still jumps by {:.4} rad; signal may be under-sampled",
                max_step
            ));
        } else {
            let message = format!("largest cumulative phase step {:.4} rad", max_step);
            self.logger.detail(&message);
        }

        self.metrics.record_processed(series.len(), state.wrap_events);

        Ok(PhaseProducts {
            time: series.time().to_vec(),
            cumulative_phase: unwrapped.cumulative,
            amplitude,
            omega,
        })
    }
}

impl Default for PhasePipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot processing of aligned `(time, real, imag)` columns.
pub fn process_wave_data(time: &[f64], real: &[f64], imag: &[f64]) -> WaveResult<PhaseProducts> {
    let series = StrainSeries::new(time.to_vec(), real, imag)?;
    PhasePipeline::new().process(&series)
}
