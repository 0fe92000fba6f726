use crate::io::{output_path_for, read_ascii_file, write_products};
use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use gwcore::telemetry::Metrics;
use gwcore::{fit_quadratic, FitReport, PhasePipeline, PhaseProducts, StrainSeries};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct WorkflowResult {
    pub products: PhaseProducts,
    pub report: FitReport,
    pub output_path: PathBuf,
}

pub struct Runner {
    config: WorkflowConfig,
    pipeline: PhasePipeline,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            pipeline: PhasePipeline::new(),
        }
    }

    pub fn metrics(&self) -> Metrics {
        self.pipeline.metrics()
    }

    /// Load, process, fit and write one strain file.
    pub fn execute(&self, input: &Path) -> anyhow::Result<WorkflowResult> {
        let columns = read_ascii_file(input)?;
        let series = StrainSeries::new(columns.time, &columns.real, &columns.imag)
            .context("assembling strain series")?;

        let products = self
            .pipeline
            .process(&series)
            .with_context(|| format!("processing {}", input.display()))?;

        let report = fit_quadratic(&products.time, &products.omega, self.config.fit_window())
            .and_then(|fit| fit.report())
            .context("fitting quadratic to omega")?;
        log::info!(
            "omega fit over {} samples, residual rms {:.3e}",
            report.samples,
            report.residual_rms
        );

        let output_path = output_path_for(input, &self.config.output_suffix);
        write_products(&output_path, &products, self.config.precision)?;

        Ok(WorkflowResult {
            products,
            report,
            output_path,
        })
    }
}
