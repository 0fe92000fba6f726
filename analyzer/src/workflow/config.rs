use anyhow::{ensure, Context};
use gwcore::FitWindow;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkflowConfig {
    pub window_start: f64,
    pub window_end: f64,
    /// Decimal digits written per value.
    pub precision: usize,
    pub output_suffix: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            window_start: 100.0,
            window_end: 300.0,
            precision: 15,
            output_suffix: "_phase_amp_omega".to_string(),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_args(window_start: f64, window_end: f64, precision: usize) -> Self {
        Self {
            window_start,
            window_end,
            precision,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.window_start < self.window_end,
            "fit window start {} must precede end {}",
            self.window_start,
            self.window_end
        );
        ensure!(!self.output_suffix.is_empty(), "output suffix must not be empty");
        Ok(())
    }

    pub fn fit_window(&self) -> FitWindow {
        FitWindow::new(self.window_start, self.window_end)
    }
}
