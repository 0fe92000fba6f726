use anyhow::{ensure, Context};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Configuration for a synthetic chirp whose angular frequency follows
/// `omega_min + curvature * (t - t_min)^2`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub samples: usize,
    pub dt: f64,
    pub start_time: f64,
    pub omega_min: f64,
    pub t_min: f64,
    pub curvature: f64,
    pub amplitude: f64,
    pub noise: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            samples: 801,
            dt: 0.5,
            start_time: 0.0,
            omega_min: 0.2,
            t_min: 200.0,
            curvature: 1.0e-5,
            amplitude: 1.0,
            noise: 0.0,
            seed: 0,
        }
    }
}

impl GeneratorConfig {
    pub fn omega(&self, t: f64) -> f64 {
        self.omega_min + self.curvature * (t - self.t_min).powi(2)
    }

    /// Closed-form integral of `omega` from 0 to `t`.
    pub fn phase(&self, t: f64) -> f64 {
        self.omega_min * t
            + self.curvature * ((t - self.t_min).powi(3) + self.t_min.powi(3)) / 3.0
    }
}

/// Synthetic `(time, real, imag)` rows.
pub fn build_strain(config: &GeneratorConfig) -> anyhow::Result<Vec<[f64; 3]>> {
    ensure!(config.samples >= 2, "generator needs at least 2 samples");
    ensure!(config.dt > 0.0, "generator time step must be positive");
    ensure!(config.omega_min > 0.0, "generator omega_min must be positive");

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut rows = Vec::with_capacity(config.samples);

    for index in 0..config.samples {
        let t = config.start_time + config.dt * index as f64;
        let phase = config.phase(t);
        let envelope = config.amplitude * (config.omega(t) / config.omega_min).powf(2.0 / 3.0);
        let (mut re, mut im) = (envelope * phase.cos(), envelope * phase.sin());
        if config.noise > 0.0 {
            re += rng.gen_range(-config.noise..config.noise);
            im += rng.gen_range(-config.noise..config.noise);
        }
        rows.push([t, re, im]);
    }

    Ok(rows)
}

pub fn write_strain_file(path: &Path, config: &GeneratorConfig) -> anyhow::Result<()> {
    let rows = build_strain(config)?;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "# time    real    imag")?;
    for [t, re, im] in rows {
        writeln!(out, "{} {} {}", t, re, im)?;
    }
    out.flush().with_context(|| format!("writing {}", path.display()))?;
    log::info!(
        "generated {} synthetic samples into {}",
        config.samples,
        path.display()
    );
    Ok(())
}
