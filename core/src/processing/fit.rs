use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::math::matrix::MatrixHelper;
use crate::math::stats::StatsHelper;
use crate::prelude::{WaveError, WaveResult};

const MIN_FIT_SAMPLES: usize = 3;

/// Inclusive time window that selects the samples used by the fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitWindow {
    pub start: f64,
    pub end: f64,
}

impl FitWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }
}

impl Default for FitWindow {
    fn default() -> Self {
        Self {
            start: 100.0,
            end: 300.0,
        }
    }
}

/// Least-squares parabola `a*x^2 + b*x + c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticFit {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub samples: usize,
    pub residual_rms: f64,
}

/// Summary of the fitted parabola's vertex and its value at t = 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub extremum_time: f64,
    pub extremum_omega: f64,
    pub omega_at_zero: f64,
    pub samples: usize,
    pub residual_rms: f64,
}

impl QuadraticFit {
    pub fn evaluate(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }

    /// Vertex location `-b / (2a)`.
    pub fn extremum_time(&self) -> WaveResult<f64> {
        if self.a == 0.0 {
            return Err(WaveError::DegenerateFit(
                "zero curvature, parabola has no extremum".into(),
            ));
        }
        Ok(-self.b / (2.0 * self.a))
    }

    pub fn report(&self) -> WaveResult<FitReport> {
        let extremum_time = self.extremum_time()?;
        Ok(FitReport {
            extremum_time,
            extremum_omega: self.evaluate(extremum_time),
            omega_at_zero: self.evaluate(0.0),
            samples: self.samples,
            residual_rms: self.residual_rms,
        })
    }
}

/// Fits a parabola to the `(time, omega)` samples inside `window`.
///
/// The abscissae are centred on their mean and scaled by the half-width of the
/// selected samples before solving the normal equations; the coefficients are
/// mapped back to the original axis.
pub fn fit_quadratic(time: &[f64], omega: &[f64], window: FitWindow) -> WaveResult<QuadraticFit> {
    if time.len() != omega.len() {
        return Err(WaveError::MisalignedSequences {
            expected: time.len(),
            found: omega.len(),
        });
    }

    let (xs, ys): (Vec<f64>, Vec<f64>) = time
        .iter()
        .zip(omega)
        .filter(|&(&t, _)| window.contains(t))
        .map(|(&t, &w)| (t, w))
        .unzip();

    if xs.len() < MIN_FIT_SAMPLES {
        return Err(WaveError::InsufficientWindow {
            found: xs.len(),
            minimum: MIN_FIT_SAMPLES,
        });
    }

    let shift = StatsHelper::mean(&xs);
    let half_width = xs.iter().fold(0.0_f64, |acc, &x| acc.max((x - shift).abs()));
    if half_width == 0.0 {
        return Err(WaveError::DegenerateFit(
            "all window samples share one time stamp".into(),
        ));
    }

    let design = Array2::from_shape_fn((xs.len(), 3), |(row, col)| {
        ((xs[row] - shift) / half_width).powi(2 - col as i32)
    });
    let rhs = Array1::from(ys.clone());
    let coeffs = MatrixHelper::least_squares(design.view(), rhs.view())?;

    // a'*u^2 + b'*u + c' with u = (x - shift) / half_width.
    let a = coeffs[0] / (half_width * half_width);
    let b_shifted = coeffs[1] / half_width;
    let c_shifted = coeffs[2];
    let mut fit = QuadraticFit {
        a,
        b: b_shifted - 2.0 * a * shift,
        c: a * shift * shift - b_shifted * shift + c_shifted,
        samples: xs.len(),
        residual_rms: 0.0,
    };

    let residuals: Vec<f64> = xs
        .iter()
        .zip(&ys)
        .map(|(&x, &y)| y - fit.evaluate(x))
        .collect();
    fit.residual_rms = StatsHelper::rms(&residuals);

    Ok(fit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_parabola_vertex_and_intercept() {
        let time: Vec<f64> = (0..=400).map(|i| i as f64).collect();
        let omega: Vec<f64> = time
            .iter()
            .map(|t| 0.001 * (t - 200.0).powi(2) + 0.05)
            .collect();

        let fit = fit_quadratic(&time, &omega, FitWindow::default()).unwrap();
        assert_eq!(fit.samples, 201);
        assert!(fit.residual_rms < 1e-9);

        let report = fit.report().unwrap();
        assert!((report.extremum_time - 200.0).abs() < 1e-6);
        assert!((report.extremum_omega - 0.05).abs() < 1e-8);
        assert!((report.omega_at_zero - 40.05).abs() < 1e-6);
    }

    #[test]
    fn wide_window_keeps_full_rank() {
        let time: Vec<f64> = (0..=20_000).map(|i| i as f64).collect();
        let omega: Vec<f64> = time
            .iter()
            .map(|t| 1e-9 * (t - 10_000.0).powi(2) + 0.3)
            .collect();

        let fit = fit_quadratic(&time, &omega, FitWindow::new(0.0, 20_000.0)).unwrap();
        assert_eq!(fit.samples, 20_001);

        let report = fit.report().unwrap();
        assert!((report.extremum_time - 10_000.0).abs() < 1e-4);
        assert!((report.extremum_omega - 0.3).abs() < 1e-9);
        assert!((report.omega_at_zero - 0.4).abs() < 1e-8);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let time = [99.0, 100.0, 200.0, 300.0, 301.0];
        let omega = [9.0, 1.0, 0.0, 1.0, 9.0];

        let fit = fit_quadratic(&time, &omega, FitWindow::default()).unwrap();
        assert_eq!(fit.samples, 3);
        assert!((fit.extremum_time().unwrap() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn collinear_abscissae_are_degenerate() {
        let time = [150.0, 150.0, 150.0, 150.0];
        let omega = [1.0, 2.0, 3.0, 4.0];
        assert!(matches!(
            fit_quadratic(&time, &omega, FitWindow::default()),
            Err(WaveError::DegenerateFit(_))
        ));
    }

    #[test]
    fn too_few_samples_in_window() {
        let time = [0.0, 150.0, 250.0, 400.0];
        let omega = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(
            fit_quadratic(&time, &omega, FitWindow::default()).unwrap_err(),
            WaveError::InsufficientWindow {
                found: 2,
                minimum: 3
            }
        );
    }

    #[test]
    fn straight_line_has_no_extremum() {
        let fit = QuadraticFit {
            a: 0.0,
            b: 2.0,
            c: 1.0,
            samples: 11,
            residual_rms: 0.0,
        };
        assert_eq!(fit.evaluate(3.0), 7.0);
        assert!(matches!(fit.report(), Err(WaveError::DegenerateFit(_))));
    }
}
