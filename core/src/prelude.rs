use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Time-ordered complex strain signal, one sample per time stamp.
#[derive(Debug, Clone)]
pub struct StrainSeries {
    time: Vec<f64>,
    samples: Vec<Complex64>,
}

impl StrainSeries {
    /// Pairs the time axis with the real and imaginary columns.
    ///
    /// Only alignment is checked; the time axis is trusted to be sorted and
    /// free of duplicates.
    pub fn new(time: Vec<f64>, real: &[f64], imag: &[f64]) -> WaveResult<Self> {
        for found in [real.len(), imag.len()] {
            if found != time.len() {
                return Err(WaveError::MisalignedSequences {
                    expected: time.len(),
                    found,
                });
            }
        }

        let samples = real
            .iter()
            .zip(imag)
            .map(|(&re, &im)| Complex64::new(re, im))
            .collect();

        Ok(Self { time, samples })
    }

    /// Like [`StrainSeries::new`] but also rejects a time axis that is not
    /// strictly increasing.
    pub fn validated(time: Vec<f64>, real: &[f64], imag: &[f64]) -> WaveResult<Self> {
        if let Some(index) = time.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(WaveError::NonMonotonicTime { index: index + 1 });
        }
        Self::new(time, real, imag)
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn samples(&self) -> &[Complex64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Derived sequences produced for one strain signal, aligned by index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhaseProducts {
    pub time: Vec<f64>,
    pub cumulative_phase: Vec<f64>,
    pub amplitude: Vec<f64>,
    pub omega: Vec<f64>,
}

impl PhaseProducts {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Iterates `(time, cumulative_phase, amplitude, omega)` rows.
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64, f64, f64)> + '_ {
        self.time
            .iter()
            .zip(&self.cumulative_phase)
            .zip(&self.amplitude)
            .zip(&self.omega)
            .map(|(((&t, &phase), &amp), &omega)| (t, phase, amp, omega))
    }
}

/// Common error type for the phase core.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum WaveError {
    #[error("insufficient samples: {provided} provided, {minimum} required")]
    InsufficientSamples { provided: usize, minimum: usize },
    #[error("misaligned sequences: expected length {expected}, found {found}")]
    MisalignedSequences { expected: usize, found: usize },
    #[error("time axis is not strictly increasing at index {index}")]
    NonMonotonicTime { index: usize },
    #[error("fit window holds {found} samples, {minimum} required")]
    InsufficientWindow { found: usize, minimum: usize },
    #[error("degenerate fit: {0}")]
    DegenerateFit(String),
}

pub type WaveResult<T> = Result<T, WaveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_rejects_misaligned_columns() {
        let err = StrainSeries::new(vec![0.0, 1.0, 2.0], &[1.0, 1.0], &[0.0, 0.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            WaveError::MisalignedSequences {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn validated_series_flags_repeated_time() {
        let err = StrainSeries::validated(vec![0.0, 1.0, 1.0], &[1.0; 3], &[0.0; 3]).unwrap_err();
        assert_eq!(err, WaveError::NonMonotonicTime { index: 2 });
    }

    #[test]
    fn products_rows_follow_column_order() {
        let products = PhaseProducts {
            time: vec![0.0, 1.0],
            cumulative_phase: vec![0.5, 1.5],
            amplitude: vec![2.0, 2.0],
            omega: vec![1.0, 1.0],
        };
        let rows: Vec<_> = products.rows().collect();
        assert_eq!(rows[1], (1.0, 1.5, 2.0, 1.0));
    }
}
