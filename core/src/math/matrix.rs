use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::prelude::{WaveError, WaveResult};

pub struct MatrixHelper;

impl MatrixHelper {
    /// Multiply two 2D arrays.
    pub fn multiply(lhs: ArrayView2<f64>, rhs: ArrayView2<f64>) -> Array2<f64> {
        lhs.dot(&rhs)
    }

    /// Solves the least-squares problem `design * x ≈ rhs` through its normal
    /// equations.
    pub fn least_squares(design: ArrayView2<f64>, rhs: ArrayView1<f64>) -> WaveResult<Array1<f64>> {
        let gram = Self::multiply(design.t(), design);
        let moment = design.t().dot(&rhs);
        Self::solve(gram, moment)
    }

    /// Gaussian elimination with partial pivoting on a square system.
    pub fn solve(mut lhs: Array2<f64>, mut rhs: Array1<f64>) -> WaveResult<Array1<f64>> {
        let n = rhs.len();
        if lhs.nrows() != n || lhs.ncols() != n {
            return Err(WaveError::MisalignedSequences {
                expected: n,
                found: lhs.nrows(),
            });
        }

        let scale = lhs.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let tolerance = scale * f64::EPSILON * n as f64;

        for col in 0..n {
            let pivot = (col..n)
                .max_by(|&a, &b| lhs[[a, col]].abs().total_cmp(&lhs[[b, col]].abs()))
                .unwrap_or(col);
            if lhs[[pivot, col]].abs() <= tolerance {
                return Err(WaveError::DegenerateFit(format!(
                    "singular normal matrix at column {}",
                    col
                )));
            }
            if pivot != col {
                for k in 0..n {
                    lhs.swap([pivot, k], [col, k]);
                }
                rhs.swap(pivot, col);
            }

            for row in col + 1..n {
                let factor = lhs[[row, col]] / lhs[[col, col]];
                for k in col..n {
                    lhs[[row, k]] -= factor * lhs[[col, k]];
                }
                rhs[row] -= factor * rhs[col];
            }
        }

        let mut solution = Array1::zeros(n);
        for row in (0..n).rev() {
            let tail: f64 = (row + 1..n).map(|k| lhs[[row, k]] * solution[k]).sum();
            solution[row] = (rhs[row] - tail) / lhs[[row, row]];
        }
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn solve_handles_row_swaps() {
        let lhs = array![[0.0, 2.0], [3.0, 1.0]];
        let rhs = array![4.0, 5.0];
        let x = MatrixHelper::solve(lhs, rhs).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn solve_reports_singular_system() {
        let lhs = array![[1.0, 2.0], [2.0, 4.0]];
        let rhs = array![1.0, 2.0];
        assert!(matches!(
            MatrixHelper::solve(lhs, rhs),
            Err(WaveError::DegenerateFit(_))
        ));
    }

    #[test]
    fn least_squares_recovers_exact_line() {
        let design = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0], [1.0, 3.0]];
        let rhs = array![1.0, 3.0, 5.0, 7.0];
        let x = MatrixHelper::least_squares(design.view(), rhs.view()).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }
}
