use crate::prelude::{WaveError, WaveResult};

/// First derivative of `data` with respect to `time`.
///
/// Interior points use the centred stencil `(D[i+1] - D[i-1]) / (T[i+1] - T[i-1])`;
/// the first and last points fall back to one-sided forward and backward
/// differences. Every stencil uses its own local spacing, so a mildly
/// non-uniform grid only costs accuracy, not correctness.
///
/// The time axis is assumed strictly increasing and is not re-checked here.
pub fn derivative(time: &[f64], data: &[f64]) -> WaveResult<Vec<f64>> {
    if time.len() != data.len() {
        return Err(WaveError::MisalignedSequences {
            expected: time.len(),
            found: data.len(),
        });
    }

    let n = time.len();
    if n < 2 {
        return Err(WaveError::InsufficientSamples {
            provided: n,
            minimum: 2,
        });
    }

    // For n == 2 the interior is empty and both one-sided stencils see the same pair.
    let mut result = Vec::with_capacity(n);
    result.push((data[1] - data[0]) / (time[1] - time[0]));
    result.extend(
        time.windows(3)
            .zip(data.windows(3))
            .map(|(t, d)| (d[2] - d[0]) / (t[2] - t[0])),
    );
    result.push((data[n - 1] - data[n - 2]) / (time[n - 1] - time[n - 2]));

    Ok(result)
}
