use nalgebra::DMatrix;

use crate::error::ProcessingError;

/// Window length used by the processing pipeline.
pub const SMOOTHING_WINDOW: usize = 19;
/// Polynomial order used by the processing pipeline.
pub const SMOOTHING_POLYORDER: usize = 13;

// ---------------------------------------------------------------------------
// Savitzky–Golay filter
// ---------------------------------------------------------------------------

/// Least-squares polynomial smoothing over a sliding window.
///
/// The filter keeps the hat matrix `H = Q Qᵀ` of the polynomial fit over one
/// window, where `Q` comes from a QR factorization of the Vandermonde matrix
/// on positions scaled to `[-1, 1]`. Row `r` of `H` holds the weights that
/// evaluate the fitted polynomial at window position `r`:
///
/// * interior samples use the centre row (the usual convolution),
/// * the first and last `window / 2` samples are taken from the polynomial
///   fitted to the first / last full window (SciPy's `mode="interp"`).
#[derive(Debug, Clone)]
pub struct SavitzkyGolay {
    window_length: usize,
    /// `weights[r]` evaluates the window fit at position `r`.
    weights: Vec<Vec<f64>>,
}

impl SavitzkyGolay {
    pub fn new(window_length: usize, polyorder: usize) -> Result<Self, ProcessingError> {
        if window_length % 2 == 0 || window_length <= polyorder {
            return Err(ProcessingError::InvalidFilter {
                window_length,
                polyorder,
            });
        }

        let half = window_length / 2;
        let scale = half.max(1) as f64;
        let vandermonde = DMatrix::from_fn(window_length, polyorder + 1, |r, c| {
            let x = (r as f64 - half as f64) / scale;
            x.powi(c as i32)
        });
        let q = vandermonde.qr().q();
        let hat = &q * q.transpose();

        let weights = (0..window_length)
            .map(|r| hat.row(r).iter().copied().collect())
            .collect();

        Ok(SavitzkyGolay {
            window_length,
            weights,
        })
    }

    /// The filter the pipeline uses (window 19, order 13).
    pub fn pipeline_default() -> Result<Self, ProcessingError> {
        Self::new(SMOOTHING_WINDOW, SMOOTHING_POLYORDER)
    }

    /// Convolution weights for the window centre.
    pub fn centre_weights(&self) -> &[f64] {
        &self.weights[self.window_length / 2]
    }

    /// Smooth `values`. Needs at least one full window of samples.
    pub fn apply(&self, values: &[f64]) -> Result<Vec<f64>, ProcessingError> {
        let n = values.len();
        let w = self.window_length;
        if n < w {
            return Err(ProcessingError::InsufficientSamples {
                required: w,
                available: n,
            });
        }

        let half = w / 2;
        let last_start = n - w;
        let out = (0..n)
            .map(|i| {
                let (row, start) = if i < half {
                    (i, 0)
                } else if i >= n - half {
                    (i - last_start, last_start)
                } else {
                    (half, i - half)
                };
                dot(&self.weights[row], &values[start..start + w])
            })
            .collect();
        Ok(out)
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
