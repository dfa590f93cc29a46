//! Ordinary least squares on small dense design matrices.
//!
//! The unit-root regressions here have at most a dozen columns, so the
//! normal equations with Gauss-Jordan inversion are accurate enough and
//! keep the crate dependency-free.

use crate::StatsError;

/// A fitted least-squares regression.
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    /// Estimated coefficients, one per design column.
    pub coefficients: Vec<f64>,
    /// Standard error of each coefficient.
    pub standard_errors: Vec<f64>,
    /// Residual variance (RSS / degrees of freedom).
    pub residual_variance: f64,
    /// Number of observations in the fit.
    pub observations: usize,
}

impl OlsFit {
    /// The t-statistic of coefficient `index`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::DegenerateSeries`] when the coefficient's
    /// standard error is zero (a perfect or collinear fit).
    pub fn t_value(&self, index: usize) -> Result<f64, StatsError> {
        let se = self.standard_errors[index];
        if se <= 0.0 || !se.is_finite() {
            return Err(StatsError::DegenerateSeries {
                reason: format!("zero standard error for coefficient {index}"),
            });
        }
        Ok(self.coefficients[index] / se)
    }
}

/// Fits `response ~ design` by ordinary least squares.
///
/// `design` holds one row per observation; every row must have the same
/// number of columns.
///
/// # Errors
///
/// * [`StatsError::InsufficientData`] if there are no more observations
///   than columns (no residual degrees of freedom).
/// * [`StatsError::DegenerateSeries`] if the normal equations are
///   singular (collinear columns).
pub fn fit(design: &[Vec<f64>], response: &[f64]) -> Result<OlsFit, StatsError> {
    let n = design.len();
    let k = design.first().map_or(0, Vec::len);

    if k == 0 || n <= k {
        return Err(StatsError::InsufficientData {
            observations: n,
            required: k + 1,
        });
    }

    // Normal equations: (X'X) b = X'y.
    let mut xtx = vec![vec![0.0; k]; k];
    let mut xty = vec![0.0; k];
    for (row, &y) in design.iter().zip(response) {
        for i in 0..k {
            xty[i] += row[i] * y;
            for j in i..k {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }
    for i in 0..k {
        for j in 0..i {
            xtx[i][j] = xtx[j][i];
        }
    }

    // Columns can differ by many orders of magnitude (constant vs. acreage
    // levels), so solve the diagonally-scaled system and rescale after.
    let norms: Vec<f64> = (0..k).map(|i| xtx[i][i].sqrt()).collect();
    if norms.iter().any(|&c| c <= 0.0 || !c.is_finite()) {
        return Err(StatsError::DegenerateSeries {
            reason: "regression design has a zero column".to_owned(),
        });
    }

    let scaled: Vec<Vec<f64>> = (0..k)
        .map(|i| (0..k).map(|j| xtx[i][j] / (norms[i] * norms[j])).collect())
        .collect();
    let inverse_scaled = invert(&scaled)?;
    let inverse: Vec<Vec<f64>> = (0..k)
        .map(|i| {
            (0..k)
                .map(|j| inverse_scaled[i][j] / (norms[i] * norms[j]))
                .collect()
        })
        .collect();

    let coefficients: Vec<f64> = (0..k)
        .map(|i| (0..k).map(|j| inverse[i][j] * xty[j]).sum())
        .collect();

    let rss: f64 = design
        .iter()
        .zip(response)
        .map(|(row, &y)| {
            let fitted: f64 = row.iter().zip(&coefficients).map(|(x, b)| x * b).sum();
            (y - fitted).powi(2)
        })
        .sum();

    let df = n - k;
    let residual_variance = rss / df as f64;

    let standard_errors = (0..k)
        .map(|i| (residual_variance * inverse[i][i]).max(0.0).sqrt())
        .collect();

    Ok(OlsFit {
        coefficients,
        standard_errors,
        residual_variance,
        observations: n,
    })
}

/// Inverts a symmetric matrix (pre-scaled to unit diagonal) by
/// Gauss-Jordan elimination with partial pivoting.
fn invert(matrix: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, StatsError> {
    let k = matrix.len();

    let mut work: Vec<Vec<f64>> = matrix
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut extended = row.clone();
            extended.extend((0..k).map(|j| f64::from(u8::from(i == j))));
            extended
        })
        .collect();

    for col in 0..k {
        let pivot_row = (col..k)
            .max_by(|&a, &b| {
                work[a][col]
                    .abs()
                    .partial_cmp(&work[b][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);

        if work[pivot_row][col].abs() < 1e-10 {
            return Err(StatsError::DegenerateSeries {
                reason: "regression design matrix is singular".to_owned(),
            });
        }
        work.swap(col, pivot_row);

        let pivot = work[col][col];
        for value in &mut work[col] {
            *value /= pivot;
        }

        for row in 0..k {
            if row == col {
                continue;
            }
            let factor = work[row][col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..2 * k {
                work[row][j] -= factor * work[col][j];
            }
        }
    }

    Ok(work.into_iter().map(|row| row[k..].to_vec()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_linear_fit() {
        let design: Vec<Vec<f64>> = (0..5).map(|x| vec![1.0, f64::from(x)]).collect();
        let response: Vec<f64> = (0..5).map(|x| 2.0f64.mul_add(f64::from(x), 1.0)).collect();

        let fit = fit(&design, &response).unwrap();
        assert!((fit.coefficients[0] - 1.0).abs() < 1e-9);
        assert!((fit.coefficients[1] - 2.0).abs() < 1e-9);
        assert!(fit.residual_variance < 1e-12);
    }

    #[test]
    fn standard_errors_match_hand_computation() {
        // Centered design: Sxx = 10, intercept and slope are orthogonal.
        let xs = [-2.0, -1.0, 0.0, 1.0, 2.0];
        let design: Vec<Vec<f64>> = xs.iter().map(|&x| vec![1.0, x]).collect();
        let response = [-4.1, -1.9, 0.0, 2.1, 3.9];

        let fit = fit(&design, &response).unwrap();
        assert!((fit.coefficients[0] - 0.0).abs() < 1e-9);
        assert!((fit.coefficients[1] - 2.0).abs() < 1e-9);
        // RSS = 0.04 over 3 degrees of freedom.
        assert!((fit.residual_variance - 0.04 / 3.0).abs() < 1e-9);
        assert!((fit.standard_errors[1] - (0.04_f64 / 3.0 / 10.0).sqrt()).abs() < 1e-9);
        assert!((fit.standard_errors[0] - (0.04_f64 / 3.0 / 5.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn collinear_columns_are_rejected() {
        let design: Vec<Vec<f64>> = (0..6)
            .map(|x| vec![1.0, f64::from(x), 2.0 * f64::from(x)])
            .collect();
        let response = vec![0.0; 6];

        assert!(matches!(
            fit(&design, &response),
            Err(StatsError::DegenerateSeries { .. })
        ));
    }

    #[test]
    fn underdetermined_fit_is_insufficient() {
        let design = vec![vec![1.0, 0.0], vec![1.0, 1.0]];
        let response = vec![1.0, 2.0];

        assert!(matches!(
            fit(&design, &response),
            Err(StatsError::InsufficientData { .. })
        ));
    }

    #[test]
    fn t_value_requires_positive_standard_error() {
        let design: Vec<Vec<f64>> = (0..4).map(|x| vec![1.0, f64::from(x)]).collect();
        let response: Vec<f64> = (0..4).map(f64::from).collect();

        let fit = fit(&design, &response).unwrap();
        assert!(matches!(
            fit.t_value(1),
            Err(StatsError::DegenerateSeries { .. })
        ));
    }
}
