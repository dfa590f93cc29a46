//! Augmented Dickey-Fuller unit-root test.
//!
//! Constant-only regression with downward t-stat lag selection and the
//! MacKinnon (1994) approximate p-value surface, matching the behavior of
//! the usual econometrics implementations of `adfuller`.

use crate::ols::{self, OlsFit};
use crate::{StatsError, norm};

/// One-sided 5% normal critical value used by the t-stat lag search.
const AUTOLAG_STOP: f64 = 1.644_853_626_951_472_2;

/// MacKinnon tau bounds for the constant-only, single-series case.
const TAU_MAX: f64 = 2.74;
const TAU_MIN: f64 = -18.83;
const TAU_STAR: f64 = -1.61;

/// MacKinnon small-tau polynomial (constant-only, one variable).
const TAU_SMALL_P: [f64; 3] = [2.1659, 1.4412, 3.8269e-4];
/// MacKinnon large-tau polynomial (constant-only, one variable).
const TAU_LARGE_P: [f64; 4] = [1.7339, 0.932_02, -0.127_45, -0.010_368];

/// Minimum series length for the 0-lag regression to retain a residual
/// degree of freedom.
pub const MIN_OBSERVATIONS: usize = 4;

/// Outcome of the unit-root test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdfResult {
    /// The tau statistic (t-value of the lagged level coefficient).
    pub statistic: f64,
    /// MacKinnon approximate p-value in `[0, 1]`.
    pub p_value: f64,
    /// Number of lagged difference terms selected.
    pub lags_used: usize,
    /// Observations entering the final regression.
    pub observations: usize,
}

/// Runs the Augmented Dickey-Fuller test on `series`.
///
/// Lag order is chosen by walking down from the Schwert rule-of-thumb
/// maximum and keeping the first lag whose highest-order difference term
/// is significant at the one-sided 5% level; zero lags if none is.
///
/// # Errors
///
/// * [`StatsError::InsufficientData`] when the series is shorter than
///   [`MIN_OBSERVATIONS`].
/// * [`StatsError::DegenerateSeries`] when the regression is singular or
///   fits perfectly (constant or exactly linear input).
pub fn adf_test(series: &[f64]) -> Result<AdfResult, StatsError> {
    let n = series.len();
    if n < MIN_OBSERVATIONS {
        return Err(StatsError::InsufficientData {
            observations: n,
            required: MIN_OBSERVATIONS,
        });
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let schwert = (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize;
    let max_lag = schwert.min(n / 2 - 2);

    let diffs: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();
    let lags = select_lag(series, &diffs, max_lag)?;

    finish(series, &diffs, lags)
}

/// Runs the test with a fixed lag order, skipping the lag search.
///
/// # Errors
///
/// As [`adf_test`], plus [`StatsError::InsufficientData`] when the series
/// cannot support `lags` difference terms.
pub fn adf_test_with_lag(series: &[f64], lags: usize) -> Result<AdfResult, StatsError> {
    let n = series.len();
    if n < MIN_OBSERVATIONS + 2 * lags {
        return Err(StatsError::InsufficientData {
            observations: n,
            required: MIN_OBSERVATIONS + 2 * lags,
        });
    }

    let diffs: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();
    finish(series, &diffs, lags)
}

fn finish(series: &[f64], diffs: &[f64], lags: usize) -> Result<AdfResult, StatsError> {
    let (design, response) = regression_sample(series, diffs, lags, lags);
    let fit = ols::fit(&design, &response)?;
    let statistic = fit.t_value(1)?;

    Ok(AdfResult {
        statistic,
        p_value: mackinnon_p(statistic),
        lags_used: lags,
        observations: fit.observations,
    })
}

/// Builds the regression sample for `lags` difference terms.
///
/// Rows are `Δy_t` against `[1, y_{t-1}, Δy_{t-1}, .., Δy_{t-lags}]`.
/// `start_lag` fixes the first usable row so that every candidate model in
/// the lag search is fitted on the same observations.
fn regression_sample(
    series: &[f64],
    diffs: &[f64],
    lags: usize,
    start_lag: usize,
) -> (Vec<Vec<f64>>, Vec<f64>) {
    let mut design = Vec::new();
    let mut response = Vec::new();

    // diffs[t - 1] == Δy_t; the first usable t leaves start_lag
    // differences behind it.
    for t in (start_lag + 1)..series.len() {
        let mut row = Vec::with_capacity(lags + 2);
        row.push(1.0);
        row.push(series[t - 1]);
        for i in 1..=lags {
            row.push(diffs[t - 1 - i]);
        }
        design.push(row);
        response.push(diffs[t - 1]);
    }

    (design, response)
}

/// Downward t-stat lag search over a common sample.
fn select_lag(series: &[f64], diffs: &[f64], max_lag: usize) -> Result<usize, StatsError> {
    for lags in (1..=max_lag).rev() {
        let (design, response) = regression_sample(series, diffs, lags, max_lag);
        let fit: OlsFit = match ols::fit(&design, &response) {
            Ok(fit) => fit,
            // A singular candidate just falls through to fewer lags.
            Err(StatsError::DegenerateSeries { .. }) => continue,
            Err(err) => return Err(err),
        };
        match fit.t_value(lags + 1) {
            Ok(t) if t.abs() >= AUTOLAG_STOP => return Ok(lags),
            Ok(_) | Err(StatsError::DegenerateSeries { .. }) => {}
            Err(err) => return Err(err),
        }
    }
    Ok(0)
}

/// MacKinnon (1994) approximate asymptotic p-value for the tau statistic.
#[must_use]
pub fn mackinnon_p(tau: f64) -> f64 {
    if tau <= TAU_MIN {
        return 0.0;
    }
    if tau >= TAU_MAX {
        return 1.0;
    }
    let z = if tau <= TAU_STAR {
        polyval(&TAU_SMALL_P, tau)
    } else {
        polyval(&TAU_LARGE_P, tau)
    };
    norm::cdf(z)
}

/// Evaluates a polynomial with coefficients in ascending-degree order.
fn polyval(coefficients: &[f64], x: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc.mul_add(x, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_series_is_insufficient() {
        assert!(matches!(
            adf_test(&[1.0, 2.0, 3.0]),
            Err(StatsError::InsufficientData { .. })
        ));
    }

    #[test]
    fn constant_series_is_degenerate() {
        assert!(matches!(
            adf_test(&[5.0; 12]),
            Err(StatsError::DegenerateSeries { .. })
        ));
    }

    fn mean_reverting_series() -> Vec<f64> {
        // Strong mean reversion: sign flips every step, irregular jitter.
        let jitter = [
            0.31, -0.14, 0.07, 0.22, -0.29, 0.11, -0.05, 0.18, -0.21, 0.02, 0.25, -0.09, 0.13,
            -0.27, 0.04, 0.19, -0.12, 0.08, -0.23, 0.15, 0.01, -0.17, 0.26, -0.03, 0.09, -0.2,
            0.17, -0.07, 0.12, -0.16,
        ];
        jitter
            .iter()
            .enumerate()
            .map(|(i, &j)| if i % 2 == 0 { 8.0 + j } else { -8.0 + j })
            .collect()
    }

    fn explosive_series() -> Vec<f64> {
        let jitter = [
            0.4, -0.3, 0.2, 0.5, -0.1, 0.3, -0.4, 0.1, 0.2, -0.5, 0.4, -0.2, 0.3, 0.1, -0.3, 0.5,
            -0.4, 0.2, -0.1, 0.3, 0.4, -0.2, 0.1, -0.5, 0.2, 0.3, -0.1, 0.4, -0.3, 0.2,
        ];
        let mut series = vec![1.0];
        for &j in &jitter {
            let previous = *series.last().unwrap();
            series.push(1.5f64.mul_add(previous, j));
        }
        series
    }

    #[test]
    fn mean_reverting_series_has_tiny_p_value() {
        // Lag order pinned at zero: the level coefficient carries the
        // whole (overwhelming) mean-reversion signal.
        let result = adf_test_with_lag(&mean_reverting_series(), 0).unwrap();
        assert!(result.statistic < -4.0);
        assert!(result.p_value < 0.01);
    }

    #[test]
    fn explosive_series_has_p_value_near_one() {
        let result = adf_test_with_lag(&explosive_series(), 0).unwrap();
        assert!(result.statistic > 2.74);
        assert!((result.p_value - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn lag_search_keeps_the_verdict_direction() {
        let reverting = adf_test(&mean_reverting_series()).unwrap();
        assert!(reverting.statistic < 0.0);
        assert!(reverting.p_value < 0.95);
        assert!(reverting.lags_used <= 9);

        let explosive = adf_test(&explosive_series()).unwrap();
        assert!(explosive.statistic > 0.0);
        assert!(explosive.p_value > 0.9);
    }

    #[test]
    fn p_value_stays_in_unit_interval() {
        for tau in [-25.0, -10.0, -3.0, -1.61, -0.5, 0.0, 1.0, 2.74, 5.0] {
            let p = mackinnon_p(tau);
            assert!((0.0..=1.0).contains(&p), "p({tau}) = {p}");
        }
    }

    #[test]
    fn p_value_is_monotonic_in_tau() {
        let taus = [-19.0, -12.0, -6.0, -3.0, -1.7, -1.0, 0.0, 1.0, 2.0, 3.0];
        let ps: Vec<f64> = taus.iter().map(|&t| mackinnon_p(t)).collect();
        assert!(ps.windows(2).all(|w| w[0] <= w[1] + 1e-9));
    }

    #[test]
    fn p_value_saturates_at_the_tabulated_bounds() {
        assert!((mackinnon_p(-19.0) - 0.0).abs() < f64::EPSILON);
        assert!((mackinnon_p(3.0) - 1.0).abs() < f64::EPSILON);
    }
}
