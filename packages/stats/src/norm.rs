//! Standard normal distribution helpers.

use std::f64::consts::SQRT_2;

/// Complementary error function, rational approximation (absolute error
/// below `1.2e-7` everywhere).
fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = t.mul_add(
        t.mul_add(
            t.mul_add(
                t.mul_add(
                    t.mul_add(
                        t.mul_add(
                            t.mul_add(
                                t.mul_add(t.mul_add(0.170_872_77, -0.822_152_23), 1.488_515_87),
                                -1.135_203_98,
                            ),
                            0.278_868_07,
                        ),
                        -0.186_288_06,
                    ),
                    0.096_784_18,
                ),
                0.374_091_96,
            ),
            1.000_023_68,
        ),
        -1.265_512_23,
    );
    let ans = t * (-z * z + poly).exp();
    if x >= 0.0 { ans } else { 2.0 - ans }
}

/// Cumulative distribution function of the standard normal.
#[must_use]
pub fn cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cdf_at_zero_is_half() {
        assert!((cdf(0.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn cdf_matches_tabulated_quantiles() {
        assert!((cdf(1.959_964) - 0.975).abs() < 1e-5);
        assert!((cdf(-1.644_854) - 0.05).abs() < 1e-5);
        assert!((cdf(2.326_348) - 0.99).abs() < 1e-5);
    }

    #[test]
    fn cdf_is_symmetric() {
        for x in [0.3, 1.1, 2.7] {
            assert!((cdf(x) + cdf(-x) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn cdf_saturates_in_the_tails() {
        assert!(cdf(-10.0) < 1e-12);
        assert!(cdf(10.0) > 1.0 - 1e-12);
    }
}
