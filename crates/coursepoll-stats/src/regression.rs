use serde::Serialize;

/// Reasons an ordinary least-squares fit cannot be determined.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum RegressionError {
    #[display("x and y lengths differ ({x_len} vs {y_len})")]
    LengthMismatch { x_len: usize, y_len: usize },
    #[display("at least 2 points are required for a linear fit, got {count}")]
    TooFewPoints { count: usize },
    #[display("x values have zero variance")]
    ZeroVariance,
}

/// A simple (one feature, intercept included) least-squares line.
///
/// # Examples
///
/// ```
/// use coursepoll_stats::regression::LinearFit;
///
/// let fit = LinearFit::fit(&[0.0, 1.0, 2.0, 3.0], &[0.0, 2.0, 4.0, 6.0]).unwrap();
/// assert_eq!(fit.slope, 2.0);
/// assert_eq!(fit.intercept, 0.0);
/// assert_eq!(fit.predict_all(&[0.0, 1.0, 2.0, 3.0]), vec![0.0, 2.0, 4.0, 6.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination over the fitted points.
    ///
    /// Defined as 1.0 when `y` has zero variance and the fit is exact.
    pub r_squared: f64,
}

impl LinearFit {
    /// Fits `y = slope * x + intercept` by ordinary least squares.
    #[expect(clippy::cast_precision_loss)]
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self, RegressionError> {
        if xs.len() != ys.len() {
            return Err(RegressionError::LengthMismatch {
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }
        if xs.len() < 2 {
            return Err(RegressionError::TooFewPoints { count: xs.len() });
        }

        let n = xs.len() as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (x, y) in xs.iter().zip(ys) {
            let dx = x - x_mean;
            sxx += dx * dx;
            sxy += dx * (y - y_mean);
        }
        if sxx.abs() < f64::EPSILON {
            return Err(RegressionError::ZeroVariance);
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        let mut ss_res = 0.0;
        let mut ss_tot = 0.0;
        for (x, y) in xs.iter().zip(ys) {
            ss_res += (y - (slope * x + intercept)).powi(2);
            ss_tot += (y - y_mean).powi(2);
        }
        let r_squared = if ss_tot.abs() < f64::EPSILON {
            if ss_res.abs() < f64::EPSILON { 1.0 } else { 0.0 }
        } else {
            1.0 - ss_res / ss_tot
        };

        Ok(Self {
            slope,
            intercept,
            r_squared,
        })
    }

    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    #[must_use]
    pub fn predict_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.predict(x)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_linear_fit() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 2.0, 4.0, 6.0];
        let fit = LinearFit::fit(&xs, &ys).unwrap();
        assert_eq!(fit.slope, 2.0);
        assert_eq!(fit.intercept, 0.0);
        assert_eq!(fit.r_squared, 1.0);
        assert_eq!(fit.predict_all(&xs), ys.to_vec());
    }

    #[test]
    fn test_noisy_fit() {
        // step-shaped data, no exact line through all points
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [1.5, 1.5, 3.5, 3.5];
        let fit = LinearFit::fit(&xs, &ys).unwrap();
        assert!((fit.slope - 0.8).abs() < 1e-12);
        assert!((fit.intercept - 1.3).abs() < 1e-12);
        assert!(fit.r_squared > 0.0 && fit.r_squared < 1.0);
    }

    #[test]
    fn test_flat_y() {
        let fit = LinearFit::fit(&[0.0, 1.0, 2.0], &[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 5.0);
        assert_eq!(fit.r_squared, 1.0);
    }

    #[test]
    fn test_too_few_points() {
        assert_eq!(
            LinearFit::fit(&[1.0], &[1.0]),
            Err(RegressionError::TooFewPoints { count: 1 })
        );
        assert_eq!(
            LinearFit::fit(&[], &[]),
            Err(RegressionError::TooFewPoints { count: 0 })
        );
    }

    #[test]
    fn test_zero_variance_x() {
        assert_eq!(
            LinearFit::fit(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]),
            Err(RegressionError::ZeroVariance)
        );
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            LinearFit::fit(&[0.0, 1.0], &[0.0]),
            Err(RegressionError::LengthMismatch { x_len: 2, y_len: 1 })
        );
    }
}
