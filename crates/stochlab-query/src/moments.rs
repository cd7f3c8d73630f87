use serde::Serialize;

use crate::{Moment, QueryError, params::Parameters};

/// Mean, variance and standard deviation of a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Moments {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
}

impl Moments {
    fn new(mean: f64, variance: f64) -> Self {
        Self {
            mean,
            variance,
            std_dev: variance.sqrt(),
        }
    }
}

impl Parameters {
    /// Closed-form moments of the distribution.
    #[expect(clippy::cast_precision_loss)]
    pub(crate) fn moments(&self) -> Result<Moments, QueryError> {
        let moments = match *self {
            Parameters::Bernoulli { p } => Moments::new(p, p * (1.0 - p)),
            Parameters::Binomial { n, p } => {
                let n = n as f64;
                Moments::new(n * p, n * p * (1.0 - p))
            }
            Parameters::Geometric { p } => Moments::new(1.0 / p, (1.0 - p) / (p * p)),
            Parameters::NegativeBinomial { r, p } => {
                Moments::new(r * (1.0 - p) / p, r * (1.0 - p) / (p * p))
            }
            Parameters::Poisson { lambda } => Moments::new(lambda, lambda),
            Parameters::Uniform { a, b } => Moments::new((a + b) / 2.0, (b - a).powi(2) / 12.0),
            Parameters::Exponential { lambda } => Moments::new(1.0 / lambda, 1.0 / (lambda * lambda)),
            Parameters::Normal { mu, sigma } => Moments::new(mu, sigma * sigma),
            Parameters::Beta { alpha, beta } => {
                let sum = alpha + beta;
                Moments::new(alpha / sum, alpha * beta / (sum * sum * (sum + 1.0)))
            }
            Parameters::Gamma { shape, scale } => Moments::new(shape * scale, shape * scale * scale),
            Parameters::ChiSquare { df } => Moments::new(df, 2.0 * df),
            Parameters::StudentT { df } => {
                let family = self.family();
                if df <= 1.0 {
                    return Err(QueryError::UndefinedMoment {
                        family,
                        moment: Moment::Mean,
                        reason: format!("requires df > 1, got df = {df}"),
                    });
                }
                if df <= 2.0 {
                    return Err(QueryError::UndefinedMoment {
                        family,
                        moment: Moment::Variance,
                        reason: format!("requires df > 2, got df = {df}"),
                    });
                }
                Moments::new(0.0, df / (df - 2.0))
            }
        };
        Ok(moments)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{DistributionSpec, Family};

    fn moments_of(spec: &DistributionSpec) -> Result<Moments, QueryError> {
        Parameters::from_spec(spec).unwrap().moments()
    }

    #[test]
    fn test_beta_moments() {
        let m = moments_of(&DistributionSpec::beta(2.0, 3.0)).unwrap();
        assert_abs_diff_eq!(m.mean, 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(m.variance, 0.04, epsilon = 1e-12);
        assert_abs_diff_eq!(m.std_dev, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_discrete_moments() {
        let m = moments_of(&DistributionSpec::binomial(10, 0.4)).unwrap();
        assert_abs_diff_eq!(m.mean, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.variance, 2.4, epsilon = 1e-12);

        let m = moments_of(&DistributionSpec::geometric(0.2)).unwrap();
        assert_abs_diff_eq!(m.mean, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.variance, 20.0, epsilon = 1e-12);

        let m = moments_of(&DistributionSpec::negative_binomial(2.0, 0.4)).unwrap();
        assert_abs_diff_eq!(m.mean, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.variance, 7.5, epsilon = 1e-12);

        let m = moments_of(&DistributionSpec::poisson(4.0)).unwrap();
        assert_eq!((m.mean, m.variance, m.std_dev), (4.0, 4.0, 2.0));
    }

    #[test]
    fn test_continuous_moments() {
        let m = moments_of(&DistributionSpec::uniform(2.0, 5.0)).unwrap();
        assert_abs_diff_eq!(m.mean, 3.5, epsilon = 1e-12);
        assert_abs_diff_eq!(m.variance, 0.75, epsilon = 1e-12);

        let m = moments_of(&DistributionSpec::exponential(0.5)).unwrap();
        assert_abs_diff_eq!(m.mean, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.variance, 4.0, epsilon = 1e-12);

        let m = moments_of(&DistributionSpec::gamma(2.0, 1.5)).unwrap();
        assert_abs_diff_eq!(m.mean, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.variance, 4.5, epsilon = 1e-12);

        let m = moments_of(&DistributionSpec::chi_square(3.0)).unwrap();
        assert_eq!((m.mean, m.variance), (3.0, 6.0));
    }

    #[test]
    fn test_student_t_variance_boundary() {
        let err = moments_of(&DistributionSpec::student_t(2.0)).unwrap_err();
        assert_eq!(
            err,
            QueryError::UndefinedMoment {
                family: Family::StudentT,
                moment: Moment::Variance,
                reason: "requires df > 2, got df = 2".to_owned(),
            }
        );

        let m = moments_of(&DistributionSpec::student_t(5.0)).unwrap();
        assert_eq!(m.mean, 0.0);
        assert_abs_diff_eq!(m.variance, 5.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_student_t_mean_undefined_for_cauchy_like_tails() {
        let err = moments_of(&DistributionSpec::student_t(1.0)).unwrap_err();
        assert!(matches!(
            err,
            QueryError::UndefinedMoment {
                moment: Moment::Mean,
                ..
            }
        ));
    }
}
