//! Validation of [`DistributionSpec`] parameters into typed values.

use serde::Serialize;

use crate::{DistributionSpec, Family, QueryError};

/// Validated parameters of a distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Parameters {
    Bernoulli { p: f64 },
    Binomial { n: u64, p: f64 },
    Geometric { p: f64 },
    NegativeBinomial { r: f64, p: f64 },
    Poisson { lambda: f64 },
    Uniform { a: f64, b: f64 },
    Exponential { lambda: f64 },
    Normal { mu: f64, sigma: f64 },
    Beta { alpha: f64, beta: f64 },
    Gamma { shape: f64, scale: f64 },
    ChiSquare { df: f64 },
    StudentT { df: f64 },
}

/// Closed interval `[lower, upper]` holding all values of a distribution.
///
/// Bounds are infinite for unbounded supports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Support {
    pub lower: f64,
    pub upper: f64,
}

impl Support {
    const NON_NEGATIVE: Self = Self {
        lower: 0.0,
        upper: f64::INFINITY,
    };
    const REAL_LINE: Self = Self {
        lower: f64::NEG_INFINITY,
        upper: f64::INFINITY,
    };

    /// Returns `true` if `x` lies within the support bounds.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}

/// Largest count that converts to `u64` without saturating.
pub(crate) const MAX_COUNT: f64 = 18_446_744_073_709_549_568.0;

struct Checker<'a> {
    spec: &'a DistributionSpec,
}

impl Checker<'_> {
    fn family(&self) -> Family {
        self.spec.family
    }

    fn check_names(&self) -> Result<(), QueryError> {
        let expected = self.family().parameter_names();
        if let Some(unknown) = self
            .spec
            .params
            .keys()
            .find(|name| !expected.contains(&name.as_str()))
        {
            return Err(QueryError::invalid(
                self.family(),
                unknown.as_str(),
                format!("unknown parameter, expected {}", expected.join(", ")),
            ));
        }
        if let Some(missing) = expected
            .iter()
            .find(|name| !self.spec.params.contains_key(**name))
        {
            return Err(QueryError::invalid(
                self.family(),
                *missing,
                "missing required parameter",
            ));
        }
        Ok(())
    }

    fn finite(&self, name: &str) -> Result<f64, QueryError> {
        let value = self
            .spec
            .param(name)
            .ok_or_else(|| QueryError::invalid(self.family(), name, "missing required parameter"))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(QueryError::invalid(
                self.family(),
                name,
                format!("must be finite, got {value}"),
            ))
        }
    }

    fn require(&self, name: &str, ok: bool, reason: &str) -> Result<(), QueryError> {
        if ok {
            Ok(())
        } else {
            Err(QueryError::invalid(self.family(), name, reason))
        }
    }

    /// 0 ≤ value ≤ 1
    fn probability(&self, name: &str) -> Result<f64, QueryError> {
        let value = self.finite(name)?;
        self.require(name, (0.0..=1.0).contains(&value), "must be in [0, 1]")?;
        Ok(value)
    }

    /// 0 < value ≤ 1
    fn success_probability(&self, name: &str) -> Result<f64, QueryError> {
        let value = self.finite(name)?;
        self.require(name, value > 0.0 && value <= 1.0, "must be in (0, 1]")?;
        Ok(value)
    }

    fn positive(&self, name: &str) -> Result<f64, QueryError> {
        let value = self.finite(name)?;
        self.require(name, value > 0.0, "must be positive")?;
        Ok(value)
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn count(&self, name: &str) -> Result<u64, QueryError> {
        let value = self.finite(name)?;
        self.require(
            name,
            value >= 0.0 && value.fract() == 0.0 && value <= MAX_COUNT,
            "must be a non-negative integer",
        )?;
        Ok(value as u64)
    }
}

impl Parameters {
    pub(crate) fn from_spec(spec: &DistributionSpec) -> Result<Self, QueryError> {
        let c = Checker { spec };
        c.check_names()?;
        let params = match spec.family {
            Family::Bernoulli => Parameters::Bernoulli {
                p: c.probability("p")?,
            },
            Family::Binomial => Parameters::Binomial {
                n: c.count("n")?,
                p: c.probability("p")?,
            },
            Family::Geometric => Parameters::Geometric {
                p: c.success_probability("p")?,
            },
            Family::NegativeBinomial => Parameters::NegativeBinomial {
                r: c.positive("r")?,
                p: c.success_probability("p")?,
            },
            Family::Poisson => Parameters::Poisson {
                lambda: c.positive("lambda")?,
            },
            Family::Uniform => {
                let a = c.finite("a")?;
                let b = c.finite("b")?;
                c.require("b", a < b, "upper bound must be greater than lower bound")?;
                Parameters::Uniform { a, b }
            }
            Family::Exponential => Parameters::Exponential {
                lambda: c.positive("lambda")?,
            },
            Family::Normal => Parameters::Normal {
                mu: c.finite("mu")?,
                sigma: c.positive("sigma")?,
            },
            Family::Beta => Parameters::Beta {
                alpha: c.positive("alpha")?,
                beta: c.positive("beta")?,
            },
            Family::Gamma => Parameters::Gamma {
                shape: c.positive("shape")?,
                scale: c.positive("scale")?,
            },
            Family::ChiSquare => Parameters::ChiSquare {
                df: c.positive("df")?,
            },
            Family::StudentT => Parameters::StudentT {
                df: c.positive("df")?,
            },
        };
        Ok(params)
    }

    pub(crate) fn family(&self) -> Family {
        match self {
            Parameters::Bernoulli { .. } => Family::Bernoulli,
            Parameters::Binomial { .. } => Family::Binomial,
            Parameters::Geometric { .. } => Family::Geometric,
            Parameters::NegativeBinomial { .. } => Family::NegativeBinomial,
            Parameters::Poisson { .. } => Family::Poisson,
            Parameters::Uniform { .. } => Family::Uniform,
            Parameters::Exponential { .. } => Family::Exponential,
            Parameters::Normal { .. } => Family::Normal,
            Parameters::Beta { .. } => Family::Beta,
            Parameters::Gamma { .. } => Family::Gamma,
            Parameters::ChiSquare { .. } => Family::ChiSquare,
            Parameters::StudentT { .. } => Family::StudentT,
        }
    }

    #[expect(clippy::cast_precision_loss)]
    pub(crate) fn support(&self) -> Support {
        match *self {
            Parameters::Bernoulli { .. } | Parameters::Beta { .. } => Support {
                lower: 0.0,
                upper: 1.0,
            },
            Parameters::Binomial { n, .. } => Support {
                lower: 0.0,
                upper: n as f64,
            },
            Parameters::Geometric { .. } => Support {
                lower: 1.0,
                upper: f64::INFINITY,
            },
            Parameters::Uniform { a, b } => Support { lower: a, upper: b },
            Parameters::NegativeBinomial { .. }
            | Parameters::Poisson { .. }
            | Parameters::Exponential { .. }
            | Parameters::Gamma { .. }
            | Parameters::ChiSquare { .. } => Support::NON_NEGATIVE,
            Parameters::Normal { .. } | Parameters::StudentT { .. } => Support::REAL_LINE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason_of(spec: &DistributionSpec) -> (String, String) {
        match Parameters::from_spec(spec).unwrap_err() {
            QueryError::InvalidParameter { name, reason, .. } => (name, reason),
            err => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn test_valid_specs() {
        let specs = [
            DistributionSpec::bernoulli(0.3),
            DistributionSpec::binomial(10, 0.4),
            DistributionSpec::geometric(0.2),
            DistributionSpec::negative_binomial(2.0, 0.4),
            DistributionSpec::poisson(4.0),
            DistributionSpec::uniform(2.0, 5.0),
            DistributionSpec::exponential(0.5),
            DistributionSpec::normal(0.0, 1.0),
            DistributionSpec::beta(2.0, 3.0),
            DistributionSpec::gamma(2.0, 1.5),
            DistributionSpec::chi_square(3.0),
            DistributionSpec::student_t(5.0),
        ];
        for spec in &specs {
            let params = Parameters::from_spec(spec).unwrap();
            assert_eq!(params.family(), spec.family);
        }
    }

    #[test]
    fn test_probability_out_of_range() {
        let (name, reason) = reason_of(&DistributionSpec::binomial(10, 1.5));
        assert_eq!(name, "p");
        assert_eq!(reason, "must be in [0, 1]");
        assert!(Parameters::from_spec(&DistributionSpec::bernoulli(-0.1)).is_err());
        assert!(Parameters::from_spec(&DistributionSpec::bernoulli(0.0)).is_ok());
    }

    #[test]
    fn test_geometric_rejects_zero_probability() {
        let (name, _) = reason_of(&DistributionSpec::geometric(0.0));
        assert_eq!(name, "p");
        assert!(Parameters::from_spec(&DistributionSpec::geometric(1.0)).is_ok());
    }

    #[test]
    fn test_trial_count_must_be_integer() {
        let spec = DistributionSpec::new(Family::Binomial, [("n", 2.5), ("p", 0.5)]);
        assert_eq!(reason_of(&spec).0, "n");
        let spec = DistributionSpec::new(Family::Binomial, [("n", -1.0), ("p", 0.5)]);
        assert_eq!(reason_of(&spec).0, "n");
    }

    #[test]
    fn test_scale_parameters_must_be_positive() {
        assert_eq!(reason_of(&DistributionSpec::normal(0.0, 0.0)).0, "sigma");
        assert_eq!(reason_of(&DistributionSpec::gamma(2.0, -1.0)).0, "scale");
        assert_eq!(reason_of(&DistributionSpec::beta(0.0, 1.0)).0, "alpha");
        assert_eq!(reason_of(&DistributionSpec::student_t(0.0)).0, "df");
        assert_eq!(reason_of(&DistributionSpec::poisson(0.0)).0, "lambda");
    }

    #[test]
    fn test_uniform_bounds_ordered() {
        assert_eq!(reason_of(&DistributionSpec::uniform(5.0, 2.0)).0, "b");
        assert_eq!(reason_of(&DistributionSpec::uniform(2.0, 2.0)).0, "b");
    }

    #[test]
    fn test_non_finite_rejected() {
        let (name, reason) = reason_of(&DistributionSpec::normal(f64::NAN, 1.0));
        assert_eq!(name, "mu");
        assert!(reason.starts_with("must be finite"));
        assert!(Parameters::from_spec(&DistributionSpec::exponential(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_parameter_set_must_match() {
        let spec = DistributionSpec::new(Family::Normal, [("mu", 0.0)]);
        assert_eq!(
            reason_of(&spec),
            ("sigma".to_owned(), "missing required parameter".to_owned())
        );

        let spec = DistributionSpec::new(Family::Poisson, [("lambda", 1.0), ("mu", 1.0)]);
        assert_eq!(
            reason_of(&spec),
            ("mu".to_owned(), "unknown parameter, expected lambda".to_owned())
        );
    }

    #[test]
    fn test_support() {
        let params = Parameters::from_spec(&DistributionSpec::binomial(10, 0.4)).unwrap();
        assert_eq!(
            params.support(),
            Support {
                lower: 0.0,
                upper: 10.0
            }
        );
        let params = Parameters::from_spec(&DistributionSpec::geometric(0.2)).unwrap();
        assert!(!params.support().contains(0.0));
        assert!(params.support().contains(1e9));
    }
}
