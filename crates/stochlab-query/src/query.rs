use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    DistributionSpec, Family, Moments, QueryError,
    law::{ContinuousLaw, DiscreteLaw, Law},
    params::{MAX_COUNT, Parameters, Support},
};

/// Tail mass below which an infinite parity sum is cut off.
pub const PARITY_TAIL_TOLERANCE: f64 = 1e-12;

/// Hard limit on the number of terms of an infinite parity sum.
pub const MAX_PARITY_TERMS: usize = 1_000_000;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    #[display("even")]
    Even,
    #[display("odd")]
    Odd,
}

impl Parity {
    const fn matches(self, k: u64) -> bool {
        match self {
            Parity::Even => k % 2 == 0,
            Parity::Odd => k % 2 == 1,
        }
    }
}

/// Result of summing a PMF over a possibly infinite set of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TruncatedSum {
    /// Sum of the probabilities up to and including `upper_bound`.
    pub probability: f64,
    /// Largest value included in the sum.
    pub upper_bound: u64,
    /// Probability mass beyond `upper_bound`; an upper bound on the error.
    /// Zero for finite supports.
    pub max_error: f64,
}

/// Stateless evaluator of probabilities and moments for one distribution.
///
/// Construction validates the spec; every query afterwards is a pure
/// function of the parameters and its arguments.
///
/// # Examples
///
/// ```
/// use stochlab_query::{DistributionQuery, DistributionSpec};
///
/// let query = DistributionQuery::new(&DistributionSpec::binomial(10, 0.4)).unwrap();
/// // P(X = 3)
/// assert!((query.point_probability(3.0).unwrap() - 0.2150).abs() < 1e-4);
/// // P(3 < X <= 5)
/// let p = query.range_probability(3.0, 5.0, false, true).unwrap();
/// assert!((p - 0.4515).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct DistributionQuery {
    params: Parameters,
    law: Law,
}

impl DistributionQuery {
    /// Validates `spec` and prepares it for querying.
    pub fn new(spec: &DistributionSpec) -> Result<Self, QueryError> {
        let params = Parameters::from_spec(spec)?;
        let law = Law::new(&params)?;
        Ok(Self { params, law })
    }

    #[must_use]
    pub fn family(&self) -> Family {
        self.params.family()
    }

    #[must_use]
    pub fn is_discrete(&self) -> bool {
        matches!(self.law, Law::Discrete(_))
    }

    #[must_use]
    pub fn support(&self) -> Support {
        self.params.support()
    }

    /// PMF at integer `x` for discrete families, PDF at `x` for continuous ones.
    ///
    /// Non-negative integers outside a discrete support have probability 0;
    /// reals outside a continuous support have density 0.
    pub fn point_probability(&self, x: f64) -> Result<f64, QueryError> {
        match &self.law {
            Law::Discrete(law) => Ok(law.pmf(self.count(x)?)),
            Law::Continuous(law) => {
                self.real(x)?;
                if x.is_infinite() {
                    return Ok(0.0);
                }
                Ok(law.pdf(x))
            }
        }
    }

    /// P(X ≤ x).
    ///
    /// Discrete families are evaluated at `⌊x⌋`, so any real `x` is accepted.
    pub fn cumulative_probability(&self, x: f64) -> Result<f64, QueryError> {
        self.real(x)?;
        Ok(match &self.law {
            Law::Discrete(law) => discrete_cdf(law, x.floor()),
            Law::Continuous(law) => continuous_cdf(law, x),
        })
    }

    /// Probability that X lies between `low` and `high`.
    ///
    /// On a discrete support an inclusive lower bound `a` subtracts
    /// `CDF(⌈a⌉ - 1)` and an exclusive one `CDF(⌊a⌋)`; an inclusive upper bound
    /// `b` uses `CDF(⌊b⌋)` and an exclusive one `CDF(⌈b⌉ - 1)`. On a
    /// continuous support the bounds' inclusivity has no effect. Empty ranges
    /// give 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use stochlab_query::{DistributionQuery, DistributionSpec};
    ///
    /// let poisson = DistributionQuery::new(&DistributionSpec::poisson(4.0)).unwrap();
    /// // P(3 < X < 7) = CDF(6) - CDF(3)
    /// let strict = poisson.range_probability(3.0, 7.0, false, false).unwrap();
    /// let diff = poisson.cumulative_probability(6.0).unwrap()
    ///     - poisson.cumulative_probability(3.0).unwrap();
    /// assert!((strict - diff).abs() < 1e-12);
    /// ```
    pub fn range_probability(
        &self,
        low: f64,
        high: f64,
        low_inclusive: bool,
        high_inclusive: bool,
    ) -> Result<f64, QueryError> {
        self.real(low)?;
        self.real(high)?;
        let probability = match &self.law {
            Law::Discrete(law) => {
                let lower = if low_inclusive {
                    discrete_cdf(law, low.ceil() - 1.0)
                } else {
                    discrete_cdf(law, low.floor())
                };
                let upper = if high_inclusive {
                    discrete_cdf(law, high.floor())
                } else {
                    discrete_cdf(law, high.ceil() - 1.0)
                };
                upper - lower
            }
            Law::Continuous(law) => continuous_cdf(law, high) - continuous_cdf(law, low),
        };
        Ok(probability.clamp(0.0, 1.0))
    }

    /// P(X > x) when `strict`, P(X ≥ x) otherwise.
    ///
    /// Computed through the survival function, which equals `1 - CDF` without
    /// the cancellation error in the far tail.
    pub fn tail_probability(&self, x: f64, strict: bool) -> Result<f64, QueryError> {
        self.real(x)?;
        Ok(match &self.law {
            Law::Discrete(law) if strict => discrete_sf(law, x.floor()),
            Law::Discrete(law) => discrete_sf(law, x.ceil() - 1.0),
            Law::Continuous(law) => continuous_sf(law, x),
        })
    }

    /// P(X ∈ values) for a finite set of values; duplicates count once.
    pub fn set_probability(&self, values: &[f64]) -> Result<f64, QueryError> {
        let Law::Discrete(law) = &self.law else {
            return Err(QueryError::UnsupportedQuery {
                family: self.family(),
                query: "set",
            });
        };
        let values = values
            .iter()
            .map(|&x| self.count(x))
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(values.into_iter().map(|k| law.pmf(k)).sum())
    }

    /// P(X is even) or P(X is odd).
    ///
    /// Finite supports are summed exactly. Infinite supports are summed until
    /// the remaining tail mass P(X > bound) drops to [`PARITY_TAIL_TOLERANCE`]
    /// or [`MAX_PARITY_TERMS`] terms have been added; the returned
    /// [`TruncatedSum`] reports where the sum stopped and the mass left out.
    ///
    /// # Examples
    ///
    /// ```
    /// use stochlab_query::{DistributionQuery, DistributionSpec, Parity};
    ///
    /// let poisson = DistributionQuery::new(&DistributionSpec::poisson(4.0)).unwrap();
    /// let even = poisson.parity_probability(Parity::Even).unwrap();
    /// let exact = (1.0 + (-8.0_f64).exp()) / 2.0;
    /// assert!((even.probability - exact).abs() < 1e-10);
    /// assert!(even.max_error <= 1e-12);
    /// ```
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn parity_probability(&self, parity: Parity) -> Result<TruncatedSum, QueryError> {
        let Law::Discrete(law) = &self.law else {
            return Err(QueryError::UnsupportedQuery {
                family: self.family(),
                query: "parity",
            });
        };

        let support = self.support();
        let mut k = support.lower as u64;
        if !parity.matches(k) {
            k += 1;
        }

        if support.upper.is_finite() {
            let upper = support.upper as u64;
            let probability = (k..=upper).step_by(2).map(|k| law.pmf(k)).sum::<f64>();
            return Ok(TruncatedSum {
                probability,
                upper_bound: upper,
                max_error: 0.0,
            });
        }

        let mut probability = 0.0;
        let mut terms = 0;
        loop {
            probability += law.pmf(k);
            terms += 1;
            let tail = law.sf(k);
            if tail <= PARITY_TAIL_TOLERANCE || terms >= MAX_PARITY_TERMS {
                tracing::debug!(
                    family = %self.family(),
                    %parity,
                    upper_bound = k,
                    max_error = tail,
                    terms,
                    "truncated parity sum"
                );
                return Ok(TruncatedSum {
                    probability,
                    upper_bound: k,
                    max_error: tail,
                });
            }
            k += 2;
        }
    }

    /// Mean, variance and standard deviation from closed-form formulas.
    pub fn moments(&self) -> Result<Moments, QueryError> {
        self.params.moments()
    }

    fn real(&self, x: f64) -> Result<(), QueryError> {
        if x.is_nan() {
            return Err(QueryError::invalid(self.family(), "x", "must not be NaN"));
        }
        Ok(())
    }

    /// Converts `x` into a value of a discrete random variable.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn count(&self, x: f64) -> Result<u64, QueryError> {
        if x.is_finite() && x >= 0.0 && x.fract() == 0.0 {
            // saturates beyond u64::MAX, where every PMF is 0
            Ok(x as u64)
        } else {
            Err(QueryError::invalid(
                self.family(),
                "x",
                format!("must be a non-negative integer, got {x}"),
            ))
        }
    }
}

/// P(X ≤ x) for an integral (or infinite) `x`.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn discrete_cdf(law: &DiscreteLaw, x: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else if x >= MAX_COUNT {
        1.0
    } else {
        law.cdf(x as u64)
    }
}

/// P(X > x) for an integral (or infinite) `x`.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn discrete_sf(law: &DiscreteLaw, x: f64) -> f64 {
    if x < 0.0 {
        1.0
    } else if x >= MAX_COUNT {
        0.0
    } else {
        law.sf(x as u64)
    }
}

fn continuous_cdf(law: &ContinuousLaw, x: f64) -> f64 {
    if x == f64::NEG_INFINITY {
        0.0
    } else if x == f64::INFINITY {
        1.0
    } else {
        law.cdf(x)
    }
}

fn continuous_sf(law: &ContinuousLaw, x: f64) -> f64 {
    if x == f64::NEG_INFINITY {
        1.0
    } else if x == f64::INFINITY {
        0.0
    } else {
        law.sf(x)
    }
}

/// Validates `spec` and returns [`DistributionQuery::point_probability`].
pub fn point_probability(spec: &DistributionSpec, x: f64) -> Result<f64, QueryError> {
    DistributionQuery::new(spec)?.point_probability(x)
}

/// Validates `spec` and returns [`DistributionQuery::cumulative_probability`].
pub fn cumulative_probability(spec: &DistributionSpec, x: f64) -> Result<f64, QueryError> {
    DistributionQuery::new(spec)?.cumulative_probability(x)
}

/// Validates `spec` and returns [`DistributionQuery::range_probability`].
pub fn range_probability(
    spec: &DistributionSpec,
    low: f64,
    high: f64,
    low_inclusive: bool,
    high_inclusive: bool,
) -> Result<f64, QueryError> {
    DistributionQuery::new(spec)?.range_probability(low, high, low_inclusive, high_inclusive)
}

/// Validates `spec` and returns [`DistributionQuery::tail_probability`].
pub fn tail_probability(spec: &DistributionSpec, x: f64, strict: bool) -> Result<f64, QueryError> {
    DistributionQuery::new(spec)?.tail_probability(x, strict)
}

/// Validates `spec` and returns [`DistributionQuery::set_probability`].
pub fn set_probability(spec: &DistributionSpec, values: &[f64]) -> Result<f64, QueryError> {
    DistributionQuery::new(spec)?.set_probability(values)
}

/// Validates `spec` and returns [`DistributionQuery::parity_probability`].
pub fn parity_probability(
    spec: &DistributionSpec,
    parity: Parity,
) -> Result<TruncatedSum, QueryError> {
    DistributionQuery::new(spec)?.parity_probability(parity)
}

/// Validates `spec` and returns [`DistributionQuery::moments`].
pub fn moments(spec: &DistributionSpec) -> Result<Moments, QueryError> {
    DistributionQuery::new(spec)?.moments()
}
