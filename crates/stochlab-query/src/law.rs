//! Thin dispatch layer over the `statrs` distribution types.

use statrs::distribution::{
    Bernoulli, Beta, Binomial, ChiSquared, Continuous, ContinuousCDF, Discrete, DiscreteCDF, Exp,
    Gamma, Geometric, NegativeBinomial, Normal, Poisson, StudentsT, Uniform,
};

use crate::{Family, QueryError, params::Parameters};

#[derive(Debug, Clone)]
pub(crate) enum DiscreteLaw {
    Bernoulli(Bernoulli),
    Binomial(Binomial),
    Geometric(Geometric),
    NegativeBinomial(NegativeBinomial),
    Poisson(Poisson),
}

#[derive(Debug, Clone)]
pub(crate) enum ContinuousLaw {
    Uniform(Uniform),
    Exponential(Exp),
    Normal(Normal),
    Beta(Beta),
    Gamma(Gamma),
    ChiSquare(ChiSquared),
    StudentT(StudentsT),
}

#[derive(Debug, Clone)]
pub(crate) enum Law {
    Discrete(DiscreteLaw),
    Continuous(ContinuousLaw),
}

impl Law {
    /// Builds the library distribution for already validated parameters.
    pub(crate) fn new(params: &Parameters) -> Result<Self, QueryError> {
        let family = params.family();
        let law = match *params {
            Parameters::Bernoulli { p } => {
                Law::Discrete(DiscreteLaw::Bernoulli(Bernoulli::new(p).map_err(rejected(family))?))
            }
            Parameters::Binomial { n, p } => Law::Discrete(DiscreteLaw::Binomial(
                Binomial::new(p, n).map_err(rejected(family))?,
            )),
            Parameters::Geometric { p } => {
                Law::Discrete(DiscreteLaw::Geometric(Geometric::new(p).map_err(rejected(family))?))
            }
            Parameters::NegativeBinomial { r, p } => Law::Discrete(DiscreteLaw::NegativeBinomial(
                NegativeBinomial::new(r, p).map_err(rejected(family))?,
            )),
            Parameters::Poisson { lambda } => {
                Law::Discrete(DiscreteLaw::Poisson(Poisson::new(lambda).map_err(rejected(family))?))
            }
            Parameters::Uniform { a, b } => Law::Continuous(ContinuousLaw::Uniform(
                Uniform::new(a, b).map_err(rejected(family))?,
            )),
            Parameters::Exponential { lambda } => Law::Continuous(ContinuousLaw::Exponential(
                Exp::new(lambda).map_err(rejected(family))?,
            )),
            Parameters::Normal { mu, sigma } => Law::Continuous(ContinuousLaw::Normal(
                Normal::new(mu, sigma).map_err(rejected(family))?,
            )),
            Parameters::Beta { alpha, beta } => Law::Continuous(ContinuousLaw::Beta(
                Beta::new(alpha, beta).map_err(rejected(family))?,
            )),
            // statrs parameterizes the gamma distribution by rate
            Parameters::Gamma { shape, scale } => Law::Continuous(ContinuousLaw::Gamma(
                Gamma::new(shape, scale.recip()).map_err(rejected(family))?,
            )),
            Parameters::ChiSquare { df } => Law::Continuous(ContinuousLaw::ChiSquare(
                ChiSquared::new(df).map_err(rejected(family))?,
            )),
            Parameters::StudentT { df } => Law::Continuous(ContinuousLaw::StudentT(
                StudentsT::new(0.0, 1.0, df).map_err(rejected(family))?,
            )),
        };
        Ok(law)
    }
}

fn rejected<E>(family: Family) -> impl FnOnce(E) -> QueryError
where
    E: std::fmt::Display,
{
    move |err| QueryError::invalid(family, "parameters", err.to_string())
}

impl DiscreteLaw {
    pub(crate) fn pmf(&self, k: u64) -> f64 {
        match self {
            DiscreteLaw::Bernoulli(d) => d.pmf(k),
            DiscreteLaw::Binomial(d) => d.pmf(k),
            DiscreteLaw::Geometric(d) => geometric_pmf(d.p(), k),
            // certain success: statrs evaluates `0 * ln(0)` at k = 0
            DiscreteLaw::NegativeBinomial(d) if d.p() >= 1.0 => {
                if k == 0 { 1.0 } else { 0.0 }
            }
            DiscreteLaw::NegativeBinomial(d) => d.pmf(k),
            DiscreteLaw::Poisson(d) => d.pmf(k),
        }
    }

    pub(crate) fn cdf(&self, k: u64) -> f64 {
        match self {
            DiscreteLaw::Bernoulli(d) => d.cdf(k),
            DiscreteLaw::Binomial(d) => d.cdf(k),
            DiscreteLaw::Geometric(d) => d.cdf(k),
            DiscreteLaw::NegativeBinomial(d) => d.cdf(k),
            DiscreteLaw::Poisson(d) => d.cdf(k),
        }
    }

    /// P(X > k)
    pub(crate) fn sf(&self, k: u64) -> f64 {
        match self {
            DiscreteLaw::Bernoulli(d) => d.sf(k),
            DiscreteLaw::Binomial(d) => d.sf(k),
            DiscreteLaw::Geometric(d) => d.sf(k),
            DiscreteLaw::NegativeBinomial(d) => d.sf(k),
            DiscreteLaw::Poisson(d) => d.sf(k),
        }
    }
}

/// P(X = k) for the number of trials up to the first success.
///
/// statrs raises `1 - p` to an `i32` power, which overflows for `k > i32::MAX`.
#[expect(clippy::cast_precision_loss)]
fn geometric_pmf(p: f64, k: u64) -> f64 {
    if k == 0 {
        return 0.0;
    }
    p * (1.0 - p).powf((k - 1) as f64)
}

impl ContinuousLaw {
    pub(crate) fn pdf(&self, x: f64) -> f64 {
        match self {
            ContinuousLaw::Uniform(d) => d.pdf(x),
            ContinuousLaw::Exponential(d) => d.pdf(x),
            ContinuousLaw::Normal(d) => d.pdf(x),
            ContinuousLaw::Beta(d) => d.pdf(x),
            ContinuousLaw::Gamma(d) => d.pdf(x),
            ContinuousLaw::ChiSquare(d) => d.pdf(x),
            ContinuousLaw::StudentT(d) => d.pdf(x),
        }
    }

    pub(crate) fn cdf(&self, x: f64) -> f64 {
        match self {
            ContinuousLaw::Uniform(d) => d.cdf(x),
            ContinuousLaw::Exponential(d) => d.cdf(x),
            ContinuousLaw::Normal(d) => d.cdf(x),
            ContinuousLaw::Beta(d) => d.cdf(x),
            ContinuousLaw::Gamma(d) => d.cdf(x),
            ContinuousLaw::ChiSquare(d) => d.cdf(x),
            ContinuousLaw::StudentT(d) => d.cdf(x),
        }
    }

    /// P(X > x)
    pub(crate) fn sf(&self, x: f64) -> f64 {
        match self {
            ContinuousLaw::Uniform(d) => d.sf(x),
            ContinuousLaw::Exponential(d) => d.sf(x),
            ContinuousLaw::Normal(d) => d.sf(x),
            ContinuousLaw::Beta(d) => d.sf(x),
            ContinuousLaw::Gamma(d) => d.sf(x),
            ContinuousLaw::ChiSquare(d) => d.sf(x),
            ContinuousLaw::StudentT(d) => d.sf(x),
        }
    }
}
