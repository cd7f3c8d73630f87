//! Probability queries over common distribution families.
//!
//! A [`DistributionSpec`] names a [`Family`] and its parameters. Building a
//! [`DistributionQuery`] from it validates the parameters, after which the
//! query answers:
//!
//! - **Point probabilities**: PMF for discrete families, PDF for continuous ones
//! - **Cumulative probabilities**: P(X ≤ x)
//! - **Range and tail probabilities**: expressed as CDF differences
//! - **Set and parity probabilities**: sums of the PMF over finite or
//!   truncated infinite sets
//! - **Moments**: mean, variance and standard deviation in closed form
//!
//! Every operation is a pure function. Results carry full `f64` precision;
//! rounding for display is left to the caller.
//!
//! The distribution functions themselves come from [`statrs`].
//!
//! # Examples
//!
//! ```
//! use stochlab_query::{DistributionSpec, cumulative_probability, moments};
//!
//! let poisson: DistributionSpec = "poisson(lambda=4)".parse().unwrap();
//! let p = cumulative_probability(&poisson, 3.0).unwrap();
//! assert!((p - 0.4335).abs() < 1e-4);
//!
//! let beta = DistributionSpec::beta(2.0, 3.0);
//! let m = moments(&beta).unwrap();
//! assert!((m.mean - 0.4).abs() < 1e-12);
//! assert!((m.variance - 0.04).abs() < 1e-12);
//! ```

pub use self::{
    error::{Moment, QueryError},
    family::{Family, UnknownFamilyError},
    moments::Moments,
    params::Support,
    query::{
        DistributionQuery, MAX_PARITY_TERMS, PARITY_TAIL_TOLERANCE, Parity, TruncatedSum,
        cumulative_probability, moments, parity_probability, point_probability,
        range_probability, set_probability, tail_probability,
    },
    spec::{DistributionSpec, ParseSpecError},
};

mod error;
mod family;
mod law;
mod moments;
mod params;
mod query;
mod spec;
