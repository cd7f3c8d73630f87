use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Family, family::UnknownFamilyError};

/// A distribution family together with its named parameters.
///
/// A spec is plain data: it is checked against the family's parameter set and
/// domain constraints when a [`DistributionQuery`](crate::DistributionQuery)
/// is built from it.
///
/// The textual form is `family(name=value, ...)`:
///
/// ```
/// use stochlab_query::{DistributionSpec, Family};
///
/// let spec: DistributionSpec = "binomial(n=10, p=0.4)".parse().unwrap();
/// assert_eq!(spec, DistributionSpec::binomial(10, 0.4));
/// assert_eq!(spec.to_string(), "binomial(n=10, p=0.4)");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSpec {
    pub family: Family,
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

impl DistributionSpec {
    /// Creates a spec from a family and `(name, value)` pairs.
    #[must_use]
    pub fn new<'a, I>(family: Family, params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let params = params
            .into_iter()
            .map(|(name, value)| (name.to_owned(), value))
            .collect();
        Self { family, params }
    }

    #[must_use]
    pub fn bernoulli(p: f64) -> Self {
        Self::new(Family::Bernoulli, [("p", p)])
    }

    #[must_use]
    pub fn binomial(n: u32, p: f64) -> Self {
        Self::new(Family::Binomial, [("n", f64::from(n)), ("p", p)])
    }

    #[must_use]
    pub fn geometric(p: f64) -> Self {
        Self::new(Family::Geometric, [("p", p)])
    }

    #[must_use]
    pub fn negative_binomial(r: f64, p: f64) -> Self {
        Self::new(Family::NegativeBinomial, [("r", r), ("p", p)])
    }

    #[must_use]
    pub fn poisson(lambda: f64) -> Self {
        Self::new(Family::Poisson, [("lambda", lambda)])
    }

    #[must_use]
    pub fn uniform(a: f64, b: f64) -> Self {
        Self::new(Family::Uniform, [("a", a), ("b", b)])
    }

    #[must_use]
    pub fn exponential(lambda: f64) -> Self {
        Self::new(Family::Exponential, [("lambda", lambda)])
    }

    #[must_use]
    pub fn normal(mu: f64, sigma: f64) -> Self {
        Self::new(Family::Normal, [("mu", mu), ("sigma", sigma)])
    }

    #[must_use]
    pub fn beta(alpha: f64, beta: f64) -> Self {
        Self::new(Family::Beta, [("alpha", alpha), ("beta", beta)])
    }

    #[must_use]
    pub fn gamma(shape: f64, scale: f64) -> Self {
        Self::new(Family::Gamma, [("shape", shape), ("scale", scale)])
    }

    #[must_use]
    pub fn chi_square(df: f64) -> Self {
        Self::new(Family::ChiSquare, [("df", df)])
    }

    #[must_use]
    pub fn student_t(df: f64) -> Self {
        Self::new(Family::StudentT, [("df", df)])
    }

    /// Returns the value of a parameter, if present.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<f64> {
        self.params.get(name).copied()
    }
}

impl fmt::Display for DistributionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.family)?;
        // canonical order first, then anything unexpected so nothing is hidden
        let canonical = self.family.parameter_names();
        let ordered = canonical
            .iter()
            .filter_map(|name| self.params.get_key_value(*name))
            .chain(
                self.params
                    .iter()
                    .filter(|(name, _)| !canonical.contains(&name.as_str())),
            );
        for (i, (name, value)) in ordered.enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ParseSpecError {
    #[display("{_0}")]
    #[from]
    UnknownFamily(UnknownFamilyError),
    #[display("expected `family(name=value, ...)`, got '{input}'")]
    Syntax { input: String },
    #[display("invalid parameter assignment '{assignment}'")]
    Assignment { assignment: String },
    #[display("parameter '{name}' given more than once")]
    DuplicateParameter { name: String },
}

impl FromStr for DistributionSpec {
    type Err = ParseSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax = || ParseSpecError::Syntax {
            input: s.to_owned(),
        };

        let s = s.trim();
        let (family, rest) = s.split_once('(').ok_or_else(syntax)?;
        let body = rest.strip_suffix(')').ok_or_else(syntax)?;
        let family = family.parse::<Family>()?;

        let mut params = BTreeMap::new();
        for assignment in body.split(',').map(str::trim).filter(|a| !a.is_empty()) {
            let invalid = || ParseSpecError::Assignment {
                assignment: assignment.to_owned(),
            };
            let (name, value) = assignment.split_once('=').ok_or_else(invalid)?;
            let name = name.trim();
            if name.is_empty() {
                return Err(invalid());
            }
            let value = value.trim().parse::<f64>().map_err(|_| invalid())?;
            if params.insert(name.to_owned(), value).is_some() {
                return Err(ParseSpecError::DuplicateParameter {
                    name: name.to_owned(),
                });
            }
        }

        Ok(Self { family, params })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_whitespace() {
        let spec: DistributionSpec = "  Normal( mu = 0 , sigma=1.5 ) ".parse().unwrap();
        assert_eq!(spec.family, Family::Normal);
        assert_eq!(spec.param("mu"), Some(0.0));
        assert_eq!(spec.param("sigma"), Some(1.5));
    }

    #[test]
    fn test_parse_alias() {
        let spec: DistributionSpec = "nbinom(r=2, p=0.4)".parse().unwrap();
        assert_eq!(spec, DistributionSpec::negative_binomial(2.0, 0.4));
    }

    #[test]
    fn test_display_uses_canonical_order() {
        let spec = DistributionSpec::new(Family::Gamma, [("scale", 1.5), ("shape", 2.0)]);
        assert_eq!(spec.to_string(), "gamma(shape=2, scale=1.5)");

        let spec = DistributionSpec::new(Family::Poisson, [("lambda", 4.0), ("extra", 1.0)]);
        assert_eq!(spec.to_string(), "poisson(lambda=4, extra=1)");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "binomial n=10".parse::<DistributionSpec>(),
            Err(ParseSpecError::Syntax { .. })
        ));
        assert!(matches!(
            "binomial(n=10".parse::<DistributionSpec>(),
            Err(ParseSpecError::Syntax { .. })
        ));
        assert!(matches!(
            "binomial(n:10)".parse::<DistributionSpec>(),
            Err(ParseSpecError::Assignment { .. })
        ));
        assert!(matches!(
            "binomial(n=ten)".parse::<DistributionSpec>(),
            Err(ParseSpecError::Assignment { .. })
        ));
        assert!(matches!(
            "binomial(n=1, n=2)".parse::<DistributionSpec>(),
            Err(ParseSpecError::DuplicateParameter { .. })
        ));
        assert!(matches!(
            "weibull(k=1)".parse::<DistributionSpec>(),
            Err(ParseSpecError::UnknownFamily(_))
        ));
    }

    #[test]
    fn test_empty_parameter_list() {
        let spec: DistributionSpec = "poisson()".parse().unwrap();
        assert!(spec.params.is_empty());
    }

    #[test]
    fn test_json_form() {
        let spec: DistributionSpec =
            serde_json::from_str(r#"{"family": "binomial", "params": {"n": 10, "p": 0.4}}"#)
                .unwrap();
        assert_eq!(spec, DistributionSpec::binomial(10, 0.4));
    }
}
