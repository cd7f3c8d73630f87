use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Distribution families supported by the query layer.
///
/// The first five families are discrete (integer support), the rest are
/// continuous.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    #[display("bernoulli")]
    Bernoulli,
    #[display("binomial")]
    Binomial,
    #[display("geometric")]
    Geometric,
    #[display("negative_binomial")]
    NegativeBinomial,
    #[display("poisson")]
    Poisson,
    #[display("uniform")]
    Uniform,
    #[display("exponential")]
    Exponential,
    #[display("normal")]
    Normal,
    #[display("beta")]
    Beta,
    #[display("gamma")]
    Gamma,
    #[display("chi_square")]
    ChiSquare,
    #[display("student_t")]
    StudentT,
}

impl Family {
    pub const ALL: [Family; 12] = [
        Family::Bernoulli,
        Family::Binomial,
        Family::Geometric,
        Family::NegativeBinomial,
        Family::Poisson,
        Family::Uniform,
        Family::Exponential,
        Family::Normal,
        Family::Beta,
        Family::Gamma,
        Family::ChiSquare,
        Family::StudentT,
    ];

    /// Returns `true` for families with an integer-valued support.
    #[must_use]
    pub const fn is_discrete(self) -> bool {
        matches!(
            self,
            Family::Bernoulli
                | Family::Binomial
                | Family::Geometric
                | Family::NegativeBinomial
                | Family::Poisson
        )
    }

    /// Names of the parameters this family requires, in canonical order.
    ///
    /// # Examples
    ///
    /// ```
    /// use stochlab_query::Family;
    ///
    /// assert_eq!(Family::Binomial.parameter_names(), &["n", "p"]);
    /// assert_eq!(Family::Gamma.parameter_names(), &["shape", "scale"]);
    /// ```
    #[must_use]
    pub const fn parameter_names(self) -> &'static [&'static str] {
        match self {
            Family::Bernoulli | Family::Geometric => &["p"],
            Family::Binomial => &["n", "p"],
            Family::NegativeBinomial => &["r", "p"],
            Family::Poisson | Family::Exponential => &["lambda"],
            Family::Uniform => &["a", "b"],
            Family::Normal => &["mu", "sigma"],
            Family::Beta => &["alpha", "beta"],
            Family::Gamma => &["shape", "scale"],
            Family::ChiSquare | Family::StudentT => &["df"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown distribution family '{name}'")]
pub struct UnknownFamilyError {
    pub name: String,
}

impl FromStr for Family {
    type Err = UnknownFamilyError;

    /// Parses a family name. Matching ignores ASCII case and treats `-` and
    /// `_` alike; the short names used by common statistics packages are
    /// accepted as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let family = match normalized.as_str() {
            "bernoulli" => Family::Bernoulli,
            "binomial" | "binom" => Family::Binomial,
            "geometric" | "geom" => Family::Geometric,
            "negative_binomial" | "negativebinomial" | "nbinom" => Family::NegativeBinomial,
            "poisson" => Family::Poisson,
            "uniform" => Family::Uniform,
            "exponential" | "expon" | "exp" => Family::Exponential,
            "normal" | "norm" | "gaussian" => Family::Normal,
            "beta" => Family::Beta,
            "gamma" => Family::Gamma,
            "chi_square" | "chi_squared" | "chisquare" | "chi2" => Family::ChiSquare,
            "student_t" | "students_t" | "studentt" | "t" => Family::StudentT,
            _ => {
                return Err(UnknownFamilyError {
                    name: s.trim().to_owned(),
                });
            }
        };
        Ok(family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parses_back() {
        for family in Family::ALL {
            assert_eq!(family.to_string().parse::<Family>().unwrap(), family);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("nbinom".parse::<Family>().unwrap(), Family::NegativeBinomial);
        assert_eq!("Chi-Square".parse::<Family>().unwrap(), Family::ChiSquare);
        assert_eq!("t".parse::<Family>().unwrap(), Family::StudentT);
        assert_eq!(" NORM ".parse::<Family>().unwrap(), Family::Normal);
    }

    #[test]
    fn test_unknown_family() {
        let err = "cauchy".parse::<Family>().unwrap_err();
        assert_eq!(err.name, "cauchy");
        assert_eq!(err.to_string(), "unknown distribution family 'cauchy'");
    }

    #[test]
    fn test_discrete_split() {
        let discrete = Family::ALL.iter().filter(|f| f.is_discrete()).count();
        assert_eq!(discrete, 5);
    }

    #[test]
    fn test_serde_names_match_display() {
        for family in Family::ALL {
            let json = serde_json::to_string(&family).unwrap();
            assert_eq!(json, format!("\"{family}\""));
        }
    }
}
