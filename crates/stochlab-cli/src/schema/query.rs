use serde::{Deserialize, Serialize};
use stochlab_query::{DistributionQuery, Moments, Parity, QueryError, TruncatedSum};

/// A single probability or moment query, as stored in batch files.
///
/// ```json
/// {"kind": "range", "low": 3, "high": 5, "low_inclusive": false}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Query {
    /// P(X = x), or the density at `x` for continuous families.
    Pmf { x: f64 },
    /// P(X ≤ x).
    Cdf { x: f64 },
    /// P(low ≤ X ≤ high), with either bound optionally exclusive.
    Range {
        low: f64,
        high: f64,
        #[serde(default = "inclusive")]
        low_inclusive: bool,
        #[serde(default = "inclusive")]
        high_inclusive: bool,
    },
    /// P(X > x), or P(X ≥ x) when not strict.
    Tail {
        x: f64,
        #[serde(default = "strict")]
        strict: bool,
    },
    /// P(X ≠ x), discrete families only.
    NotEqual { x: f64 },
    /// P(X ∈ values).
    Set { values: Vec<f64> },
    /// P(X is even) or P(X is odd).
    Parity { parity: Parity },
    /// Mean, variance and standard deviation.
    Moments,
}

fn inclusive() -> bool {
    true
}

fn strict() -> bool {
    true
}

/// The answer to a [`Query`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Probability(f64),
    Truncated(TruncatedSum),
    Moments(Moments),
}

impl Query {
    pub fn evaluate(&self, query: &DistributionQuery) -> Result<QueryValue, QueryError> {
        let value = match self {
            Query::Pmf { x } => QueryValue::Probability(query.point_probability(*x)?),
            Query::Cdf { x } => QueryValue::Probability(query.cumulative_probability(*x)?),
            Query::Range {
                low,
                high,
                low_inclusive,
                high_inclusive,
            } => QueryValue::Probability(query.range_probability(
                *low,
                *high,
                *low_inclusive,
                *high_inclusive,
            )?),
            Query::Tail { x, strict } => {
                QueryValue::Probability(query.tail_probability(*x, *strict)?)
            }
            Query::NotEqual { x } => {
                if !query.is_discrete() {
                    return Err(QueryError::UnsupportedQuery {
                        family: query.family(),
                        query: "not_equal",
                    });
                }
                QueryValue::Probability(1.0 - query.point_probability(*x)?)
            }
            Query::Set { values } => QueryValue::Probability(query.set_probability(values)?),
            Query::Parity { parity } => QueryValue::Truncated(query.parity_probability(*parity)?),
            Query::Moments => QueryValue::Moments(query.moments()?),
        };
        Ok(value)
    }

    /// Human-readable notation of the query, e.g. `P(3 < X ≤ 5)`.
    ///
    /// Point queries on continuous families read `f(x)` since they return a density.
    pub fn notation(&self, discrete: bool) -> String {
        match self {
            Query::Pmf { x } if discrete => format!("P(X={x})"),
            Query::Pmf { x } => format!("f({x})"),
            Query::Cdf { x } => format!("P(X ≤ {x})"),
            Query::Range {
                low,
                high,
                low_inclusive,
                high_inclusive,
            } => {
                let lower = if *low_inclusive { "≤" } else { "<" };
                let upper = if *high_inclusive { "≤" } else { "<" };
                format!("P({low} {lower} X {upper} {high})")
            }
            Query::Tail { x, strict: true } => format!("P(X > {x})"),
            Query::Tail { x, strict: false } => format!("P(X ≥ {x})"),
            Query::NotEqual { x } => format!("P(X ≠ {x})"),
            Query::Set { values } => {
                let values = values
                    .iter()
                    .map(f64::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("P(X ∈ {{{values}}})")
            }
            Query::Parity { parity } => format!("P(X is {parity})"),
            Query::Moments => "moments".to_owned(),
        }
    }
}

impl QueryValue {
    /// Renders the value rounded to `precision` decimals.
    pub fn format(&self, precision: usize) -> String {
        match self {
            QueryValue::Probability(p) => format!("{p:.precision$}"),
            QueryValue::Truncated(sum) => {
                let mut s = format!("{:.precision$}", sum.probability);
                if sum.max_error > 0.0 {
                    s.push_str(&format!(
                        " (summed up to X={}, remaining mass {:.1e})",
                        sum.upper_bound, sum.max_error
                    ));
                }
                s
            }
            QueryValue::Moments(m) => format!(
                "mean = {:.precision$}, variance = {:.precision$}, std_dev = {:.precision$}",
                m.mean, m.variance, m.std_dev
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use stochlab_query::DistributionSpec;

    use super::*;

    fn binomial() -> DistributionQuery {
        DistributionQuery::new(&DistributionSpec::binomial(10, 0.4)).unwrap()
    }

    #[test]
    fn test_deserialize_defaults() {
        let query: Query = serde_json::from_str(r#"{"kind": "range", "low": 2, "high": 4}"#).unwrap();
        assert_eq!(
            query,
            Query::Range {
                low: 2.0,
                high: 4.0,
                low_inclusive: true,
                high_inclusive: true,
            }
        );
        let query: Query = serde_json::from_str(r#"{"kind": "tail", "x": 4}"#).unwrap();
        assert_eq!(query, Query::Tail { x: 4.0, strict: true });
        let query: Query = serde_json::from_str(r#"{"kind": "moments"}"#).unwrap();
        assert_eq!(query, Query::Moments);
    }

    #[test]
    fn test_evaluate_range() {
        let query = Query::Range {
            low: 3.0,
            high: 5.0,
            low_inclusive: false,
            high_inclusive: true,
        };
        let QueryValue::Probability(p) = query.evaluate(&binomial()).unwrap() else {
            panic!("expected a probability");
        };
        assert_abs_diff_eq!(p, 0.451_480_780_8, epsilon = 1e-9);
        assert_eq!(query.notation(true), "P(3 < X ≤ 5)");
    }

    #[test]
    fn test_notation() {
        assert_eq!(Query::Pmf { x: 3.0 }.notation(true), "P(X=3)");
        assert_eq!(Query::Pmf { x: 0.5 }.notation(false), "f(0.5)");
        assert_eq!(Query::Tail { x: 6.0, strict: false }.notation(true), "P(X ≥ 6)");
        assert_eq!(
            Query::Set {
                values: vec![2.0, 5.0, 7.0]
            }
            .notation(true),
            "P(X ∈ {2, 5, 7})"
        );
        assert_eq!(
            Query::Parity {
                parity: Parity::Odd
            }
            .notation(true),
            "P(X is odd)"
        );
    }

    #[test]
    fn test_format() {
        assert_eq!(QueryValue::Probability(0.214_990_848).format(4), "0.2150");
        let moments = Query::Moments.evaluate(&binomial()).unwrap();
        assert_eq!(
            moments.format(2),
            "mean = 4.00, variance = 2.40, std_dev = 1.55"
        );
    }

    #[test]
    fn test_unsupported_query_is_reported() {
        let normal = DistributionQuery::new(&DistributionSpec::normal(0.0, 1.0)).unwrap();
        let err = Query::Set { values: vec![0.0] }
            .evaluate(&normal)
            .unwrap_err();
        assert!(err.is_unsupported_query());

        let err = Query::NotEqual { x: 0.0 }.evaluate(&normal).unwrap_err();
        assert_eq!(
            err.to_string(),
            "not_equal query is not supported for continuous normal distribution"
        );
    }

    #[test]
    fn test_evaluate_not_equal() {
        let query: Query = serde_json::from_str(r#"{"kind": "not_equal", "x": 4}"#).unwrap();
        let QueryValue::Probability(p) = query.evaluate(&binomial()).unwrap() else {
            panic!("expected a probability");
        };
        assert_abs_diff_eq!(p, 0.749_177_344, epsilon = 1e-9);
        assert_eq!(query.notation(true), "P(X ≠ 4)");
    }

    #[test]
    fn test_format_truncated_sum() {
        let geometric = DistributionQuery::new(&DistributionSpec::geometric(0.2)).unwrap();
        let value = Query::Parity {
            parity: Parity::Odd,
        }
        .evaluate(&geometric)
        .unwrap();
        let text = value.format(4);
        assert!(text.starts_with("0.5556 (summed up to X="), "{text}");
        assert!(text.contains("remaining mass"), "{text}");
    }
}
