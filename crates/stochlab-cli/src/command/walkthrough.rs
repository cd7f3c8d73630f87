//! Reference tour over every supported distribution family
//!
//! Prints the textbook example of each family together with a handful of
//! point, range, tail and set probabilities and its moments.

use anyhow::Context;
use stochlab_query::{DistributionQuery, DistributionSpec, Family, Parity};

use crate::schema::query::Query;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct WalkthroughArg {
    /// Only show this family (e.g. `poisson`, `nbinom`, `t`)
    #[arg(long)]
    family: Option<Family>,
}

struct Example {
    title: &'static str,
    description: &'static str,
    spec: DistributionSpec,
    queries: Vec<Query>,
}

pub(crate) fn run(arg: &WalkthroughArg, precision: usize) -> anyhow::Result<()> {
    let examples = examples()
        .into_iter()
        .filter(|e| arg.family.is_none_or(|f| f == e.spec.family))
        .collect::<Vec<_>>();

    let mut current_kind = None;
    for example in &examples {
        let discrete = example.spec.family.is_discrete();
        if current_kind != Some(discrete) {
            let kind = if discrete { "DISCRETE" } else { "CONTINUOUS" };
            if current_kind.is_some() {
                println!();
            }
            println!("=== {kind} ===");
            current_kind = Some(discrete);
        }
        print_example(example, precision)?;
    }
    Ok(())
}

fn print_example(example: &Example, precision: usize) -> anyhow::Result<()> {
    let distribution = DistributionQuery::new(&example.spec)
        .with_context(|| format!("Invalid walkthrough distribution: {}", example.spec))?;
    let discrete = distribution.is_discrete();

    println!();
    println!("* {} * {}", example.title, example.spec);
    println!("  {}", example.description);
    for query in example.queries.iter().chain([&Query::Moments]) {
        let value = query
            .evaluate(&distribution)
            .with_context(|| format!("Failed to evaluate {}", query.notation(discrete)))?;
        println!("  {:<22} {}", query.notation(discrete), value.format(precision));
    }
    Ok(())
}

fn pmf(x: f64) -> Query {
    Query::Pmf { x }
}

fn cdf(x: f64) -> Query {
    Query::Cdf { x }
}

fn range(low: f64, high: f64, low_inclusive: bool, high_inclusive: bool) -> Query {
    Query::Range {
        low,
        high,
        low_inclusive,
        high_inclusive,
    }
}

fn between(low: f64, high: f64) -> Query {
    range(low, high, true, true)
}

fn greater(x: f64) -> Query {
    Query::Tail { x, strict: true }
}

fn at_least(x: f64) -> Query {
    Query::Tail { x, strict: false }
}

fn not_equal(x: f64) -> Query {
    Query::NotEqual { x }
}

fn set(values: &[f64]) -> Query {
    Query::Set {
        values: values.to_vec(),
    }
}

fn parity(parity: Parity) -> Query {
    Query::Parity { parity }
}

fn examples() -> Vec<Example> {
    let poisson_lambda = 4.0_f64;
    let poisson_sd = poisson_lambda.sqrt();
    vec![
        Example {
            title: "Bernoulli",
            description: "Single success/failure trial",
            spec: DistributionSpec::bernoulli(0.3),
            queries: vec![pmf(1.0), pmf(0.0)],
        },
        Example {
            title: "Binomial",
            description: "Successes in a fixed number of independent trials",
            spec: DistributionSpec::binomial(10, 0.4),
            queries: vec![
                pmf(3.0),
                range(3.0, 5.0, false, true),
                range(2.0, 4.0, true, false),
                greater(4.0),
                at_least(6.0),
                cdf(1.0),
                cdf(3.0),
                not_equal(4.0),
                set(&[2.0, 5.0, 7.0]),
            ],
        },
        Example {
            title: "Geometric",
            description: "Trials until the first success",
            spec: DistributionSpec::geometric(0.2),
            queries: vec![
                pmf(5.0),
                cdf(3.0),
                greater(4.0),
                at_least(3.0),
                between(2.0, 5.0),
                range(3.0, 7.0, false, false),
                parity(Parity::Odd),
                set(&[1.0, 3.0, 5.0]),
            ],
        },
        Example {
            title: "Negative binomial",
            description: "Failures before the r-th success",
            spec: DistributionSpec::negative_binomial(2.0, 0.4),
            queries: vec![
                pmf(5.0),
                cdf(4.0),
                greater(6.0),
                at_least(5.0),
                between(2.0, 7.0),
                range(3.0, 8.0, false, false),
                parity(Parity::Even),
                set(&[1.0, 3.0, 5.0]),
                // at most 3 failures before the second success
                cdf(3.0),
            ],
        },
        Example {
            title: "Poisson",
            description: "Count of rare events in a fixed interval",
            spec: DistributionSpec::poisson(poisson_lambda),
            queries: vec![
                pmf(2.0),
                cdf(3.0),
                greater(5.0),
                at_least(4.0),
                between(2.0, 5.0),
                range(3.0, 7.0, false, false),
                parity(Parity::Even),
                set(&[1.0, 3.0, 5.0]),
                // within one standard deviation of the mean
                between(poisson_lambda - poisson_sd, poisson_lambda + poisson_sd),
            ],
        },
        Example {
            title: "Uniform",
            description: "Equal density across an interval",
            spec: DistributionSpec::uniform(2.0, 5.0),
            queries: vec![between(2.5, 4.5), cdf(3.5), greater(4.2)],
        },
        Example {
            title: "Exponential",
            description: "Waiting time between events",
            spec: DistributionSpec::exponential(0.5),
            queries: vec![between(1.0, 3.0), cdf(2.0), greater(1.5)],
        },
        Example {
            title: "Normal",
            description: "Symmetric bell curve around the mean",
            spec: DistributionSpec::normal(0.0, 1.0),
            queries: vec![between(-1.0, 1.0), cdf(0.5), greater(1.96)],
        },
        Example {
            title: "Beta",
            description: "Proportions bounded between 0 and 1",
            spec: DistributionSpec::beta(2.0, 3.0),
            queries: vec![between(0.2, 0.7), cdf(0.5), greater(0.6)],
        },
        Example {
            title: "Gamma",
            description: "Waiting time for several events",
            spec: DistributionSpec::gamma(2.0, 1.5),
            queries: vec![between(1.0, 4.0), cdf(2.5), greater(3.0)],
        },
        Example {
            title: "Chi-square",
            description: "Sum of squared standard normal variables",
            spec: DistributionSpec::chi_square(3.0),
            queries: vec![between(1.0, 5.0), cdf(2.0), greater(7.815)],
        },
        Example {
            title: "Student's t",
            description: "Standardized mean of a small sample",
            spec: DistributionSpec::student_t(5.0),
            queries: vec![between(-1.5, 1.5), cdf(1.0), greater(2.0)],
        },
    ]
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::schema::query::QueryValue;

    fn probability(spec: &DistributionSpec, query: &Query) -> f64 {
        let distribution = DistributionQuery::new(spec).unwrap();
        match query.evaluate(&distribution).unwrap() {
            QueryValue::Probability(p) => p,
            QueryValue::Truncated(sum) => sum.probability,
            QueryValue::Moments(_) => panic!("expected a probability"),
        }
    }

    #[test]
    fn test_covers_every_family_once() {
        let families = examples().iter().map(|e| e.spec.family).collect::<Vec<_>>();
        assert_eq!(families, Family::ALL);
    }

    #[test]
    fn test_every_example_evaluates() {
        for example in examples() {
            let distribution = DistributionQuery::new(&example.spec).unwrap();
            for query in example.queries.iter().chain([&Query::Moments]) {
                assert!(
                    query.evaluate(&distribution).is_ok(),
                    "{} {}",
                    example.spec,
                    query.notation(distribution.is_discrete())
                );
            }
        }
    }

    #[test]
    fn test_poisson_within_one_standard_deviation() {
        let example = examples()
            .into_iter()
            .find(|e| e.spec.family == Family::Poisson)
            .unwrap();
        let query = example.queries.last().unwrap();
        assert_abs_diff_eq!(
            probability(&example.spec, query),
            0.797_747_827_2,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_binomial_all_but_four() {
        let spec = DistributionSpec::binomial(10, 0.4);
        assert_abs_diff_eq!(
            probability(&spec, &not_equal(4.0)),
            0.749_177_344,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_negative_binomial_at_most_three_failures() {
        let example = examples()
            .into_iter()
            .find(|e| e.spec.family == Family::NegativeBinomial)
            .unwrap();
        let query = example.queries.last().unwrap();
        assert_eq!(*query, cdf(3.0));
        assert_abs_diff_eq!(probability(&example.spec, query), 0.66304, epsilon = 1e-10);
    }

    #[test]
    fn test_geometric_odd_trials() {
        let spec = DistributionSpec::geometric(0.2);
        assert_abs_diff_eq!(
            probability(&spec, &parity(Parity::Odd)),
            1.0 / 1.8,
            epsilon = 1e-10
        );
    }
}
