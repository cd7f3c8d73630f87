use anyhow::Context;
use clap::{Args, Subcommand, ValueEnum};
use stochlab_query::{DistributionQuery, DistributionSpec, Parity};

use crate::schema::query::Query;

#[derive(Debug, Clone, Args)]
pub(crate) struct QueryArg {
    /// Distribution, e.g. `binomial(n=10, p=0.4)` or `norm(mu=0, sigma=1)`
    spec: DistributionSpec,

    #[command(subcommand)]
    query: QueryCommand,
}

#[derive(Debug, Clone, Subcommand)]
enum QueryCommand {
    /// Point probability P(X = x), or the density for continuous families
    Pmf {
        #[arg(allow_negative_numbers = true)]
        x: f64,
    },
    /// Cumulative probability P(X ≤ x)
    Cdf {
        #[arg(allow_negative_numbers = true)]
        x: f64,
    },
    /// Range probability P(low ≤ X ≤ high)
    Range {
        #[arg(allow_negative_numbers = true)]
        low: f64,
        #[arg(allow_negative_numbers = true)]
        high: f64,
        /// Exclude the lower bound: P(low < X ...)
        #[arg(long)]
        exclude_low: bool,
        /// Exclude the upper bound: P(... X < high)
        #[arg(long)]
        exclude_high: bool,
    },
    /// Tail probability P(X > x)
    Tail {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        /// Include `x` itself: P(X ≥ x)
        #[arg(long)]
        inclusive: bool,
    },
    /// Complement of a point probability P(X ≠ x) (discrete families only)
    NotEqual { x: f64 },
    /// Probability of a finite set of values (discrete families only)
    Set {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
    /// Probability that X is even or odd (discrete families only)
    Parity { parity: ParityArg },
    /// Mean, variance and standard deviation
    Moments,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ParityArg {
    Even,
    Odd,
}

impl From<ParityArg> for Parity {
    fn from(value: ParityArg) -> Self {
        match value {
            ParityArg::Even => Parity::Even,
            ParityArg::Odd => Parity::Odd,
        }
    }
}

impl From<&QueryCommand> for Query {
    fn from(command: &QueryCommand) -> Self {
        match command {
            QueryCommand::Pmf { x } => Query::Pmf { x: *x },
            QueryCommand::Cdf { x } => Query::Cdf { x: *x },
            QueryCommand::Range {
                low,
                high,
                exclude_low,
                exclude_high,
            } => Query::Range {
                low: *low,
                high: *high,
                low_inclusive: !exclude_low,
                high_inclusive: !exclude_high,
            },
            QueryCommand::Tail { x, inclusive } => Query::Tail {
                x: *x,
                strict: !inclusive,
            },
            QueryCommand::NotEqual { x } => Query::NotEqual { x: *x },
            QueryCommand::Set { values } => Query::Set {
                values: values.clone(),
            },
            QueryCommand::Parity { parity } => Query::Parity {
                parity: (*parity).into(),
            },
            QueryCommand::Moments => Query::Moments,
        }
    }
}

pub(crate) fn run(arg: &QueryArg, precision: usize) -> anyhow::Result<()> {
    let distribution = DistributionQuery::new(&arg.spec)
        .with_context(|| format!("Invalid distribution: {}", arg.spec))?;
    let query = Query::from(&arg.query);
    tracing::debug!(spec = %arg.spec, ?query, "evaluating query");

    let value = query
        .evaluate(&distribution)
        .with_context(|| format!("Failed to evaluate query on {}", arg.spec))?;
    println!(
        "{} = {}",
        query.notation(distribution.is_discrete()),
        value.format(precision)
    );
    Ok(())
}
