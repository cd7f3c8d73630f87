use clap::{Parser, Subcommand};

use self::{
    batch::BatchArg, compare_skew::CompareSkewArg, query::QueryArg, walkthrough::WalkthroughArg,
};

mod batch;
mod compare_skew;
mod query;
mod walkthrough;

#[derive(Debug, Clone, Parser)]
#[command(name = "stochlab", author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    /// Number of decimals shown for probabilities and statistics
    #[arg(long, global = true, default_value_t = 4)]
    precision: usize,

    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evaluate one query against a distribution, e.g. `query "binomial(n=10, p=0.4)" pmf 3`
    Query(QueryArg),
    /// Evaluate every query of a JSON batch file
    Batch(#[clap(flatten)] BatchArg),
    /// Print reference probabilities for every supported distribution
    Walkthrough(#[clap(flatten)] WalkthroughArg),
    /// Compare sampled normal, left-skewed and right-skewed datasets
    CompareSkew(#[clap(flatten)] CompareSkewArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match &args.mode {
        Mode::Query(arg) => query::run(arg, args.precision)?,
        Mode::Batch(arg) => batch::run(arg)?,
        Mode::Walkthrough(arg) => walkthrough::run(arg, args.precision)?,
        Mode::CompareSkew(arg) => compare_skew::run(arg, args.precision)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_global_options() {
        let args = CommandArgs::try_parse_from([
            "stochlab",
            "walkthrough",
            "--log-level",
            "debug",
            "--precision",
            "6",
        ])
        .unwrap();
        assert_eq!(args.log_level, tracing::Level::DEBUG);
        assert_eq!(args.precision, 6);
        assert!(matches!(args.mode, Mode::Walkthrough(_)));
    }

    #[test]
    fn test_defaults() {
        let args = CommandArgs::try_parse_from(["stochlab", "compare-skew"]).unwrap();
        assert_eq!(args.log_level, tracing::Level::WARN);
        assert_eq!(args.precision, 4);
    }
}
