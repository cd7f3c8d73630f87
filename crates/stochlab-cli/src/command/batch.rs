use std::path::PathBuf;

use stochlab_query::DistributionQuery;

use crate::{
    schema::batch::{BatchEntry, BatchFile, BatchReport, BatchResult},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BatchArg {
    /// Path to the batch JSON file
    file: PathBuf,
    /// Output file path (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &BatchArg) -> anyhow::Result<()> {
    let batch: BatchFile = util::read_json_file("batch", &arg.file)?;
    tracing::info!(num_queries = batch.queries.len(), "evaluating batch");

    let report = evaluate_batch(&batch);
    if report.num_failed > 0 {
        tracing::warn!(
            num_failed = report.num_failed,
            "some batch queries could not be evaluated"
        );
    }

    Output::save_json(&report, arg.output.as_deref())
}

fn evaluate_batch(batch: &BatchFile) -> BatchReport {
    let results = batch.queries.iter().map(evaluate_entry).collect::<Vec<_>>();
    let num_failed = results.iter().filter(|r| r.error.is_some()).count();
    BatchReport {
        generated_at: chrono::Utc::now(),
        num_failed,
        results,
    }
}

fn evaluate_entry(entry: &BatchEntry) -> BatchResult {
    let outcome = DistributionQuery::new(&entry.spec).and_then(|distribution| {
        let label = entry
            .label
            .clone()
            .unwrap_or_else(|| entry.query.notation(distribution.is_discrete()));
        entry.query.evaluate(&distribution).map(|value| (label, value))
    });

    let (label, value, error) = match outcome {
        Ok((label, value)) => (label, Some(value), None),
        Err(e) => {
            tracing::debug!(spec = %entry.spec, error = %e, "batch query failed");
            let label = entry
                .label
                .clone()
                .unwrap_or_else(|| entry.query.notation(entry.spec.family.is_discrete()));
            (label, None, Some(e.to_string()))
        }
    };

    BatchResult {
        label,
        spec: entry.spec.to_string(),
        query: entry.query.clone(),
        value,
        error,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::schema::query::QueryValue;

    const BATCH: &str = r#"{
        "queries": [
            {
                "label": "binomial P(X=3)",
                "spec": {"family": "binomial", "params": {"n": 10, "p": 0.4}},
                "query": {"kind": "pmf", "x": 3}
            },
            {
                "spec": {"family": "student_t", "params": {"df": 2}},
                "query": {"kind": "moments"}
            },
            {
                "spec": {"family": "poisson", "params": {"lambda": -1}},
                "query": {"kind": "cdf", "x": 3}
            },
            {
                "spec": {"family": "normal", "params": {"mu": 0, "sigma": 1}},
                "query": {"kind": "range", "low": -1, "high": 1}
            }
        ]
    }"#;

    #[test]
    fn test_failures_do_not_abort_batch() {
        let batch: BatchFile = serde_json::from_str(BATCH).unwrap();
        let report = evaluate_batch(&batch);
        assert_eq!(report.results.len(), 4);
        assert_eq!(report.num_failed, 2);

        let first = &report.results[0];
        assert_eq!(first.label, "binomial P(X=3)");
        assert_eq!(first.spec, "binomial(n=10, p=0.4)");
        let Some(QueryValue::Probability(p)) = first.value else {
            panic!("expected a probability");
        };
        assert_abs_diff_eq!(p, 0.214_990_848, epsilon = 1e-9);

        let undefined = &report.results[1];
        assert!(undefined.value.is_none());
        assert!(undefined.error.as_deref().unwrap().contains("undefined"));

        let invalid = &report.results[2];
        assert_eq!(invalid.label, "P(X ≤ 3)");
        assert!(invalid.error.as_deref().unwrap().contains("lambda"));

        let normal = &report.results[3];
        assert_eq!(normal.label, "P(-1 ≤ X ≤ 1)");
        let Some(QueryValue::Probability(p)) = normal.value else {
            panic!("expected a probability");
        };
        assert_abs_diff_eq!(p, 0.682_689_492, epsilon = 1e-8);
    }

    #[test]
    fn test_report_serialization() {
        let batch: BatchFile = serde_json::from_str(BATCH).unwrap();
        let json = serde_json::to_value(evaluate_batch(&batch)).unwrap();
        assert!(json["generated_at"].is_string());
        assert!(json["results"][0].get("error").is_none());
        assert!(json["results"][1].get("value").is_none());
        assert!(json["results"][3]["value"].is_f64());
    }
}
