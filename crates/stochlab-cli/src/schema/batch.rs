use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stochlab_query::DistributionSpec;

use crate::schema::query::{Query, QueryValue};

/// Input document of the `batch` command.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchFile {
    pub queries: Vec<BatchEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchEntry {
    /// Defaults to the query notation when omitted.
    #[serde(default)]
    pub label: Option<String>,
    pub spec: DistributionSpec,
    pub query: Query,
}

/// Output document of the `batch` command.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub num_failed: usize,
    pub results: Vec<BatchResult>,
}

/// Outcome of one batch entry: exactly one of `value` and `error` is set.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub label: String,
    pub spec: String,
    pub query: Query,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<QueryValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
