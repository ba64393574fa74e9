use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::fill::plan_model::FillOutcome;
use crate::fill::planner::ScanStats;

/// One line of the JSONL trace: a scan or a fill and how it went.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub operation: String,

    pub total: Option<usize>,
    pub categorized: Option<usize>,
    pub fillable: Option<usize>,

    pub planned: Option<usize>,
    pub filled: Option<usize>,

    pub error: Option<String>,
}

impl TraceEvent {
    pub fn now(operation: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            operation: operation.to_string(),
            total: None,
            categorized: None,
            fillable: None,
            planned: None,
            filled: None,
            error: None,
        }
    }

    pub fn with_stats(mut self, stats: &ScanStats) -> Self {
        self.total = Some(stats.total);
        self.categorized = Some(stats.categorized);
        self.fillable = Some(stats.fillable);
        self
    }

    pub fn with_outcome(mut self, outcome: &FillOutcome) -> Self {
        self.planned = Some(outcome.planned);
        self.filled = Some(outcome.filled);
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }
}
