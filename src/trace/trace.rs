use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::structure::structure_model::AssistStructure;

/// One JSONL record per handled request.
#[derive(Debug, Serialize)]
pub struct ParseTraceEvent {
    pub timestamp_ms: u128,
    pub package_name: String,
    pub manual: bool,
    pub structure_fingerprint: String,

    pub session: Option<String>,
    pub field_count: usize,
    pub outcome: String,
    pub error: Option<String>,
}

impl ParseTraceEvent {
    pub fn now(structure: &AssistStructure, manual: bool) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            package_name: structure.package_name.clone(),
            manual,
            structure_fingerprint: structure.fingerprint(),
            session: None,
            field_count: 0,
            outcome: "unknown".to_string(),
            error: None,
        }
    }

    pub fn with_session(mut self, session: impl ToString) -> Self {
        self.session = Some(session.to_string());
        self
    }

    pub fn with_field_count(mut self, count: usize) -> Self {
        self.field_count = count;
        self
    }

    pub fn with_outcome(mut self, outcome: impl ToString) -> Self {
        self.outcome = outcome.to_string();
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }
}
