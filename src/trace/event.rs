use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::announce::Priority;
use crate::classify::model::Classification;

/// One line of the JSONL narration trace.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub tick: u64,

    pub component: String,

    pub announcement: Option<String>,
    pub priority: Option<String>,

    pub element: Option<u64>,
    pub role: Option<String>,
    pub matched_rule: Option<String>,

    pub suppression_reason: Option<String>,
}

impl TraceEvent {
    pub fn now(tick: u64, component: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            tick,
            component: component.to_string(),
            announcement: None,
            priority: None,
            element: None,
            role: None,
            matched_rule: None,
            suppression_reason: None,
        }
    }

    pub fn with_announcement(mut self, text: &str, priority: Priority) -> Self {
        self.announcement = Some(text.to_string());
        self.priority = Some(format!("{:?}", priority));
        self
    }

    pub fn with_classification(mut self, element: u64, c: &Classification) -> Self {
        self.element = Some(element);
        self.role = Some(format!("{:?}", c.role));
        self.matched_rule = Some(c.matched_rule.to_string());
        self
    }

    pub fn with_suppression(mut self, reason: impl ToString) -> Self {
        self.suppression_reason = Some(reason.to_string());
        self
    }
}
