use serde::{Deserialize, Serialize};

use crate::scenario::model::{AssertionSpec, ScenarioResult};

// ============================================================================
// Suite report — formatted terminal output
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub suite_name: String,
    pub results: Vec<ScenarioResult>,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
    pub duration_ms: Option<u128>,
}

impl SuiteReport {
    pub fn from_results(suite_name: &str, results: Vec<ScenarioResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        SuiteReport {
            suite_name: suite_name.to_string(),
            passed,
            failed: total - passed,
            total,
            results,
            duration_ms: None,
        }
    }

    pub fn with_duration(mut self, ms: u128) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Format a suite report for terminal output.
///
/// Produces output like:
/// ```text
/// === Scenarios: replay ===
///
/// ✓ PASS  mulligan browser (9 steps, 4 assertions)
/// ✗ FAIL  combat deltas (5 steps, 3 assertions)
///     [FAIL] Step 2: AnnouncementContains — no announcement contains 'assigned'
///
/// === Results: 1 passed, 1 failed (2 total) ===
/// ```
pub fn format_console_report(report: &SuiteReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Scenarios: {} ===\n\n", report.suite_name));

    for result in &report.results {
        let assertion_count = result.assertion_results.len();
        let marker = if result.passed {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };

        out.push_str(&format!(
            "{}  {} ({} steps, {} assertions)\n",
            marker, result.scenario_name, result.steps_run, assertion_count
        ));

        if let Some(ref error) = result.error {
            out.push_str(&format!("    [ERROR] {}\n", error));
        }

        if !result.passed {
            for ar in &result.assertion_results {
                if !ar.passed {
                    let detail = ar.message.as_deref().unwrap_or("assertion failed");
                    out.push_str(&format!(
                        "    [FAIL] Step {}: {} — {}\n",
                        ar.step_index,
                        format_assertion_type(&ar.spec),
                        detail
                    ));
                }
            }
        }
    }

    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed ({} total)",
        report.passed, report.failed, report.total
    ));

    if let Some(ms) = report.duration_ms {
        out.push_str(&format!(" in {:.1}s", ms as f64 / 1000.0));
    }

    out.push_str(" ===\n");
    out
}

fn format_assertion_type(spec: &AssertionSpec) -> &'static str {
    match spec {
        AssertionSpec::AnnouncementContains { .. } => "AnnouncementContains",
        AssertionSpec::AnnouncementAbsent { .. } => "AnnouncementAbsent",
        AssertionSpec::LastAnnouncement { .. } => "LastAnnouncement",
        AssertionSpec::ZoneCounts { .. } => "ZoneCounts",
        AssertionSpec::CurrentItem { .. } => "CurrentItem",
        AssertionSpec::Classified { .. } => "Classified",
    }
}
