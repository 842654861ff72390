use crate::classify::rules::Classifier;
use crate::classify::scan::scan;
use crate::config::NarratorConfig;
use crate::scenario::model::ScenarioSpec;
use crate::scenario::report::{SuiteReport, format_console_report};
use crate::scenario::runner::{ScenarioRunner, build_fixture};
use crate::trace::logger::TraceLogger;

// ============================================================================
// replay subcommand
// ============================================================================

/// Run scenarios and return whether all passed.
pub fn cmd_replay(
    scenario_path: &str,
    trace: Option<&str>,
    config: &NarratorConfig,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let scenarios = load_scenarios(scenario_path)?;

    if scenarios.is_empty() {
        eprintln!("No scenarios found at: {}", scenario_path);
        return Ok(true);
    }

    if verbose > 0 {
        eprintln!("Running {} scenarios...", scenarios.len());
    }

    let tracer = match trace {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    let start = std::time::Instant::now();
    let mut results = Vec::new();
    for scenario in &scenarios {
        if verbose > 0 {
            eprintln!("  Running: {}", scenario.name);
        }
        results.push(ScenarioRunner::run_configured(scenario, config, &tracer));
    }
    let duration = start.elapsed().as_millis();

    let report = SuiteReport::from_results("replay", results).with_duration(duration);
    let all_passed = report.all_passed();
    print!("{}", format_console_report(&report));

    Ok(all_passed)
}

/// Load scenarios from a single YAML file or a directory of YAML files.
pub fn load_scenarios(path: &str) -> Result<Vec<ScenarioSpec>, Box<dyn std::error::Error>> {
    let metadata = std::fs::metadata(path)?;
    if metadata.is_dir() {
        let mut scenarios = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let p = entry.path();
            if p.extension().map_or(false, |e| e == "yaml" || e == "yml") {
                let content = std::fs::read_to_string(&p)?;
                let scenario: ScenarioSpec = serde_yaml::from_str(&content)?;
                scenarios.push(scenario);
            }
        }
        // Sort by name for deterministic order
        scenarios.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(scenarios)
    } else {
        let content = std::fs::read_to_string(path)?;
        let scenario: ScenarioSpec = serde_yaml::from_str(&content)?;
        Ok(vec![scenario])
    }
}

// ============================================================================
// classify subcommand
// ============================================================================

/// Print the classification table for a scenario's initial scene.
pub fn cmd_classify(
    scenario_path: &str,
    config: &NarratorConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(scenario_path)?;
    let scenario: ScenarioSpec = serde_yaml::from_str(&content)?;
    let (scene, _names) = build_fixture(&scenario.scene).map_err(std::io::Error::other)?;

    let classifier = Classifier::new(config.clone());
    let result = scan(&scene, &classifier);

    println!("=== {} — navigable ===", scenario.name);
    for entry in &result.navigable {
        println!(
            "  [{}] {:?} — {} ({})",
            entry.element.0,
            entry.classification.role,
            entry.spoken(),
            entry.classification.matched_rule
        );
    }

    println!("=== announce-only ===");
    for entry in &result.announced {
        println!(
            "  [{}] {:?} — {} ({})",
            entry.element.0,
            entry.classification.role,
            entry.spoken(),
            entry.classification.matched_rule
        );
    }

    Ok(())
}
