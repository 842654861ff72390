use std::collections::HashMap;

use crate::announce::BufferOutput;
use crate::classify::rules::Classifier;
use crate::combat::tracker::CombatTracker;
use crate::config::NarratorConfig;
use crate::host::element::{ControlKind, ElementId};
use crate::host::fixture::{FixtureNode, FixtureScene};
use crate::host::probe::FieldValue;
use crate::input::Key;
use crate::scenario::model::{
    AssertionResult, AssertionSpec, BrowserSpec, NodeSpec, ScenarioResult, ScenarioSpec,
    ScenarioStep,
};
use crate::trace::event::TraceEvent;
use crate::trace::logger::TraceLogger;
use crate::zones::model::{BrowserDescriptor, BrowserKind, BrowserLayout, Zone};
use crate::zones::navigator::ZoneNavigator;

/// Executes a ScenarioSpec step-by-step against a fixture scene, playing
/// the role the per-screen navigator plays in the live host.
pub struct ScenarioRunner;

struct RunState {
    scene: FixtureScene,
    names: HashMap<String, ElementId>,
    classifier: Classifier,
    navigator: ZoneNavigator,
    tracker: CombatTracker,
    out: BufferOutput,
}

impl ScenarioRunner {
    /// Run a complete scenario with default config and no tracing.
    pub fn run(spec: &ScenarioSpec) -> ScenarioResult {
        Self::run_configured(spec, &NarratorConfig::default(), &TraceLogger::disabled())
    }

    /// Run a scenario with explicit config; every announcement the core
    /// emits lands in the trace.
    pub fn run_configured(
        spec: &ScenarioSpec,
        config: &NarratorConfig,
        tracer: &TraceLogger,
    ) -> ScenarioResult {
        let (scene, names) = match build_fixture(&spec.scene) {
            Ok(built) => built,
            Err(e) => {
                return ScenarioResult {
                    scenario_name: spec.name.clone(),
                    passed: false,
                    steps_run: 0,
                    assertion_results: vec![],
                    error: Some(e),
                };
            }
        };

        let mut state = RunState {
            scene,
            names,
            classifier: Classifier::new(config.clone()),
            navigator: ZoneNavigator::new(config),
            tracker: CombatTracker::new(config),
            out: BufferOutput::new(),
        };

        let mut assertion_results = Vec::new();
        let mut traced = 0usize;
        for (i, step) in spec.steps.iter().enumerate() {
            match Self::execute_step(step, i, spec, &mut state, &mut assertion_results) {
                Ok(()) => {}
                Err(e) => {
                    return ScenarioResult {
                        scenario_name: spec.name.clone(),
                        passed: false,
                        steps_run: i + 1,
                        assertion_results,
                        error: Some(format!("Step {} failed: {}", i, e)),
                    };
                }
            }

            if tracer.enabled() {
                for (text, priority) in state.out.messages.iter().skip(traced) {
                    tracer.log(&TraceEvent::now(i as u64, "scenario").with_announcement(text, *priority));
                }
            }
            traced = state.out.messages.len();
        }

        let passed = assertion_results.iter().all(|a| a.passed);
        ScenarioResult {
            scenario_name: spec.name.clone(),
            passed,
            steps_run: spec.steps.len(),
            assertion_results,
            error: None,
        }
    }

    fn execute_step(
        step: &ScenarioStep,
        step_index: usize,
        spec: &ScenarioSpec,
        state: &mut RunState,
        assertion_results: &mut Vec<AssertionResult>,
    ) -> Result<(), String> {
        match step {
            ScenarioStep::ActivateBrowser => {
                let browser = spec
                    .browser
                    .as_ref()
                    .ok_or_else(|| "scenario has no browser section".to_string())?;
                let descriptor = build_descriptor(state, browser)?;
                state.navigator.activate(descriptor);
                Ok(())
            }

            ScenarioStep::DeactivateBrowser => {
                state.navigator.deactivate();
                Ok(())
            }

            ScenarioStep::Key { key } => {
                let key = Key::parse(key).ok_or_else(|| format!("unknown key '{}'", key))?;
                state.navigator.handle_key(
                    &mut state.scene,
                    state.classifier.extractor(),
                    key,
                    &mut state.out,
                );
                Ok(())
            }

            ScenarioStep::Ticks { count } => {
                for _ in 0..*count {
                    state.navigator.tick(
                        &state.scene,
                        state.classifier.extractor(),
                        &mut state.out,
                    );
                }
                Ok(())
            }

            ScenarioStep::SetField { node, field, value } => {
                let el = resolve(state, node)?;
                let value = field_value(state, value)?;
                state.scene.set_field(el, field, value);
                Ok(())
            }

            ScenarioStep::SetText { node, text } => {
                let el = resolve(state, node)?;
                if let Some(n) = state.scene.node_mut(el) {
                    n.text = Some(text.clone());
                }
                Ok(())
            }

            ScenarioStep::Destroy { node } => {
                let el = resolve(state, node)?;
                state.scene.destroy(el);
                Ok(())
            }

            ScenarioStep::PollCombat { items, phase } => {
                let ids: Vec<ElementId> = items
                    .iter()
                    .map(|n| resolve(state, n))
                    .collect::<Result<_, _>>()?;
                state.tracker.poll(
                    &state.scene,
                    state.classifier.extractor(),
                    &ids,
                    *phase,
                    &mut state.out,
                );
                Ok(())
            }

            ScenarioStep::ClearAnnouncements => {
                state.out.clear();
                Ok(())
            }

            ScenarioStep::Assert { assertions } => {
                for spec in assertions {
                    assertion_results.push(Self::evaluate_one(spec, step_index, state));
                }
                Ok(())
            }
        }
    }

    fn evaluate_one(spec: &AssertionSpec, step_index: usize, state: &mut RunState) -> AssertionResult {
        let (passed, actual, message) = match spec {
            AssertionSpec::AnnouncementContains { expected } => {
                let passed = state.out.contains(expected);
                let actual = Some(state.out.texts().join(" | "));
                let message = (!passed)
                    .then(|| format!("no announcement contains '{}'", expected));
                (passed, actual, message)
            }

            AssertionSpec::AnnouncementAbsent { expected } => {
                let passed = !state.out.contains(expected);
                let actual = Some(state.out.texts().join(" | "));
                let message = (!passed)
                    .then(|| format!("'{}' was announced but should be absent", expected));
                (passed, actual, message)
            }

            AssertionSpec::LastAnnouncement { expected } => {
                let actual = state.out.last().map(|s| s.to_string());
                let passed = actual.as_deref() == Some(expected.as_str());
                let message = (!passed)
                    .then(|| format!("last announcement is not '{}'", expected));
                (passed, actual, message)
            }

            AssertionSpec::ZoneCounts { top, bottom } => {
                let t = state.navigator.items(Zone::Top).len();
                let b = state.navigator.items(Zone::Bottom).len();
                let passed = t == *top && b == *bottom;
                let message = (!passed)
                    .then(|| format!("expected {}/{} items, found {}/{}", top, bottom, t, b));
                (passed, Some(format!("{}/{}", t, b)), message)
            }

            AssertionSpec::CurrentItem { expected } => {
                let actual = state.navigator.current_item().map(|i| i.label.clone());
                let passed = actual.as_deref() == Some(expected.as_str());
                let message = (!passed)
                    .then(|| format!("current item is not '{}'", expected));
                (passed, actual, message)
            }

            AssertionSpec::Classified { node, role } => match resolve(state, node) {
                Ok(el) => {
                    let c = state.classifier.classify(&state.scene, el);
                    let actual = format!("{:?}", c.role);
                    let passed = actual.eq_ignore_ascii_case(role);
                    let message = (!passed)
                        .then(|| format!("'{}' classified as {}, expected {}", node, actual, role));
                    (passed, Some(actual), message)
                }
                Err(e) => (false, None, Some(e)),
            },
        };

        AssertionResult {
            step_index,
            spec: spec.clone(),
            passed,
            actual,
            message,
        }
    }
}

// ============================================================================
// Scene construction
// ============================================================================

/// Build a fixture scene and its name index from node specs. Public so the
/// classify CLI can reuse the same construction.
pub fn build_fixture(
    roots: &[NodeSpec],
) -> Result<(FixtureScene, HashMap<String, ElementId>), String> {
    let mut scene = FixtureScene::new();
    let mut names = HashMap::new();
    // Two passes: nodes first so '@' field references can point anywhere,
    // fields after.
    let mut pending_fields: Vec<(ElementId, String, serde_yaml::Value)> = Vec::new();
    for spec in roots {
        add_node(&mut scene, &mut names, None, spec, &mut pending_fields)?;
    }
    for (el, field, value) in pending_fields {
        let value = field_value_in(&names, &value)?;
        scene.set_field(el, &field, value);
    }
    Ok((scene, names))
}

fn add_node(
    scene: &mut FixtureScene,
    names: &mut HashMap<String, ElementId>,
    parent: Option<ElementId>,
    spec: &NodeSpec,
    pending_fields: &mut Vec<(ElementId, String, serde_yaml::Value)>,
) -> Result<(), String> {
    let mut node = FixtureNode::named(&spec.name);
    if let Some(t) = &spec.type_name {
        node = node.with_type(t);
    }
    if let Some(text) = &spec.text {
        node = node.with_text(text);
    }
    if let Some(alpha) = spec.alpha {
        node = node.with_alpha(alpha);
    }
    if let Some([w, h]) = spec.size {
        node = node.with_rect(w, h);
    }
    if !spec.interactable {
        node = node.not_interactable();
    }
    if !spec.active {
        node = node.inactive();
    }
    for control in &spec.controls {
        node = node.with_control(control_kind(control)?);
    }
    for method in &spec.methods {
        node = node.with_method(method);
    }

    let el = scene.add(parent, node);
    if names.contains_key(&spec.name) {
        return Err(format!("duplicate node name '{}'", spec.name));
    }
    names.insert(spec.name.clone(), el);

    for (field, value) in &spec.fields {
        pending_fields.push((el, field.clone(), value.clone()));
    }
    for child in &spec.children {
        add_node(scene, names, Some(el), child, pending_fields)?;
    }
    Ok(())
}

fn control_kind(name: &str) -> Result<ControlKind, String> {
    match name {
        "button" => Ok(ControlKind::Button),
        "event_trigger" => Ok(ControlKind::EventTrigger),
        "toggle" => Ok(ControlKind::Toggle),
        "slider" => Ok(ControlKind::Slider),
        "scrollbar" => Ok(ControlKind::Scrollbar),
        "dropdown" => Ok(ControlKind::Dropdown),
        "text_field" => Ok(ControlKind::TextField),
        "rich_text" => Ok(ControlKind::RichText),
        "image" => Ok(ControlKind::Image),
        "card" => Ok(ControlKind::Card),
        _ => Err(format!("unknown control kind '{}'", name)),
    }
}

fn resolve(state: &RunState, name: &str) -> Result<ElementId, String> {
    resolve_in(&state.names, name)
}

fn resolve_in(names: &HashMap<String, ElementId>, name: &str) -> Result<ElementId, String> {
    names
        .get(name)
        .copied()
        .ok_or_else(|| format!("unknown node '{}'", name))
}

fn field_value(state: &RunState, value: &serde_yaml::Value) -> Result<FieldValue, String> {
    field_value_in(&state.names, value)
}

/// Convert a YAML value into a probe field. '@name' strings are node
/// references; lists of them become reference lists.
fn field_value_in(
    names: &HashMap<String, ElementId>,
    value: &serde_yaml::Value,
) -> Result<FieldValue, String> {
    match value {
        serde_yaml::Value::Bool(b) => Ok(FieldValue::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(FieldValue::Int(i))
            } else {
                Ok(FieldValue::Float(n.as_f64().unwrap_or(0.0)))
            }
        }
        serde_yaml::Value::String(s) => match s.strip_prefix('@') {
            Some(name) => Ok(FieldValue::Ref(resolve_in(names, name)?)),
            None => Ok(FieldValue::Str(s.clone())),
        },
        serde_yaml::Value::Sequence(seq) => {
            let mut refs = Vec::new();
            for item in seq {
                let s = item
                    .as_str()
                    .ok_or_else(|| "reference lists must contain strings".to_string())?;
                let name = s
                    .strip_prefix('@')
                    .ok_or_else(|| format!("list entry '{}' is not an '@' reference", s))?;
                refs.push(resolve_in(names, name)?);
            }
            Ok(FieldValue::Refs(refs))
        }
        other => Err(format!("unsupported field value: {:?}", other)),
    }
}

fn build_descriptor(state: &mut RunState, browser: &BrowserSpec) -> Result<BrowserDescriptor, String> {
    match browser {
        BrowserSpec::DividerList {
            container,
            divider,
            top_label,
            bottom_label,
            target_count,
            mulligan,
        } => {
            let container = resolve(state, container)?;
            let divider = resolve(state, divider)?;
            state.scene.script_divider_move(container, divider);
            Ok(BrowserDescriptor {
                kind: if *mulligan { BrowserKind::Mulligan } else { BrowserKind::ZoneSort },
                top_label: top_label.clone(),
                bottom_label: bottom_label.clone(),
                target_count: *target_count,
                layout: BrowserLayout::DividerList { container, divider_id: divider.0 },
            })
        }
        BrowserSpec::PairedLists {
            top,
            bottom,
            top_label,
            bottom_label,
            target_count,
            mulligan,
        } => {
            let top = resolve(state, top)?;
            let bottom = resolve(state, bottom)?;
            state.scene.script_paired_move(top, bottom);
            Ok(BrowserDescriptor {
                kind: if *mulligan { BrowserKind::Mulligan } else { BrowserKind::ZoneSort },
                top_label: top_label.clone(),
                bottom_label: bottom_label.clone(),
                target_count: *target_count,
                layout: BrowserLayout::PairedLists { top, bottom },
            })
        }
    }
}
