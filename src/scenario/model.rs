use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Scenario specs
// ============================================================================
//
// A scenario describes a fixture scene plus an ordered key/tick script and
// assertion blocks over the announcements it produces. Deserialized from
// YAML for the replay CLI, built in-memory by tests.

/// A complete replay scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioSpec {
    /// Human-readable name for this scenario
    pub name: String,

    /// Root nodes of the fixture scene
    pub scene: Vec<NodeSpec>,

    /// Two-zone browser wiring, when the scenario drives one
    #[serde(default)]
    pub browser: Option<BrowserSpec>,

    /// Ordered steps to execute
    pub steps: Vec<ScenarioStep>,
}

/// One scene node. Children nest; nodes are referenced from steps by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeSpec {
    pub name: String,

    #[serde(default)]
    pub type_name: Option<String>,

    #[serde(default)]
    pub text: Option<String>,

    /// Control markers: button, event_trigger, toggle, slider, scrollbar,
    /// dropdown, text_field, rich_text, image, card
    #[serde(default)]
    pub controls: Vec<String>,

    #[serde(default = "default_true")]
    pub interactable: bool,

    #[serde(default = "default_true")]
    pub active: bool,

    #[serde(default)]
    pub alpha: Option<f32>,

    #[serde(default)]
    pub size: Option<[f32; 2]>,

    /// Probe fields. Strings starting with '@' are references to other
    /// nodes by name; lists of '@' strings become reference lists.
    #[serde(default)]
    pub fields: HashMap<String, serde_yaml::Value>,

    #[serde(default)]
    pub methods: Vec<String>,

    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

fn default_true() -> bool {
    true
}

/// Browser wiring: which nodes are the zone containers and what the zones
/// are called.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BrowserSpec {
    DividerList {
        container: String,
        divider: String,
        top_label: String,
        bottom_label: String,
        #[serde(default)]
        target_count: Option<usize>,
        #[serde(default)]
        mulligan: bool,
    },
    PairedLists {
        top: String,
        bottom: String,
        top_label: String,
        bottom_label: String,
        #[serde(default)]
        target_count: Option<usize>,
        #[serde(default)]
        mulligan: bool,
    },
}

/// A single step in a scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Activate the scenario's browser descriptor
    ActivateBrowser,

    /// Deactivate the zone navigator
    DeactivateBrowser,

    /// Dispatch one key-down event
    Key { key: String },

    /// Advance the frame clock
    Ticks { count: u32 },

    /// Mutate a probe field on a node
    SetField {
        node: String,
        field: String,
        value: serde_yaml::Value,
    },

    /// Replace a node's attached text
    SetText { node: String, text: String },

    /// Host destroys a node (stale-reference simulation)
    Destroy { node: String },

    /// Run one combat tracker poll over the named items
    PollCombat {
        items: Vec<String>,
        #[serde(default = "default_true")]
        phase: bool,
    },

    /// Forget announcements collected so far
    ClearAnnouncements,

    /// Run assertions against collected announcements and navigator state
    Assert { assertions: Vec<AssertionSpec> },
}

/// A single assertion to evaluate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssertionSpec {
    /// Some collected announcement contains the expected substring
    AnnouncementContains { expected: String },

    /// No collected announcement contains the expected substring
    AnnouncementAbsent { expected: String },

    /// The most recent announcement equals the expected string
    LastAnnouncement { expected: String },

    /// Zone list sizes after the latest refresh
    ZoneCounts { top: usize, bottom: usize },

    /// Label of the item under the navigator cursor
    CurrentItem { expected: String },

    /// A node classifies to the expected role
    Classified { node: String, role: String },
}

/// Result of evaluating a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssertionResult {
    /// Which step this assertion belongs to (0-indexed)
    pub step_index: usize,

    pub spec: AssertionSpec,

    pub passed: bool,

    /// Actual value found (for debugging failed assertions)
    pub actual: Option<String>,

    /// Human-readable failure message
    pub message: Option<String>,
}

/// Result of running a complete scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,

    /// Whether all steps and assertions passed
    pub passed: bool,

    pub steps_run: usize,

    pub assertion_results: Vec<AssertionResult>,

    /// Error message if the run failed outside an assertion
    pub error: Option<String>,
}
