use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Narrator configuration: explicit pattern tables
// ============================================================================
//
// Every heuristic table the classifier and extractor consult lives here as
// constructed state, so isolated instances can be built in tests and the
// whole rule set can be overridden from a YAML file.

/// Optional YAML config file: `scene-narrator.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarratorConfig {
    #[serde(default)]
    pub hidden: HiddenConfig,
    #[serde(default)]
    pub labels: LabelConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            hidden: HiddenConfig::default(),
            labels: LabelConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiddenConfig {
    /// Name patterns (lowercased substrings) that mark decorative chrome.
    #[serde(default = "default_denylist")]
    pub denylist: Vec<String>,

    /// Container names treated as structural: their near-zero alpha does not
    /// hide descendants, and they themselves never enter navigation.
    #[serde(default = "default_structural")]
    pub structural_containers: Vec<String>,

    /// Control types shown even when the interactable flag is off.
    #[serde(default = "default_always_show")]
    pub always_show_types: Vec<String>,

    /// Name patterns for badge/notification counters.
    #[serde(default = "default_badges")]
    pub badge_markers: Vec<String>,

    #[serde(default = "default_alpha_threshold")]
    pub alpha_threshold: f32,

    #[serde(default = "default_min_area")]
    pub min_area: f32,
}

impl Default for HiddenConfig {
    fn default() -> Self {
        Self {
            denylist: default_denylist(),
            structural_containers: default_structural(),
            always_show_types: default_always_show(),
            badge_markers: default_badges(),
            alpha_threshold: default_alpha_threshold(),
            min_area: default_min_area(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    /// Hard overrides for elements whose default host text is misleading.
    #[serde(default)]
    pub overrides: HashMap<String, String>,

    /// Sibling names skipped during the sibling-label fallback.
    #[serde(default = "default_decorative")]
    pub decorative_siblings: Vec<String>,

    /// Generic suffix words stripped from structural names.
    #[serde(default = "default_suffixes")]
    pub strip_suffixes: Vec<String>,

    /// Label/text patterns that turn a clickable into a link.
    #[serde(default = "default_link_markers")]
    pub link_markers: Vec<String>,

    /// Name patterns for progress/objective status displays.
    #[serde(default = "default_progress_markers")]
    pub progress_markers: Vec<String>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            overrides: HashMap::new(),
            decorative_siblings: default_decorative(),
            strip_suffixes: default_suffixes(),
            link_markers: default_link_markers(),
            progress_markers: default_progress_markers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Ticks to wait after a zone move before rescanning, so the host's own
    /// animation/state update completes first.
    #[serde(default = "default_settle")]
    pub move_settle_ticks: u32,

    /// Consecutive "not in phase" polls required before the combat tracker
    /// treats the phase as exited (host flickers mid-phase).
    #[serde(default = "default_phase_exit")]
    pub phase_exit_polls: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            move_settle_ticks: default_settle(),
            phase_exit_polls: default_phase_exit(),
        }
    }
}

// Serde default helpers
fn default_alpha_threshold() -> f32 { 0.01 }
fn default_min_area() -> f32 { 4.0 }
fn default_settle() -> u32 { 12 }
fn default_phase_exit() -> u32 { 30 }

fn default_denylist() -> Vec<String> {
    [
        "clickblocker",
        "click_blocker",
        "blocker",
        "navgradient",
        "nav_gradient",
        "gradient",
        "background",
        "bg_art",
        "backdrop",
        "placeholder",
        "null",
        "hitbox",
        "glow",
        "shadow",
        "frame_art",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_structural() -> Vec<String> {
    ["viewport", "scrollcontent", "content root", "canvas", "layout", "panelroot"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_always_show() -> Vec<String> {
    ["toggle", "slider", "dropdown", "textfield"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_badges() -> Vec<String> {
    ["badge", "notification", "counter"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_decorative() -> Vec<String> {
    ["icon", "glow", "divider", "underline", "separator", "art"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_suffixes() -> Vec<String> {
    ["button", "toggle", "btn", "label", "text"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_link_markers() -> Vec<String> {
    ["http", "www.", ".com", "learn more", "subscribe", "privacy policy", "terms of"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_progress_markers() -> Vec<String> {
    ["progress", "objective", "quest_tracker", "xp_bar"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

// ============================================================================
// Config file loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if the file is missing or
/// malformed.
pub fn load_config(path: Option<&str>) -> NarratorConfig {
    let config_path = path.unwrap_or("scene-narrator.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => NarratorConfig::default(),
    }
}
