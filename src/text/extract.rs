use std::collections::HashMap;

use crate::config::NarratorConfig;
use crate::host::element::{ControlKind, DropdownState, ElementId, Scene, SliderState};
use crate::text::clean::{Cleaner, clean_structural_name};

// ============================================================================
// Label extraction
// ============================================================================

/// Produces the best human-readable label for an opaque element.
///
/// Never fails: the worst case is a cleaned-up structural name. Probes are
/// tried in a fixed priority order because a single element often carries
/// several signals at once, and the first text found is frequently a
/// placeholder rather than the real content.
pub struct TextExtractor {
    overrides: HashMap<String, String>,
    decorative_siblings: Vec<String>,
    strip_suffixes: Vec<String>,
    cleaner: Cleaner,
}

impl TextExtractor {
    pub fn new(config: &NarratorConfig) -> Self {
        TextExtractor {
            overrides: config
                .labels
                .overrides
                .iter()
                .map(|(k, v)| (k.to_lowercase(), v.clone()))
                .collect(),
            decorative_siblings: config.labels.decorative_siblings.clone(),
            strip_suffixes: config.labels.strip_suffixes.clone(),
            cleaner: Cleaner::new(),
        }
    }

    /// Markup-safe cleanup of raw host text.
    pub fn clean(&self, raw: &str) -> String {
        self.cleaner.clean_markup(raw)
    }

    pub fn clean_name(&self, name: &str) -> String {
        clean_structural_name(name, &self.strip_suffixes)
    }

    /// Priority-ordered label extraction. First match wins.
    pub fn get_text(&self, scene: &dyn Scene, el: ElementId) -> String {
        let name = scene.name(el).unwrap_or_default();

        // 1. Hard overrides for elements whose host text is misleading
        if let Some(label) = self.overrides.get(&name.to_lowercase()) {
            return label.clone();
        }

        // 2. Recognized containers with the real value in a data field
        if let Some(label) = self.container_text(scene, el) {
            return label;
        }

        // 3. Standard controls
        if let Some(label) = self.control_text(scene, el) {
            return label;
        }

        // 4. First non-trivial sibling text
        if let Some(label) = self.sibling_text(scene, el) {
            return label;
        }

        // 5. Cleaned structural name
        self.clean_name(&name)
    }

    /// Label for controls whose own text is a live value, not a name:
    /// overrides, then sibling text, then the cleaned structural name.
    pub fn fallback_label(&self, scene: &dyn Scene, el: ElementId) -> String {
        let name = scene.name(el).unwrap_or_default();
        if let Some(label) = self.overrides.get(&name.to_lowercase()) {
            return label.clone();
        }
        if let Some(label) = self.sibling_text(scene, el) {
            return label;
        }
        self.clean_name(&name)
    }

    /// Domain card-name extraction: the card's data field, a title
    /// descendant, then the cleaned structural name.
    pub fn card_name(&self, scene: &dyn Scene, el: ElementId) -> String {
        for field in ["card_name", "cardName", "name_text"] {
            if let Some(v) = scene.field(el, field) {
                if let Some(s) = v.as_str() {
                    let cleaned = self.clean(s);
                    if !cleaned.is_empty() {
                        return cleaned;
                    }
                }
            }
        }

        if let Some(title) = self.find_descendant_text(scene, el, &["title", "cardname"], 3) {
            return title;
        }

        self.clean_name(&scene.name(el).unwrap_or_default())
    }

    // ------------------------------------------------------------------
    // Priority 2: known containers with structured sub-fields
    // ------------------------------------------------------------------

    fn container_text(&self, scene: &dyn Scene, el: ElementId) -> Option<String> {
        // Deck entries show placeholder text in their visible editable-name
        // field; the real value lives in the entry's data field.
        let entry = self.find_ancestor(scene, el, &["deckentry", "deck_entry"], 4)?;

        for field in ["deck_name", "deckName"] {
            if let Some(v) = scene.field(entry, field) {
                if let Some(s) = v.as_str() {
                    let cleaned = self.clean(s);
                    if !cleaned.is_empty() {
                        return Some(cleaned);
                    }
                }
            }
        }

        // No data field on this host build: the name field's committed value
        // still beats its placeholder.
        let name_field = self.find_descendant(scene, entry, &["namefield", "deckname"], 3)?;
        let state = scene.text_field(name_field)?;
        let cleaned = self.clean(&state.value);
        if cleaned.is_empty() { None } else { Some(cleaned) }
    }

    // ------------------------------------------------------------------
    // Priority 3: standard control extraction
    // ------------------------------------------------------------------

    fn control_text(&self, scene: &dyn Scene, el: ElementId) -> Option<String> {
        if let Some(state) = scene.text_field(el) {
            // Never read masked content back to the user.
            if state.masked {
                return Some(if state.value.is_empty() {
                    "empty".to_string()
                } else {
                    "contains text".to_string()
                });
            }
            let value = self.clean(&state.value);
            if !value.is_empty() {
                return Some(value);
            }
            let placeholder = self.clean(&state.placeholder);
            if !placeholder.is_empty() {
                return Some(placeholder);
            }
            if let Some(label) = self.field_label_from_name(scene, el) {
                return Some(label);
            }
            return Some("empty".to_string());
        }

        if scene.has_control(el, ControlKind::Toggle) {
            // Label only; the on/off suffix is the classifier's job.
            if let Some(text) = scene.text(el) {
                let cleaned = self.clean(&text);
                if !cleaned.is_empty() {
                    return Some(cleaned);
                }
            }
            return None;
        }

        if let Some(state) = scene.dropdown(el) {
            return Some(Self::dropdown_text(&state));
        }

        if let Some(state) = scene.slider(el) {
            return Some(Self::slider_text(&state));
        }

        if let Some(text) = scene.text(el) {
            let cleaned = self.clean(&text);
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        }

        None
    }

    /// "current value, dropdown, i of n", or "no selection" when the host
    /// reports an out-of-range index.
    pub fn dropdown_text(state: &DropdownState) -> String {
        let n = state.options.len();
        if state.selected >= 0 && (state.selected as usize) < n {
            let i = state.selected as usize;
            format!("{}, dropdown, {} of {}", state.options[i], i + 1, n)
        } else {
            "no selection, dropdown".to_string()
        }
    }

    /// Direction plus a nearest-decile qualitative position.
    pub fn slider_text(state: &SliderState) -> String {
        let pct = (state.fraction.clamp(0.0, 1.0) * 100.0).round() as i32;
        let decile = ((pct + 5) / 10) * 10;
        let direction = if state.vertical { "vertical" } else { "horizontal" };
        let position = if pct >= 95 {
            if state.vertical { "at top".to_string() } else { "at end".to_string() }
        } else if pct <= 5 {
            if state.vertical { "at bottom".to_string() } else { "at start".to_string() }
        } else {
            format!("{} percent", decile)
        };
        format!("{}, {}", direction, position)
    }

    // ------------------------------------------------------------------
    // Priority 4: sibling fallback
    // ------------------------------------------------------------------

    fn sibling_text(&self, scene: &dyn Scene, el: ElementId) -> Option<String> {
        let parent = scene.parent(el)?;
        for sib in scene.children(parent) {
            if sib == el {
                continue;
            }
            let name = scene.name(sib).unwrap_or_default().to_lowercase();
            if self.decorative_siblings.iter().any(|d| name.contains(d)) {
                continue;
            }
            if let Some(text) = scene.text(sib) {
                let cleaned = self.clean(&text);
                if cleaned.len() > 1 {
                    return Some(cleaned);
                }
            }
        }
        None
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// Field label by naming convention: "PlayerNameInput" -> "player name".
    fn field_label_from_name(&self, scene: &dyn Scene, el: ElementId) -> Option<String> {
        let name = scene.name(el)?;
        let lowered = name.to_lowercase();
        for suffix in ["input", "field", "entry"] {
            if lowered.ends_with(suffix) {
                let stem: String = name.chars().take(name.chars().count() - suffix.len()).collect();
                let cleaned = self.clean_name(&stem);
                if !cleaned.is_empty() {
                    return Some(cleaned);
                }
            }
        }
        None
    }

    fn find_ancestor(
        &self,
        scene: &dyn Scene,
        el: ElementId,
        markers: &[&str],
        max_hops: usize,
    ) -> Option<ElementId> {
        let mut cur = Some(el);
        for _ in 0..=max_hops {
            let id = cur?;
            let name = scene.name(id)?.to_lowercase();
            if markers.iter().any(|m| name.contains(m)) {
                return Some(id);
            }
            cur = scene.parent(id);
        }
        None
    }

    fn find_descendant(
        &self,
        scene: &dyn Scene,
        el: ElementId,
        markers: &[&str],
        max_depth: usize,
    ) -> Option<ElementId> {
        if max_depth == 0 {
            return None;
        }
        for child in scene.children(el) {
            let name = scene.name(child).unwrap_or_default().to_lowercase();
            if markers.iter().any(|m| name.contains(m)) {
                return Some(child);
            }
            if let Some(found) = self.find_descendant(scene, child, markers, max_depth - 1) {
                return Some(found);
            }
        }
        None
    }

    fn find_descendant_text(
        &self,
        scene: &dyn Scene,
        el: ElementId,
        markers: &[&str],
        max_depth: usize,
    ) -> Option<String> {
        let node = self.find_descendant(scene, el, markers, max_depth)?;
        let text = scene.text(node)?;
        let cleaned = self.clean(&text);
        if cleaned.is_empty() { None } else { Some(cleaned) }
    }
}
