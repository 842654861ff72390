use crate::classify::rules::ClassifyCtx;
use crate::host::element::{ControlKind, ElementId, Scene};
use crate::text::clean::split_camel_case;

// ============================================================================
// Compound control detection
// ============================================================================
//
// Steppers, settings dropdown rows and carousels each collapse a cluster of
// host nodes into one navigable entry with secondary actions. Detection is
// shared between the rule that builds the entry and the rule that marks the
// cluster's children internal.

#[derive(Debug, Clone, PartialEq)]
pub struct StepperParts {
    pub label: String,
    pub decrement: ElementId,
    pub increment: ElementId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselParts {
    pub previous: ElementId,
    pub next: ElementId,
}

/// A settings row with paired increment/decrement buttons and a value
/// display: one entry labeled "setting name: current value".
pub fn detect_stepper(ctx: &ClassifyCtx, el: ElementId) -> Option<StepperParts> {
    if !is_settings_row(ctx.scene, el) {
        return None;
    }

    let decrement = find_clickable_child(ctx.scene, el, &["decrement", "minus", "down"], 2)?;
    let increment = find_clickable_child(ctx.scene, el, &["increment", "plus", "up"], 2)?;

    let setting = setting_display_name(&ctx.scene.name(el).unwrap_or_default());
    let label = match find_value_text(ctx, el, &[decrement, increment]) {
        Some(value) => format!("{}: {}", setting, value),
        None => setting,
    };

    Some(StepperParts { label, decrement, increment })
}

/// A settings row wrapping a dropdown: "setting name: selected value".
pub fn detect_settings_dropdown(ctx: &ClassifyCtx, el: ElementId) -> Option<(String, ElementId)> {
    if !is_settings_row(ctx.scene, el) {
        return None;
    }
    let dropdown = find_descendant_with(ctx.scene, el, 3, &|scene, id| scene.dropdown(id).is_some())?;

    let setting = setting_display_name(&ctx.scene.name(el).unwrap_or_default());
    let state = ctx.scene.dropdown(dropdown)?;
    let n = state.options.len();
    let value = if state.selected >= 0 && (state.selected as usize) < n {
        state.options[state.selected as usize].clone()
    } else {
        "no selection".to_string()
    };

    Some((format!("{}: {}", setting, value), dropdown))
}

/// True when `el` is a stepper step button or a settings-row dropdown,
/// parts of a compound entry that must not also appear standalone.
pub fn is_compound_child(ctx: &ClassifyCtx, el: ElementId) -> bool {
    let mut cur = ctx.scene.parent(el);
    for _ in 0..2 {
        let Some(row) = cur else { return false };
        if let Some(parts) = detect_stepper(ctx, row) {
            if parts.increment == el || parts.decrement == el {
                return true;
            }
        }
        if let Some((_, dropdown)) = detect_settings_dropdown(ctx, row) {
            if dropdown == el {
                return true;
            }
        }
        cur = ctx.scene.parent(row);
    }
    false
}

/// A clickable with left/right neighbor controls among its children.
pub fn detect_carousel(ctx: &ClassifyCtx, el: ElementId) -> Option<CarouselParts> {
    let previous = find_clickable_child(ctx.scene, el, &["left", "prev"], 2)?;
    let next = find_clickable_child(ctx.scene, el, &["right", "next"], 2)?;
    if previous == next {
        return None;
    }
    Some(CarouselParts { previous, next })
}

// ------------------------------------------------------------------
// Helpers
// ------------------------------------------------------------------

fn is_settings_row(scene: &dyn Scene, el: ElementId) -> bool {
    scene
        .name(el)
        .map(|n| n.to_lowercase().contains("setting"))
        .unwrap_or(false)
}

/// "Control - Setting: MasterVolume" -> "Master Volume". Keeps the host's
/// capitalization, only splitting word boundaries and dropping the row
/// naming-convention chrome.
pub fn setting_display_name(raw: &str) -> String {
    let tail = raw.rsplit(':').next().unwrap_or(raw).trim();
    let spaced = split_camel_case(&tail.replace('_', " "));
    let words: Vec<&str> = spaced
        .split_whitespace()
        .filter(|w| *w != "-" && !w.eq_ignore_ascii_case("setting") && !w.eq_ignore_ascii_case("control"))
        .collect();
    if words.is_empty() {
        spaced.trim().to_string()
    } else {
        words.join(" ")
    }
}

fn is_clickable(scene: &dyn Scene, el: ElementId) -> bool {
    scene.has_control(el, ControlKind::Button) || scene.has_control(el, ControlKind::EventTrigger)
}

fn find_clickable_child(
    scene: &dyn Scene,
    el: ElementId,
    markers: &[&str],
    max_depth: usize,
) -> Option<ElementId> {
    find_descendant_with(scene, el, max_depth, &|scene, id| {
        if !is_clickable(scene, id) {
            return false;
        }
        let name = scene.name(id).unwrap_or_default().to_lowercase();
        markers.iter().any(|m| name.contains(m))
    })
}

fn find_descendant_with(
    scene: &dyn Scene,
    el: ElementId,
    max_depth: usize,
    pred: &dyn Fn(&dyn Scene, ElementId) -> bool,
) -> Option<ElementId> {
    if max_depth == 0 {
        return None;
    }
    for child in scene.children(el) {
        if pred(scene, child) {
            return Some(child);
        }
        if let Some(found) = find_descendant_with(scene, child, max_depth - 1, pred) {
            return Some(found);
        }
    }
    None
}

fn find_value_text(ctx: &ClassifyCtx, el: ElementId, exclude: &[ElementId]) -> Option<String> {
    find_descendant_with(ctx.scene, el, 3, &|scene, id| {
        if exclude.contains(&id) {
            return false;
        }
        scene.text(id).map(|t| !t.trim().is_empty()).unwrap_or(false)
    })
    .and_then(|id| ctx.scene.text(id))
    .map(|t| ctx.text.clean(&t))
    .filter(|t| !t.is_empty())
}
