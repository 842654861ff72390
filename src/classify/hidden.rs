use crate::classify::rules::ClassifyCtx;
use crate::host::element::{ControlKind, ElementId};
use crate::text::clean::is_digits_only;

// ============================================================================
// Hidden/internal detection
// ============================================================================
//
// Runs before every other classification rule. Evaluated short-circuit in a
// fixed order; each entry may carry narrow, named exceptions which are
// checked before the rule itself applies.

pub struct HiddenRule {
    pub name: &'static str,
    pub hides: fn(&ClassifyCtx, ElementId) -> bool,
}

pub const HIDDEN_RULES: &[HiddenRule] = &[
    HiddenRule { name: "not_interactable", hides: not_interactable },
    HiddenRule { name: "invisible_group", hides: invisible_group },
    HiddenRule { name: "negligible_size", hides: negligible_size },
    HiddenRule { name: "denylisted_name", hides: denylisted_name },
    HiddenRule { name: "digit_badge", hides: digit_badge },
    HiddenRule { name: "stale_phase", hides: stale_phase },
];

/// First rule that hides this element, if any.
pub fn hidden_reason(ctx: &ClassifyCtx, el: ElementId) -> Option<&'static str> {
    HIDDEN_RULES
        .iter()
        .find(|rule| (rule.hides)(ctx, el))
        .map(|rule| rule.name)
}

// ------------------------------------------------------------------
// (a) interactable flag, with always-show and real-text exceptions
// ------------------------------------------------------------------

fn not_interactable(ctx: &ClassifyCtx, el: ElementId) -> bool {
    if ctx.scene.is_interactable(el) {
        return false;
    }
    if is_always_show_control(ctx, el) {
        return false;
    }
    !has_real_text(ctx, el)
}

fn is_always_show_control(ctx: &ClassifyCtx, el: ElementId) -> bool {
    ctx.config.hidden.always_show_types.iter().any(|t| {
        control_kind_from_name(t)
            .map(|kind| ctx.scene.has_control(el, kind))
            .unwrap_or(false)
    })
}

fn control_kind_from_name(name: &str) -> Option<ControlKind> {
    match name {
        "toggle" => Some(ControlKind::Toggle),
        "slider" => Some(ControlKind::Slider),
        "dropdown" => Some(ControlKind::Dropdown),
        "textfield" => Some(ControlKind::TextField),
        "button" => Some(ControlKind::Button),
        _ => None,
    }
}

fn has_real_text(ctx: &ClassifyCtx, el: ElementId) -> bool {
    ctx.scene
        .text(el)
        .map(|t| !ctx.text.clean(&t).is_empty())
        .unwrap_or(false)
}

// ------------------------------------------------------------------
// (b) near-zero alpha on self or a non-structural ancestor group
// ------------------------------------------------------------------

fn invisible_group(ctx: &ClassifyCtx, el: ElementId) -> bool {
    let threshold = ctx.config.hidden.alpha_threshold;
    let mut cur = Some(el);
    while let Some(id) = cur {
        if let Some(alpha) = ctx.scene.group_alpha(id) {
            if alpha < threshold {
                // A transparent structural container does not hide its
                // descendants; a transparent content group does.
                if id == el || !is_structural(ctx, id) {
                    return true;
                }
            }
        }
        cur = ctx.scene.parent(id);
    }
    false
}

fn is_structural(ctx: &ClassifyCtx, el: ElementId) -> bool {
    let name = ctx.scene.name(el).unwrap_or_default().to_lowercase();
    ctx.config
        .hidden
        .structural_containers
        .iter()
        .any(|s| name.contains(s))
}

// ------------------------------------------------------------------
// (c) zero-size decoration
// ------------------------------------------------------------------

fn negligible_size(ctx: &ClassifyCtx, el: ElementId) -> bool {
    let Some(rect) = ctx.scene.rect(el) else { return false };
    rect.area() < ctx.config.hidden.min_area
        && !has_real_text(ctx, el)
        && !ctx.scene.has_control(el, ControlKind::Image)
}

// ------------------------------------------------------------------
// (d) name denylist, structural containers, badge counters
// ------------------------------------------------------------------

fn denylisted_name(ctx: &ClassifyCtx, el: ElementId) -> bool {
    // Exceptions come first: the roster panel reuses hitbox-named wrappers
    // as its actual clickable rows.
    if roster_row_exception(ctx, el) {
        return false;
    }

    let name = ctx.scene.name(el).unwrap_or_default().to_lowercase();
    if name.is_empty() {
        return false;
    }
    ctx.config.hidden.denylist.iter().any(|d| name.contains(d))
        || is_structural(ctx, el)
}

/// Named exception: "hitbox" rows inside the friends/roster panel are the
/// real interactive tiles, not decoration.
pub fn roster_row_exception(ctx: &ClassifyCtx, el: ElementId) -> bool {
    let name = ctx.scene.name(el).unwrap_or_default().to_lowercase();
    if !name.contains("hitbox") {
        return false;
    }
    let mut cur = ctx.scene.parent(el);
    for _ in 0..3 {
        let Some(id) = cur else { return false };
        let pname = ctx.scene.name(id).unwrap_or_default().to_lowercase();
        if pname.contains("friend") || pname.contains("roster") || pname.contains("social") {
            return true;
        }
        cur = ctx.scene.parent(id);
    }
    false
}

fn digit_badge(ctx: &ClassifyCtx, el: ElementId) -> bool {
    let name = ctx.scene.name(el).unwrap_or_default().to_lowercase();
    if !ctx.config.hidden.badge_markers.iter().any(|b| name.contains(b)) {
        return false;
    }
    ctx.scene
        .text(el)
        .map(|t| is_digits_only(&t))
        .unwrap_or(false)
}

// ------------------------------------------------------------------
// (e) leftovers from a previous game phase
// ------------------------------------------------------------------

fn stale_phase(ctx: &ClassifyCtx, el: ElementId) -> bool {
    let Some(phase) = ctx.phase else { return false };
    let Some(owner) = ctx.scene.field(el, "owning_phase") else { return false };
    match owner.as_str() {
        Some(tag) => !tag.eq_ignore_ascii_case(phase),
        None => false,
    }
}
