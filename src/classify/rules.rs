use crate::classify::compound::{
    detect_carousel, detect_settings_dropdown, detect_stepper, is_compound_child,
};
use crate::classify::hidden::hidden_reason;
use crate::classify::model::{Classification, Role, SecondaryControls};
use crate::config::NarratorConfig;
use crate::host::element::{ControlKind, ElementId, Scene};
use crate::text::extract::TextExtractor;

// ============================================================================
// Classification rule chain
// ============================================================================
//
// A strictly ordered list of (predicate, builder) pairs; the first predicate
// that matches wins and the rest are skipped. Several predicates are mutually
// exclusive only by priority (a card also carries a clickable marker, a
// stepper's buttons are real buttons), so the order is the contract.

pub struct ClassifyCtx<'a> {
    pub scene: &'a dyn Scene,
    pub config: &'a NarratorConfig,
    pub text: &'a TextExtractor,
    pub phase: Option<&'a str>,
}

pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&ClassifyCtx, ElementId) -> bool,
    pub build: fn(&ClassifyCtx, ElementId) -> Classification,
}

pub const RULES: &[Rule] = &[
    Rule { name: "internal", applies: applies_hidden, build: build_hidden },
    Rule { name: "card", applies: applies_card, build: build_card },
    Rule { name: "stepper", applies: applies_stepper, build: build_stepper },
    Rule { name: "compound_child", applies: applies_compound_child, build: build_compound_child },
    Rule { name: "settings_dropdown", applies: applies_settings_dropdown, build: build_settings_dropdown },
    Rule { name: "toggle", applies: applies_toggle, build: build_toggle },
    Rule { name: "slider", applies: applies_slider, build: build_slider },
    Rule { name: "dropdown", applies: applies_dropdown, build: build_dropdown },
    Rule { name: "text_field", applies: applies_text_field, build: build_text_field },
    Rule { name: "scrollbar", applies: applies_scrollbar, build: build_scrollbar },
    Rule { name: "progress", applies: applies_progress, build: build_progress },
    Rule { name: "nav_arrow", applies: applies_nav_arrow, build: build_nav_arrow },
    Rule { name: "clickable", applies: applies_clickable, build: build_clickable },
    Rule { name: "passive_label", applies: applies_passive_label, build: build_passive_label },
];

/// Assigns a semantic role, label and navigability to one element.
///
/// Safe to call every frame on every visible element: probe failures are
/// "signal absent", a stale handle classifies as Internal.
pub struct Classifier {
    config: NarratorConfig,
    extractor: TextExtractor,
    phase: Option<String>,
}

impl Classifier {
    pub fn new(config: NarratorConfig) -> Self {
        let extractor = TextExtractor::new(&config);
        Classifier { config, extractor, phase: None }
    }

    pub fn with_defaults() -> Self {
        Self::new(NarratorConfig::default())
    }

    /// Current game phase, used by the stale-leftover hidden rule.
    pub fn set_phase(&mut self, phase: Option<&str>) {
        self.phase = phase.map(|s| s.to_string());
    }

    pub fn extractor(&self) -> &TextExtractor {
        &self.extractor
    }

    pub fn config(&self) -> &NarratorConfig {
        &self.config
    }

    pub fn classify(&self, scene: &dyn Scene, el: ElementId) -> Classification {
        if !scene.alive(el) {
            return Classification::internal("stale");
        }

        let ctx = ClassifyCtx {
            scene,
            config: &self.config,
            text: &self.extractor,
            phase: self.phase.as_deref(),
        };

        for rule in RULES {
            if (rule.applies)(&ctx, el) {
                return (rule.build)(&ctx, el);
            }
        }
        Classification::unknown()
    }
}

fn entry(role: Role, label: String, role_text: &str, rule: &'static str) -> Classification {
    Classification {
        role,
        label,
        role_text: role_text.to_string(),
        navigable: true,
        announce: true,
        secondary: None,
        matched_rule: rule,
    }
}

// ------------------------------------------------------------------
// 1. Hidden / internal
// ------------------------------------------------------------------

fn applies_hidden(ctx: &ClassifyCtx, el: ElementId) -> bool {
    hidden_reason(ctx, el).is_some()
}

fn build_hidden(ctx: &ClassifyCtx, el: ElementId) -> Classification {
    Classification::internal(hidden_reason(ctx, el).unwrap_or("internal"))
}

// ------------------------------------------------------------------
// 2. Domain card
// ------------------------------------------------------------------

fn applies_card(ctx: &ClassifyCtx, el: ElementId) -> bool {
    ctx.scene.has_control(el, ControlKind::Card) || ctx.scene.field(el, "card_name").is_some()
}

fn build_card(ctx: &ClassifyCtx, el: ElementId) -> Classification {
    entry(Role::Card, ctx.text.card_name(ctx.scene, el), "card", "card")
}

// ------------------------------------------------------------------
// 3–5. Compound settings controls
// ------------------------------------------------------------------

fn applies_stepper(ctx: &ClassifyCtx, el: ElementId) -> bool {
    detect_stepper(ctx, el).is_some()
}

fn build_stepper(ctx: &ClassifyCtx, el: ElementId) -> Classification {
    let parts = match detect_stepper(ctx, el) {
        Some(p) => p,
        None => return Classification::unknown(),
    };
    let mut c = entry(Role::Button, parts.label, "setting", "stepper");
    c.secondary = Some(SecondaryControls {
        previous: Some(parts.decrement),
        next: Some(parts.increment),
        adjust: None,
    });
    c
}

fn applies_compound_child(ctx: &ClassifyCtx, el: ElementId) -> bool {
    is_compound_child(ctx, el)
}

fn build_compound_child(_ctx: &ClassifyCtx, _el: ElementId) -> Classification {
    Classification::internal("compound_child")
}

fn applies_settings_dropdown(ctx: &ClassifyCtx, el: ElementId) -> bool {
    detect_settings_dropdown(ctx, el).is_some()
}

fn build_settings_dropdown(ctx: &ClassifyCtx, el: ElementId) -> Classification {
    let (label, dropdown) = match detect_settings_dropdown(ctx, el) {
        Some(v) => v,
        None => return Classification::unknown(),
    };
    let mut c = entry(Role::Dropdown, label, "dropdown", "settings_dropdown");
    c.secondary = Some(SecondaryControls { previous: None, next: None, adjust: Some(dropdown) });
    c
}

// ------------------------------------------------------------------
// 6. Simple standard controls
// ------------------------------------------------------------------

fn applies_toggle(ctx: &ClassifyCtx, el: ElementId) -> bool {
    ctx.scene.has_control(el, ControlKind::Toggle)
}

fn build_toggle(ctx: &ClassifyCtx, el: ElementId) -> Classification {
    let role_text = match ctx.scene.toggle_on(el) {
        Some(true) => "toggle, on",
        Some(false) => "toggle, off",
        None => "toggle",
    };
    entry(Role::Toggle, ctx.text.get_text(ctx.scene, el), role_text, "toggle")
}

fn applies_slider(ctx: &ClassifyCtx, el: ElementId) -> bool {
    ctx.scene.has_control(el, ControlKind::Slider)
        && !ctx.scene.has_control(el, ControlKind::Scrollbar)
        && ctx.scene.slider(el).is_some()
}

fn build_slider(ctx: &ClassifyCtx, el: ElementId) -> Classification {
    let position = ctx
        .scene
        .slider(el)
        .map(|s| TextExtractor::slider_text(&s))
        .unwrap_or_default();
    let mut c = entry(
        Role::Slider,
        ctx.text.fallback_label(ctx.scene, el),
        &format!("slider, {}", position),
        "slider",
    );
    // Expose the control itself so arrow keys can adjust it directly.
    c.secondary = Some(SecondaryControls { previous: None, next: None, adjust: Some(el) });
    c
}

fn applies_dropdown(ctx: &ClassifyCtx, el: ElementId) -> bool {
    ctx.scene.dropdown(el).is_some()
}

fn build_dropdown(ctx: &ClassifyCtx, el: ElementId) -> Classification {
    // get_text already renders "value, dropdown, i of n"
    entry(Role::Dropdown, ctx.text.get_text(ctx.scene, el), "", "dropdown")
}

fn applies_text_field(ctx: &ClassifyCtx, el: ElementId) -> bool {
    ctx.scene.text_field(el).is_some()
}

fn build_text_field(ctx: &ClassifyCtx, el: ElementId) -> Classification {
    let masked = ctx.scene.text_field(el).map(|t| t.masked).unwrap_or(false);
    let role_text = if masked { "password text field" } else { "text field" };
    entry(Role::TextField, ctx.text.get_text(ctx.scene, el), role_text, "text_field")
}

fn applies_scrollbar(ctx: &ClassifyCtx, el: ElementId) -> bool {
    ctx.scene.has_control(el, ControlKind::Scrollbar)
}

fn build_scrollbar(ctx: &ClassifyCtx, el: ElementId) -> Classification {
    let position = ctx
        .scene
        .slider(el)
        .map(|s| TextExtractor::slider_text(&s))
        .unwrap_or_default();
    let mut c = entry(
        Role::Scrollbar,
        ctx.text.fallback_label(ctx.scene, el),
        &format!("scrollbar, {}", position),
        "scrollbar",
    );
    // Informational only: never part of the navigation order.
    c.navigable = false;
    c
}

// ------------------------------------------------------------------
// 7. Progress / objective displays
// ------------------------------------------------------------------

fn applies_progress(ctx: &ClassifyCtx, el: ElementId) -> bool {
    let name = ctx.scene.name(el).unwrap_or_default().to_lowercase();
    if ctx.config.labels.progress_markers.iter().any(|m| name.contains(m)) {
        return true;
    }
    ctx.scene
        .text(el)
        .map(|t| looks_like_progress_text(&t))
        .unwrap_or(false)
}

fn build_progress(ctx: &ClassifyCtx, el: ElementId) -> Classification {
    let mut c = entry(Role::ProgressBar, ctx.text.get_text(ctx.scene, el), "progress", "progress");
    // Status display, not a control.
    c.navigable = false;
    c
}

/// "42%" or "3/10"-shaped text.
fn looks_like_progress_text(text: &str) -> bool {
    let t = text.trim();
    let chars: Vec<char> = t.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if (c == '%' || c == '/') && i > 0 && chars[i - 1].is_ascii_digit() {
            if c == '%' {
                return true;
            }
            if chars.get(i + 1).map(|n| n.is_ascii_digit()).unwrap_or(false) {
                return true;
            }
        }
    }
    false
}

// ------------------------------------------------------------------
// 8. Navigation arrows
// ------------------------------------------------------------------

fn applies_nav_arrow(ctx: &ClassifyCtx, el: ElementId) -> bool {
    if !is_clickable(ctx, el) {
        return false;
    }
    nav_arrow_label(ctx, el).is_some()
}

fn build_nav_arrow(ctx: &ClassifyCtx, el: ElementId) -> Classification {
    let label = nav_arrow_label(ctx, el).unwrap_or("Next");
    entry(Role::Navigation, label.to_string(), "button", "nav_arrow")
}

fn nav_arrow_label(ctx: &ClassifyCtx, el: ElementId) -> Option<&'static str> {
    let name = ctx.scene.name(el).unwrap_or_default().to_lowercase();
    if name.contains("left") || name.contains("prev") {
        Some("Previous")
    } else if name.contains("right") || name.contains("next") {
        Some("Next")
    } else {
        None
    }
}

// ------------------------------------------------------------------
// 9. Generic clickables: carousel, link, button
// ------------------------------------------------------------------

fn is_clickable(ctx: &ClassifyCtx, el: ElementId) -> bool {
    ctx.scene.has_control(el, ControlKind::Button)
        || ctx.scene.has_control(el, ControlKind::EventTrigger)
}

fn applies_clickable(ctx: &ClassifyCtx, el: ElementId) -> bool {
    is_clickable(ctx, el)
}

fn build_clickable(ctx: &ClassifyCtx, el: ElementId) -> Classification {
    let label = ctx.text.get_text(ctx.scene, el);

    if let Some(parts) = detect_carousel(ctx, el) {
        let mut c = entry(Role::Button, label, "carousel", "carousel");
        c.secondary = Some(SecondaryControls {
            previous: Some(parts.previous),
            next: Some(parts.next),
            adjust: None,
        });
        return c;
    }

    if is_linkish(ctx, &label) {
        return entry(Role::Link, label, "link", "link");
    }

    entry(Role::Button, label, "button", "button")
}

fn is_linkish(ctx: &ClassifyCtx, label: &str) -> bool {
    let lowered = label.to_lowercase();
    ctx.config.labels.link_markers.iter().any(|m| lowered.contains(m))
}

// ------------------------------------------------------------------
// 10. Passive labels
// ------------------------------------------------------------------

fn applies_passive_label(ctx: &ClassifyCtx, el: ElementId) -> bool {
    if ctx
        .scene
        .text(el)
        .map(|t| !ctx.text.clean(&t).is_empty())
        .unwrap_or(false)
    {
        return true;
    }
    let name = ctx.scene.name(el).unwrap_or_default().to_lowercase();
    name.contains("label") || name.contains("title") || name.contains("header")
}

fn build_passive_label(ctx: &ClassifyCtx, el: ElementId) -> Classification {
    let text = ctx
        .scene
        .text(el)
        .map(|t| ctx.text.clean(&t))
        .unwrap_or_default();
    let label = if text.is_empty() {
        ctx.text.clean_name(&ctx.scene.name(el).unwrap_or_default())
    } else {
        text.clone()
    };
    let mut c = entry(Role::Label, label, "", "passive_label");
    c.navigable = false;
    c.announce = !text.is_empty();
    c
}
