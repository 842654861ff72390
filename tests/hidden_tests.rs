use scene_narrator::classify::model::Role;
use scene_narrator::classify::rules::Classifier;
use scene_narrator::host::element::ControlKind;
use scene_narrator::host::fixture::{FixtureNode, FixtureScene};
use scene_narrator::host::probe::FieldValue;

fn classifier() -> Classifier {
    Classifier::with_defaults()
}

fn assert_internal(scene: &FixtureScene, el: scene_narrator::host::element::ElementId, why: &str) {
    let result = classifier().classify(scene, el);
    assert_eq!(result.role, Role::Internal, "{}", why);
    assert!(!result.navigable, "internal elements are never navigable ({})", why);
    assert!(!result.announce, "internal elements are never announced ({})", why);
}

// =========================================================================
// Interactable flag
// =========================================================================

#[test]
fn non_interactable_elements_hide() {
    let mut scene = FixtureScene::new();
    let el = scene.add(
        None,
        FixtureNode::named("DimmedPanel").not_interactable().with_control(ControlKind::Button),
    );
    assert_internal(&scene, el, "not-interactable clickable");
}

#[test]
fn always_show_controls_survive_the_interactable_flag() {
    let mut scene = FixtureScene::new();
    let slider = scene.add(
        None,
        FixtureNode::named("VolumeSlider").not_interactable().with_slider(0.3, false),
    );
    let labeled = scene.add(
        None,
        FixtureNode::named("Notice").not_interactable().with_text("Server maintenance at noon"),
    );

    let c = classifier();
    assert_eq!(c.classify(&scene, slider).role, Role::Slider, "always-show control type");
    assert_eq!(c.classify(&scene, labeled).role, Role::Label, "real text content shows through");
}

#[test]
fn ancestor_interactable_flag_cascades() {
    let mut scene = FixtureScene::new();
    let group = scene.add(None, FixtureNode::named("DisabledGroup").not_interactable());
    let child = scene.add(Some(group), FixtureNode::named("OkButton").with_control(ControlKind::Button));
    assert_internal(&scene, child, "child of a non-interactable group");
}

// =========================================================================
// Alpha
// =========================================================================

#[test]
fn near_zero_alpha_hides() {
    let mut scene = FixtureScene::new();
    let el = scene.add(
        None,
        FixtureNode::named("FadedOut").with_alpha(0.001).with_control(ControlKind::Button),
    );
    assert_internal(&scene, el, "alpha below threshold on self");
}

#[test]
fn transparent_structural_ancestor_does_not_hide_content() {
    let mut scene = FixtureScene::new();
    let viewport = scene.add(None, FixtureNode::named("ScrollViewport").with_alpha(0.0));
    let row = scene.add(
        Some(viewport),
        FixtureNode::named("DeckRow").with_control(ControlKind::Button).with_text("Mono Red"),
    );

    let c = classifier();
    assert_eq!(
        c.classify(&scene, row).role,
        Role::Button,
        "structural containers' alpha is layout plumbing, not visibility"
    );
    assert_eq!(
        c.classify(&scene, viewport).role,
        Role::Internal,
        "the viewport itself is chrome"
    );
}

#[test]
fn transparent_content_group_hides_descendants() {
    let mut scene = FixtureScene::new();
    let group = scene.add(None, FixtureNode::named("OldDialog").with_alpha(0.0));
    let child = scene.add(Some(group), FixtureNode::named("OkButton").with_control(ControlKind::Button));
    assert_internal(&scene, child, "descendant of a faded non-structural group");
}

// =========================================================================
// Size, denylist, badges
// =========================================================================

#[test]
fn negligible_size_without_content_hides() {
    let mut scene = FixtureScene::new();
    let dot = scene.add(None, FixtureNode::named("Dot").with_rect(1.0, 1.0));
    assert_internal(&scene, dot, "1x1 decoration");

    let icon = scene.add(
        None,
        FixtureNode::named("Pip").with_rect(1.0, 1.0).with_control(ControlKind::Image),
    );
    let result = classifier().classify(&scene, icon);
    assert_ne!(result.matched_rule, "negligible_size", "image content exempts tiny elements");
}

#[test]
fn denylisted_names_hide() {
    let mut scene = FixtureScene::new();
    for name in ["ClickBlocker", "NavGradientLeft", "BackgroundArt", "null_slot_04"] {
        let el = scene.add(None, FixtureNode::named(name).with_control(ControlKind::Button));
        assert_internal(&scene, el, name);
    }
}

#[test]
fn roster_hitbox_rows_are_exempt_from_the_denylist() {
    let mut scene = FixtureScene::new();
    let panel = scene.add(None, FixtureNode::named("FriendsListPanel"));
    let row = scene.add(
        Some(panel),
        FixtureNode::named("RowHitbox").with_control(ControlKind::Button).with_text("Alice"),
    );
    let stray = scene.add(None, FixtureNode::named("RowHitbox2").with_control(ControlKind::Button));

    let c = classifier();
    assert_eq!(
        c.classify(&scene, row).role,
        Role::Button,
        "hitbox rows inside the roster panel are the real tiles"
    );
    assert_eq!(
        c.classify(&scene, stray).role,
        Role::Internal,
        "hitboxes anywhere else stay denylisted"
    );
}

#[test]
fn digit_only_badges_hide() {
    let mut scene = FixtureScene::new();
    let badge = scene.add(None, FixtureNode::named("NotificationBadge").with_text("3"));
    assert_internal(&scene, badge, "digit-only badge counter");

    let labeled = scene.add(None, FixtureNode::named("NotificationBadge2").with_text("New mail"));
    assert_ne!(
        classifier().classify(&scene, labeled).role,
        Role::Internal,
        "badges with real words still speak"
    );
}

// =========================================================================
// Stale phase leftovers
// =========================================================================

#[test]
fn elements_from_a_previous_phase_hide() {
    let mut scene = FixtureScene::new();
    let leftover = scene.add(
        None,
        FixtureNode::named("AttackerHalo")
            .with_control(ControlKind::Button)
            .with_field("owning_phase", FieldValue::Str("declare_attackers".into())),
    );

    let mut c = classifier();
    c.set_phase(Some("declare_blockers"));
    assert_eq!(c.classify(&scene, leftover).role, Role::Internal);

    c.set_phase(Some("declare_attackers"));
    assert_eq!(
        c.classify(&scene, leftover).role,
        Role::Button,
        "same-phase elements are live"
    );
}
