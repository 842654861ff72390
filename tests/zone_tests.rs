use scene_narrator::announce::BufferOutput;
use scene_narrator::config::NarratorConfig;
use scene_narrator::host::element::{ControlKind, ElementId};
use scene_narrator::host::fixture::{FixtureNode, FixtureScene};
use scene_narrator::host::probe::FieldValue;
use scene_narrator::input::Key;
use scene_narrator::text::extract::TextExtractor;
use scene_narrator::zones::model::{BrowserDescriptor, BrowserKind, BrowserLayout, Zone};
use scene_narrator::zones::navigator::ZoneNavigator;

const SETTLE: u32 = 12;

fn card(name: &str, card_name: &str) -> FixtureNode {
    FixtureNode::named(name)
        .with_control(ControlKind::Card)
        .with_field("card_name", FieldValue::Str(card_name.into()))
}

/// Divider-based browser: [Mountain, Island, <empty slot>, Swamp].
fn divider_setup() -> (FixtureScene, BrowserDescriptor, ElementId) {
    let mut scene = FixtureScene::new();
    let container = scene.add(None, FixtureNode::named("HandContainer"));
    let a = scene.add(Some(container), card("CardA", "Mountain"));
    scene.add(Some(container), card("CardB", "Island"));
    let divider = scene.add(Some(container), FixtureNode::named("EmptySlot"));
    scene.add(Some(container), card("CardC", "Swamp"));
    scene.script_divider_move(container, divider);

    let descriptor = BrowserDescriptor {
        kind: BrowserKind::Mulligan,
        top_label: "Keep".into(),
        bottom_label: "Discard".into(),
        target_count: None,
        layout: BrowserLayout::DividerList { container, divider_id: divider.0 },
    };
    (scene, descriptor, a)
}

fn harness() -> (ZoneNavigator, TextExtractor, BufferOutput) {
    let config = NarratorConfig::default();
    (
        ZoneNavigator::new(&config),
        TextExtractor::new(&config),
        BufferOutput::new(),
    )
}

// =========================================================================
// Zone partitioning and entry
// =========================================================================

#[test]
fn divider_list_partitions_at_the_empty_slot() {
    let (scene, descriptor, _) = divider_setup();
    let (mut nav, extractor, mut out) = harness();

    nav.activate(descriptor);
    nav.enter_zone(&scene, &extractor, Zone::Top, &mut out);

    let top: Vec<&str> = nav.items(Zone::Top).iter().map(|i| i.label.as_str()).collect();
    let bottom: Vec<&str> = nav.items(Zone::Bottom).iter().map(|i| i.label.as_str()).collect();
    assert_eq!(top, vec!["Mountain", "Island"]);
    assert_eq!(bottom, vec!["Swamp"]);
}

#[test]
fn entering_a_zone_selects_index_zero_and_announces() {
    let (scene, descriptor, a) = divider_setup();
    let (mut nav, extractor, mut out) = harness();

    nav.activate(descriptor);
    nav.enter_zone(&scene, &extractor, Zone::Top, &mut out);

    assert_eq!(nav.current_index(), 0, "a non-empty zone always starts at index 0");
    assert_eq!(out.last(), Some("Keep, 2 items. Mountain"));
    assert_eq!(out.focused.last(), Some(&(a, Zone::Top)), "detail collaborator told about focus");
}

#[test]
fn entering_an_empty_zone_announces_empty() {
    let mut scene = FixtureScene::new();
    let container = scene.add(None, FixtureNode::named("HandContainer"));
    scene.add(Some(container), card("CardA", "Mountain"));
    let divider = scene.add(Some(container), FixtureNode::named("EmptySlot"));

    let descriptor = BrowserDescriptor {
        kind: BrowserKind::Mulligan,
        top_label: "Keep".into(),
        bottom_label: "Discard".into(),
        target_count: None,
        layout: BrowserLayout::DividerList { container, divider_id: divider.0 },
    };
    let (mut nav, extractor, mut out) = harness();

    nav.activate(descriptor);
    nav.enter_zone(&scene, &extractor, Zone::Bottom, &mut out);

    assert_eq!(nav.current_index(), -1);
    assert_eq!(out.last(), Some("Discard, empty"));
}

// =========================================================================
// Boundary policy: clamp, consistently
// =========================================================================

#[test]
fn navigation_clamps_at_both_boundaries_every_time() {
    let (mut scene, descriptor, _) = divider_setup();
    let (mut nav, extractor, mut out) = harness();

    nav.activate(descriptor);
    nav.enter_zone(&scene, &extractor, Zone::Top, &mut out);

    assert!(nav.handle_key(&mut scene, &extractor, Key::Right, &mut out));
    assert_eq!(out.last(), Some("Island"));

    // Repeated pushes at the end clamp with the same boundary signal.
    for _ in 0..3 {
        nav.handle_key(&mut scene, &extractor, Key::Right, &mut out);
        assert_eq!(out.last(), Some("end of Keep"));
        assert_eq!(nav.current_index(), 1, "clamped, never wrapped");
    }

    nav.handle_key(&mut scene, &extractor, Key::Left, &mut out);
    assert_eq!(out.last(), Some("Mountain"));
    for _ in 0..3 {
        nav.handle_key(&mut scene, &extractor, Key::Left, &mut out);
        assert_eq!(out.last(), Some("start of Keep"));
        assert_eq!(nav.current_index(), 0);
    }
}

#[test]
fn home_and_end_jump_and_reannounce_at_the_boundary() {
    let (mut scene, descriptor, _) = divider_setup();
    let (mut nav, extractor, mut out) = harness();

    nav.activate(descriptor);
    nav.enter_zone(&scene, &extractor, Zone::Top, &mut out);

    nav.handle_key(&mut scene, &extractor, Key::End, &mut out);
    assert_eq!(nav.current_index(), 1);
    assert_eq!(out.last(), Some("Island"));

    nav.handle_key(&mut scene, &extractor, Key::End, &mut out);
    assert_eq!(out.last(), Some("Island"), "already at the end still re-announces");

    nav.handle_key(&mut scene, &extractor, Key::Home, &mut out);
    assert_eq!(out.last(), Some("Mountain"));
}

#[test]
fn navigating_without_a_zone_is_a_spoken_noop() {
    let (mut scene, descriptor, _) = divider_setup();
    let (mut nav, extractor, mut out) = harness();

    nav.activate(descriptor);
    assert!(nav.handle_key(&mut scene, &extractor, Key::Left, &mut out));
    assert_eq!(out.last(), Some("nothing selected"));
    assert_eq!(nav.current_index(), -1);
}

#[test]
fn keys_pass_through_while_inactive() {
    let (mut scene, _, _) = divider_setup();
    let (mut nav, extractor, mut out) = harness();
    assert!(!nav.handle_key(&mut scene, &extractor, Key::Right, &mut out));
    assert!(out.messages.is_empty());
}

// =========================================================================
// Moving items
// =========================================================================

#[test]
fn move_round_trips_after_the_settle_delay_and_conserves_items() {
    let (mut scene, descriptor, _) = divider_setup();
    let (mut nav, extractor, mut out) = harness();

    nav.activate(descriptor);
    nav.enter_zone(&scene, &extractor, Zone::Top, &mut out);

    nav.handle_key(&mut scene, &extractor, Key::Enter, &mut out);
    assert_eq!(
        nav.items(Zone::Top).len(),
        2,
        "lists refresh only after the host settles"
    );

    for _ in 0..SETTLE - 1 {
        nav.tick(&scene, &extractor, &mut out);
    }
    assert_eq!(nav.items(Zone::Top).len(), 2, "still waiting");
    nav.tick(&scene, &extractor, &mut out);

    let top: Vec<&str> = nav.items(Zone::Top).iter().map(|i| i.label.as_str()).collect();
    let bottom: Vec<&str> = nav.items(Zone::Bottom).iter().map(|i| i.label.as_str()).collect();
    assert_eq!(top, vec!["Island"], "Mountain left the keep pile");
    assert_eq!(bottom, vec!["Swamp", "Mountain"], "and landed in the discard pile");
    assert_eq!(top.len() + bottom.len(), 3, "item count is conserved");

    assert_eq!(out.last(), Some("Island"), "new current item announced");
    assert_eq!(nav.selections_committed(), 1);
}

#[test]
fn target_count_workflows_report_progress() {
    let (mut scene, mut descriptor, _) = divider_setup();
    descriptor.target_count = Some(2);
    let (mut nav, extractor, mut out) = harness();

    nav.activate(descriptor);
    nav.enter_zone(&scene, &extractor, Zone::Top, &mut out);
    nav.handle_key(&mut scene, &extractor, Key::Enter, &mut out);
    for _ in 0..SETTLE {
        nav.tick(&scene, &extractor, &mut out);
    }

    assert_eq!(out.last(), Some("2 of 2 selected"));
}

#[test]
fn failed_moves_are_reported_and_change_nothing() {
    let (mut scene, descriptor, _) = divider_setup();
    let (mut nav, extractor, mut out) = harness();

    nav.activate(descriptor);
    nav.enter_zone(&scene, &extractor, Zone::Top, &mut out);

    scene.fail_interactions = true;
    nav.handle_key(&mut scene, &extractor, Key::Enter, &mut out);

    assert_eq!(out.last(), Some("could not move Mountain"));
    assert_eq!(nav.current_index(), 0, "state unchanged");
    assert_eq!(nav.selections_committed(), 0);
    for _ in 0..SETTLE {
        nav.tick(&scene, &extractor, &mut out);
    }
    assert_eq!(
        nav.items(Zone::Top).len(),
        2,
        "no rescan was scheduled for a failed move"
    );
}

#[test]
fn moving_a_stale_item_reports_not_crashes() {
    let (mut scene, descriptor, a) = divider_setup();
    let (mut nav, extractor, mut out) = harness();

    nav.activate(descriptor);
    nav.enter_zone(&scene, &extractor, Zone::Top, &mut out);

    // Host destroys the focused card between refresh and activation.
    scene.destroy(a);
    nav.handle_key(&mut scene, &extractor, Key::Enter, &mut out);
    assert_eq!(out.last(), Some("could not move Mountain"));
}

#[test]
fn deactivation_abandons_the_pending_rescan() {
    let (mut scene, descriptor, _) = divider_setup();
    let (mut nav, extractor, mut out) = harness();

    nav.activate(descriptor);
    nav.enter_zone(&scene, &extractor, Zone::Top, &mut out);
    nav.handle_key(&mut scene, &extractor, Key::Enter, &mut out);

    nav.deactivate();
    out.clear();
    for _ in 0..SETTLE + 2 {
        nav.tick(&scene, &extractor, &mut out);
    }
    assert!(out.messages.is_empty(), "cancelled rescan must not speak");
    assert_eq!(nav.selections_committed(), 0, "workflow counters reset on deactivate");
}

// =========================================================================
// Paired-lists layout
// =========================================================================

#[test]
fn paired_lists_mirror_and_move_via_drag() {
    let mut scene = FixtureScene::new();
    let top = scene.add(None, FixtureNode::named("HandList"));
    let bottom = scene.add(None, FixtureNode::named("LibraryList"));
    scene.add(Some(top), card("CardX", "Plains"));
    scene.add(Some(bottom), card("CardY", "Forest"));
    scene.script_paired_move(top, bottom);

    let descriptor = BrowserDescriptor {
        kind: BrowserKind::ZoneSort,
        top_label: "Hand".into(),
        bottom_label: "Library".into(),
        target_count: None,
        layout: BrowserLayout::PairedLists { top, bottom },
    };
    let (mut nav, extractor, mut out) = harness();

    nav.activate(descriptor);
    nav.enter_zone(&scene, &extractor, Zone::Top, &mut out);
    assert_eq!(nav.items(Zone::Top).len(), 1);
    assert_eq!(nav.items(Zone::Bottom).len(), 1);

    nav.handle_key(&mut scene, &extractor, Key::Enter, &mut out);
    for _ in 0..SETTLE {
        nav.tick(&scene, &extractor, &mut out);
    }

    assert_eq!(nav.items(Zone::Top).len(), 0);
    assert_eq!(nav.items(Zone::Bottom).len(), 2, "count conserved across lists");
    assert_eq!(out.last(), Some("Hand, empty"));
}

// =========================================================================
// Session counters
// =========================================================================

#[test]
fn mulligan_count_ticks_per_activation_and_resets_per_session() {
    let (_scene, descriptor, _) = divider_setup();
    let (mut nav, _extractor, _out) = harness();

    nav.activate(descriptor.clone());
    nav.deactivate();
    nav.activate(descriptor);
    assert_eq!(nav.mulligan_count(), 2, "one mulligan per browser activation");

    nav.deactivate();
    assert_eq!(nav.mulligan_count(), 2, "deactivation does not reset the session counter");

    nav.reset_session();
    assert_eq!(nav.mulligan_count(), 0);
}
