use scene_narrator::classify::model::Role;
use scene_narrator::classify::rules::Classifier;
use scene_narrator::classify::scan::{Scanner, scan};
use scene_narrator::host::element::ControlKind;
use scene_narrator::host::fixture::{FixtureNode, FixtureScene};
use scene_narrator::host::probe::FieldValue;

fn classifier() -> Classifier {
    Classifier::with_defaults()
}

// =========================================================================
// Role assignment through the ordered chain
// =========================================================================

#[test]
fn card_beats_generic_button_and_uses_card_name() {
    let mut scene = FixtureScene::new();
    // A card is also technically clickable; card classification must win.
    let card = scene.add(
        None,
        FixtureNode::named("CardView_17")
            .with_control(ControlKind::Card)
            .with_control(ControlKind::Button)
            .with_field("card_name", FieldValue::Str("Lightning Bolt".into())),
    );

    let c = classifier();
    let result = c.classify(&scene, card);
    assert_eq!(result.role, Role::Card);
    assert_eq!(result.label, "Lightning Bolt");
    assert_eq!(
        result.label,
        c.extractor().card_name(&scene, card),
        "Card label must equal the card-name extractor output"
    );
    assert!(result.navigable && result.announce);
}

#[test]
fn stepper_row_collapses_to_one_entry_with_secondary_actions() {
    let mut scene = FixtureScene::new();
    let row = scene.add(None, FixtureNode::named("Control - Setting: MasterVolume"));
    let inc = scene.add(Some(row), FixtureNode::named("IncrementButton").with_control(ControlKind::Button));
    let dec = scene.add(Some(row), FixtureNode::named("DecrementButton").with_control(ControlKind::Button));
    scene.add(Some(row), FixtureNode::named("ValueText").with_text("75"));

    let c = classifier();
    let result = c.classify(&scene, row);
    assert_eq!(result.label, "Master Volume: 75");
    assert!(result.navigable);

    let secondary = result.secondary.expect("stepper exposes step buttons");
    assert_eq!(secondary.previous, Some(dec));
    assert_eq!(secondary.next, Some(inc));

    // The step buttons must not also appear as standalone buttons.
    let inc_result = c.classify(&scene, inc);
    let dec_result = c.classify(&scene, dec);
    assert_eq!(inc_result.role, Role::Internal);
    assert_eq!(dec_result.role, Role::Internal);
    assert!(!inc_result.navigable && !inc_result.announce);
    assert!(!dec_result.navigable && !dec_result.announce);
}

#[test]
fn settings_dropdown_row_reads_setting_and_value() {
    let mut scene = FixtureScene::new();
    let row = scene.add(None, FixtureNode::named("Setting_GraphicsQuality"));
    let dropdown = scene.add(Some(row), FixtureNode::named("Selector").with_dropdown(1, &["Low", "High"]));

    let c = classifier();
    let result = c.classify(&scene, row);
    assert_eq!(result.role, Role::Dropdown);
    assert_eq!(result.label, "Graphics Quality: High");
    assert_eq!(result.secondary.expect("adjustable").adjust, Some(dropdown));

    assert_eq!(
        c.classify(&scene, dropdown).role,
        Role::Internal,
        "The nested dropdown is part of the row, not a standalone stop"
    );
}

#[test]
fn toggle_announces_state_in_role_text() {
    let mut scene = FixtureScene::new();
    let on = scene.add(None, FixtureNode::named("VsyncToggle").with_toggle(true).with_text("Vsync"));
    let off = scene.add(None, FixtureNode::named("FullscreenToggle").with_toggle(false).with_text("Fullscreen"));

    let c = classifier();
    let on_result = c.classify(&scene, on);
    assert_eq!(on_result.role, Role::Toggle);
    assert_eq!(on_result.spoken(), "Vsync, toggle, on");
    assert_eq!(c.classify(&scene, off).spoken(), "Fullscreen, toggle, off");
}

#[test]
fn slider_exposes_itself_for_direct_adjustment() {
    let mut scene = FixtureScene::new();
    let el = scene.add(None, FixtureNode::named("VolumeSlider").with_slider(0.5, false));

    let result = classifier().classify(&scene, el);
    assert_eq!(result.role, Role::Slider);
    assert_eq!(result.label, "volume slider");
    assert_eq!(result.role_text, "slider, horizontal, 50 percent");
    assert_eq!(result.secondary.expect("adjustable").adjust, Some(el));
}

#[test]
fn scrollbar_is_informational_not_navigable() {
    let mut scene = FixtureScene::new();
    let el = scene.add(None, FixtureNode::named("ListScrollbar").with_scrollbar(1.0, true));

    let result = classifier().classify(&scene, el);
    assert_eq!(result.role, Role::Scrollbar);
    assert!(!result.navigable);
}

#[test]
fn progress_displays_are_not_controls() {
    let mut scene = FixtureScene::new();
    let by_name = scene.add(None, FixtureNode::named("XpProgressBar").with_text("450/1000"));
    let by_text = scene.add(None, FixtureNode::named("Tracker").with_text("3/10"));

    let c = classifier();
    for el in [by_name, by_text] {
        let result = c.classify(&scene, el);
        assert_eq!(result.role, Role::ProgressBar);
        assert!(!result.navigable, "status displays are never navigable");
        assert!(result.announce);
    }
}

#[test]
fn nav_arrows_get_direction_labels() {
    let mut scene = FixtureScene::new();
    let left = scene.add(None, FixtureNode::named("ArrowLeft").with_control(ControlKind::Button));
    let right = scene.add(None, FixtureNode::named("NextPageButton").with_control(ControlKind::Button));

    let c = classifier();
    let left_result = c.classify(&scene, left);
    assert_eq!(left_result.role, Role::Navigation);
    assert_eq!(left_result.label, "Previous");
    assert_eq!(c.classify(&scene, right).label, "Next");
}

#[test]
fn carousel_folds_neighbors_into_one_entry() {
    let mut scene = FixtureScene::new();
    let carousel = scene.add(
        None,
        FixtureNode::named("NewsCarousel")
            .with_control(ControlKind::Button)
            .with_text("News"),
    );
    let left = scene.add(Some(carousel), FixtureNode::named("LeftArrow").with_control(ControlKind::Button));
    let right = scene.add(Some(carousel), FixtureNode::named("RightArrow").with_control(ControlKind::Button));

    let result = classifier().classify(&scene, carousel);
    assert_eq!(result.role, Role::Button);
    assert_eq!(result.label, "News");
    let secondary = result.secondary.expect("carousel neighbors");
    assert_eq!(secondary.previous, Some(left));
    assert_eq!(secondary.next, Some(right));
}

#[test]
fn linkish_labels_classify_as_links() {
    let mut scene = FixtureScene::new();
    let link = scene.add(
        None,
        FixtureNode::named("SubscribeButton")
            .with_control(ControlKind::Button)
            .with_text("Subscribe now"),
    );
    let button = scene.add(
        None,
        FixtureNode::named("PlayButton")
            .with_control(ControlKind::Button)
            .with_text("Play"),
    );

    let c = classifier();
    assert_eq!(c.classify(&scene, link).role, Role::Link);
    let play = c.classify(&scene, button);
    assert_eq!(play.role, Role::Button);
    assert_eq!(play.spoken(), "Play, button");
}

#[test]
fn passive_labels_announce_only_with_text() {
    let mut scene = FixtureScene::new();
    let with_text = scene.add(None, FixtureNode::named("WelcomeText").with_text("Welcome back"));
    let empty_header = scene.add(None, FixtureNode::named("SectionHeader"));

    let c = classifier();
    let labeled = c.classify(&scene, with_text);
    assert_eq!(labeled.role, Role::Label);
    assert!(labeled.announce && !labeled.navigable);

    let header = c.classify(&scene, empty_header);
    assert_eq!(header.role, Role::Label);
    assert!(!header.announce, "Nothing to say for an empty header");
}

#[test]
fn stale_handles_classify_internal() {
    let mut scene = FixtureScene::new();
    let el = scene.add(None, FixtureNode::named("Gone").with_control(ControlKind::Button));
    scene.destroy(el);

    let result = classifier().classify(&scene, el);
    assert_eq!(result.role, Role::Internal);
    assert!(!result.navigable && !result.announce);
}

// =========================================================================
// Scanning
// =========================================================================

#[test]
fn scan_collects_navigable_in_traversal_order_and_prunes_compounds() {
    let mut scene = FixtureScene::new();
    let root = scene.add(None, FixtureNode::named("Menu"));
    scene.add(Some(root), FixtureNode::named("PlayButton").with_control(ControlKind::Button).with_text("Play"));
    let carousel = scene.add(
        Some(root),
        FixtureNode::named("NewsCarousel").with_control(ControlKind::Button).with_text("News"),
    );
    scene.add(Some(carousel), FixtureNode::named("LeftArrow").with_control(ControlKind::Button));
    scene.add(Some(carousel), FixtureNode::named("RightArrow").with_control(ControlKind::Button));
    scene.add(Some(root), FixtureNode::named("Hidden").inactive().with_control(ControlKind::Button));

    let result = scan(&scene, &classifier());
    let labels: Vec<&str> = result.navigable.iter().map(|e| e.classification.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Play", "News"],
        "Carousel arrows fold into their parent; inactive subtrees are pruned"
    );
}

#[test]
fn scanner_debounces_unchanged_scenes() {
    let mut scene = FixtureScene::new();
    let el = scene.add(None, FixtureNode::named("PlayButton").with_control(ControlKind::Button).with_text("Play"));

    let c = classifier();
    let mut scanner = Scanner::new();
    assert!(scanner.refresh(&scene, &c).is_some(), "first refresh always scans");
    assert!(scanner.refresh(&scene, &c).is_none(), "unchanged scene skips the rescan");

    scene.node_mut(el).unwrap().text = Some("Resume".into());
    assert!(scanner.refresh(&scene, &c).is_some(), "text change invalidates the digest");
}
