use scene_narrator::announce::BufferOutput;
use scene_narrator::config::NarratorConfig;
use scene_narrator::host::element::ControlKind;
use scene_narrator::host::fixture::{FixtureNode, FixtureScene, Interaction};
use scene_narrator::host::probe::FieldValue;
use scene_narrator::social::roster::{RosterProvider, TileKind};
use scene_narrator::text::extract::TextExtractor;

fn extractor() -> TextExtractor {
    TextExtractor::new(&NarratorConfig::default())
}

// =========================================================================
// Subtype detection
// =========================================================================

#[test]
fn tile_kinds_resolve_by_type_name() {
    let mut scene = FixtureScene::new();
    let friend = scene.add(None, FixtureNode::named("Row").with_type("FriendTile_Online"));
    let incoming = scene.add(None, FixtureNode::named("Row2").with_type("IncomingRequestTile"));
    let outgoing = scene.add(None, FixtureNode::named("Row3").with_type("PendingInviteTile"));

    let provider = RosterProvider::new();
    assert_eq!(provider.tile_kind(&scene, friend), Some(TileKind::Friend));
    assert_eq!(provider.tile_kind(&scene, incoming), Some(TileKind::IncomingRequest));
    assert_eq!(provider.tile_kind(&scene, outgoing), Some(TileKind::OutgoingRequest));
}

#[test]
fn unmapped_subtypes_fall_back_to_callback_conventions() {
    let mut scene = FixtureScene::new();
    let tile = scene.add(
        None,
        FixtureNode::named("Row").with_type("SocialRowV2").with_method("OnAccept"),
    );
    assert_eq!(
        RosterProvider::new().tile_kind(&scene, tile),
        Some(TileKind::IncomingRequest),
        "an accept callback marks an incoming request"
    );
}

#[test]
fn each_kind_exposes_its_fixed_action_set() {
    assert_eq!(TileKind::Friend.actions(), &["chat", "challenge", "unfriend", "block"][..]);
    assert_eq!(TileKind::IncomingRequest.actions(), &["accept", "decline", "block"][..]);
    assert_eq!(TileKind::OutgoingRequest.actions(), &["cancel", "block"][..]);
}

// =========================================================================
// Labels
// =========================================================================

#[test]
fn labels_combine_name_and_status() {
    let mut scene = FixtureScene::new();
    let tile = scene.add(
        None,
        FixtureNode::named("Row")
            .with_type("FriendTile")
            .with_field("player_name", FieldValue::Str("Alice".into()))
            .with_field("status", FieldValue::Str("Online".into())),
    );

    let mut provider = RosterProvider::new();
    assert_eq!(provider.label(&scene, &extractor(), tile), "Alice, Online");
}

#[test]
fn label_member_names_vary_by_host_build() {
    let mut scene = FixtureScene::new();
    let tile = scene.add(
        None,
        FixtureNode::named("Row")
            .with_type("FriendTileLegacy")
            .with_field("m_playerName", FieldValue::Str("Bob".into())),
    );

    let mut provider = RosterProvider::new();
    assert_eq!(
        provider.label(&scene, &extractor(), tile),
        "Bob",
        "candidate member names probe in order"
    );
}

#[test]
fn label_degrades_to_general_extraction() {
    let mut scene = FixtureScene::new();
    let tile = scene.add(
        None,
        FixtureNode::named("Row").with_type("FriendTile").with_text("Carol"),
    );
    assert_eq!(RosterProvider::new().label(&scene, &extractor(), tile), "Carol");
}

// =========================================================================
// Actions
// =========================================================================

#[test]
fn actions_invoke_the_host_callback_when_present() {
    let mut scene = FixtureScene::new();
    let tile = scene.add(
        None,
        FixtureNode::named("Row").with_type("FriendTile").with_method("OnChat"),
    );

    let mut provider = RosterProvider::new();
    provider.invoke_action(&mut scene, tile, "chat").expect("chat resolves");
    assert_eq!(
        scene.interactions.last(),
        Some(&Interaction::Invoke(tile, "OnChat".to_string()))
    );
}

#[test]
fn actions_fall_back_to_a_matching_child_button() {
    let mut scene = FixtureScene::new();
    let tile = scene.add(None, FixtureNode::named("Row").with_type("FriendTile"));
    let block = scene.add(
        Some(tile),
        FixtureNode::named("BlockButton").with_control(ControlKind::Button),
    );

    let mut provider = RosterProvider::new();
    provider.invoke_action(&mut scene, tile, "block").expect("child button found");
    assert_eq!(scene.interactions.last(), Some(&Interaction::Click(block)));
}

#[test]
fn missing_actions_are_reported_not_raised() {
    let mut scene = FixtureScene::new();
    let tile = scene.add(None, FixtureNode::named("Row").with_type("FriendTile"));

    let mut provider = RosterProvider::new();
    let mut out = BufferOutput::new();
    provider.perform(&mut scene, tile, "challenge", &mut out);
    assert_eq!(out.last(), Some("action not found"));
}
