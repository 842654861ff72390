use crate::announce::{Announcer, Priority};
use crate::host::element::{ControlKind, ElementId, Host, Scene};
use crate::host::error::HostError;
use crate::host::probe::MemberCache;
use crate::text::extract::TextExtractor;

// ============================================================================
// Social roster tiles
// ============================================================================
//
// Narrow probe/act adapter over the host's roster tile types. Member names
// vary by tile subtype and host build; resolution is cached per concrete
// type, never per instance.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Friend,
    IncomingRequest,
    OutgoingRequest,
}

impl TileKind {
    /// The fixed action set this subtype supports.
    pub fn actions(self) -> &'static [&'static str] {
        match self {
            TileKind::Friend => &["chat", "challenge", "unfriend", "block"],
            TileKind::IncomingRequest => &["accept", "decline", "block"],
            TileKind::OutgoingRequest => &["cancel", "block"],
        }
    }
}

const NAME_CANDIDATES: &[&str] = &["player_name", "playerName", "m_playerName", "display_name"];
const STATUS_CANDIDATES: &[&str] = &["status_text", "presence", "status", "availability"];

fn method_candidates(action: &str) -> &'static [&'static str] {
    match action {
        "chat" => &["OnChat", "OpenChat", "ChatWithFriend"],
        "challenge" => &["OnChallenge", "ChallengeFriend"],
        "unfriend" => &["OnRemoveFriend", "Unfriend", "RemoveFriend"],
        "block" => &["OnBlock", "BlockPlayer"],
        "accept" => &["OnAccept", "AcceptRequest"],
        "decline" => &["OnDecline", "DeclineRequest"],
        "cancel" => &["OnCancel", "CancelRequest"],
        _ => &[],
    }
}

#[derive(Default)]
pub struct RosterProvider {
    members: MemberCache,
}

impl RosterProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Concrete subtype by host type name, with a convention-based fallback
    /// for subtypes this build does not name the usual way.
    pub fn tile_kind(&self, scene: &dyn Scene, el: ElementId) -> Option<TileKind> {
        let type_name = scene.type_name(el)?.to_lowercase();
        if type_name.contains("outgoing") || type_name.contains("pending") {
            return Some(TileKind::OutgoingRequest);
        }
        if type_name.contains("incoming") || type_name.contains("request") {
            return Some(TileKind::IncomingRequest);
        }
        if type_name.contains("friend") {
            return Some(TileKind::Friend);
        }

        // Unmapped subtype: infer from the callbacks it exposes.
        if method_candidates("accept").iter().any(|m| scene.has_method(el, m)) {
            return Some(TileKind::IncomingRequest);
        }
        if method_candidates("chat").iter().any(|m| scene.has_method(el, m)) {
            return Some(TileKind::Friend);
        }
        None
    }

    /// "name, status" label for a tile, degrading to the general label
    /// extraction when the tile carries neither field.
    pub fn label(&mut self, scene: &dyn Scene, extractor: &TextExtractor, el: ElementId) -> String {
        let name = self
            .members
            .get_field(scene, el, "player_name", NAME_CANDIDATES)
            .and_then(|v| v.as_str().map(|s| s.to_string()))
            .map(|s| extractor.clean(&s))
            .filter(|s| !s.is_empty());

        let status = self
            .members
            .get_field(scene, el, "status", STATUS_CANDIDATES)
            .and_then(|v| v.as_str().map(|s| s.to_string()))
            .map(|s| extractor.clean(&s))
            .filter(|s| !s.is_empty());

        match (name, status) {
            (Some(n), Some(s)) => format!("{}, {}", n, s),
            (Some(n), None) => n,
            _ => extractor.get_text(scene, el),
        }
    }

    pub fn actions(&self, scene: &dyn Scene, el: ElementId) -> &'static [&'static str] {
        self.tile_kind(scene, el).map(TileKind::actions).unwrap_or(&[])
    }

    /// Invoke the host callback for a chosen action id, falling back to
    /// clicking a matching child button.
    pub fn invoke_action(
        &mut self,
        host: &mut dyn Host,
        el: ElementId,
        action: &str,
    ) -> Result<(), HostError> {
        let candidates = method_candidates(action);
        let resolved = {
            let scene: &dyn Scene = &*host;
            self.members.resolve_method(scene, el, action_slot(action), candidates)
        };
        if let Some(method) = resolved {
            return host.invoke(el, &method);
        }

        let button = {
            let scene: &dyn Scene = &*host;
            find_action_button(scene, el, action)
        };
        if let Some(button) = button {
            return host.click(button);
        }

        Err(HostError::NotFound {
            target: action.to_string(),
            context: "roster tile actions".to_string(),
        })
    }

    /// Invoke with user-visible failure reporting: probe failures surface as
    /// "action not found", never as an error.
    pub fn perform(
        &mut self,
        host: &mut dyn Host,
        el: ElementId,
        action: &str,
        out: &mut dyn Announcer,
    ) {
        if let Err(e) = self.invoke_action(host, el, action) {
            eprintln!("Warning: roster action '{}' failed: {}", action, e);
            out.announce("action not found", Priority::Normal);
        }
    }
}

fn action_slot(action: &str) -> &'static str {
    // MemberCache keys slots by 'static str; map the known action ids.
    match action {
        "chat" => "chat",
        "challenge" => "challenge",
        "unfriend" => "unfriend",
        "block" => "block",
        "accept" => "accept",
        "decline" => "decline",
        "cancel" => "cancel",
        _ => "unknown_action",
    }
}

fn find_action_button(scene: &dyn Scene, el: ElementId, action: &str) -> Option<ElementId> {
    for child in scene.children(el) {
        let name = scene.name(child).unwrap_or_default().to_lowercase();
        let clickable = scene.has_control(child, ControlKind::Button)
            || scene.has_control(child, ControlKind::EventTrigger);
        if clickable && name.contains(action) {
            return Some(child);
        }
        if let Some(found) = find_action_button(scene, child, action) {
            return Some(found);
        }
    }
    None
}
