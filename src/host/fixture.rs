use std::collections::HashMap;

use crate::host::element::{
    ControlKind, DropdownState, ElementId, Interact, Rect, Scene, SliderState, TextFieldState,
};
use crate::host::error::HostError;
use crate::host::probe::FieldValue;

// ============================================================================
// Scripted in-memory scene
// ============================================================================
//
// Stands in for the live host: unit tests, integration tests and the replay
// harness all drive the real core through this. Nodes form an arena keyed by
// instance id; synthetic interactions are recorded, and zone moves can be
// scripted so ActivateCurrentItem round-trips behave like the host.

/// One scripted node. Built with the `with_*` chainers, attached via
/// `FixtureScene::add`.
#[derive(Debug, Clone)]
pub struct FixtureNode {
    pub name: String,
    pub type_name: String,
    pub active: bool,
    pub interactable: bool,
    pub group_alpha: Option<f32>,
    pub rect: Option<Rect>,
    pub controls: Vec<ControlKind>,
    pub text: Option<String>,
    pub text_field: Option<TextFieldState>,
    pub dropdown: Option<DropdownState>,
    pub slider: Option<SliderState>,
    pub toggle_on: Option<bool>,
    pub fields: HashMap<String, FieldValue>,
    pub methods: Vec<String>,

    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl FixtureNode {
    pub fn named(name: &str) -> Self {
        FixtureNode {
            name: name.to_string(),
            type_name: name.to_string(),
            active: true,
            interactable: true,
            group_alpha: None,
            rect: Some(Rect { x: 0.0, y: 0.0, width: 100.0, height: 40.0 }),
            controls: vec![],
            text: None,
            text_field: None,
            dropdown: None,
            slider: None,
            toggle_on: None,
            fields: HashMap::new(),
            methods: vec![],
            parent: None,
            children: vec![],
        }
    }

    pub fn with_type(mut self, type_name: &str) -> Self {
        self.type_name = type_name.to_string();
        self
    }

    pub fn with_control(mut self, kind: ControlKind) -> Self {
        self.controls.push(kind);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_rect(mut self, width: f32, height: f32) -> Self {
        self.rect = Some(Rect { x: 0.0, y: 0.0, width, height });
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.group_alpha = Some(alpha);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn not_interactable(mut self) -> Self {
        self.interactable = false;
        self
    }

    pub fn with_field(mut self, name: &str, value: FieldValue) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn with_method(mut self, name: &str) -> Self {
        self.methods.push(name.to_string());
        self
    }

    pub fn with_text_field(mut self, value: &str, placeholder: &str, masked: bool) -> Self {
        self.text_field = Some(TextFieldState {
            value: value.to_string(),
            placeholder: placeholder.to_string(),
            masked,
        });
        self.controls.push(ControlKind::TextField);
        self
    }

    pub fn with_dropdown(mut self, selected: i32, options: &[&str]) -> Self {
        self.dropdown = Some(DropdownState {
            selected,
            options: options.iter().map(|s| s.to_string()).collect(),
        });
        self.controls.push(ControlKind::Dropdown);
        self
    }

    pub fn with_slider(mut self, fraction: f32, vertical: bool) -> Self {
        self.slider = Some(SliderState { fraction, vertical });
        self.controls.push(ControlKind::Slider);
        self
    }

    pub fn with_scrollbar(mut self, fraction: f32, vertical: bool) -> Self {
        self.slider = Some(SliderState { fraction, vertical });
        self.controls.push(ControlKind::Scrollbar);
        self
    }

    pub fn with_toggle(mut self, on: bool) -> Self {
        self.toggle_on = Some(on);
        self.controls.push(ControlKind::Toggle);
        self
    }
}

/// A recorded synthetic interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Click(ElementId),
    DragRelease(ElementId),
    Invoke(ElementId, String),
}

/// Scripted response to zone-move interactions.
#[derive(Debug, Clone)]
enum MoveScript {
    /// Click on a child of `container` relocates it across the divider entry.
    Divider { container: ElementId, divider: ElementId },
    /// Drag-release on a child of either list reparents it to the other.
    Paired { top: ElementId, bottom: ElementId },
}

#[derive(Default)]
pub struct FixtureScene {
    nodes: HashMap<u64, FixtureNode>,
    roots: Vec<ElementId>,
    next_id: u64,
    move_script: Option<MoveScript>,
    /// When set, every synthetic interaction is rejected by the "host".
    pub fail_interactions: bool,
    pub interactions: Vec<Interaction>,
}

impl FixtureScene {
    pub fn new() -> Self {
        FixtureScene { next_id: 1, ..Default::default() }
    }

    pub fn add(&mut self, parent: Option<ElementId>, mut node: FixtureNode) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        node.parent = parent;
        self.nodes.insert(id.0, node);
        match parent {
            Some(p) => {
                if let Some(pn) = self.nodes.get_mut(&p.0) {
                    pn.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
        id
    }

    pub fn node_mut(&mut self, el: ElementId) -> Option<&mut FixtureNode> {
        self.nodes.get_mut(&el.0)
    }

    pub fn set_field(&mut self, el: ElementId, name: &str, value: FieldValue) {
        if let Some(node) = self.nodes.get_mut(&el.0) {
            node.fields.insert(name.to_string(), value);
        }
    }

    pub fn clear_field(&mut self, el: ElementId, name: &str) {
        if let Some(node) = self.nodes.get_mut(&el.0) {
            node.fields.remove(name);
        }
    }

    /// Host destroyed the node: the handle goes stale for every consumer.
    pub fn destroy(&mut self, el: ElementId) {
        let children = self
            .nodes
            .get(&el.0)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in children {
            self.destroy(child);
        }
        if let Some(node) = self.nodes.remove(&el.0) {
            if let Some(p) = node.parent {
                if let Some(pn) = self.nodes.get_mut(&p.0) {
                    pn.children.retain(|c| *c != el);
                }
            }
        }
        self.roots.retain(|r| *r != el);
    }

    pub fn find_by_name(&self, name: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.name == name)
            .map(|(id, _)| ElementId(*id))
    }

    pub fn script_divider_move(&mut self, container: ElementId, divider: ElementId) {
        self.move_script = Some(MoveScript::Divider { container, divider });
    }

    pub fn script_paired_move(&mut self, top: ElementId, bottom: ElementId) {
        self.move_script = Some(MoveScript::Paired { top, bottom });
    }

    fn apply_divider_move(&mut self, container: ElementId, divider: ElementId, el: ElementId) {
        let Some(cn) = self.nodes.get_mut(&container.0) else { return };
        let Some(el_idx) = cn.children.iter().position(|c| *c == el) else { return };
        let Some(div_idx) = cn.children.iter().position(|c| *c == divider) else { return };

        cn.children.remove(el_idx);
        if el_idx < div_idx {
            // was above the divider: drop to the end of the bottom section
            cn.children.push(el);
        } else {
            // was below: insert just before the divider, end of the top section
            let div_idx = cn.children.iter().position(|c| *c == divider).unwrap_or(0);
            cn.children.insert(div_idx, el);
        }
    }

    fn apply_paired_move(&mut self, top: ElementId, bottom: ElementId, el: ElementId) {
        let from = match self.nodes.get(&el.0).and_then(|n| n.parent) {
            Some(p) if p == top => top,
            Some(p) if p == bottom => bottom,
            _ => return,
        };
        let to = if from == top { bottom } else { top };

        if let Some(fp) = self.nodes.get_mut(&from.0) {
            fp.children.retain(|c| *c != el);
        }
        if let Some(tp) = self.nodes.get_mut(&to.0) {
            tp.children.push(el);
        }
        if let Some(n) = self.nodes.get_mut(&el.0) {
            n.parent = Some(to);
        }
    }
}

impl Scene for FixtureScene {
    fn roots(&self) -> Vec<ElementId> {
        self.roots.clone()
    }

    fn alive(&self, el: ElementId) -> bool {
        self.nodes.contains_key(&el.0)
    }

    fn name(&self, el: ElementId) -> Option<String> {
        self.nodes.get(&el.0).map(|n| n.name.clone())
    }

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.nodes.get(&el.0).and_then(|n| n.parent)
    }

    fn children(&self, el: ElementId) -> Vec<ElementId> {
        self.nodes.get(&el.0).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn is_active(&self, el: ElementId) -> bool {
        let mut cur = Some(el);
        while let Some(id) = cur {
            match self.nodes.get(&id.0) {
                Some(n) if n.active => cur = n.parent,
                _ => return false,
            }
        }
        true
    }

    fn is_interactable(&self, el: ElementId) -> bool {
        let mut cur = Some(el);
        while let Some(id) = cur {
            match self.nodes.get(&id.0) {
                Some(n) if n.interactable => cur = n.parent,
                _ => return false,
            }
        }
        true
    }

    fn group_alpha(&self, el: ElementId) -> Option<f32> {
        self.nodes.get(&el.0).and_then(|n| n.group_alpha)
    }

    fn rect(&self, el: ElementId) -> Option<Rect> {
        self.nodes.get(&el.0).and_then(|n| n.rect)
    }

    fn has_control(&self, el: ElementId, kind: ControlKind) -> bool {
        self.nodes
            .get(&el.0)
            .map(|n| n.controls.contains(&kind))
            .unwrap_or(false)
    }

    fn text(&self, el: ElementId) -> Option<String> {
        self.nodes.get(&el.0).and_then(|n| n.text.clone())
    }

    fn text_field(&self, el: ElementId) -> Option<TextFieldState> {
        self.nodes.get(&el.0).and_then(|n| n.text_field.clone())
    }

    fn dropdown(&self, el: ElementId) -> Option<DropdownState> {
        self.nodes.get(&el.0).and_then(|n| n.dropdown.clone())
    }

    fn slider(&self, el: ElementId) -> Option<SliderState> {
        self.nodes.get(&el.0).and_then(|n| n.slider)
    }

    fn toggle_on(&self, el: ElementId) -> Option<bool> {
        self.nodes.get(&el.0).and_then(|n| n.toggle_on)
    }

    fn type_name(&self, el: ElementId) -> Option<String> {
        self.nodes.get(&el.0).map(|n| n.type_name.clone())
    }

    fn field(&self, el: ElementId, name: &str) -> Option<FieldValue> {
        self.nodes.get(&el.0).and_then(|n| n.fields.get(name).cloned())
    }

    fn has_method(&self, el: ElementId, name: &str) -> bool {
        self.nodes
            .get(&el.0)
            .map(|n| n.methods.iter().any(|m| m == name))
            .unwrap_or(false)
    }
}

impl Interact for FixtureScene {
    fn click(&mut self, el: ElementId) -> Result<(), HostError> {
        self.interactions.push(Interaction::Click(el));
        if self.fail_interactions {
            return Err(HostError::ActionFailed {
                action: "click".into(),
                detail: "scripted rejection".into(),
            });
        }
        if !self.alive(el) {
            return Err(HostError::Stale(el));
        }
        if let Some(MoveScript::Divider { container, divider }) = self.move_script.clone() {
            if self.parent(el) == Some(container) {
                self.apply_divider_move(container, divider, el);
            }
        }
        Ok(())
    }

    fn drag_release(&mut self, el: ElementId) -> Result<(), HostError> {
        self.interactions.push(Interaction::DragRelease(el));
        if self.fail_interactions {
            return Err(HostError::ActionFailed {
                action: "drag".into(),
                detail: "scripted rejection".into(),
            });
        }
        if !self.alive(el) {
            return Err(HostError::Stale(el));
        }
        if let Some(MoveScript::Paired { top, bottom }) = self.move_script.clone() {
            self.apply_paired_move(top, bottom, el);
        }
        Ok(())
    }

    fn invoke(&mut self, el: ElementId, method: &str) -> Result<(), HostError> {
        self.interactions.push(Interaction::Invoke(el, method.to_string()));
        if self.fail_interactions {
            return Err(HostError::ActionFailed {
                action: format!("invoke {}", method),
                detail: "scripted rejection".into(),
            });
        }
        if !self.alive(el) {
            return Err(HostError::Stale(el));
        }
        if !self.has_method(el, method) {
            return Err(HostError::ShapeMismatch {
                type_name: self.type_name(el).unwrap_or_default(),
                member: method.to_string(),
            });
        }
        Ok(())
    }
}
