use serde::{Deserialize, Serialize};

use crate::host::probe::FieldValue;
use crate::host::error::HostError;

/// Opaque handle to a host-owned visual node. The host controls the lifetime;
/// a handle may stop resolving at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }
}

/// Control markers the host attaches to nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Button,
    EventTrigger,
    Toggle,
    Slider,
    Scrollbar,
    Dropdown,
    TextField,
    RichText,
    Image,
    Card,
}

/// Live state of a host text field.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFieldState {
    pub value: String,
    pub placeholder: String,
    pub masked: bool,
}

/// Live state of a host dropdown. `selected` may be out of range on a host
/// that has not initialized the control yet.
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownState {
    pub selected: i32,
    pub options: Vec<String>,
}

/// Live state of a host slider or scrollbar, as a 0..1 fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderState {
    pub fraction: f32,
    pub vertical: bool,
}

/// Read-only view of the host scene graph.
///
/// Every method tolerates a stale handle: `None`/`false`/empty means the
/// signal is absent, whether because the node is gone or because this host
/// build does not carry it.
pub trait Scene {
    fn roots(&self) -> Vec<ElementId>;

    fn alive(&self, el: ElementId) -> bool;

    /// Structural name of the node, or None when the handle is stale.
    fn name(&self, el: ElementId) -> Option<String>;

    fn parent(&self, el: ElementId) -> Option<ElementId>;

    fn children(&self, el: ElementId) -> Vec<ElementId>;

    /// Active in the hierarchy (self and all ancestors enabled).
    fn is_active(&self, el: ElementId) -> bool;

    /// Effective interactable flag, including ancestor visibility-groups.
    fn is_interactable(&self, el: ElementId) -> bool;

    /// Opacity of a visibility-group attached to this node, if any.
    fn group_alpha(&self, el: ElementId) -> Option<f32>;

    fn rect(&self, el: ElementId) -> Option<Rect>;

    fn has_control(&self, el: ElementId, kind: ControlKind) -> bool;

    /// Raw attached text content. May contain markup.
    fn text(&self, el: ElementId) -> Option<String>;

    fn text_field(&self, el: ElementId) -> Option<TextFieldState>;

    fn dropdown(&self, el: ElementId) -> Option<DropdownState>;

    fn slider(&self, el: ElementId) -> Option<SliderState>;

    fn toggle_on(&self, el: ElementId) -> Option<bool>;

    /// Concrete host type name, for per-type member caches.
    fn type_name(&self, el: ElementId) -> Option<String>;

    /// Capability probe: typed field read by name. Absent or mistyped
    /// members report None, never an error.
    fn field(&self, el: ElementId, name: &str) -> Option<FieldValue>;

    /// Whether the host object exposes an invokable method of this name.
    fn has_method(&self, el: ElementId, name: &str) -> bool;
}

/// The only mutation channel into the host: synthetic interaction
/// primitives the host already supports.
pub trait Interact {
    fn click(&mut self, el: ElementId) -> Result<(), HostError>;

    fn drag_release(&mut self, el: ElementId) -> Result<(), HostError>;

    fn invoke(&mut self, el: ElementId, method: &str) -> Result<(), HostError>;
}

/// Combined host seam used where a component both reads and acts.
pub trait Host: Scene + Interact {}

impl<T: Scene + Interact> Host for T {}
