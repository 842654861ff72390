use crate::host::element::ElementId;

/// Semantic category assigned to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Button,
    Link,
    Toggle,
    Slider,
    Dropdown,
    TextField,
    ProgressBar,
    Label,
    Navigation,
    Scrollbar,
    Card,
    Internal,
    Unknown,
}

/// Secondary controls for compound elements: carousel neighbors, stepper
/// step buttons, the slider control for direct arrow adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SecondaryControls {
    pub previous: Option<ElementId>,
    pub next: Option<ElementId>,
    pub adjust: Option<ElementId>,
}

/// Result of classifying one element. Created fresh on every call; host
/// state changes between frames, so nothing here is cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub role: Role,
    pub label: String,
    /// Spoken role suffix, may be empty when the label already carries it.
    pub role_text: String,
    pub navigable: bool,
    pub announce: bool,
    pub secondary: Option<SecondaryControls>,
    /// Which rule produced this result. Diagnostic only.
    pub matched_rule: &'static str,
}

impl Classification {
    pub fn internal(reason: &'static str) -> Self {
        Classification {
            role: Role::Internal,
            label: String::new(),
            role_text: String::new(),
            navigable: false,
            announce: false,
            secondary: None,
            matched_rule: reason,
        }
    }

    pub fn unknown() -> Self {
        Classification {
            role: Role::Unknown,
            label: String::new(),
            role_text: String::new(),
            navigable: false,
            announce: false,
            secondary: None,
            matched_rule: "unknown",
        }
    }

    /// Full spoken form: "label, role suffix".
    pub fn spoken(&self) -> String {
        match (self.label.is_empty(), self.role_text.is_empty()) {
            (false, false) => format!("{}, {}", self.label, self.role_text),
            (false, true) => self.label.clone(),
            (true, false) => self.role_text.clone(),
            (true, true) => String::new(),
        }
    }
}
