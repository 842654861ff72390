use std::fmt;

use crate::host::element::ElementId;

#[derive(Debug)]
pub enum HostError {
    /// A probed member is missing or of an unexpected type on this host build
    ShapeMismatch { type_name: String, member: String },

    /// A previously captured element reference has been destroyed by the host
    Stale(ElementId),

    /// A synthetic interaction (click, drag, invoke) was rejected by the host
    ActionFailed { action: String, detail: String },

    /// A requested target (item, button, action id) has no match under current state
    NotFound { target: String, context: String },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::ShapeMismatch { type_name, member } => {
                write!(f, "Host type '{}' has no usable member '{}'", type_name, member)
            }
            HostError::Stale(id) => {
                write!(f, "Element {} no longer exists in the scene", id.0)
            }
            HostError::ActionFailed { action, detail } => {
                write!(f, "Host rejected {}: {}", action, detail)
            }
            HostError::NotFound { target, context } => {
                write!(f, "'{}' not found: {}", target, context)
            }
        }
    }
}

impl std::error::Error for HostError {}
