use std::collections::HashMap;

use crate::host::element::{ElementId, Scene};

/// Value read off a host object through the capability probe.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Ref(ElementId),
    Refs(Vec<ElementId>),
}

impl FieldValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            FieldValue::Float(f) => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_ref_id(&self) -> Option<ElementId> {
        match self {
            FieldValue::Ref(id) => Some(*id),
            _ => None,
        }
    }

    /// Linked elements, whether the host stores one or many.
    pub fn as_refs(&self) -> Vec<ElementId> {
        match self {
            FieldValue::Ref(id) => vec![*id],
            FieldValue::Refs(ids) => ids.clone(),
            _ => vec![],
        }
    }
}

/// Per-host-type member-name resolution cache.
///
/// Host types vary by build; the first candidate name that resolves for a
/// concrete type is remembered for that type, so repeated probing costs one
/// lookup per type, not per instance. A cached miss is remembered too.
#[derive(Debug, Default)]
pub struct MemberCache {
    resolved: HashMap<(String, &'static str), Option<String>>,
}

impl MemberCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a logical slot (e.g. "player_name") to whichever candidate
    /// member this element's concrete type actually carries.
    pub fn resolve_field(
        &mut self,
        scene: &dyn Scene,
        el: ElementId,
        slot: &'static str,
        candidates: &[&str],
    ) -> Option<String> {
        let type_name = scene.type_name(el)?;
        self.resolve_by(&type_name, slot, candidates, |name| {
            scene.field(el, name).is_some()
        })
    }

    /// Resolve a slot to an invokable method name on this element's type.
    pub fn resolve_method(
        &mut self,
        scene: &dyn Scene,
        el: ElementId,
        slot: &'static str,
        candidates: &[&str],
    ) -> Option<String> {
        let type_name = scene.type_name(el)?;
        self.resolve_by(&type_name, slot, candidates, |name| {
            scene.has_method(el, name)
        })
    }

    /// Read a field through the cache. Resolution is cached per type; the
    /// value itself is re-read every call, since host state changes between
    /// frames.
    pub fn get_field(
        &mut self,
        scene: &dyn Scene,
        el: ElementId,
        slot: &'static str,
        candidates: &[&str],
    ) -> Option<FieldValue> {
        let member = self.resolve_field(scene, el, slot, candidates)?;
        scene.field(el, &member)
    }

    fn resolve_by(
        &mut self,
        type_name: &str,
        slot: &'static str,
        candidates: &[&str],
        probe: impl Fn(&str) -> bool,
    ) -> Option<String> {
        let key = (type_name.to_string(), slot);
        if let Some(cached) = self.resolved.get(&key) {
            return cached.clone();
        }

        let found = candidates.iter().find(|name| probe(name)).map(|s| s.to_string());
        self.resolved.insert(key, found.clone());
        found
    }
}
