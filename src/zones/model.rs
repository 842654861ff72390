use serde::{Deserialize, Serialize};

use crate::host::element::ElementId;

/// Coarse partition of a two-bucket selection screen. At most one zone is
/// current at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    None,
    Top,
    Bottom,
}

impl Zone {
    pub fn other(self) -> Zone {
        match self {
            Zone::Top => Zone::Bottom,
            Zone::Bottom => Zone::Top,
            Zone::None => Zone::None,
        }
    }
}

/// One entry in a zone's ordered item list, only as fresh as the last
/// refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneItem {
    pub element: ElementId,
    pub label: String,
}

/// Which workflow this browser serves. Affects terminology and which
/// session counters tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserKind {
    /// Keep/dismiss opening-hand workflow.
    Mulligan,
    /// Generic two-zone sorting (e.g. hand vs library).
    ZoneSort,
}

/// How the host lays the two buckets out. The navigation logic is identical
/// across layouts; only refresh and move differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum BrowserLayout {
    /// One ordered list with a reserved "empty slot" entry as the divider;
    /// entries before it are Top, after it Bottom.
    DividerList { container: ElementId, divider_id: u64 },

    /// Two separate host lists mirrored into the zones.
    PairedLists { top: ElementId, bottom: ElementId },
}

/// Everything the navigator needs to drive one concrete host screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserDescriptor {
    pub kind: BrowserKind,
    pub top_label: String,
    pub bottom_label: String,
    /// Target count for "k of n selected" workflows.
    pub target_count: Option<usize>,
    pub layout: BrowserLayout,
}
