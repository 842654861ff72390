use sha1::{Digest, Sha1};

use crate::classify::model::Classification;
use crate::classify::rules::Classifier;
use crate::host::element::{ElementId, Scene};

// ============================================================================
// Visible-element scan
// ============================================================================

/// One navigable or announce-worthy element found by a scan.
#[derive(Debug, Clone)]
pub struct NavEntry {
    pub element: ElementId,
    pub classification: Classification,
}

impl NavEntry {
    pub fn spoken(&self) -> String {
        self.classification.spoken()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Elements in navigation order (depth-first traversal order).
    pub navigable: Vec<NavEntry>,
    /// Announce-only elements (passive labels, progress displays).
    pub announced: Vec<NavEntry>,
}

/// Re-derive the visible element list: depth-first walk from the scene
/// roots, pruning inactive subtrees. Internal containers are excluded
/// themselves but their subtrees are still walked: a scroll viewport is
/// chrome, its rows are not.
pub fn scan(scene: &dyn Scene, classifier: &Classifier) -> ScanResult {
    let mut result = ScanResult::default();
    for root in scene.roots() {
        walk(scene, classifier, root, &mut result);
    }
    result
}

fn walk(scene: &dyn Scene, classifier: &Classifier, el: ElementId, result: &mut ScanResult) {
    if !scene.alive(el) || !scene.is_active(el) {
        return;
    }

    let c = classifier.classify(scene, el);
    let compound = c.secondary.is_some();
    if c.navigable {
        result.navigable.push(NavEntry { element: el, classification: c });
    } else if c.announce {
        result.announced.push(NavEntry { element: el, classification: c });
    }

    // A compound entry already folds its cluster into one stop; its
    // children were classified Internal and need no further visits.
    if compound {
        return;
    }
    for child in scene.children(el) {
        walk(scene, classifier, child, result);
    }
}

/// Fingerprint of the scene's observable structure. Two ticks with the same
/// digest look identical to the narrator, so a full re-scan can be skipped.
pub fn scene_digest(scene: &dyn Scene) -> String {
    let mut hasher = Sha1::new();
    for root in scene.roots() {
        digest_walk(scene, root, &mut hasher);
    }
    format!("{:x}", hasher.finalize())
}

fn digest_walk(scene: &dyn Scene, el: ElementId, hasher: &mut Sha1) {
    if !scene.alive(el) || !scene.is_active(el) {
        return;
    }
    hasher.update(el.0.to_le_bytes());
    if let Some(name) = scene.name(el) {
        hasher.update(name.as_bytes());
    }
    if let Some(text) = scene.text(el) {
        hasher.update(text.as_bytes());
    }
    for child in scene.children(el) {
        digest_walk(scene, child, hasher);
    }
}

/// Debounced scanner: re-scans only when the scene digest changed since the
/// last refresh.
#[derive(Default)]
pub struct Scanner {
    last_digest: Option<String>,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh scan when the scene changed, None when the previous
    /// result is still valid.
    pub fn refresh(&mut self, scene: &dyn Scene, classifier: &Classifier) -> Option<ScanResult> {
        let digest = scene_digest(scene);
        if self.last_digest.as_deref() == Some(digest.as_str()) {
            return None;
        }
        self.last_digest = Some(digest);
        Some(scan(scene, classifier))
    }

    /// Drop the memorized digest so the next refresh rescans regardless.
    pub fn invalidate(&mut self) {
        self.last_digest = None;
    }
}
