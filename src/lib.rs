use crate::classify::rules::Classifier;
use crate::classify::scan::{ScanResult, scan, scene_digest};
use crate::host::element::Scene;

pub mod announce;
pub mod classify;
pub mod cli;
pub mod combat;
pub mod config;
pub mod host;
pub mod input;
pub mod scenario;
pub mod social;
pub mod text;
pub mod tick;
pub mod trace;
pub mod zones;

/// One snapshot of the scene: classify everything visible and fingerprint
/// the structure so the caller can debounce the next scan.
pub fn snapshot(scene: &dyn Scene, classifier: &Classifier) -> (ScanResult, String) {
    let result = scan(scene, classifier);
    let digest = scene_digest(scene);
    (result, digest)
}
