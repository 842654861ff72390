use std::collections::BTreeSet;

use crate::announce::{Announcer, Priority};
use crate::config::NarratorConfig;
use crate::host::element::{ElementId, Scene};
use crate::text::extract::TextExtractor;

// ============================================================================
// Combat selection tracker
// ============================================================================
//
// A frame-sampled diff engine over two independently polled live sets:
// provisionally selected candidates and committed assignments. Assigned
// takes priority; collapsing the tiers would either over-announce every
// provisional highlight or miss the final commit. Announces deltas only,
// never full state.

pub struct CombatTracker {
    in_phase: bool,
    off_streak: u32,
    phase_exit_polls: u32,
    assigned: BTreeSet<u64>,
    selected: BTreeSet<u64>,
}

impl CombatTracker {
    pub fn new(config: &NarratorConfig) -> Self {
        CombatTracker {
            in_phase: false,
            off_streak: 0,
            phase_exit_polls: config.timing.phase_exit_polls,
            assigned: BTreeSet::new(),
            selected: BTreeSet::new(),
        }
    }

    pub fn in_phase(&self) -> bool {
        self.in_phase
    }

    pub fn assigned_ids(&self) -> &BTreeSet<u64> {
        &self.assigned
    }

    pub fn selected_ids(&self) -> &BTreeSet<u64> {
        &self.selected
    }

    /// Sample the battlefield once. `items` is whatever the per-screen
    /// navigator currently enumerates; `phase_active` is the host's report
    /// of the declaration phase.
    pub fn poll(
        &mut self,
        scene: &dyn Scene,
        extractor: &TextExtractor,
        items: &[ElementId],
        phase_active: bool,
        out: &mut dyn Announcer,
    ) {
        if !self.update_phase(phase_active) {
            return;
        }

        self.diff_assigned(scene, extractor, items, out);
        self.diff_selected(scene, items, out);
    }

    /// Tracks the phase edge. Resets tracked sets only on a true 0 -> 1
    /// transition; a transient false report mid-phase must not wipe state,
    /// so "exited" needs several consecutive false polls. Returns whether
    /// this poll should be processed at all.
    fn update_phase(&mut self, phase_active: bool) -> bool {
        if phase_active {
            if !self.in_phase {
                // True entry edge: fresh phase, fresh tracking.
                self.assigned.clear();
                self.selected.clear();
                self.in_phase = true;
            }
            self.off_streak = 0;
            true
        } else {
            if self.in_phase {
                self.off_streak += 1;
                if self.off_streak >= self.phase_exit_polls {
                    self.in_phase = false;
                    self.off_streak = 0;
                }
            }
            false
        }
    }

    // ------------------------------------------------------------------
    // Assigned tier
    // ------------------------------------------------------------------

    fn diff_assigned(
        &mut self,
        scene: &dyn Scene,
        extractor: &TextExtractor,
        items: &[ElementId],
        out: &mut dyn Announcer,
    ) {
        let current: BTreeSet<u64> = items
            .iter()
            .filter(|el| scene.alive(**el))
            .filter(|el| {
                scene
                    .field(**el, "assigned_to")
                    .map(|v| !v.as_refs().is_empty())
                    .unwrap_or(false)
            })
            .map(|el| el.0)
            .collect();

        if current == self.assigned {
            return;
        }

        for id in current.difference(&self.assigned) {
            let el = ElementId(*id);
            let name = extractor.card_name(scene, el);
            let counterparts = self.counterpart_names(scene, extractor, el);
            if counterparts.is_empty() {
                out.announce(&format!("{} assigned", name), Priority::High);
            } else {
                out.announce(
                    &format!("{} assigned to {}", name, counterparts.join(" and ")),
                    Priority::High,
                );
            }
        }

        self.assigned = current;
        // Committed items stop counting as merely selected.
        self.selected.clear();
    }

    /// Best-effort id -> name resolution of the items this one now links to.
    fn counterpart_names(
        &self,
        scene: &dyn Scene,
        extractor: &TextExtractor,
        el: ElementId,
    ) -> Vec<String> {
        let Some(value) = scene.field(el, "assigned_to") else { return vec![] };
        value
            .as_refs()
            .into_iter()
            .filter(|target| scene.alive(*target))
            .map(|target| extractor.card_name(scene, target))
            .filter(|name| !name.is_empty())
            .collect()
    }

    // ------------------------------------------------------------------
    // Selected tier
    // ------------------------------------------------------------------

    fn diff_selected(&mut self, scene: &dyn Scene, items: &[ElementId], out: &mut dyn Announcer) {
        let current: BTreeSet<u64> = items
            .iter()
            .filter(|el| scene.alive(**el))
            .filter(|el| !self.assigned.contains(&el.0))
            .filter(|el| {
                scene
                    .field(**el, "selected")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false)
            })
            .map(|el| el.0)
            .collect();

        if current == self.selected {
            return;
        }

        if current.is_empty() {
            out.announce("selection cleared", Priority::Normal);
        } else {
            let (power, toughness) = self.selection_totals(scene, &current);
            out.announce(
                &format!("{} selected, {} power, {} toughness", current.len(), power, toughness),
                Priority::Normal,
            );
        }

        self.selected = current;
    }

    fn selection_totals(&self, scene: &dyn Scene, ids: &BTreeSet<u64>) -> (i64, i64) {
        let mut power = 0i64;
        let mut toughness = 0i64;
        for id in ids {
            let el = ElementId(*id);
            if let Some(p) = scene.field(el, "power").and_then(|v| v.as_int()) {
                power += p;
            }
            if let Some(t) = scene.field(el, "toughness").and_then(|v| v.as_int()) {
                toughness += t;
            }
        }
        (power, toughness)
    }
}
