use crate::announce::{NarratorOutput, Priority};
use crate::config::NarratorConfig;
use crate::host::element::Host;
use crate::input::Key;
use crate::text::extract::TextExtractor;
use crate::tick::TickScheduler;
use crate::zones::model::{BrowserDescriptor, BrowserKind, Zone, ZoneItem};
use crate::zones::strategy::{ZoneSource, source_for};

// ============================================================================
// Two-bucket selection navigator
// ============================================================================
//
// State machine: Inactive -> Active(zone=None) -> Active(zone=Top|Bottom),
// with an index into the current zone's list. Boundary policy is clamp with
// a boundary announcement: one policy, held for the navigator's lifetime.

enum NavTask {
    RescanAfterMove,
}

pub struct ZoneNavigator {
    descriptor: Option<BrowserDescriptor>,
    source: Option<Box<dyn ZoneSource>>,
    zone: Zone,
    index: isize,
    top: Vec<ZoneItem>,
    bottom: Vec<ZoneItem>,
    scheduler: TickScheduler<NavTask>,
    settle_ticks: u32,
    mulligan_count: u32,
    selections_committed: u32,
}

impl ZoneNavigator {
    pub fn new(config: &NarratorConfig) -> Self {
        ZoneNavigator {
            descriptor: None,
            source: None,
            zone: Zone::None,
            index: -1,
            top: Vec::new(),
            bottom: Vec::new(),
            scheduler: TickScheduler::new(),
            settle_ticks: config.timing.move_settle_ticks,
            mulligan_count: 0,
            selections_committed: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.descriptor.is_some()
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn current_index(&self) -> isize {
        self.index
    }

    pub fn items(&self, zone: Zone) -> &[ZoneItem] {
        match zone {
            Zone::Top => &self.top,
            Zone::Bottom => &self.bottom,
            Zone::None => &[],
        }
    }

    pub fn current_item(&self) -> Option<&ZoneItem> {
        let items = self.items(self.zone);
        usize::try_from(self.index).ok().and_then(|i| items.get(i))
    }

    /// Mulligans taken this session: one per activation of a mulligan-kind
    /// browser. Reset by `reset_session`, not by deactivation.
    pub fn mulligan_count(&self) -> u32 {
        self.mulligan_count
    }

    /// Successful moves within the current workflow occurrence.
    pub fn selections_committed(&self) -> u32 {
        self.selections_committed
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    pub fn activate(&mut self, descriptor: BrowserDescriptor) {
        self.source = Some(source_for(&descriptor.layout));
        if descriptor.kind == BrowserKind::Mulligan {
            self.mulligan_count += 1;
        }
        self.descriptor = Some(descriptor);
        self.zone = Zone::None;
        self.index = -1;
        self.top.clear();
        self.bottom.clear();
        self.scheduler.cancel_all();
    }

    pub fn deactivate(&mut self) {
        self.descriptor = None;
        self.source = None;
        self.zone = Zone::None;
        self.index = -1;
        self.top.clear();
        self.bottom.clear();
        self.scheduler.cancel_all();
        self.selections_committed = 0;
    }

    /// New game/session: reset counters whose scope outlives one browser.
    pub fn reset_session(&mut self) {
        self.mulligan_count = 0;
    }

    /// Rebuild both item lists from the live scene.
    pub fn refresh(&mut self, host: &dyn Host, extractor: &TextExtractor) {
        if let Some(source) = &self.source {
            let (top, bottom) = source.refresh(host, extractor);
            self.top = top;
            self.bottom = bottom;
        }
    }

    pub fn enter_zone(
        &mut self,
        host: &dyn Host,
        extractor: &TextExtractor,
        zone: Zone,
        out: &mut dyn NarratorOutput,
    ) {
        if !self.is_active() || zone == Zone::None {
            return;
        }
        self.refresh(host, extractor);
        self.zone = zone;

        let label = self.zone_label(zone);
        let count = self.items(zone).len();
        if count == 0 {
            self.index = -1;
            out.interrupt(&format!("{}, empty", label));
            return;
        }

        let first = self.items(zone)[0].clone();
        self.index = 0;
        out.interrupt(&format!("{}, {} items. {}", label, count, first.label));
        out.prepare_for_card(first.element, zone);
    }

    // ------------------------------------------------------------------
    // Key dispatch
    // ------------------------------------------------------------------

    /// Returns whether the navigator consumed the event.
    pub fn handle_key(
        &mut self,
        host: &mut dyn Host,
        extractor: &TextExtractor,
        key: Key,
        out: &mut dyn NarratorOutput,
    ) -> bool {
        if !self.is_active() {
            return false;
        }
        match key {
            Key::Up => self.enter_zone(host, extractor, Zone::Top, out),
            Key::Down => self.enter_zone(host, extractor, Zone::Bottom, out),
            Key::Left => self.step(-1, out),
            Key::Right => self.step(1, out),
            Key::Home => self.jump(0, out),
            Key::End => {
                let last = self.items(self.zone).len() as isize - 1;
                self.jump(last, out);
            }
            Key::Enter | Key::Space => self.activate_current(host, out),
            _ => return false,
        }
        true
    }

    fn step(&mut self, delta: isize, out: &mut dyn NarratorOutput) {
        if self.zone == Zone::None || self.index < 0 {
            out.announce("nothing selected", Priority::Normal);
            return;
        }
        let len = self.items(self.zone).len() as isize;
        let next = self.index + delta;
        if next < 0 {
            out.interrupt(&format!("start of {}", self.zone_label(self.zone)));
            return;
        }
        if next >= len {
            out.interrupt(&format!("end of {}", self.zone_label(self.zone)));
            return;
        }
        self.index = next;
        self.announce_current(out);
    }

    fn jump(&mut self, index: isize, out: &mut dyn NarratorOutput) {
        if self.zone == Zone::None || self.items(self.zone).is_empty() {
            out.announce("nothing selected", Priority::Normal);
            return;
        }
        self.index = index.max(0);
        self.announce_current(out);
    }

    fn announce_current(&self, out: &mut dyn NarratorOutput) {
        if let Some(item) = self.current_item() {
            out.interrupt(&item.label);
            out.prepare_for_card(item.element, self.zone);
        }
    }

    // ------------------------------------------------------------------
    // Moving items
    // ------------------------------------------------------------------

    pub fn activate_current(&mut self, host: &mut dyn Host, out: &mut dyn NarratorOutput) {
        let Some(item) = self.current_item().cloned() else {
            out.announce("nothing selected", Priority::Normal);
            return;
        };
        let result = match &self.source {
            Some(source) => source.move_item(host, &item),
            None => return,
        };

        match result {
            Ok(()) => {
                self.selections_committed += 1;
                self.scheduler.schedule(self.settle_ticks, NavTask::RescanAfterMove);
            }
            Err(e) => {
                // Host layout mismatch or stale item: report, change nothing.
                eprintln!("Warning: zone move failed: {}", e);
                out.announce(&format!("could not move {}", item.label), Priority::Normal);
            }
        }
    }

    /// Per-frame advance: runs any settle-delayed rescan that came due.
    pub fn tick(&mut self, host: &dyn Host, extractor: &TextExtractor, out: &mut dyn NarratorOutput) {
        for task in self.scheduler.tick() {
            match task {
                NavTask::RescanAfterMove => {
                    // Owner may have deactivated while the delay ran.
                    if !self.is_active() {
                        continue;
                    }
                    self.refresh(host, extractor);
                    self.clamp_index();
                    self.announce_after_move(out);
                }
            }
        }
    }

    fn clamp_index(&mut self) {
        let len = self.items(self.zone).len() as isize;
        if len == 0 {
            self.index = -1;
        } else if self.index >= len {
            self.index = len - 1;
        } else if self.index < 0 {
            self.index = 0;
        }
    }

    fn announce_after_move(&self, out: &mut dyn NarratorOutput) {
        match self.current_item() {
            Some(item) => {
                out.interrupt(&item.label);
                out.prepare_for_card(item.element, self.zone);
            }
            None => {
                if self.zone != Zone::None {
                    out.interrupt(&format!("{}, empty", self.zone_label(self.zone)));
                }
            }
        }
        if let Some(n) = self.descriptor.as_ref().and_then(|d| d.target_count) {
            out.announce(
                &format!("{} of {} selected", self.bottom.len(), n),
                Priority::Normal,
            );
        }
    }

    fn zone_label(&self, zone: Zone) -> String {
        let Some(d) = &self.descriptor else { return String::new() };
        match zone {
            Zone::Top => d.top_label.clone(),
            Zone::Bottom => d.bottom_label.clone(),
            Zone::None => String::new(),
        }
    }
}
