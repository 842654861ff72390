// ============================================================================
// Tick scheduler
// ============================================================================
//
// The host's single thread must keep rendering, so "wait N frames, then act"
// is a resumable counter checked once per tick, never a blocking wait. Each
// component owns its scheduler; deactivating the component cancels every
// pending task it scheduled.

struct Pending<T> {
    remaining: u32,
    task: T,
}

pub struct TickScheduler<T> {
    pending: Vec<Pending<T>>,
}

impl<T> Default for TickScheduler<T> {
    fn default() -> Self {
        TickScheduler { pending: Vec::new() }
    }
}

impl<T> TickScheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay_ticks` more calls to `tick`. A zero delay
    /// fires on the next tick, never synchronously.
    pub fn schedule(&mut self, delay_ticks: u32, task: T) {
        self.pending.push(Pending { remaining: delay_ticks.max(1), task });
    }

    /// Abandon everything pending. Owner deactivated.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance one frame; returns the tasks that came due.
    pub fn tick(&mut self) -> Vec<T> {
        for p in &mut self.pending {
            p.remaining = p.remaining.saturating_sub(1);
        }
        let mut due = Vec::new();
        let mut remaining = Vec::new();
        for p in self.pending.drain(..) {
            if p.remaining == 0 {
                due.push(p.task);
            } else {
                remaining.push(p);
            }
        }
        self.pending = remaining;
        due
    }
}
