use crate::host::element::ElementId;
use crate::zones::model::Zone;

/// Announcement urgency. The collaborator owns queueing and interruption
/// policy; the narrator only labels what it emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Normal,
    High,
}

/// The screen-reader-facing collaborator.
pub trait Announcer {
    fn announce(&mut self, text: &str, priority: Priority);

    /// Interrupting variant: spoken immediately, cutting off queued speech.
    fn interrupt(&mut self, text: &str);
}

/// The card-detail collaborator: told which item currently has focus so it
/// can serve follow-up detail queries.
pub trait CardDetailSink {
    fn prepare_for_card(&mut self, element: ElementId, zone: Zone);
}

/// Combined output seam handed to navigators.
pub trait NarratorOutput: Announcer + CardDetailSink {}

impl<T: Announcer + CardDetailSink> NarratorOutput for T {}

/// Buffering implementation used by the replay harness and tests.
#[derive(Debug, Default)]
pub struct BufferOutput {
    pub messages: Vec<(String, Priority)>,
    pub focused: Vec<(ElementId, Zone)>,
}

impl BufferOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.messages.iter().map(|(t, _)| t.as_str()).collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|(t, _)| t.contains(needle))
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(|(t, _)| t.as_str())
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.focused.clear();
    }
}

impl Announcer for BufferOutput {
    fn announce(&mut self, text: &str, priority: Priority) {
        self.messages.push((text.to_string(), priority));
    }

    fn interrupt(&mut self, text: &str) {
        self.messages.push((text.to_string(), Priority::High));
    }
}

impl CardDetailSink for BufferOutput {
    fn prepare_for_card(&mut self, element: ElementId, zone: Zone) {
        self.focused.push((element, zone));
    }
}
