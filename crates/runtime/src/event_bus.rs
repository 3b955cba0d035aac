use crate::frame::Frame;

/// Structured diagnostic record.
///
/// `kind` is a stable dotted identifier (`"bind.empty_rows"`); `message` is
/// free text for humans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub frame_index: u64,
    pub kind: &'static str,
    pub message: String,
}

/// Append-only diagnostic log, drained by the host.
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, frame: Frame, kind: &'static str, message: impl Into<String>) {
        self.events.push(Event {
            frame_index: frame.index,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn count(&self, kind: &str) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use crate::frame::Frame;
    use foundation::time::Time;

    #[test]
    fn records_events_with_frame_index() {
        let mut bus = EventBus::new();
        let f = Frame::new(2, Time(0.1));
        bus.emit(f, "test", "hello");
        assert_eq!(bus.events().len(), 1);
        assert_eq!(bus.events()[0].frame_index, 2);
        assert_eq!(bus.count("test"), 1);
        assert_eq!(bus.count("other"), 0);
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(Frame::first(Time::ZERO), "k", "m");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.events().is_empty());
    }
}
