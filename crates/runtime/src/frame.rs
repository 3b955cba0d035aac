use foundation::time::Time;

/// Frame metadata: a monotonically increasing index stamped with host time.
///
/// Hosts drive frames from their own clock (`requestAnimationFrame`, a test
/// loop, a CLI simulation); the runtime never reads a wall clock itself.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Host time at the start of the frame.
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, time: Time) -> Self {
        Self { index, time }
    }

    pub fn first(time: Time) -> Self {
        Self::new(0, time)
    }

    /// The following frame at `time`. Time never runs backwards.
    pub fn next_at(self, time: Time) -> Self {
        let t = if time.0 < self.time.0 { self.time } else { time };
        Self::new(self.index + 1, t)
    }
}
