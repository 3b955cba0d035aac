/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64); // seconds

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn from_millis(ms: f64) -> Self {
        Time(ms / 1000.0)
    }

    pub fn seconds(self) -> f64 {
        self.0
    }

    pub fn after(self, seconds: f64) -> Self {
        Time(self.0 + seconds)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    pub fn instant(t: Time) -> Self {
        Self { start: t, end: t }
    }

    /// A span beginning at `start` and lasting `seconds` (negative lengths clamp to zero).
    pub fn starting_at(start: Time, seconds: f64) -> Self {
        Self {
            start,
            end: start.after(seconds.max(0.0)),
        }
    }

    pub fn duration(&self) -> f64 {
        (self.end.0 - self.start.0).max(0.0)
    }

    /// Normalized position of `t` inside the span, clamped to `[0, 1]`.
    ///
    /// Zero-length spans are complete as soon as they start.
    pub fn progress(&self, t: Time) -> f64 {
        let d = self.duration();
        if d <= 0.0 {
            return if t.0 >= self.start.0 { 1.0 } else { 0.0 };
        }
        ((t.0 - self.start.0) / d).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, t: Time) -> bool {
        t.0 >= self.end.0
    }
}
