use foundation::time::Time;

/// Repeating timer with a fixed period, polled by the host.
///
/// `poll` fires at most once per call. If the host stalls for several
/// periods the missed firings are coalesced into one, so a callback driven by
/// this timer never runs back-to-back to catch up.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Interval {
    period_s: f64,
    origin: Option<Time>,
    next_slot: u64,
    fired: u64,
}

impl Interval {
    /// Non-positive or non-finite periods are treated as "fire on every poll".
    pub fn new(period_s: f64) -> Self {
        let period_s = if period_s.is_finite() && period_s > 0.0 {
            period_s
        } else {
            0.0
        };
        Self {
            period_s,
            origin: None,
            next_slot: 1,
            fired: 0,
        }
    }

    pub fn period_s(&self) -> f64 {
        self.period_s
    }

    /// Number of firings so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Starts (or restarts) the timer: the first firing is one period after `now`.
    pub fn start(&mut self, now: Time) {
        self.origin = Some(now);
        self.next_slot = 1;
    }

    /// When the next firing is due, if the timer is running.
    ///
    /// Firing `n` is due at `start + n * period`, computed directly so long
    /// runs do not drift.
    pub fn next_due(&self) -> Option<Time> {
        self.origin
            .map(|origin| origin.after(self.period_s * self.next_slot as f64))
    }

    /// Returns `true` if the timer fired at `now`.
    pub fn poll(&mut self, now: Time) -> bool {
        let (Some(origin), Some(due)) = (self.origin, self.next_due()) else {
            return false;
        };
        if now.0 < due.0 {
            return false;
        }
        if self.period_s > 0.0 {
            let elapsed = ((now.0 - origin.0) / self.period_s).floor() as u64;
            self.next_slot = elapsed.max(self.next_slot) + 1;
        }
        self.fired += 1;
        true
    }
}
