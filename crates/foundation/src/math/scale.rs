//! Linear domain → range mapping with "nice" tick generation.

/// A linear mapping from a data domain onto a visual range.
///
/// Values outside the domain extrapolate; nothing is clamped. A degenerate
/// domain (`d0 == d1`) maps every input to the start of the range.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    pub fn map(&self, v: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return r0;
        }
        r0 + (v - d0) / span * (r1 - r0)
    }

    /// Range → domain. A degenerate range maps back to the start of the domain.
    pub fn invert(&self, v: f64) -> f64 {
        LinearScale::new(self.range, self.domain).map(v)
    }

    /// Up to roughly `count` evenly spaced, human-friendly values covering the domain.
    ///
    /// The step is a power of ten multiplied by 1, 2, 5 or 10, whichever lands
    /// closest to `span / count`. Ticks are returned in ascending order.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let Some(step) = self.tick_step(count) else {
            return Vec::new();
        };
        let (lo, hi) = self.extent();
        let first = (lo / step - 1e-9).ceil() as i64;
        let last = (hi / step + 1e-9).floor() as i64;
        let decimals = step_decimals(step);
        (first..=last)
            .map(|i| round_to(i as f64 * step, decimals))
            .collect()
    }

    /// Shortest decimal rendering of `tick` at the precision implied by `count` ticks.
    pub fn tick_format(&self, count: usize, tick: f64) -> String {
        let decimals = self.tick_step(count).map(step_decimals).unwrap_or(0);
        format_trimmed(tick, decimals)
    }

    fn extent(&self) -> (f64, f64) {
        let [a, b] = self.domain;
        if a <= b { (a, b) } else { (b, a) }
    }

    fn tick_step(&self, count: usize) -> Option<f64> {
        let (lo, hi) = self.extent();
        let span = hi - lo;
        if count == 0 || !span.is_finite() || span <= 0.0 {
            return None;
        }
        let m = count as f64;
        let mut step = 10f64.powf((span / m).log10().floor());
        let err = m / span * step;
        if err <= 0.15 {
            step *= 10.0;
        } else if err <= 0.35 {
            step *= 5.0;
        } else if err <= 0.75 {
            step *= 2.0;
        }
        Some(step)
    }
}

fn step_decimals(step: f64) -> usize {
    let p = -(step.log10() + 0.01).floor();
    if p > 0.0 { p as usize } else { 0 }
}

fn round_to(v: f64, decimals: usize) -> f64 {
    let k = 10f64.powi(decimals as i32);
    let r = (v * k).round() / k;
    if r == 0.0 { 0.0 } else { r }
}

fn format_trimmed(v: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, round_to(v, decimals));
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
