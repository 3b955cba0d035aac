/// Small deterministic xorshift32 generator.
///
/// Enough for demo data and jitter; not suitable for anything security related.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rng {
    state: u32,
}

impl Rng {
    /// Zero is not a valid xorshift state; it is replaced with a fixed odd seed.
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { 0x9E37_79B9 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Uniform value in `[0, 1)` with 24 bits of resolution.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u32() >> 8) as f64 * (1.0 / 16_777_216.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Rng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn unit_values_stay_in_range() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn zero_seed_still_produces_values() {
        let mut rng = Rng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }
}
