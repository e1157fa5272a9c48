const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;
const MODULUS: f64 = 4_294_967_296.0;

/// Linear congruential generator over `u32` state (Numerical Recipes constants).
///
/// Every instance owns its state; two generators built from the same seed yield identical
/// sequences. A zero seed is replaced by `1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededGenerator {
    state: u32,
}

impl SeededGenerator {
    /// Create a generator positioned before the first draw.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Advance the state and return a float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
        f64::from(self.state) / MODULUS
    }

    /// Draw uniformly from the half-open interval `[lo, lo + span)`.
    pub fn next_in(&mut self, lo: f64, span: f64) -> f64 {
        lo + self.next_f64() * span
    }
}

impl Iterator for SeededGenerator {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/rng.rs"]
mod tests;
