/// Linear congruential generator over `u32` wraparound arithmetic.
///
/// The same seed produces the same stream in any language that does 32-bit
/// unsigned wrapping multiplication and addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

pub const LCG_MULTIPLIER: u32 = 1_664_525;
pub const LCG_INCREMENT: u32 = 1_013_904_223;

const TWO_POW_32: f64 = 4_294_967_296.0;

impl SeededRng {
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    #[must_use]
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advances the state and returns a value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let (value, state) = next(self.state);
        self.state = state;
        value
    }

    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// `-1.0` or `1.0`, one draw.
    pub fn sign(&mut self) -> f64 {
        if self.next_f64() < 0.5 { -1.0 } else { 1.0 }
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }
}

/// Pure form of the recurrence: `state' = state * A + C (mod 2^32)`.
#[must_use]
pub fn next(state: u32) -> (f64, u32) {
    let state = state
        .wrapping_mul(LCG_MULTIPLIER)
        .wrapping_add(LCG_INCREMENT);
    (f64::from(state) / TWO_POW_32, state)
}
