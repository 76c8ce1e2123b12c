use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of uniform randomness for shuffles and placement jitter.
///
/// Injected into the controller so callers can replace entropy with a fixed sequence.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Next index in `0..bound`. `bound` must be > 0.
    fn next_index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        let i = (self.next_unit() * bound as f64) as usize;
        i.min(bound.saturating_sub(1))
    }
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Clone, Debug)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

/// Replays a fixed list of unit values, cycling when exhausted.
///
/// Values are clamped into `[0, 1)`. An empty script always yields `0.5`, which is the
/// zero point of symmetric jitter.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.5;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        if v.is_finite() {
            v.clamp(0.0, 1.0 - f64::EPSILON)
        } else {
            0.5
        }
    }
}

/// Uniform in-place Fisher-Yates shuffle.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/random.rs"]
mod tests;
