//! Computer play generation.
//!
//! The generator is fed by an injected [`UniformSource`] so callers can swap
//! the thread RNG for a seeded or scripted sequence.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::model::game::Play;

/// A source of samples in `[0, 1)`.
pub trait UniformSource {
    fn sample(&mut self) -> f64;
}

impl<S: UniformSource + ?Sized> UniformSource for Box<S> {
    fn sample(&mut self) -> f64 {
        (**self).sample()
    }
}

pub struct RngSource<R>(pub R);

impl<R: Rng> UniformSource for RngSource<R> {
    fn sample(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

impl RngSource<StdRng> {
    /// Seeded when `seed` is given, otherwise seeded from the OS.
    pub fn std(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => RngSource(StdRng::seed_from_u64(seed)),
            None => RngSource(StdRng::from_os_rng()),
        }
    }
}

/// Cycles through a fixed list of samples.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<f64>,
    cursor: usize,
}

impl FixedSequence {
    /// An empty list behaves like a source that always yields `0.0`.
    pub fn new(values: Vec<f64>) -> Self {
        FixedSequence { values, cursor: 0 }
    }
}

impl UniformSource for FixedSequence {
    fn sample(&mut self) -> f64 {
        let Some(value) = self.values.get(self.cursor % self.values.len().max(1)) else {
            return 0.0;
        };
        self.cursor += 1;
        *value
    }
}

pub struct ChoiceGenerator<S> {
    source: S,
}

impl<S: UniformSource> ChoiceGenerator<S> {
    pub fn new(source: S) -> Self {
        ChoiceGenerator { source }
    }

    pub fn next(&mut self) -> Play {
        let count = Play::ALL.len();
        let scaled = (self.source.sample() * count as f64).floor();
        // Out-of-range samples clamp to the nearest play; NaN maps to the first.
        let index = if scaled.is_nan() {
            0
        } else {
            scaled.clamp(0.0, (count - 1) as f64) as usize
        };
        Play::ALL[index]
    }
}
