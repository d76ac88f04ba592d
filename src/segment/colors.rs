use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

/// Supplies one overlay color per committed region.
pub trait ColorSource {
    fn next_color(&mut self) -> Rgb;
}

/// Uniform random colors, reproducible when built from a fixed seed.
#[derive(Debug, Clone)]
pub struct SeededColors {
    rng: StdRng,
}

impl SeededColors {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl ColorSource for SeededColors {
    fn next_color(&mut self) -> Rgb {
        let mut channels = [0u8; 3];
        self.rng.fill(&mut channels);
        Rgb(channels)
    }
}
