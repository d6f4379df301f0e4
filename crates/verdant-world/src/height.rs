//! Ground height field.

use noise::{NoiseFn, Value};

use crate::config::WorldConfig;

/// Weight of the broad noise layer.
const PRIMARY_WEIGHT: f64 = 0.85;

/// Weight of the detail noise layer.
const DETAIL_WEIGHT: f64 = 0.15;

/// Detail layer frequency relative to the primary layer.
const DETAIL_FREQUENCY: f64 = 4.0;

/// Maps world x to ground surface height.
///
/// Height is a baseline plus two layers of seeded value noise, clamped to
/// `[baseline - amplitude, baseline + amplitude]`. The result depends only
/// on the seed and `x`; the field holds no mutable state.
#[derive(Debug, Clone)]
pub struct HeightField {
    /// Ground level with zero noise
    baseline: f32,
    /// Maximum deviation from the baseline
    amplitude: f32,
    /// Noise wavelength in pixels
    wavelength: f64,
    /// Broad hills
    primary: Value,
    /// Small bumps
    detail: Value,
}

impl HeightField {
    /// Creates the height field described by `config`.
    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        let seed = fold_seed(config.seed);
        Self {
            baseline: config.ground_baseline(),
            amplitude: config.noise_amplitude,
            wavelength: f64::from(config.noise_wavelength()),
            primary: Value::new(seed),
            detail: Value::new(seed.wrapping_add(1)),
        }
    }

    /// Returns the ground height at world x.
    #[must_use]
    pub fn height(&self, x: f32) -> f32 {
        let u = f64::from(x) / self.wavelength;
        let broad = self.primary.get([u, 0.0]);
        let bumps = self.detail.get([u * DETAIL_FREQUENCY, 0.0]);
        let n = (broad * PRIMARY_WEIGHT + bumps * DETAIL_WEIGHT).clamp(-1.0, 1.0);
        self.baseline + self.amplitude * n as f32
    }
}

/// Folds a 64-bit world seed into the 32-bit seed the noise functions take.
fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_deterministic() {
        let a = HeightField::new(&WorldConfig::with_seed(42));
        let b = HeightField::new(&WorldConfig::with_seed(42));
        for x in (-3000..3000).step_by(7) {
            assert_eq!(a.height(x as f32).to_bits(), b.height(x as f32).to_bits());
        }
    }

    #[test]
    fn test_height_independent_of_call_order() {
        let field = HeightField::new(&WorldConfig::with_seed(3));
        let forward: Vec<f32> = (0..100).map(|x| field.height(x as f32 * 30.0)).collect();
        let backward: Vec<f32> = (0..100)
            .rev()
            .map(|x| field.height(x as f32 * 30.0))
            .collect();
        let reversed: Vec<f32> = backward.into_iter().rev().collect();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_height_bounded() {
        let config = WorldConfig::default();
        let field = HeightField::new(&config);
        let low = config.ground_baseline() - config.noise_amplitude;
        let high = config.ground_baseline() + config.noise_amplitude;
        for x in (-20_000..20_000).step_by(13) {
            let h = field.height(x as f32);
            assert!((low..=high).contains(&h), "height {h} out of band at {x}");
        }
    }

    #[test]
    fn test_height_continuous_across_block_edges() {
        let config = WorldConfig::default();
        let field = HeightField::new(&config);
        let block = config.block_size as f32;
        for k in -50..50 {
            let edge = k as f32 * block;
            let jump = (field.height(edge - 0.01) - field.height(edge)).abs();
            assert!(jump < 1.0, "discontinuity {jump} at {edge}");
        }
    }

    #[test]
    fn test_height_varies() {
        let field = HeightField::new(&WorldConfig::default());
        let first = field.height(0.0);
        assert!((1..200).any(|k| (field.height(k as f32 * 30.0) - first).abs() > 1.0));
    }

    #[test]
    fn test_different_seeds_different_heights() {
        let a = HeightField::new(&WorldConfig::with_seed(1));
        let b = HeightField::new(&WorldConfig::with_seed(2));
        assert!((0..100).any(|k| a.height(k as f32 * 30.0) != b.height(k as f32 * 30.0)));
    }
}
