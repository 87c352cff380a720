use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};

use crate::features::{EQUILIBRIUM_TEMPERATURE, FeatureVector, ORBITAL_PERIOD};

/// Half-width of the interval jitter samples are drawn from.
pub const JITTER_SPAN: f64 = 2.0;

/// Source of the small random perturbation folded into local estimates.
pub trait JitterSource: Send + Sync {
    /// Returns a value in `[-JITTER_SPAN, JITTER_SPAN]`.
    fn sample(&self) -> f64;
}

/// Default jitter source, seeded from hasher entropy on every draw.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyJitter;

impl JitterSource for EntropyJitter {
    fn sample(&self) -> f64 {
        let bits = RandomState::new().build_hasher().finish();
        let unit = (bits >> 11) as f64 / (1u64 << 53) as f64;
        (unit - 0.5) * 2.0 * JITTER_SPAN
    }
}

/// Jitter pinned to a single value, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn sample(&self) -> f64 {
        self.0
    }
}

/// Local habitability estimate used when remote inference is unavailable.
///
/// Weighted blend of the six scores (orbital period and equilibrium
/// temperature are rescaled to the common 0-100 range first), reduced as
/// equilibrium temperature drifts from 55 and insolation from 70, shifted
/// by the sampled jitter, then clamped to `[0, 100]`.
pub fn mock_habitability(features: &FeatureVector, jitter: &dyn JitterSource) -> f64 {
    let mut prediction = features.stellar_temperature_score * 0.18
        + features.stellar_radius_score * 0.18
        + features.planet_radius_score * 0.18
        + features.insolation_score * 0.18
        + features.orbital_period_score / ORBITAL_PERIOD.max * 100.0 * 0.16
        + features.equilibrium_temperature_score / EQUILIBRIUM_TEMPERATURE.max * 100.0 * 0.12;

    prediction -= (features.equilibrium_temperature_score - 55.0).abs() * 0.15;
    prediction -= (features.insolation_score - 70.0).abs() * 0.10;
    prediction += jitter.sample();

    prediction.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn balanced() -> FeatureVector {
        FeatureVector {
            stellar_temperature_score: 75.0,
            stellar_radius_score: 80.0,
            planet_radius_score: 85.0,
            insolation_score: 70.0,
            orbital_period_score: 40.0,
            equilibrium_temperature_score: 55.0,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn balanced_vector_scores_without_penalties() {
        let score = mock_habitability(&balanced(), &FixedJitter(0.0));
        // 13.5 + 14.4 + 15.3 + 12.6 + 12.8 + 9.428571..., deviations zero.
        assert!(close(score, 78.028_571_428_571_43), "got {score}");
    }

    #[test]
    fn maxima_stay_inside_the_scale_even_with_positive_jitter() {
        let features = FeatureVector {
            stellar_temperature_score: 100.0,
            stellar_radius_score: 100.0,
            planet_radius_score: 100.0,
            insolation_score: 100.0,
            orbital_period_score: 50.0,
            equilibrium_temperature_score: 70.0,
        };
        let score = mock_habitability(&features, &FixedJitter(JITTER_SPAN));
        // Full blend of 100 minus the 2.25 and 3.0 deviations, plus 2.
        assert!(close(score, 96.75), "got {score}");
    }

    #[test]
    fn minima_clamp_to_the_scale_floor() {
        let features = FeatureVector {
            stellar_temperature_score: 1.0,
            stellar_radius_score: 1.0,
            planet_radius_score: 1.0,
            insolation_score: 1.0,
            orbital_period_score: 1.0,
            equilibrium_temperature_score: 1.0,
        };
        let score = mock_habitability(&features, &FixedJitter(-JITTER_SPAN));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn jitter_shifts_the_estimate_by_its_sampled_value() {
        let base = mock_habitability(&balanced(), &FixedJitter(0.0));
        let shifted = mock_habitability(&balanced(), &FixedJitter(1.5));
        assert!(close(shifted - base, 1.5));
    }

    #[test]
    fn insolation_deviation_is_penalized() {
        let mut off_target = balanced();
        off_target.insolation_score = 50.0;
        let base = mock_habitability(&balanced(), &FixedJitter(0.0));
        let penalized = mock_habitability(&off_target, &FixedJitter(0.0));
        // 20 points of drift: 3.6 lost weight plus a 2.0 deviation penalty.
        assert!(close(base - penalized, 5.6), "got {}", base - penalized);
    }

    #[test]
    fn equilibrium_deviation_is_penalized() {
        let mut off_target = balanced();
        off_target.equilibrium_temperature_score = 41.0;
        let base = mock_habitability(&balanced(), &FixedJitter(0.0));
        let penalized = mock_habitability(&off_target, &FixedJitter(0.0));
        // 14 points of drift: 2.4 lost weight plus a 2.1 deviation penalty.
        assert!(close(base - penalized, 4.5), "got {}", base - penalized);
    }

    #[test]
    fn entropy_jitter_stays_within_span_and_varies() {
        let jitter = EntropyJitter;
        let mut seen = HashSet::new();
        for _ in 0..64 {
            let sample = jitter.sample();
            assert!(sample.abs() <= JITTER_SPAN, "sample {sample} out of span");
            seen.insert(sample.to_bits());
        }
        assert!(seen.len() > 1, "entropy jitter produced a constant");
    }
}
