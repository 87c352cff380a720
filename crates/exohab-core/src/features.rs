use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Inclusive bounds for one feature score, keyed by its wire name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureBounds {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

pub const STELLAR_TEMPERATURE: FeatureBounds = FeatureBounds {
    name: "stellarTemperatureScore",
    min: 1.0,
    max: 100.0,
};
pub const STELLAR_RADIUS: FeatureBounds = FeatureBounds {
    name: "stellarRadiusScore",
    min: 1.0,
    max: 100.0,
};
pub const PLANET_RADIUS: FeatureBounds = FeatureBounds {
    name: "planetRadiusScore",
    min: 1.0,
    max: 100.0,
};
pub const INSOLATION: FeatureBounds = FeatureBounds {
    name: "insolationScore",
    min: 1.0,
    max: 100.0,
};
pub const ORBITAL_PERIOD: FeatureBounds = FeatureBounds {
    name: "orbitalPeriodScore",
    min: 1.0,
    max: 50.0,
};
pub const EQUILIBRIUM_TEMPERATURE: FeatureBounds = FeatureBounds {
    name: "equilibriumTemperatureScore",
    min: 1.0,
    max: 70.0,
};

// Order matches the field order of FeatureVector.
pub const FEATURE_BOUNDS: [FeatureBounds; 6] = [
    STELLAR_TEMPERATURE,
    STELLAR_RADIUS,
    PLANET_RADIUS,
    INSOLATION,
    ORBITAL_PERIOD,
    EQUILIBRIUM_TEMPERATURE,
];

/// The six bounded scores describing a candidate planet/star system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    pub stellar_temperature_score: f64,
    pub stellar_radius_score: f64,
    pub planet_radius_score: f64,
    pub insolation_score: f64,
    pub orbital_period_score: f64,
    pub equilibrium_temperature_score: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is missing or not a finite number")]
    InvalidType { field: &'static str },
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
}

impl FeatureVector {
    /// Validates an untyped request payload into a feature vector.
    ///
    /// Type defects (missing, non-numeric, non-finite) are reported before
    /// any range check runs; a payload carrying both kinds of defect is a
    /// type error. On success the six values are copied as-is, without
    /// normalization or rounding.
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let vector = Self {
            stellar_temperature_score: finite_score(payload, &STELLAR_TEMPERATURE)?,
            stellar_radius_score: finite_score(payload, &STELLAR_RADIUS)?,
            planet_radius_score: finite_score(payload, &PLANET_RADIUS)?,
            insolation_score: finite_score(payload, &INSOLATION)?,
            orbital_period_score: finite_score(payload, &ORBITAL_PERIOD)?,
            equilibrium_temperature_score: finite_score(payload, &EQUILIBRIUM_TEMPERATURE)?,
        };
        vector.check_ranges()?;
        Ok(vector)
    }

    fn check_ranges(&self) -> Result<(), ValidationError> {
        for (bounds, value) in FEATURE_BOUNDS.iter().zip(self.scores()) {
            if value < bounds.min || value > bounds.max {
                return Err(ValidationError::OutOfRange {
                    field: bounds.name,
                    min: bounds.min,
                    max: bounds.max,
                    value,
                });
            }
        }
        Ok(())
    }

    fn scores(&self) -> [f64; 6] {
        [
            self.stellar_temperature_score,
            self.stellar_radius_score,
            self.planet_radius_score,
            self.insolation_score,
            self.orbital_period_score,
            self.equilibrium_temperature_score,
        ]
    }
}

fn finite_score(payload: &Value, bounds: &FeatureBounds) -> Result<f64, ValidationError> {
    payload
        .get(bounds.name)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::InvalidType { field: bounds.name })
}
