use reqwest::Client;
use serde::{Deserialize, Serialize};

use exohab_core::FeatureVector;

use crate::config::RemoteInferenceConfig;
use crate::error::ProviderError;
use crate::traits::InferenceProvider;

#[derive(Clone, Debug)]
pub struct HttpInferenceProvider {
    config: RemoteInferenceConfig,
    client: Client,
}

impl HttpInferenceProvider {
    pub fn new(config: RemoteInferenceConfig) -> Result<Self, ProviderError> {
        if config.endpoint.trim().is_empty() {
            return Err(ProviderError::Config(
                "inference endpoint is empty".to_string(),
            ));
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }
}

#[async_trait::async_trait]
impl InferenceProvider for HttpInferenceProvider {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn score(&self, features: &FeatureVector) -> Result<f64, ProviderError> {
        let payload = ScoreRequest {
            stellar_temperature_score: features.stellar_temperature_score,
            stellar_radius_score: features.stellar_radius_score,
            planet_radius_score: features.planet_radius_score,
            insolation_score: features.insolation_score,
            orbital_period_score: features.orbital_period_score,
            equilibrium_temperature_score: features.equilibrium_temperature_score,
        };

        let res = self
            .client
            .post(&self.config.endpoint)
            .json(&payload)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }

        let body = res.text().await?;
        let parsed: ScoreResponse = serde_json::from_str(&body)?;
        parsed
            .habitability_score
            .or(parsed.score)
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                ProviderError::InvalidResponse("no habitability score in response".to_string())
            })
    }
}

// The hosted model expects snake_case feature names on the wire.
#[derive(Debug, Serialize)]
struct ScoreRequest {
    stellar_temperature_score: f64,
    stellar_radius_score: f64,
    planet_radius_score: f64,
    insolation_score: f64,
    orbital_period_score: f64,
    equilibrium_temperature_score: f64,
}

// Deployments disagree on the score field name; accept either.
#[derive(Debug, Deserialize)]
struct ScoreResponse {
    habitability_score: Option<f64>,
    score: Option<f64>,
}
