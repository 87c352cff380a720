use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use exohab_core::{
    EntropyJitter, FeatureVector, JitterSource, ModelSource, PredictionResult, ValidationError,
    mock_habitability,
};
use exohab_infer::InferenceProvider;

/// Observer for prediction outcomes. The service reports every request
/// through this, so callers can count and log without owning the flow.
pub trait PredictionDiagnostics: Send + Sync {
    fn rejected(&self, error: &ValidationError);
    fn remote_scored(&self, provider: &str, score: f64);
    fn fallback_engaged(&self, provider: &str, reason: &str);
}

/// Default diagnostics sink, emitting structured log events.
pub struct TracingDiagnostics;

impl PredictionDiagnostics for TracingDiagnostics {
    fn rejected(&self, error: &ValidationError) {
        warn!(error = %error, "prediction request rejected");
    }

    fn remote_scored(&self, provider: &str, score: f64) {
        info!(provider, score, "remote inference answered");
    }

    fn fallback_engaged(&self, provider: &str, reason: &str) {
        warn!(provider, reason, "falling back to local heuristic");
    }
}

/// Runs one prediction end to end: validate the payload, give the remote
/// model a single chance, and degrade to the local heuristic on any
/// failure. Requests never fail because the remote side is down.
pub struct PredictionService {
    provider: Option<Arc<dyn InferenceProvider>>,
    jitter: Box<dyn JitterSource>,
    diagnostics: Arc<dyn PredictionDiagnostics>,
}

impl PredictionService {
    pub fn new(provider: Option<Arc<dyn InferenceProvider>>) -> Self {
        Self::with_parts(
            provider,
            Box::new(EntropyJitter),
            Arc::new(TracingDiagnostics),
        )
    }

    pub fn with_parts(
        provider: Option<Arc<dyn InferenceProvider>>,
        jitter: Box<dyn JitterSource>,
        diagnostics: Arc<dyn PredictionDiagnostics>,
    ) -> Self {
        Self {
            provider,
            jitter,
            diagnostics,
        }
    }

    /// Scores one request payload. `Err` means the payload failed
    /// validation; backend trouble is absorbed into a mock-sourced result.
    pub fn predict(&self, payload: &Value) -> Result<PredictionResult, ValidationError> {
        let features = match FeatureVector::from_payload(payload) {
            Ok(features) => features,
            Err(err) => {
                self.diagnostics.rejected(&err);
                return Err(err);
            }
        };

        if let Some(provider) = &self.provider {
            match remote_score(provider.as_ref(), &features) {
                Ok(score) => {
                    self.diagnostics.remote_scored(provider.name(), score);
                    return Ok(PredictionResult::new(score, ModelSource::Real));
                }
                Err(reason) => {
                    self.diagnostics.fallback_engaged(provider.name(), &reason);
                }
            }
        } else {
            self.diagnostics
                .fallback_engaged("none", "remote inference disabled");
        }

        let score = mock_habitability(&features, self.jitter.as_ref());
        Ok(PredictionResult::new(score, ModelSource::Mock))
    }
}

fn remote_score(
    provider: &dyn InferenceProvider,
    features: &FeatureVector,
) -> Result<f64, String> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| format!("inference runtime initialization failed: {e}"))?;
    rt.block_on(async { provider.score(features).await })
        .map_err(|e| format!("remote inference failed: {e}"))
}
