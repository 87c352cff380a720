use std::time::Duration;

/// Hosted habitability model scored against by default.
pub const DEFAULT_ENDPOINT: &str =
    "https://murtazamajid-planet-habitability-api.hf.space/predict";

/// Upper bound on one remote scoring attempt, connection included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct RemoteInferenceConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl RemoteInferenceConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Default for RemoteInferenceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}
