use std::fmt::Debug;

use async_trait::async_trait;

use exohab_core::FeatureVector;

use crate::error::ProviderError;

#[async_trait]
pub trait InferenceProvider: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Scores one validated feature vector. The returned value is raw,
    /// not yet rounded for presentation.
    async fn score(&self, features: &FeatureVector) -> Result<f64, ProviderError>;
}
