use std::sync::Arc;

use crate::config::RemoteInferenceConfig;
use crate::error::ProviderError;
use crate::providers::HttpInferenceProvider;
use crate::traits::InferenceProvider;

pub fn build_inference_provider(
    cfg: RemoteInferenceConfig,
) -> Result<Arc<dyn InferenceProvider>, ProviderError> {
    Ok(Arc::new(HttpInferenceProvider::new(cfg)?))
}
