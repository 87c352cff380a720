use std::io;
use std::time::Duration;

use tracing::{info, warn};

use exohab_api::{PredictionServer, PredictionService};
use exohab_infer::{DEFAULT_ENDPOINT, RemoteInferenceConfig, build_inference_provider};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt::init();

    let addr = std::env::var("EXOHAB_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8880".to_string());
    let mode = std::env::var("EXOHAB_INFERENCE_MODE").unwrap_or_else(|_| "remote".to_string());

    let provider = match mode.as_str() {
        "remote" => {
            let endpoint = std::env::var("EXOHAB_INFERENCE_URL")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
            let timeout_ms = env_u64("EXOHAB_INFERENCE_TIMEOUT_MS", 10_000, 100, 60_000);
            let mut config = RemoteInferenceConfig::new(endpoint);
            config.timeout = Duration::from_millis(timeout_ms);
            info!(endpoint = %config.endpoint, timeout_ms, "remote inference enabled");
            match build_inference_provider(config) {
                Ok(provider) => Some(provider),
                Err(err) => {
                    warn!(error = %err, "remote inference unavailable, serving local heuristic only");
                    None
                }
            }
        }
        "local" => {
            info!("remote inference disabled, serving local heuristic only");
            None
        }
        _ => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "EXOHAB_INFERENCE_MODE must be remote or local",
            ));
        }
    };

    let server = PredictionServer::new(PredictionService::new(provider));
    server.serve_http(&addr)
}

fn env_u64(name: &str, default: u64, min: u64, max: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
        .clamp(min, max)
}
