pub mod server;
pub mod service;

pub use server::PredictionServer;
pub use service::{PredictionDiagnostics, PredictionService, TracingDiagnostics};
