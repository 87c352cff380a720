pub mod http;

pub use http::HttpInferenceProvider;
