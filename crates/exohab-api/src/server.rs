use std::io::{self, BufRead, Read, Write};
use std::net::{TcpListener, TcpStream};

use serde_json::{Value, json};
use tracing::{info, warn};

use crate::service::PredictionService;

pub struct PredictionServer {
    service: PredictionService,
}

impl PredictionServer {
    pub fn new(service: PredictionService) -> Self {
        Self { service }
    }

    pub fn serve_http(&self, addr: &str) -> io::Result<()> {
        let listener = TcpListener::bind(addr)?;
        info!(addr = %listener.local_addr()?, "exohab http listening");
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Err(err) = self.handle_http_connection(stream) {
                        warn!(error = %err, "http request error");
                    }
                }
                Err(err) => {
                    warn!(error = %err, "http accept error");
                }
            }
        }
        Ok(())
    }

    fn handle_http_connection(&self, mut stream: TcpStream) -> io::Result<()> {
        let Some(req) = read_http_request(&stream)? else {
            return Ok(());
        };
        let response = self.dispatch_http_request(req);
        write_http_response(&mut stream, response)
    }

    fn dispatch_http_request(&self, req: HttpRequest) -> HttpResponse {
        if req.method == "GET" && req.path == "/health" {
            return HttpResponse::json(200, json!({"status":"ok"}));
        }

        if req.method != "POST" {
            return HttpResponse::json(
                405,
                json!({"error":"method_not_allowed","message":"supported endpoints: GET /health, POST /predict"}),
            );
        }

        if req.path != "/predict" {
            return HttpResponse::json(
                404,
                json!({"error":"not_found","message":"use POST /predict"}),
            );
        }

        let payload: Value = match serde_json::from_slice(&req.body) {
            Ok(v) => v,
            Err(_) => {
                return HttpResponse::json(500, json!({"error":"Failed to generate prediction"}));
            }
        };

        match self.service.predict(&payload) {
            Ok(result) => match serde_json::to_value(&result) {
                Ok(body) => HttpResponse::json(200, body),
                Err(_) => {
                    HttpResponse::json(500, json!({"error":"Failed to generate prediction"}))
                }
            },
            Err(err) => HttpResponse::json(400, json!({"error": err.to_string()})),
        }
    }
}

#[derive(Debug)]
struct HttpRequest {
    method: String,
    path: String,
    body: Vec<u8>,
}

struct HttpResponse {
    status: u16,
    body: Vec<u8>,
}

impl HttpResponse {
    fn json(status: u16, value: Value) -> Self {
        let body = serde_json::to_vec(&value).unwrap_or_else(|_| b"{}".to_vec());
        Self { status, body }
    }
}

fn read_http_request(stream: &TcpStream) -> io::Result<Option<HttpRequest>> {
    let mut reader = io::BufReader::new(stream.try_clone()?);
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let first = line.trim_end_matches(['\r', '\n']);
    if first.is_empty() {
        return Ok(None);
    }

    let mut parts = first.split_whitespace();
    let Some(method) = parts.next() else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "invalid http request line (missing method)",
        ));
    };
    let Some(path_with_query) = parts.next() else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "invalid http request line (missing path)",
        ));
    };
    let path = strip_query(path_with_query);

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            break;
        }
        let header = header.trim_end_matches(['\r', '\n']);
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse::<usize>().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0_u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body)?;
    }
    Ok(Some(HttpRequest {
        method: method.to_string(),
        path,
        body,
    }))
}

fn write_http_response(stream: &mut TcpStream, response: HttpResponse) -> io::Result<()> {
    let reason = http_reason_phrase(response.status);
    let headers = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason,
        response.body.len()
    );
    stream.write_all(headers.as_bytes())?;
    stream.write_all(&response.body)?;
    stream.flush()
}

fn http_reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

fn strip_query(raw: &str) -> String {
    match raw.split_once('?') {
        Some((path, _)) => path.to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use exohab_core::FixedJitter;

    use crate::service::{PredictionService, TracingDiagnostics};

    use super::*;

    fn local_server() -> PredictionServer {
        PredictionServer::new(PredictionService::with_parts(
            None,
            Box::new(FixedJitter(0.0)),
            Arc::new(TracingDiagnostics),
        ))
    }

    fn request(method: &str, path: &str, body: &str) -> HttpRequest {
        HttpRequest {
            method: method.to_string(),
            path: strip_query(path),
            body: body.as_bytes().to_vec(),
        }
    }

    fn body_json(response: &HttpResponse) -> Value {
        serde_json::from_slice(&response.body).expect("response body json")
    }

    fn valid_body() -> &'static str {
        r#"{"stellarTemperatureScore":75,"stellarRadiusScore":80,"planetRadiusScore":85,"insolationScore":70,"orbitalPeriodScore":40,"equilibriumTemperatureScore":55}"#
    }

    #[test]
    fn health_endpoint_reports_ok() {
        let res = local_server().dispatch_http_request(request("GET", "/health", ""));
        assert_eq!(res.status, 200);
        assert_eq!(body_json(&res)["status"], "ok");
    }

    #[test]
    fn predict_scores_a_valid_payload_locally() {
        let res = local_server().dispatch_http_request(request("POST", "/predict", valid_body()));
        assert_eq!(res.status, 200);
        let json = body_json(&res);
        assert_eq!(json["habitabilityScore"], 78.03);
        assert_eq!(json["modelSource"], "mock");
        assert!(json["timestamp"].as_str().unwrap_or("").ends_with('Z'));
    }

    #[test]
    fn predict_rejects_out_of_range_values() {
        let body = valid_body().replace(r#""orbitalPeriodScore":40"#, r#""orbitalPeriodScore":55"#);
        let res = local_server().dispatch_http_request(request("POST", "/predict", &body));
        assert_eq!(res.status, 400);
        let message = body_json(&res)["error"].as_str().unwrap_or("").to_string();
        assert!(message.contains("must be between 1 and 50"), "got {message}");
    }

    #[test]
    fn predict_rejects_non_numeric_fields() {
        let body = valid_body().replace(r#""insolationScore":70"#, r#""insolationScore":"hot""#);
        let res = local_server().dispatch_http_request(request("POST", "/predict", &body));
        assert_eq!(res.status, 400);
        let message = body_json(&res)["error"].as_str().unwrap_or("").to_string();
        assert!(
            message.contains("missing or not a finite number"),
            "got {message}"
        );
    }

    #[test]
    fn malformed_json_body_maps_to_internal_error() {
        let res = local_server().dispatch_http_request(request("POST", "/predict", "not json"));
        assert_eq!(res.status, 500);
        assert_eq!(body_json(&res)["error"], "Failed to generate prediction");
    }

    #[test]
    fn unknown_paths_and_methods_are_rejected() {
        let res = local_server().dispatch_http_request(request("POST", "/nope", "{}"));
        assert_eq!(res.status, 404);
        assert_eq!(body_json(&res)["error"], "not_found");

        let res = local_server().dispatch_http_request(request("GET", "/predict", ""));
        assert_eq!(res.status, 405);
        assert_eq!(body_json(&res)["error"], "method_not_allowed");
    }

    #[test]
    fn query_strings_are_ignored_for_routing() {
        assert_eq!(strip_query("/predict?debug=1"), "/predict");
        let res =
            local_server().dispatch_http_request(request("POST", "/predict?debug=1", valid_body()));
        assert_eq!(res.status, 200);
    }

    #[test]
    fn reason_phrases_cover_served_statuses() {
        assert_eq!(http_reason_phrase(200), "OK");
        assert_eq!(http_reason_phrase(400), "Bad Request");
        assert_eq!(http_reason_phrase(404), "Not Found");
        assert_eq!(http_reason_phrase(405), "Method Not Allowed");
        assert_eq!(http_reason_phrase(500), "Internal Server Error");
    }
}
