use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(#[source] reqwest::Error),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMethod {
    Get,
    Post,
}

impl ProbeMethod {
    /// Only GET and POST are probed; the match ignores case.
    pub fn parse(method: &str) -> Option<Self> {
        match method.to_uppercase().as_str() {
            "GET" => Some(ProbeMethod::Get),
            "POST" => Some(ProbeMethod::Post),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeMethod::Get => "GET",
            ProbeMethod::Post => "POST",
        }
    }
}

impl fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRequest {
    pub method: ProbeMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Sends a single probe request. Any response, whatever its status, is `Ok`;
/// only failures to complete the exchange are errors.
pub trait Transport {
    fn send(&self, request: &ProbeRequest) -> Result<ProbeResponse, ProbeError>;
}

#[derive(Debug)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProbeError::ClientSetup)?;
        Ok(Self { client })
    }

    fn extract_headers(header_map: &HeaderMap) -> Vec<(String, String)> {
        header_map
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect()
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &ProbeRequest) -> Result<ProbeResponse, ProbeError> {
        let mut builder = match request.method {
            ProbeMethod::Get => self.client.get(&request.url),
            ProbeMethod::Post => self.client.post(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let (ProbeMethod::Post, Some(body)) = (request.method, &request.body) {
            builder = builder.json(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let headers = Self::extract_headers(response.headers());
        let body = response.text()?;

        Ok(ProbeResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_parse_method() {
        assert_eq!(ProbeMethod::parse("GET"), Some(ProbeMethod::Get));
        assert_eq!(ProbeMethod::parse("post"), Some(ProbeMethod::Post));
        assert_eq!(ProbeMethod::parse("PUT"), None);
        assert_eq!(ProbeMethod::parse(""), None);
    }

    #[test]
    fn test_extract_headers_keeps_opaque_values() {
        let mut map = HeaderMap::new();
        map.insert("server", HeaderValue::from_static("nginx"));
        map.insert("x-raw", HeaderValue::from_bytes(b"caf\xc3\xa9 \xfa").unwrap());
        let headers = ReqwestTransport::extract_headers(&map);

        assert_eq!(headers.len(), 2);
        assert!(headers.contains(&("server".to_string(), "nginx".to_string())));
        assert!(headers.contains(&("x-raw".to_string(), "café \u{FFFD}".to_string())));
    }
}
