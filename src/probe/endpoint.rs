use serde_json::Value;
use std::io::{self, Write};
use std::time::Duration;

use crate::config::Config;
use crate::probe::{ProbeError, ProbeMethod, ProbeRequest, ProbeResponse, ReqwestTransport, Transport};
use crate::utils::{format_headers, pretty_json, preview_text};

#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// The method was not GET or POST; nothing was sent.
    Unsupported { method: String },
    Completed { response: ProbeResponse },
}

impl ProbeOutcome {
    pub fn render(&self, out: &mut impl Write, preview_chars: usize) -> io::Result<()> {
        match self {
            ProbeOutcome::Unsupported { method } => {
                writeln!(out, "Warning: Method {} not supported in this tester", method)
            }
            ProbeOutcome::Completed { response } => {
                writeln!(out, "Status: {}", response.status)?;
                writeln!(out, "Headers: {}", format_headers(&response.headers))?;
                match pretty_json(&response.body) {
                    Some(json) => writeln!(out, "Response: {}", json),
                    None => writeln!(
                        out,
                        "Response (text): {}",
                        preview_text(&response.body, preview_chars)
                    ),
                }
            }
        }
    }
}

/// Replays one request against the configured base URL.
pub struct EndpointProbe {
    base_url: String,
    transport: Box<dyn Transport>,
}

impl EndpointProbe {
    pub fn new(base_url: impl Into<String>, transport: Box<dyn Transport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ProbeError> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.probe.timeout_secs))?;
        Ok(Self::new(config.target.base_url.clone(), Box::new(transport)))
    }

    /// The endpoint is appended verbatim; no separator is inserted.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    pub fn probe(
        &self,
        method: &str,
        endpoint: &str,
        headers: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<ProbeOutcome, ProbeError> {
        let Some(probe_method) = ProbeMethod::parse(method) else {
            log::warn!("Refusing to probe with unsupported method {:?}", method);
            return Ok(ProbeOutcome::Unsupported {
                method: method.to_string(),
            });
        };

        let request = ProbeRequest {
            method: probe_method,
            url: self.url_for(endpoint),
            headers,
            body: match probe_method {
                ProbeMethod::Post => body,
                ProbeMethod::Get => None,
            },
        };

        log::debug!("Sending {} {}", request.method, request.url);
        let response = self.transport.send(&request)?;
        log::info!("{} {} answered {}", request.method, request.url, response.status);

        Ok(ProbeOutcome::Completed { response })
    }
}
