use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::analysis::EndpointCategory;
use crate::config::Config;
use crate::traffic::{load_captures, CapturedRequest, EndpointRecord, EndpointSummary, TrafficError};

#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredEndpoint {
    pub key: String,
    pub categories: Vec<EndpointCategory>,
}

#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub total_records: usize,
    pub matching_records: usize,
    pub endpoints: Vec<DiscoveredEndpoint>,
    pub output_path: PathBuf,
}

impl AnalysisReport {
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Analyzed {} API endpoints", self.endpoints.len())?;
        writeln!(out, "Results saved to: {}", self.output_path.display())?;
        writeln!(out)?;
        writeln!(out, "Key Endpoints Discovered:")?;
        for endpoint in &self.endpoints {
            writeln!(out, "  {}", endpoint.key)?;
            for category in &endpoint.categories {
                writeln!(out, "    {}", category.label())?;
            }
        }
        Ok(())
    }
}

/// Collapses captured traffic for one host into an [`EndpointSummary`].
pub struct TrafficAnalyzer {
    host_marker: String,
}

impl TrafficAnalyzer {
    pub fn new(host_marker: impl Into<String>) -> Self {
        Self {
            host_marker: host_marker.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.target.host_marker.clone())
    }

    pub fn is_target(&self, capture: &CapturedRequest) -> bool {
        !self.host_marker.is_empty() && capture.url.contains(&self.host_marker)
    }

    /// The part of `url` between the first host marker and the next one, or
    /// the whole URL when the marker does not occur.
    pub fn endpoint_path<'a>(&self, url: &'a str) -> &'a str {
        if self.host_marker.is_empty() {
            return url;
        }
        url.split(self.host_marker.as_str()).nth(1).unwrap_or(url)
    }

    pub fn endpoint_key(&self, capture: &CapturedRequest) -> String {
        format!("{} {}", capture.method, self.endpoint_path(&capture.url))
    }

    pub fn summarize(&self, captures: &[CapturedRequest]) -> EndpointSummary {
        let mut summary = EndpointSummary::new();

        for capture in captures.iter().filter(|capture| self.is_target(capture)) {
            let key = self.endpoint_key(capture);
            if summary.insert(key.clone(), EndpointRecord::from(capture)).is_some() {
                log::debug!("Replaced earlier example of {}", key);
            }
        }

        summary
    }

    /// Reads `input`, writes the summary to `output` and reports what was found.
    /// Nothing is written unless the whole capture parsed.
    pub fn analyze_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<AnalysisReport, TrafficError> {
        let output = output.as_ref();
        let captures = load_captures(input)?;
        let summary = self.summarize(&captures);

        let json = summary.to_json_pretty()?;
        fs::write(output, json).map_err(|e| TrafficError::Write(output.to_path_buf(), e))?;

        let matching_records = captures.iter().filter(|c| self.is_target(c)).count();
        log::info!(
            "Summarized {} of {} captured requests into {} endpoints",
            matching_records,
            captures.len(),
            summary.len()
        );

        Ok(AnalysisReport {
            total_records: captures.len(),
            matching_records,
            endpoints: summary
                .keys()
                .map(|key| DiscoveredEndpoint {
                    key: key.to_string(),
                    categories: EndpointCategory::classify(key),
                })
                .collect(),
            output_path: output.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn analyzer() -> TrafficAnalyzer {
        TrafficAnalyzer::new("arkkies.com")
    }

    #[test]
    fn test_endpoint_path() {
        let analyzer = analyzer();
        assert_eq!(analyzer.endpoint_path("https://arkkies.com/api/login"), "/api/login");
        assert_eq!(analyzer.endpoint_path("https://other.org/x"), "https://other.org/x");
        assert_eq!(analyzer.endpoint_path("https://arkkies.com"), "");
        // only the segment up to a second marker is kept
        assert_eq!(
            analyzer.endpoint_path("https://arkkies.com/r?next=arkkies.com/home"),
            "/r?next="
        );
    }

    #[test]
    fn test_filters_by_host() {
        let captures = vec![
            CapturedRequest::new("GET", "https://arkkies.com/api/outlets"),
            CapturedRequest::new("GET", "https://cdn.example.com/logo.png"),
            CapturedRequest::default(),
        ];
        let summary = analyzer().summarize(&captures);
        assert_eq!(summary.keys().collect::<Vec<_>>(), vec!["GET /api/outlets"]);
    }

    #[test]
    fn test_last_record_wins() {
        let mut first = CapturedRequest::new("POST", "https://arkkies.com/api/login");
        first.response = json!({ "token": "old" });
        let mut second = CapturedRequest::new("POST", "https://arkkies.com/api/login");
        second.response = json!({ "token": "new" });
        second.timestamp = json!("2024-05-01T10:00:00Z");

        let summary = analyzer().summarize(&[first, second.clone()]);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary.get("POST /api/login"), Some(&EndpointRecord::from(&second)));
    }

    #[test]
    fn test_methods_split_keys() {
        let captures = vec![
            CapturedRequest::new("GET", "https://arkkies.com/api/booking"),
            CapturedRequest::new("POST", "https://arkkies.com/api/booking"),
        ];
        let summary = analyzer().summarize(&captures);
        assert_eq!(summary.len(), 2);
    }

    #[test]
    fn test_keys_come_from_matching_records() {
        let captures = vec![
            CapturedRequest::new("GET", "https://arkkies.com/a"),
            CapturedRequest::new("GET", "https://elsewhere.net/b"),
            CapturedRequest::new("DELETE", "http://api.arkkies.com/c?x=1"),
            CapturedRequest::new("GET", "https://arkkies.com/a"),
        ];
        let analyzer = analyzer();
        let summary = analyzer.summarize(&captures);
        let matching: Vec<_> = captures.iter().filter(|c| analyzer.is_target(c)).collect();

        assert!(summary.len() <= matching.len());
        for key in summary.keys() {
            assert!(matching.iter().any(|c| analyzer.endpoint_key(c) == key));
        }
        assert!(summary.get("DELETE /c?x=1").is_some());
    }

    #[test]
    fn test_analyze_file_writes_summary() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("traffic.json");
        let output = dir.path().join("summary.json");
        fs::write(
            &input,
            json!([
                { "method": "POST", "url": "https://arkkies.com/api/login/qr" },
                { "method": "GET", "url": "https://arkkies.com/api/outlets" },
                { "method": "GET" }
            ])
            .to_string(),
        )
        .unwrap();

        let report = analyzer().analyze_file(&input, &output).unwrap();
        assert_eq!(report.total_records, 3);
        assert_eq!(report.matching_records, 2);
        assert_eq!(
            report.endpoints[0].categories,
            vec![EndpointCategory::Login, EndpointCategory::QrCode]
        );
        assert!(report.endpoints[1].categories.is_empty());

        let written: EndpointSummary =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written.len(), 2);

        let mut rendered = Vec::new();
        report.render(&mut rendered).unwrap();
        let rendered = String::from_utf8(rendered).unwrap();
        assert!(rendered.contains("Analyzed 2 API endpoints"));
        assert!(rendered.contains("    LOGIN ENDPOINT FOUND!\n    QR CODE ENDPOINT FOUND!"));
    }

    #[test]
    fn test_odd_field_types_do_not_drop_records() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("traffic.json");
        let output = dir.path().join("summary.json");
        fs::write(
            &input,
            json!([
                { "method": "GET", "url": "https://arkkies.com/a", "timestamp": 1709283600.5 },
                { "method": "GET", "url": "https://arkkies.com/b", "headers": { "Content-Length": 12 } },
                { "method": "GET", "url": "https://arkkies.com/c", "headers": null }
            ])
            .to_string(),
        )
        .unwrap();

        let report = analyzer().analyze_file(&input, &output).unwrap();
        assert_eq!(report.endpoints.len(), 3);

        let written: EndpointSummary =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written.get("GET /a").unwrap().timestamp, json!(1709283600.5));
        assert_eq!(written.get("GET /b").unwrap().headers["Content-Length"], "12");
    }

    #[test]
    fn test_malformed_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("traffic.json");
        let output = dir.path().join("summary.json");
        fs::write(&input, "[{\"url\": ").unwrap();

        assert!(analyzer().analyze_file(&input, &output).is_err());
        assert!(!output.exists());
    }
}
