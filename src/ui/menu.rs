use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use crate::codegen::ClientGenerator;
use crate::config::Config;
use crate::probe::{EndpointProbe, ProbeMethod};
use crate::traffic::TrafficAnalyzer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Analyze,
    Probe,
    Generate,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Analyze),
            "2" => Some(MenuChoice::Probe),
            "3" => Some(MenuChoice::Generate),
            "4" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Numbered text menu over the three research operations. Failures are
/// reported on the output and the loop carries on.
pub struct Menu<R, W> {
    config: Config,
    analyzer: TrafficAnalyzer,
    probe: EndpointProbe,
    generator: ClientGenerator,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(config: Config, probe: EndpointProbe, input: R, output: W) -> Self {
        Self {
            analyzer: TrafficAnalyzer::from_config(&config),
            generator: ClientGenerator::from_config(&config),
            config,
            probe,
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "API Research Tool")?;
        writeln!(self.output, "{}", "=".repeat(40))?;

        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Options:")?;
            writeln!(self.output, "1. Analyze network traffic file")?;
            writeln!(self.output, "2. Test discovered endpoint")?;
            writeln!(self.output, "3. Generate Node.js client")?;
            writeln!(self.output, "4. Exit")?;

            let Some(answer) = self.prompt("\nSelect option (1-4): ")? else {
                break;
            };

            match MenuChoice::parse(&answer) {
                Some(MenuChoice::Analyze) => self.analyze()?,
                Some(MenuChoice::Probe) => self.probe_endpoint()?,
                Some(MenuChoice::Generate) => self.generate()?,
                Some(MenuChoice::Exit) => break,
                None => {
                    log::warn!("Invalid menu option {:?}", answer);
                    writeln!(self.output, "Invalid option")?;
                }
            }
        }

        writeln!(self.output, "Happy hacking!")?;
        Ok(())
    }

    /// `None` once the input is exhausted.
    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn analyze(&mut self) -> Result<()> {
        let Some(path) = self.prompt("Enter path to network traffic JSON file: ")? else {
            return Ok(());
        };

        match self.analyzer.analyze_file(&path, &self.config.output.summary_file) {
            Ok(report) => report.render(&mut self.output)?,
            Err(e) => writeln!(self.output, "Error analyzing traffic: {}", e)?,
        }
        Ok(())
    }

    fn probe_endpoint(&mut self) -> Result<()> {
        let Some(method) = self.prompt("HTTP method (GET/POST): ")? else {
            return Ok(());
        };
        let Some(endpoint) = self.prompt("Endpoint path (e.g., /api/login): ")? else {
            return Ok(());
        };

        let mut headers = Vec::new();
        let mut body = None;
        if let Some(probe_method) = ProbeMethod::parse(&method) {
            let Some(raw_headers) = self.prompt("Headers as JSON object (blank for none): ")? else {
                return Ok(());
            };
            match parse_headers(&raw_headers) {
                Ok(parsed) => headers = parsed,
                Err(e) => {
                    writeln!(self.output, "Invalid headers: {}", e)?;
                    return Ok(());
                }
            }

            if probe_method == ProbeMethod::Post {
                let Some(raw_body) = self.prompt("JSON body (blank for none): ")? else {
                    return Ok(());
                };
                match parse_body(&raw_body) {
                    Ok(parsed) => body = parsed,
                    Err(e) => {
                        writeln!(self.output, "Invalid body: {}", e)?;
                        return Ok(());
                    }
                }
            }
        }

        writeln!(self.output, "Testing: {} {}", method, self.probe.url_for(&endpoint))?;
        match self.probe.probe(&method, &endpoint, headers, body) {
            Ok(outcome) => outcome.render(&mut self.output, self.config.probe.preview_chars)?,
            Err(e) => writeln!(self.output, "Error testing endpoint: {}", e)?,
        }
        Ok(())
    }

    fn generate(&mut self) -> Result<()> {
        let Some(path) = self.prompt("Enter path to analysis JSON file: ")? else {
            return Ok(());
        };

        match self.generator.generate_file(&path, &self.config.output.client_file) {
            Ok(client) => client.render(&mut self.output)?,
            Err(e) => writeln!(self.output, "Error generating client: {}", e)?,
        }
        Ok(())
    }
}

fn parse_headers(raw: &str) -> Result<Vec<(String, String)>, serde_json::Error> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    let headers: BTreeMap<String, String> = serde_json::from_str(raw)?;
    Ok(headers.into_iter().collect())
}

fn parse_body(raw: &str) -> Result<Option<Value>, serde_json::Error> {
    if raw.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(raw).map(Some)
}
