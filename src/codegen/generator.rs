use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::codegen::templates::{CLASS_FOOTER, CLASS_HEADER, METHOD_TEMPLATES};
use crate::config::Config;
use crate::traffic::EndpointSummary;

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Cannot read {}: {}", .0.display(), .1)]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Cannot write {}: {}", .0.display(), .1)]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Invalid endpoint summary {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMethod {
    pub name: &'static str,
    pub endpoint_key: String,
}

#[derive(Debug, Clone)]
pub struct GeneratedClient {
    pub source: String,
    pub methods: Vec<GeneratedMethod>,
    pub output_path: Option<PathBuf>,
}

impl GeneratedClient {
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Generated {} client methods", self.methods.len())?;
        for method in &self.methods {
            writeln!(out, "  {}() <- {}", method.name, method.endpoint_key)?;
        }
        if let Some(path) = &self.output_path {
            writeln!(out, "Generated Node.js API client: {}", path.display())?;
        }
        Ok(())
    }
}

/// Turns an endpoint summary into a JavaScript client class.
pub struct ClientGenerator {
    base_url: String,
    class_name: String,
    user_agent: String,
}

impl ClientGenerator {
    pub fn new(
        base_url: impl Into<String>,
        class_name: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            class_name: class_name.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.target.base_url.clone(),
            config.output.client_class.clone(),
            config.output.user_agent.clone(),
        )
    }

    /// Request path of a recorded URL: every occurrence of the base URL removed.
    pub fn request_path(&self, url: &str) -> String {
        if self.base_url.is_empty() {
            return url.to_string();
        }
        url.replace(&self.base_url, "")
    }

    /// Every template an endpoint matches is emitted, so one endpoint can
    /// yield several methods.
    pub fn generate(&self, summary: &EndpointSummary) -> GeneratedClient {
        let mut source = CLASS_HEADER
            .replace("@CLASS@", &self.class_name)
            .replace("@BASE_URL@", &self.base_url)
            .replace("@USER_AGENT@", &self.user_agent);
        let mut methods = Vec::new();

        for (key, record) in summary.iter() {
            let path = self.request_path(&record.url);
            let mut matched = false;

            for template in METHOD_TEMPLATES.iter() {
                if template.applies_to(key, &record.method) {
                    source.push_str(&template.render(&path, &record.method));
                    methods.push(GeneratedMethod {
                        name: template.name,
                        endpoint_key: key.to_string(),
                    });
                    matched = true;
                }
            }

            if !matched {
                log::debug!("No client method for {}", key);
            }
        }

        source.push_str(&CLASS_FOOTER.replace("@CLASS@", &self.class_name));

        GeneratedClient {
            source,
            methods,
            output_path: None,
        }
    }

    /// The client text is assembled in full before `output` is touched.
    pub fn generate_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<GeneratedClient, CodegenError> {
        let input = input.as_ref();
        let output = output.as_ref();

        let content =
            fs::read_to_string(input).map_err(|e| CodegenError::Read(input.to_path_buf(), e))?;
        let summary: EndpointSummary = serde_json::from_str(&content)
            .map_err(|e| CodegenError::Parse(input.to_path_buf(), e))?;

        let mut client = self.generate(&summary);
        fs::write(output, &client.source)
            .map_err(|e| CodegenError::Write(output.to_path_buf(), e))?;
        client.output_path = Some(output.to_path_buf());

        log::info!(
            "Wrote {} methods for {} endpoints to {}",
            client.methods.len(),
            summary.len(),
            output.display()
        );
        Ok(client)
    }
}
