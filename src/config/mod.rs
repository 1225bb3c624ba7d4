pub mod settings;

pub use settings::{Config, ConfigError, OutputConfig, ProbeConfig, TargetConfig};
