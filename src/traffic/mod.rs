pub mod analyzer;
pub mod capture;
pub mod summary;

pub use analyzer::{AnalysisReport, DiscoveredEndpoint, TrafficAnalyzer};
pub use capture::{load_captures, CapturedRequest, TrafficError};
pub use summary::{EndpointRecord, EndpointSummary};
