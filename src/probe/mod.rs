pub mod endpoint;
pub mod transport;

pub use endpoint::{EndpointProbe, ProbeOutcome};
pub use transport::{ProbeError, ProbeMethod, ProbeRequest, ProbeResponse, ReqwestTransport, Transport};
