pub mod generator;
pub mod templates;

pub use generator::{ClientGenerator, CodegenError, GeneratedClient, GeneratedMethod};
pub use templates::{MethodTemplate, METHOD_TEMPLATES};
