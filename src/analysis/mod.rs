pub mod category;

pub use category::EndpointCategory;
