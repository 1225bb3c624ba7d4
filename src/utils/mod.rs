pub mod formatting;

pub use formatting::{format_headers, preview_text, pretty_json};
