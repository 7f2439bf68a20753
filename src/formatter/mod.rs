pub mod json;

pub use json::{JsonFormatter, value_to_json};
