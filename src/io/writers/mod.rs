pub mod json;
pub mod markdown;
pub mod yaml;

pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use yaml::YamlWriter;
