// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod filter;
pub mod formatting;
pub mod io;
pub mod observability;
pub mod ordering;
pub mod render;
pub mod store;
pub mod sync;

// Re-export commonly used types
pub use crate::core::{KeyedRecord, ThreatRecord, ThreatStore};
pub use crate::errors::{ErrorCode, Result, ThreatError};
pub use crate::filter::applies_to;
pub use crate::formatting::{render_field, render_indented, wrap};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::ordering::{key_of, order_records, KeyPattern};
pub use crate::render::{
    render_document, render_markdown, select_threats, write_document, RenderOptions,
};
pub use crate::store::{load_store, load_store_from_path};
