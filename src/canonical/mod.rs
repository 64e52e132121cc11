//! Canonical document processing
//!
//! Parses YAML front matter (between `---` delimiters), rewrites placeholder
//! tokens for a target platform and projects front matter onto the fields that
//! platform accepts. Everything here is a pure transformation; reading and
//! writing files is left to the router and writer.

pub mod document;
pub mod frontmatter;
pub mod pipeline;
pub mod projection;
pub mod substitute;

pub use document::{DocKind, Document};
pub use frontmatter::FrontMatter;
pub use pipeline::{Rendered, assemble, prepare, render};
pub use substitute::substitute;
