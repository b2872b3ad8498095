//! # Inline Parsing
//!
//! Inline parsing runs after block parsing, once per closed paragraph, over
//! the paragraph's content string.
//!
//! ## Dispatch
//!
//! At each position the registry yields the inline parsers whose lead
//! chars contain the current char, in registry order. The first that
//! matches wins. Otherwise the catch-all text parser consumes a literal
//! run, so every step makes progress.
//!
//! Every parser attempt is transactional: a no-match leaves the cursor
//! exactly where it was, which [`InlineParser::parse`] asserts.
//!
//! ## Modules
//!
//! - **`types`**: `InlineNode` enum (Text, Link, LinkReference, Image)
//! - **`kinds`**: one module per production plus the `All`/`Composite` combinators
//! - **`parser`**: `InlineParser`, `InlineContext` and `parse_inlines()`

pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::{InlineContext, InlineParser, parse_inlines};
pub use types::{InlineNode, LinkDefinition};
