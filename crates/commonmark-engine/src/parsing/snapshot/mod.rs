//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Converts a parsed document to a stable, serializable `Snap`
//!   whose `Display` is an indented outline, for `insta` snapshot tests and the CLI
//! - **`invariants`**: Runtime checks for parser correctness (spans in bounds,
//!   child spans contained in parents, raw zones produce no inline nodes)
//!
//! Snapshots assert block and inline kinds, spans, line ranges and key parts
//! (link destinations, reference keys, fence info).

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, normalize};
