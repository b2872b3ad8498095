//! # Block Parsing
//!
//! The block phase, driven one line at a time over an open-block stack
//! (document root to deepest open block).
//!
//! ## Per-line protocol
//!
//! 1. **Continuation**: each open block, root to leaf, checks whether it
//!    still applies to the line and consumes its own prefix (`>` for a
//!    blockquote, the fence offset for fenced code). The first failure
//!    marks it and everything below it as unmatched.
//! 2. **Fence close**: when everything matched and the tip is fenced
//!    code, a closing fence line closes it.
//! 3. **New block starts**: registered block parsers are tried in order
//!    until the deepest block is a leaf or nothing matches. Unmatched
//!    blocks close when a new block opens.
//! 4. **Lazy continuation** or **add line**: a non-blank line with no new
//!    block and an unmatched paragraph tip continues that paragraph;
//!    otherwise unmatched blocks close and the line goes to the tip,
//!    opening a paragraph if nothing accepts it.
//!
//! ## Modules
//!
//! - **`types`**: `OpenBlock`/`OpenKind` while open, `BlockNode` once closed
//! - **`kinds`**: block-specific syntax with owned delimiters (BlockQuote, CodeFence, Paragraph)
//! - **`open`**: `BlockParser`, the registered block-start productions
//! - **`builder`**: `BlockBuilder`, the per-line driver
//!
//! ## Key Invariants
//!
//! - Fenced code blocks are raw zones: no block starts or inline parsing inside
//! - A block is closed exactly once; closing consumes the open block
//! - All block nodes store byte spans into the source

pub mod builder;
pub mod kinds;
pub mod open;
pub mod types;

pub use builder::BlockBuilder;
pub use open::BlockParser;
pub use types::{BlockNode, ContainerBlock, ContainerKind, LeafBlock, LeafKind, OpenBlock, OpenKind};
