pub mod io;
pub mod parsing;

// Re-export key types for easier usage
pub use io::{IoError, read_file};
pub use parsing::{
    Document, Parser, parse,
    blocks::{BlockNode, ContainerKind, LeafBlock, LeafKind, kinds::FencedCode},
    inline::{InlineNode, LinkDefinition},
    references::{ReferenceLookup, ReferenceMap},
    registry::{ParserOptions, Registry},
};
