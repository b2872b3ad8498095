//! # Parsing
//!
//! Two phases: the block engine feeds each line through the open-block
//! stack and builds the block tree; closing a paragraph hands its content
//! to the inline engine.
//!
//! Parsing is total. Every input yields a [`Document`]; constructs that do
//! not match degrade to paragraphs and plain text.

pub mod blocks;
pub mod charset;
pub mod context;
pub mod cursor;
pub mod inline;
pub mod references;
pub mod registry;
pub mod rope;
pub mod snapshot;

use serde::Serialize;
use xi_rope::Rope;

use blocks::{BlockBuilder, BlockNode, LeafBlock};
use cursor::Cursor;
use inline::{InlineContext, InlineNode, parse_inlines};
use references::ReferenceMap;
use registry::{ParserOptions, Registry};
use rope::lines_with_spans;

/// A parsed document: the closed block tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub root: BlockNode,
}

impl Document {
    /// Top-level blocks.
    pub fn blocks(&self) -> &[BlockNode] {
        self.root.children()
    }

    /// Leaf blocks in document order.
    pub fn leaves(&self) -> impl Iterator<Item = &LeafBlock> {
        let mut pending = vec![&self.root];
        std::iter::from_fn(move || {
            while let Some(node) = pending.pop() {
                match node {
                    BlockNode::Leaf(leaf) => return Some(leaf),
                    BlockNode::Container(c) => pending.extend(c.children.iter().rev()),
                }
            }
            None
        })
    }
}

/// A reusable parser: a registry plus the link-reference store.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    registry: Registry,
    references: ReferenceMap,
}

impl Parser {
    pub fn new(options: ParserOptions) -> Self {
        Self {
            registry: Registry::new(&options),
            references: ReferenceMap::new(),
        }
    }

    #[must_use]
    pub fn with_references(mut self, references: ReferenceMap) -> Self {
        self.references = references;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn references(&self) -> &ReferenceMap {
        &self.references
    }

    pub fn parse(&self, text: &str) -> Document {
        self.parse_rope(&Rope::from(text))
    }

    pub fn parse_rope(&self, rope: &Rope) -> Document {
        let mut builder = BlockBuilder::new(&self.registry, &self.references, rope.len());
        for line in lines_with_spans(rope) {
            builder.push(&line);
        }
        Document {
            root: builder.finish(),
        }
    }

    /// Runs the inline engine alone over `text`.
    pub fn parse_inlines(&self, text: &str) -> Vec<InlineNode> {
        let ctx = InlineContext::new(&self.registry, &self.references);
        parse_inlines(&ctx, &mut Cursor::new(text))
    }
}

/// Parses `text` with the default registry and an empty reference store.
pub fn parse(text: &str) -> Document {
    Parser::default().parse(text)
}
