//! # Parser Context
//!
//! Mutable session state for the block phase of one parse: the open-block
//! stack from the document root down to the deepest open block, and the
//! per-line bookkeeping the block engine needs.
//!
//! The stack is a plain `Vec`. Children never point at their parents:
//! closing the top block moves its finished [`BlockNode`] into the new
//! top's `children`.

use crate::parsing::{
    blocks::types::{BlockNode, OpenBlock, OpenKind},
    cursor::Cursor,
    inline::parser::InlineContext,
    references::ReferenceLookup,
    registry::Registry,
    rope::span::Span,
};

/// Deepest container nesting below the document. Container markers past
/// this depth are left in the line as paragraph text.
pub const MAX_CONTAINER_DEPTH: usize = 100;

pub struct ParserContext<'r> {
    registry: &'r Registry,
    references: &'r dyn ReferenceLookup,
    stack: Vec<OpenBlock>,
    /// Index of the first block on the stack that did not match the
    /// current line; `stack.len()` when all matched.
    unmatched_from: usize,
    /// Set when a block parser opened a block on the current line.
    pub blocks_parsed: bool,
    line_number: usize,
    line_span: Span,
}

impl<'r> ParserContext<'r> {
    pub fn new(registry: &'r Registry, references: &'r dyn ReferenceLookup, text_len: usize) -> Self {
        Self {
            registry,
            references,
            stack: vec![OpenBlock::new(
                OpenKind::Document,
                1,
                Span::new(0, text_len),
            )],
            unmatched_from: 1,
            blocks_parsed: false,
            line_number: 0,
            line_span: Span::default(),
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn inline_context(&self) -> InlineContext<'r> {
        InlineContext::new(self.registry, self.references)
    }

    /// Resets per-line state.
    pub fn begin_line(&mut self, number: usize, span: Span) {
        log::trace!("line {number} {span:?}");
        self.line_number = number;
        self.line_span = span;
        self.blocks_parsed = false;
    }

    /// Walks the open stack root to leaf, asking each block whether it
    /// continues on this line. Stops at the first block that does not.
    pub fn match_continuations(&mut self, cursor: &mut Cursor<'_>) {
        self.unmatched_from = self.stack.len();
        for (index, block) in self.stack.iter().enumerate() {
            if !block.kind.match_next_line(cursor) {
                self.unmatched_from = index;
                break;
            }
        }
    }

    pub fn all_matched(&self) -> bool {
        self.unmatched_from == self.stack.len()
    }

    /// Number of blocks below the document that matched the current line
    /// or were opened on it.
    pub fn matched_depth(&self) -> usize {
        self.unmatched_from - 1
    }

    /// The deepest open block.
    pub fn tip(&self) -> &OpenBlock {
        &self.stack[self.stack.len() - 1]
    }

    /// The deepest block that matched the current line, or that was opened
    /// on it.
    pub fn last_matched(&self) -> &OpenBlock {
        &self.stack[self.unmatched_from - 1]
    }

    /// Opens a block of `kind` at the current line. Unmatched blocks are
    /// closed first, then any block that cannot contain the new one.
    pub fn add_block(&mut self, kind: OpenKind) {
        self.close_unmatched();
        while !self.tip().kind.can_contain(&kind) {
            self.close_top();
        }
        log::debug!("open {} at line {}", kind.name(), self.line_number);
        self.stack
            .push(OpenBlock::new(kind, self.line_number, self.line_span));
        self.unmatched_from = self.stack.len();
    }

    /// Appends a raw line to the tip, which must accept lines.
    pub fn add_line(&mut self, line: &str) {
        let tip = self
            .stack
            .last_mut()
            .filter(|block| block.kind.accepts_lines());
        match tip {
            Some(block) => block.lines.push(line.to_string()),
            None => panic!("add_line on a block that does not accept lines"),
        }
    }

    pub fn close_unmatched(&mut self) {
        while self.stack.len() > self.unmatched_from {
            self.close_top();
        }
        self.unmatched_from = self.stack.len();
    }

    /// Closes the deepest open block and hands it to its parent. The
    /// document itself is only closed by [`finish`](Self::finish).
    pub fn close_top(&mut self) {
        assert!(self.stack.len() > 1, "close_top on the document");
        let Some(block) = self.stack.pop() else {
            return;
        };
        log::debug!(
            "close {} lines {}..={}",
            block.kind.name(),
            block.start_line,
            block.end_line
        );
        let node = block.close(&self.inline_context());
        let parent = self.stack.len() - 1;
        self.stack[parent].children.push(node);
        self.unmatched_from = self.unmatched_from.min(self.stack.len());
    }

    /// Extends every open block to cover the current line.
    pub fn extend_open_blocks(&mut self) {
        for block in self.stack.iter_mut().skip(1) {
            block.end_line = self.line_number;
            block.span.end = self.line_span.end;
        }
        if let Some(document) = self.stack.first_mut() {
            document.end_line = self.line_number.max(1);
        }
    }

    /// Closes everything, returning the document node.
    pub fn finish(mut self) -> BlockNode {
        while self.stack.len() > 1 {
            self.close_top();
        }
        let document = self.stack.swap_remove(0);
        document.close(&self.inline_context())
    }
}
