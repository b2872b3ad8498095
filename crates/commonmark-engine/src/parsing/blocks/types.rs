use serde::Serialize;

use crate::parsing::{
    cursor::Cursor,
    inline::{
        parser::{InlineContext, parse_inlines},
        types::InlineNode,
    },
    rope::span::Span,
};

use super::kinds::{BlockQuote, CodeFence, Fence, FencedCode, Paragraph};

/// The kind of a block while it is on the open stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenKind {
    Document,
    BlockQuote,
    Paragraph,
    FencedCode(Fence),
}

impl OpenKind {
    pub fn name(&self) -> &'static str {
        match self {
            OpenKind::Document => "document",
            OpenKind::BlockQuote => "block_quote",
            OpenKind::Paragraph => "paragraph",
            OpenKind::FencedCode(_) => "fenced_code",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, OpenKind::Document | OpenKind::BlockQuote)
    }

    /// Leaf blocks accumulate the raw lines they are given.
    pub fn accepts_lines(&self) -> bool {
        !self.is_container()
    }

    pub fn can_contain(&self, _child: &OpenKind) -> bool {
        self.is_container()
    }

    /// Does this block still apply to the line at `cursor`? Consumes the
    /// block's own line prefix on success.
    pub fn match_next_line(&self, cursor: &mut Cursor<'_>) -> bool {
        match self {
            OpenKind::Document => true,
            OpenKind::BlockQuote => BlockQuote::parse_marker(cursor),
            OpenKind::Paragraph => Paragraph::match_next_line(cursor),
            OpenKind::FencedCode(fence) => CodeFence::match_next_line(fence, cursor),
        }
    }
}

/// A block on the open stack. Mutable only until it is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBlock {
    pub kind: OpenKind,
    pub start_line: usize,
    pub end_line: usize,
    pub span: Span,
    /// Raw lines, for leaf blocks.
    pub lines: Vec<String>,
    /// Closed children, for container blocks.
    pub children: Vec<BlockNode>,
}

impl OpenBlock {
    pub fn new(kind: OpenKind, line_number: usize, line_span: Span) -> Self {
        Self {
            kind,
            start_line: line_number,
            end_line: line_number,
            span: line_span,
            lines: vec![],
            children: vec![],
        }
    }

    /// Closes the block: leaf lines become content, metadata and inlines.
    /// Consumes the block, so a closed block can never reopen.
    pub fn close(self, ctx: &InlineContext<'_>) -> BlockNode {
        let OpenBlock {
            kind,
            start_line,
            end_line,
            span,
            lines,
            children,
        } = self;
        let container = |kind| {
            BlockNode::Container(ContainerBlock {
                kind,
                start_line,
                end_line,
                span,
                children,
            })
        };
        match kind {
            OpenKind::Document => container(ContainerKind::Document),
            OpenKind::BlockQuote => container(ContainerKind::BlockQuote),
            OpenKind::Paragraph => {
                let content = Paragraph::content(&lines);
                let inlines = parse_inlines(ctx, &mut Cursor::new(&content));
                BlockNode::Leaf(LeafBlock {
                    kind: LeafKind::Paragraph,
                    start_line,
                    end_line,
                    span,
                    content,
                    inlines,
                })
            }
            OpenKind::FencedCode(fence) => {
                let (code, content) = CodeFence::finish(fence, &lines, ctx);
                BlockNode::Leaf(LeafBlock {
                    kind: LeafKind::FencedCode(code),
                    start_line,
                    end_line,
                    span,
                    content,
                    inlines: vec![],
                })
            }
        }
    }
}

/// A closed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum BlockNode {
    Container(ContainerBlock),
    Leaf(LeafBlock),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Document,
    BlockQuote,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerBlock {
    pub kind: ContainerKind,
    /// 1-based line numbers.
    pub start_line: usize,
    pub end_line: usize,
    /// Byte span of the lines this block covers, line endings included.
    pub span: Span,
    pub children: Vec<BlockNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafKind {
    Paragraph,
    FencedCode(FencedCode),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafBlock {
    pub kind: LeafKind,
    pub start_line: usize,
    pub end_line: usize,
    pub span: Span,
    /// Final content: paragraph text, or the literal lines of a code block.
    pub content: String,
    /// Inline nodes with spans relative to `content`. Empty for code.
    pub inlines: Vec<InlineNode>,
}

impl BlockNode {
    pub fn span(&self) -> Span {
        match self {
            BlockNode::Container(c) => c.span,
            BlockNode::Leaf(l) => l.span,
        }
    }

    pub fn start_line(&self) -> usize {
        match self {
            BlockNode::Container(c) => c.start_line,
            BlockNode::Leaf(l) => l.start_line,
        }
    }

    pub fn end_line(&self) -> usize {
        match self {
            BlockNode::Container(c) => c.end_line,
            BlockNode::Leaf(l) => l.end_line,
        }
    }

    /// Child blocks; empty for leaves.
    pub fn children(&self) -> &[BlockNode] {
        match self {
            BlockNode::Container(c) => &c.children,
            BlockNode::Leaf(_) => &[],
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafBlock> {
        match self {
            BlockNode::Leaf(l) => Some(l),
            BlockNode::Container(_) => None,
        }
    }
}

impl LeafBlock {
    pub fn fenced_code(&self) -> Option<&FencedCode> {
        match &self.kind {
            LeafKind::FencedCode(code) => Some(code),
            LeafKind::Paragraph => None,
        }
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self.kind, LeafKind::Paragraph)
    }
}
