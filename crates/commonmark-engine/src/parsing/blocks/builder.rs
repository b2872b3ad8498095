use crate::parsing::{
    context::ParserContext,
    cursor::Cursor,
    references::ReferenceLookup,
    registry::Registry,
    rope::{LineRef, expand_leading_tabs},
};

use super::{
    kinds::{CodeFence, Paragraph},
    types::{BlockNode, OpenKind},
};

/// Feeds lines through the open-block stack.
///
/// Per line: continuation matching root to leaf, fence close detection,
/// new block starts, then lazy continuation or adding the line to the
/// deepest block (opening a paragraph when nothing accepts it).
pub struct BlockBuilder<'r> {
    ctx: ParserContext<'r>,
}

impl<'r> BlockBuilder<'r> {
    pub fn new(registry: &'r Registry, references: &'r dyn ReferenceLookup, text_len: usize) -> Self {
        Self {
            ctx: ParserContext::new(registry, references, text_len),
        }
    }

    pub fn push(&mut self, line: &LineRef) {
        let text = expand_leading_tabs(&line.text);
        let mut cursor = Cursor::new(&text);
        let ctx = &mut self.ctx;
        ctx.begin_line(line.number, line.span);

        ctx.match_continuations(&mut cursor);

        if ctx.all_matched()
            && let OpenKind::FencedCode(fence) = ctx.tip().kind
            && CodeFence::closes(&fence, &mut cursor)
        {
            ctx.extend_open_blocks();
            ctx.close_top();
            return;
        }

        // New block starts. Raw leaves (fenced code) take no block starts;
        // paragraphs may be interrupted.
        while !matches!(ctx.last_matched().kind, OpenKind::FencedCode(_)) {
            let registry = ctx.registry();
            let opened = registry
                .block_parsers()
                .iter()
                .any(|parser| parser.parse(ctx, &mut cursor));
            if !opened || !ctx.tip().kind.is_container() {
                break;
            }
        }

        let lazy = !ctx.blocks_parsed
            && !ctx.all_matched()
            && ctx.tip().kind == OpenKind::Paragraph
            && !cursor.is_blank();
        if lazy {
            log::trace!("lazy continuation at line {}", line.number);
            ctx.add_line(Paragraph::line_content(&mut cursor));
        } else {
            ctx.close_unmatched();
            let tip = ctx.tip().kind;
            match tip {
                OpenKind::Paragraph => ctx.add_line(Paragraph::line_content(&mut cursor)),
                OpenKind::FencedCode(_) => ctx.add_line(cursor.rest()),
                OpenKind::Document | OpenKind::BlockQuote if !cursor.is_blank() => {
                    ctx.add_block(OpenKind::Paragraph);
                    ctx.add_line(Paragraph::line_content(&mut cursor));
                }
                OpenKind::Document | OpenKind::BlockQuote => {}
            }
        }

        ctx.extend_open_blocks();
    }

    pub fn finish(self) -> BlockNode {
        self.ctx.finish()
    }
}
