use crate::parsing::{
    context::{MAX_CONTAINER_DEPTH, ParserContext},
    cursor::Cursor,
};

use super::{
    kinds::{BlockQuote, CodeFence},
    types::OpenKind,
};

/// A block-start production, as registered in the parser registry.
///
/// Contract: [`parse`](Self::parse) either opens a block (pushing it onto
/// the context's stack, cursor after the block's marker) and returns true,
/// or returns false with the cursor exactly where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockParser {
    FencedCode,
    BlockQuote,
}

impl BlockParser {
    pub fn parse(self, ctx: &mut ParserContext<'_>, cursor: &mut Cursor<'_>) -> bool {
        let before = cursor.position();
        match self.try_open(ctx, cursor) {
            Some(kind) => {
                ctx.add_block(kind);
                ctx.blocks_parsed = true;
                true
            }
            None => {
                assert_eq!(
                    cursor.position(),
                    before,
                    "{self:?} failed without restoring the cursor"
                );
                log::trace!("{self:?} did not start at byte {before}");
                false
            }
        }
    }

    fn try_open(self, ctx: &ParserContext<'_>, cursor: &mut Cursor<'_>) -> Option<OpenKind> {
        match self {
            BlockParser::FencedCode => CodeFence::parse_start(cursor).map(OpenKind::FencedCode),
            BlockParser::BlockQuote if ctx.matched_depth() >= MAX_CONTAINER_DEPTH => None,
            BlockParser::BlockQuote => {
                BlockQuote::parse_marker(cursor).then_some(OpenKind::BlockQuote)
            }
        }
    }
}
