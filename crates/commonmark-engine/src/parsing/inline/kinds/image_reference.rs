use crate::parsing::{
    cursor::Cursor,
    inline::{
        kinds::link_reference,
        parser::{InlineContext, MAX_NESTING},
        types::{ImageReference, InlineNode},
    },
    rope::span::Span,
};

pub const LEAD: &str = "!";

/// `!` followed by a reference-style link. When the link part fails, the
/// `!` is given back too.
pub fn parse(ctx: &InlineContext<'_>, cursor: &mut Cursor<'_>) -> Option<InlineNode> {
    if cursor.current_char() != '!' || ctx.nesting() >= MAX_NESTING {
        return None;
    }
    let saved = cursor.save();
    let start = cursor.pos();
    cursor.advance(1);
    match link_reference::parse(ctx, cursor) {
        Some(reference) => Some(InlineNode::Image(ImageReference {
            span: Span::new(start, reference.span.end),
            reference,
        })),
        None => {
            saved.restore(cursor);
            None
        }
    }
}
