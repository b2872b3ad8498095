use std::sync::OnceLock;

use crate::parsing::{
    charset::CharSet,
    cursor::Cursor,
    inline::{
        kinds::{AllParser, CompositeInlineParser},
        parser::InlineParser,
        types::{InlineNode, Text},
    },
    rope::span::Span,
};

pub const LEAD: &str = "\\";

/// `\` followed by ASCII punctuation yields the punctuation char as text.
/// A backslash before anything else is not an escape.
pub fn parse(cursor: &mut Cursor<'_>) -> Option<InlineNode> {
    if cursor.current_char() != '\\' || !cursor.char_at(1).is_ascii_punctuation() {
        return None;
    }
    let start = cursor.pos();
    cursor.advance(1);
    let escaped = cursor.take_n(1);
    Some(InlineNode::Text(Text::new(
        Span::new(start, cursor.pos()),
        escaped,
    )))
}

/// Sub-grammar for strings where only escapes and entities are
/// interpreted (fence info strings).
pub fn escaped_string() -> &'static InlineParser {
    static PARSER: OnceLock<InlineParser> = OnceLock::new();
    PARSER.get_or_init(|| {
        InlineParser::Composite(CompositeInlineParser::new(vec![
            InlineParser::Escape,
            InlineParser::Entity,
            InlineParser::All(AllParser::except(&CharSet::of("\\&"))),
            InlineParser::All(AllParser::with_max(CharSet::of("\\&"), 1)),
        ]))
    })
}
