use crate::parsing::{
    charset::CharSet,
    cursor::Cursor,
    inline::{
        parser::{InlineContext, InlineParser},
        types::InlineNode,
    },
};

/// Tries an ordered list of sub-parsers at the current position; the first
/// success wins. Used to build small closed sub-grammars such as autolink
/// bodies or fence info strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeInlineParser {
    pub parsers: Vec<InlineParser>,
}

impl CompositeInlineParser {
    pub fn new(parsers: Vec<InlineParser>) -> Self {
        Self { parsers }
    }

    pub fn lead_chars(&self) -> CharSet {
        self.parsers
            .iter()
            .fold(CharSet::empty(), |acc, p| acc.union(&p.lead_chars()))
    }

    pub fn parse(&self, ctx: &InlineContext<'_>, cursor: &mut Cursor<'_>) -> Option<InlineNode> {
        self.parsers.iter().find_map(|p| p.parse(ctx, cursor))
    }
}
