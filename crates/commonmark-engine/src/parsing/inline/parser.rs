use crate::parsing::{
    charset::CharSet, cursor::Cursor, references::ReferenceLookup, registry::Registry,
    rope::span::Span,
};

use super::{
    kinds::{
        AllParser, AutolinkParser, CompositeInlineParser, autolink, entity, escape,
        image_reference, link_reference::{self, BracketIndex},
    },
    types::{InlineNode, Text, push_merged},
};

/// Deepest link-text nesting (images inside images) that is still parsed.
pub const MAX_NESTING: usize = 32;

/// Read-only state shared by every inline parser during one parse.
#[derive(Clone, Copy)]
pub struct InlineContext<'r> {
    pub registry: &'r Registry,
    pub references: &'r dyn ReferenceLookup,
    /// Bracket pairs of the content being parsed; set by [`parse_inlines`].
    brackets: Option<&'r BracketIndex>,
    /// How many link texts enclose the current position.
    nesting: usize,
}

impl<'r> InlineContext<'r> {
    pub fn new(registry: &'r Registry, references: &'r dyn ReferenceLookup) -> Self {
        Self {
            registry,
            references,
            brackets: None,
            nesting: 0,
        }
    }

    pub fn brackets(&self) -> Option<&'r BracketIndex> {
        self.brackets
    }

    pub fn nesting(&self) -> usize {
        self.nesting
    }

    /// Inside link text, where another link may not start.
    pub fn in_link_text(&self) -> bool {
        self.nesting > 0
    }

    /// The context for parsing the text of a link found at this level.
    pub fn nested(&self) -> Self {
        Self {
            nesting: self.nesting + 1,
            ..*self
        }
    }

    fn with_brackets<'b>(&self, brackets: &'b BracketIndex) -> InlineContext<'b>
    where
        'r: 'b,
    {
        InlineContext {
            registry: self.registry,
            references: self.references,
            brackets: Some(brackets),
            nesting: self.nesting,
        }
    }
}

/// One inline grammar production.
///
/// Contract: [`parse`](Self::parse) either returns a node having consumed
/// at least one char, or returns `None` with the cursor exactly where it
/// was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineParser {
    /// `\` followed by ASCII punctuation.
    Escape,
    /// `&name;`, `&#digits;`, `&#xhex;`.
    Entity,
    /// `<scheme:body>`.
    Autolink(AutolinkParser),
    /// `!` followed by a reference-style link.
    ImageReference,
    /// `[text][label]`, `[label][]`, `[label]`.
    LinkReference,
    /// Greedy run of chars from a set.
    All(AllParser),
    /// First successful alternative.
    Composite(CompositeInlineParser),
}

impl InlineParser {
    /// The chars this parser can start on. Used only to prune dispatch.
    pub fn lead_chars(&self) -> CharSet {
        match self {
            InlineParser::Escape => CharSet::of(escape::LEAD),
            InlineParser::Entity => CharSet::of(entity::LEAD),
            InlineParser::Autolink(_) => CharSet::of(autolink::LEAD),
            InlineParser::ImageReference => CharSet::of(image_reference::LEAD),
            InlineParser::LinkReference => CharSet::of(link_reference::LEAD),
            InlineParser::All(p) => p.chars.clone(),
            InlineParser::Composite(p) => p.lead_chars(),
        }
    }

    /// Cheap lead-character test.
    pub fn can_parse(&self, cursor: &Cursor<'_>) -> bool {
        match self {
            InlineParser::All(p) => p.can_parse(cursor),
            InlineParser::Composite(p) => p.parsers.iter().any(|sub| sub.can_parse(cursor)),
            _ => cursor
                .peek()
                .is_some_and(|c| self.lead_chars().contains(c)),
        }
    }

    pub fn parse(&self, ctx: &InlineContext<'_>, cursor: &mut Cursor<'_>) -> Option<InlineNode> {
        let before = cursor.position();
        let node = match self {
            InlineParser::Escape => escape::parse(cursor),
            InlineParser::Entity => entity::parse(cursor),
            InlineParser::Autolink(p) => p.parse(ctx, cursor),
            InlineParser::ImageReference => image_reference::parse(ctx, cursor),
            InlineParser::LinkReference if ctx.in_link_text() => None,
            InlineParser::LinkReference => {
                link_reference::parse(ctx, cursor).map(InlineNode::LinkReference)
            }
            InlineParser::All(p) => p.parse(cursor),
            InlineParser::Composite(p) => p.parse(ctx, cursor),
        };
        match node {
            Some(_) => assert!(
                cursor.position() > before,
                "{self:?} matched without consuming input at byte {before}"
            ),
            None => assert_eq!(
                cursor.position(),
                before,
                "{self:?} failed without restoring the cursor"
            ),
        }
        node
    }

    /// Applies this parser repeatedly until it fails or the text ends.
    pub fn parse_many(&self, ctx: &InlineContext<'_>, cursor: &mut Cursor<'_>) -> Vec<InlineNode> {
        let mut out = vec![];
        while !cursor.is_eof() {
            match self.parse(ctx, cursor) {
                Some(node) => push_merged(&mut out, node),
                None => break,
            }
        }
        out
    }
}

/// Parses inline content into a sequence of [`InlineNode`]s.
///
/// At each position the registered parsers whose lead chars include the
/// current char are tried in registry order; the first match wins. When
/// none matches, the catch-all text parser consumes a run of literal text
/// (at least one char), so every iteration makes progress.
pub fn parse_inlines(ctx: &InlineContext<'_>, cursor: &mut Cursor<'_>) -> Vec<InlineNode> {
    match ctx.brackets {
        Some(_) => parse_sequence(ctx, cursor),
        None => {
            let brackets = BracketIndex::new(cursor);
            parse_sequence(&ctx.with_brackets(&brackets), cursor)
        }
    }
}

fn parse_sequence(ctx: &InlineContext<'_>, cursor: &mut Cursor<'_>) -> Vec<InlineNode> {
    let mut out = vec![];
    while let Some(c) = cursor.peek() {
        let node = ctx
            .registry
            .candidates(c)
            .find_map(|p| p.parse(ctx, cursor))
            .unwrap_or_else(|| {
                log::trace!("no inline parser matched {c:?} at byte {}", cursor.pos());
                parse_text_run(ctx.registry.significant_chars(), cursor)
            });
        push_merged(&mut out, node);
    }
    out
}

/// Consumes the maximal run of chars outside `significant`, or exactly one
/// char when the current char is significant.
fn parse_text_run(significant: &CharSet, cursor: &mut Cursor<'_>) -> InlineNode {
    let start = cursor.pos();
    let mut run = cursor.take_while(|c| !significant.contains(c));
    if run.is_empty() {
        let cp = cursor.save();
        cursor.advance(1);
        run = cp.literal(cursor);
    }
    InlineNode::Text(Text::new(Span::new(start, cursor.pos()), run))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{
        inline::types::{LinkDefinition, LinkTitle},
        references::ReferenceMap,
        registry::{ParserOptions, Registry},
    };

    fn parse_with(registry: &Registry, refs: &ReferenceMap, s: &str) -> Vec<InlineNode> {
        let ctx = InlineContext::new(registry, refs);
        parse_inlines(&ctx, &mut Cursor::new(s))
    }

    fn parse(s: &str) -> Vec<InlineNode> {
        parse_with(&Registry::default(), &ReferenceMap::new(), s)
    }

    fn text(start: usize, end: usize, value: &str) -> InlineNode {
        InlineNode::Text(Text::new(Span::new(start, end), value))
    }

    #[test]
    fn parse_simple_text() {
        assert_eq!(parse("hello world"), vec![text(0, 11, "hello world")]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn escapes_and_entities_merge_into_text() {
        assert_eq!(parse(r"a \* &amp; b"), vec![text(0, 12, "a * & b")]);
    }

    #[test]
    fn unmatched_lead_chars_become_text() {
        assert_eq!(parse("<foo:bar> & !x ["), vec![text(0, 16, "<foo:bar> & !x [")]);
    }

    #[test]
    fn autolink_between_text() {
        let nodes = parse("see <http://a.b> now");
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], text(0, 4, "see "));
        match &nodes[1] {
            InlineNode::Link(link) => {
                assert_eq!(link.span, Span::new(4, 16));
                assert_eq!(link.destination.url, "http://a.b");
                assert_eq!(link.label.text, "http://a.b");
                assert_eq!(link.title, LinkTitle::default());
            }
            other => panic!("expected Link, got {other:?}"),
        }
        assert_eq!(nodes[2], text(16, 20, " now"));
    }

    #[test]
    fn reference_link_resolves_through_store() {
        let mut refs = ReferenceMap::new();
        refs.insert("Foo", LinkDefinition::new("/url", Some("T".into())));
        let nodes = parse_with(&Registry::default(), &refs, "x [foo] y");
        assert_eq!(nodes.len(), 3);
        match &nodes[1] {
            InlineNode::LinkReference(r) => {
                assert_eq!(r.destination.url, "/url");
                assert_eq!(r.title.text.as_deref(), Some("T"));
                assert_eq!(r.span, Span::new(2, 7));
            }
            other => panic!("expected LinkReference, got {other:?}"),
        }
    }

    #[test]
    fn disabled_parsers_are_not_dispatched() {
        let registry = Registry::new(&ParserOptions {
            autolinks: false,
            ..ParserOptions::default()
        });
        let nodes = parse_with(&registry, &ReferenceMap::new(), "<http://a.b>");
        assert_eq!(nodes, vec![text(0, 12, "<http://a.b>")]);
    }

    #[test]
    fn composite_parse_many_stops_at_first_failure() {
        let registry = Registry::default();
        let refs = ReferenceMap::new();
        let ctx = InlineContext::new(&registry, &refs);
        let digits = InlineParser::Composite(CompositeInlineParser::new(vec![
            InlineParser::Entity,
            InlineParser::All(AllParser::new(CharSet::of("0123456789"))),
        ]));
        let mut cur = Cursor::new("12&#51;4x5");
        let nodes = digits.parse_many(&ctx, &mut cur);
        assert_eq!(nodes, vec![text(0, 8, "1234")]);
        assert_eq!(cur.rest(), "x5");
    }

    #[test]
    fn can_parse_uses_lead_chars() {
        let cur = Cursor::new("<x");
        assert!(InlineParser::Autolink(AutolinkParser::default()).can_parse(&cur));
        assert!(!InlineParser::Entity.can_parse(&cur));
        assert!(!InlineParser::Escape.can_parse(&Cursor::new("")));
    }
}
