use xi_rope::Rope;

use crate::parsing::{
    Document,
    blocks::{BlockNode, LeafBlock},
    inline::InlineNode,
    rope::span::Span,
};

/// Panics if the document breaks a structural invariant: spans out of
/// bounds, children outside their parent, unordered siblings, or inline
/// nodes inside raw zones.
pub fn check(rope: &Rope, doc: &Document) {
    let n = rope.len();
    let root = doc.root.span();
    assert!(
        root.start == 0 && root.end == n,
        "document span {root:?} does not cover the rope (len: {n})"
    );
    check_block(&doc.root, n);
}

fn check_block(node: &BlockNode, n: usize) {
    let span = node.span();
    assert!(
        span.start <= span.end && span.end <= n,
        "block span out of bounds: {span:?} (rope len: {n})"
    );
    assert!(
        node.start_line() <= node.end_line(),
        "block lines reversed: {}..{}",
        node.start_line(),
        node.end_line()
    );

    let mut prev: Option<&BlockNode> = None;
    for child in node.children() {
        assert!(
            span.contains(child.span()),
            "child span not contained in parent: child {:?}, parent {span:?}",
            child.span()
        );
        assert!(
            child.start_line() >= node.start_line() && child.end_line() <= node.end_line(),
            "child lines {}..{} outside parent lines {}..{}",
            child.start_line(),
            child.end_line(),
            node.start_line(),
            node.end_line()
        );
        if let Some(prev) = prev {
            assert!(
                prev.span().end <= child.span().start && prev.end_line() < child.start_line(),
                "siblings out of order: {:?} then {:?}",
                prev.span(),
                child.span()
            );
        }
        prev = Some(child);
        check_block(child, n);
    }

    if let Some(leaf) = node.as_leaf() {
        check_leaf(leaf);
    }
}

fn check_leaf(leaf: &LeafBlock) {
    if leaf.fenced_code().is_some() {
        assert!(
            leaf.inlines.is_empty(),
            "raw zone produced inline nodes: {:?}",
            leaf.inlines
        );
        return;
    }
    check_inlines(&leaf.inlines, Span::new(0, leaf.content.len()), &leaf.content);
}

fn check_inlines(nodes: &[InlineNode], bounds: Span, content: &str) {
    let mut end = bounds.start;
    for node in nodes {
        let span = node.span();
        assert!(
            !span.is_empty() && bounds.contains(span),
            "inline span {span:?} empty or outside {bounds:?}"
        );
        assert!(
            span.start >= end,
            "inline nodes overlap or are out of order at {span:?}"
        );
        assert!(
            content.is_char_boundary(span.start) && content.is_char_boundary(span.end),
            "inline span {span:?} splits a char"
        );
        end = span.end;

        let label = match node {
            InlineNode::Text(_) => None,
            InlineNode::Link(l) => Some(&l.label.inlines),
            InlineNode::LinkReference(r) => Some(&r.label.inlines),
            InlineNode::Image(i) => Some(&i.reference.label.inlines),
        };
        if let Some(label) = label {
            check_inlines(label, span, content);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{Parser, inline::LinkDefinition, references::ReferenceMap};

    fn check_str(s: &str) {
        let mut refs = ReferenceMap::new();
        refs.insert("ref", LinkDefinition::new("/r", None));
        let doc = Parser::default().with_references(refs).parse(s);
        check(&Rope::from(s), &doc);
    }

    #[test]
    fn well_formed_documents_pass() {
        check_str("");
        check_str("plain\n");
        check_str("> a\nlazy\n\n```\n> raw\n```\n");
        check_str("![ref] and [text][ref] <mailto:a@b.c>\n");
        check_str("> ```\n> x\n\n    ~~~ not a fence\n");
        check_str("a\r\nb\rc\n");
    }

    #[test]
    #[should_panic(expected = "does not cover the rope")]
    fn mismatched_rope_is_caught() {
        let doc = crate::parsing::parse("abc\n");
        check(&Rope::from("abc\ndef\n"), &doc);
    }
}
