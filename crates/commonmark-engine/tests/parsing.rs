use commonmark_engine::{
    BlockNode, LeafBlock, LinkDefinition, Parser, ParserOptions, ReferenceMap,
    parsing::{
        context::MAX_CONTAINER_DEPTH,
        cursor::Cursor,
        inline::{InlineContext, InlineNode},
        parse, snapshot,
    },
};
use pretty_assertions::assert_eq;
use pulldown_cmark::{CodeBlockKind, Event, Tag, TagEnd};
use xi_rope::Rope;

fn references() -> ReferenceMap {
    let mut refs = ReferenceMap::new();
    refs.insert(
        "Rust",
        LinkDefinition::new("https://www.rust-lang.org", Some("Rust".into())),
    );
    refs.insert("logo", LinkDefinition::new("/logo.png", None));
    refs
}

fn parser() -> Parser {
    Parser::new(ParserOptions::default()).with_references(references())
}

fn outline(name: &str) -> String {
    let md = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();
    let rope = Rope::from(md.as_str());

    let doc = parser().parse_rope(&rope);
    snapshot::invariants(&rope, &doc);

    snapshot::normalize(&doc).to_string()
}

#[test]
fn fixture_fences() {
    insta::assert_snapshot!(outline("fences"), @r#"
    FencedCode(`x3) L1-3 0..15 info="js" "code\n"
    FencedCode(`x4) L5-8 16..41 info="" "```\nstill code\n"
    FencedCode(~x3) L10-11 42..64 info="python extra" ""
    Paragraph L12-12 64..67 "``"
      - Text 0..2 "``"
    "#);
}

#[test]
fn fixture_quotes() {
    insta::assert_snapshot!(outline("quotes"), @r#"
    BlockQuote L1-6 0..46
      Paragraph L1-2 0..13 "first\nlazy"
        - Text 0..10 "first\nlazy"
      BlockQuote L3-3 13..24
        Paragraph L3-3 13..24 "nested"
          - Text 0..6 "nested"
      Paragraph L5-6 26..46 "after blank\nplain"
        - Text 0..17 "after blank\nplain"
    "#);
}

#[test]
fn fixture_links() {
    insta::assert_snapshot!(outline("links"), @r#"
    Paragraph L1-2 0..114 "Visit <https://example.com/a?b=1&amp;c=2> or [the site][Rust].\n![logo] and \[rus..."
      - Text 0..6 "Visit "
      - Link 6..41 "https://example.com/a?b=1&c=2" destination=https://example.com/a?b=1&c=2
      - Text 41..45 " or "
      - LinkReference 45..61 "the site" destination=https://www.rust-lang.org key=rust title=Rust
      - Text 61..63 ".\n"
      - Image 63..70 "logo" destination=/logo.png key=logo
      - Text 70..113 " and [rust] and [unknown] © <foo:bar>"
    "#);
}

fn only_leaf(doc: &commonmark_engine::Document) -> LeafBlock {
    let leaves: Vec<_> = doc.leaves().cloned().collect();
    assert_eq!(leaves.len(), 1, "expected exactly one leaf");
    leaves.into_iter().next().unwrap()
}

#[test]
fn fenced_code_fields() {
    let doc = parse("```js\ncode\n```");
    let leaf = only_leaf(&doc);
    let code = leaf.fenced_code().expect("fenced code");
    assert_eq!(code.info, "js");
    assert_eq!(leaf.content, "code\n");
    assert_eq!(code.fence.char, '`');
    assert_eq!(code.fence.length, 3);
    assert!(leaf.inlines.is_empty());
}

#[test]
fn longer_fence_needs_a_longer_close() {
    let doc = parse("````\ncode\n```\n");
    let leaf = only_leaf(&doc);
    assert_eq!(leaf.fenced_code().map(|c| c.fence.length), Some(4));
    assert_eq!(leaf.content, "code\n```\n");
}

#[test]
fn two_backticks_do_not_open_a_fence() {
    let doc = parse("``\n");
    let leaf = only_leaf(&doc);
    assert!(leaf.is_paragraph());
    assert_eq!(leaf.content, "``");
}

#[test]
fn backtick_in_info_string_is_not_a_fence() {
    let doc = parse("``` a`b\n");
    assert!(only_leaf(&doc).is_paragraph());
    let doc = parse("~~~ a~b\n");
    assert_eq!(only_leaf(&doc).fenced_code().map(|c| c.info.as_str()), Some("a~b"));
}

#[test]
fn unregistered_scheme_falls_back_to_text() {
    let nodes = parser().parse_inlines("<foo:bar>");
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].plain_text(), "<foo:bar>");
    assert!(matches!(nodes[0], InlineNode::Text(_)));
}

#[test]
fn disabled_images_leave_the_bang_as_text() {
    let parser = Parser::new(ParserOptions {
        images: false,
        ..ParserOptions::default()
    })
    .with_references(references());
    let nodes = parser.parse_inlines("![logo]");
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].plain_text(), "!");
    assert!(matches!(nodes[1], InlineNode::LinkReference(_)));
}

#[test]
fn every_failed_inline_attempt_leaves_the_cursor_unmoved() {
    let parser = parser();
    let ctx = InlineContext::new(parser.registry(), parser.references());
    let inputs = [
        "<http://a<b>", "<foo:bar>", "![nope]", "!x", "[nope]", "&bogus;", "\\a", "<", "[", "!",
        "&", "\\",
    ];
    for input in inputs {
        for inline_parser in parser.registry().inline_parsers() {
            let mut cursor = Cursor::new(input);
            if inline_parser.parse(&ctx, &mut cursor).is_none() {
                assert_eq!(cursor.position(), 0, "{inline_parser:?} on {input:?}");
            }
        }
    }
}

fn pulldown_code_blocks(md: &str) -> Vec<(String, String)> {
    let mut out = vec![];
    let mut current: Option<(String, String)> = None;
    for event in pulldown_cmark::Parser::new(md) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                current = Some((info.to_string(), String::new()));
            }
            Event::Text(text) => {
                if let Some((_, body)) = current.as_mut() {
                    body.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => out.extend(current.take()),
            _ => {}
        }
    }
    out
}

fn our_code_blocks(md: &str) -> Vec<(String, String)> {
    parse(md)
        .leaves()
        .filter_map(|leaf| {
            leaf.fenced_code()
                .map(|code| (code.info.clone(), leaf.content.clone()))
        })
        .collect()
}

#[test]
fn fenced_code_agrees_with_pulldown_cmark() {
    let cases = [
        "```rust\nfn x() {}\n```\n",
        "~~~\na\n\nb\n~~~\n",
        "````\n```\n````\n",
        "```\nunterminated\n",
        " ```\n  indented\n ```\n",
        "```a&amp;b\nx\n```\n",
        "```\\#x\ny\n```\n",
        "text\n```\ncode\n```\nmore\n",
        "```\n```\n",
    ];
    for md in cases {
        assert_eq!(our_code_blocks(md), pulldown_code_blocks(md), "input: {md:?}");
    }
}

#[test]
fn parsing_terminates_and_keeps_invariants_on_small_inputs() {
    const ALPHABET: [char; 10] = ['`', '~', '>', '[', ']', '!', '<', '&', ' ', '\n'];
    let parser = parser();
    let mut inputs = vec![String::new()];
    for _ in 0..4 {
        inputs = inputs
            .iter()
            .flat_map(|prefix| {
                ALPHABET.iter().map(move |c| {
                    let mut s = prefix.clone();
                    s.push(*c);
                    s
                })
            })
            .collect();
        for input in &inputs {
            let rope = Rope::from(input.as_str());
            let doc = parser.parse_rope(&rope);
            snapshot::invariants(&rope, &doc);
        }
    }
}

#[test]
fn leaves_can_be_processed_in_parallel() {
    let parser = parser();
    let docs: Vec<String> = (0..8)
        .map(|i| format!("para {i} <http://x/{i}>\n\n> quote [Rust]\n"))
        .collect();
    let counts: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = docs
            .iter()
            .map(|md| {
                let parser = &parser;
                scope.spawn(move || parser.parse(md).leaves().map(|l| l.inlines.len()).sum())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(counts.iter().all(|&n| n == 4));
}

#[test]
fn a_long_line_of_quote_markers_is_parsed_and_dropped() {
    let md = format!("{}x\n", ">".repeat(100_000));
    let rope = Rope::from(md.as_str());
    let doc = parser().parse_rope(&rope);
    snapshot::invariants(&rope, &doc);

    let outline = snapshot::normalize(&doc).to_string();
    // one line per quote, plus the paragraph and its text node
    assert_eq!(outline.lines().count(), MAX_CONTAINER_DEPTH + 2);
    assert_eq!(only_leaf(&doc).content.len(), 100_000 - MAX_CONTAINER_DEPTH + 1);
    drop(doc);
}

#[test]
fn runs_of_unmatched_lead_chars_parse_in_linear_time() {
    const N: usize = 50_000;
    let parser = parser();
    for lead in ["<", "[", "![", "<http:", "[a]["] {
        let md = lead.repeat(N);
        let started = std::time::Instant::now();
        let nodes = parser.parse_inlines(&md);
        let elapsed = started.elapsed();
        assert_eq!(nodes.len(), 1, "{lead:?} should stay one text node");
        assert_eq!(nodes[0].plain_text(), md);
        assert!(
            elapsed < std::time::Duration::from_secs(2),
            "{N} x {lead:?} took {elapsed:?}"
        );
    }
}

#[test]
fn link_text_never_contains_another_link() {
    let nodes = parser().parse_inlines("[[Rust]][Rust] and [![logo]][Rust]");
    let outer: Vec<_> = nodes
        .iter()
        .filter_map(|node| match node {
            InlineNode::LinkReference(r) => Some(r),
            _ => None,
        })
        .collect();
    assert_eq!(outer.len(), 2);
    assert!(matches!(outer[0].label.inlines[..], [InlineNode::Text(_)]));
    assert!(matches!(outer[1].label.inlines[..], [InlineNode::Image(_)]));
}

#[test]
fn crlf_and_cr_line_endings() {
    let doc = parse("> a\r\n> b\rc\r\n");
    let quote = &doc.blocks()[0];
    assert!(matches!(quote, BlockNode::Container(_)));
    assert_eq!(quote.end_line(), 3);
    assert_eq!(only_leaf(&doc).content, "a\nb\nc");
}
