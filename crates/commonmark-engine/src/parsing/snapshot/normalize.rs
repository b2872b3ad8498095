use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::parsing::{
    Document,
    blocks::{BlockNode, ContainerKind, LeafKind},
    inline::InlineNode,
    rope::{slice::preview, span::Span},
};

const BLOCK_PREVIEW: usize = 80;
const INLINE_PREVIEW: usize = 60;

#[derive(Debug, Serialize)]
pub struct Snap {
    pub blocks: Vec<BlockSnap>,
}

#[derive(Debug, Serialize)]
pub struct BlockSnap {
    pub kind: String,
    pub lines: (usize, usize),
    pub span: (usize, usize),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub inline: Vec<InlineSnap>,
    pub children: Vec<BlockSnap>,
}

#[derive(Debug, Serialize)]
pub struct InlineSnap {
    pub kind: String,
    pub span: (usize, usize),
    pub text: String,
    pub parts: BTreeMap<String, String>,
}

pub fn normalize(doc: &Document) -> Snap {
    Snap {
        blocks: doc.blocks().iter().map(block_snap).collect(),
    }
}

fn block_snap(node: &BlockNode) -> BlockSnap {
    let lines = (node.start_line(), node.end_line());
    let span = pair(node.span());
    match node {
        BlockNode::Container(c) => BlockSnap {
            kind: match c.kind {
                ContainerKind::Document => "Document".into(),
                ContainerKind::BlockQuote => "BlockQuote".into(),
            },
            lines,
            span,
            info: None,
            text: None,
            inline: vec![],
            children: c.children.iter().map(block_snap).collect(),
        },
        BlockNode::Leaf(l) => {
            let (kind, info) = match &l.kind {
                LeafKind::Paragraph => ("Paragraph".to_string(), None),
                LeafKind::FencedCode(code) => (
                    format!("FencedCode({}x{})", code.fence.char, code.fence.length),
                    Some(code.info.clone()),
                ),
            };
            BlockSnap {
                kind,
                lines,
                span,
                info,
                text: Some(preview(&l.content, BLOCK_PREVIEW)),
                inline: l.inlines.iter().map(inline_snap).collect(),
                children: vec![],
            }
        }
    }
}

fn inline_snap(node: &InlineNode) -> InlineSnap {
    let mut parts = BTreeMap::new();
    let kind = match node {
        InlineNode::Text(_) => "Text",
        InlineNode::Link(link) => {
            parts.insert("destination".into(), link.destination.url.clone());
            "Link"
        }
        InlineNode::LinkReference(r) => {
            parts.insert("key".into(), r.key.clone());
            parts.insert("destination".into(), r.destination.url.clone());
            if let Some(title) = &r.title.text {
                parts.insert("title".into(), title.clone());
            }
            "LinkReference"
        }
        InlineNode::Image(image) => {
            let r = &image.reference;
            parts.insert("key".into(), r.key.clone());
            parts.insert("destination".into(), r.destination.url.clone());
            if let Some(title) = &r.title.text {
                parts.insert("title".into(), title.clone());
            }
            "Image"
        }
    };
    InlineSnap {
        kind: kind.into(),
        span: pair(node.span()),
        text: preview(&node.plain_text(), INLINE_PREVIEW),
        parts,
    }
}

fn pair(span: Span) -> (usize, usize) {
    (span.start, span.end)
}

/// Indented outline, one line per block and per inline node.
impl fmt::Display for Snap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.blocks {
            block.write(f, 0)?;
        }
        Ok(())
    }
}

impl BlockSnap {
    fn write(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        write!(
            f,
            "{pad}{} L{}-{} {}..{}",
            self.kind, self.lines.0, self.lines.1, self.span.0, self.span.1
        )?;
        if let Some(info) = &self.info {
            write!(f, " info=\"{info}\"")?;
        }
        if let Some(text) = &self.text {
            write!(f, " \"{text}\"")?;
        }
        writeln!(f)?;
        for inline in &self.inline {
            write!(
                f,
                "{pad}  - {} {}..{} \"{}\"",
                inline.kind, inline.span.0, inline.span.1, inline.text
            )?;
            for (name, value) in &inline.parts {
                write!(f, " {name}={value}")?;
            }
            writeln!(f)?;
        }
        for child in &self.children {
            child.write(f, depth + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse;

    #[test]
    fn outline_of_mixed_document() {
        let doc = parse("see <http://a.b>\n\n> quoted\n\n```rust\nfn main() {}\n```\n");
        insta::assert_snapshot!(normalize(&doc).to_string(), @r#"
        Paragraph L1-1 0..17 "see <http://a.b>"
          - Text 0..4 "see "
          - Link 4..16 "http://a.b" destination=http://a.b
        BlockQuote L3-3 18..27
          Paragraph L3-3 18..27 "quoted"
            - Text 0..6 "quoted"
        FencedCode(`x3) L5-7 28..53 info="rust" "fn main() {}\n"
        "#);
    }

    #[test]
    fn serializes_to_json_shape() {
        let snap = normalize(&parse("x\n"));
        assert_eq!(snap.blocks.len(), 1);
        assert_eq!(snap.blocks[0].kind, "Paragraph");
        assert_eq!(snap.blocks[0].text.as_deref(), Some("x"));
        assert_eq!(snap.blocks[0].inline[0].kind, "Text");
    }
}
