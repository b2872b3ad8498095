use serde::Serialize;

use crate::parsing::rope::span::Span;

/// A parsed inline node.
///
/// Spans are byte offsets into the content string of the leaf block that
/// owns the node; slicing that content with [`InlineNode::span`] gives the
/// literal source the node was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum InlineNode {
    /// Literal text, with escapes and entities already decoded in `value`.
    Text(Text),
    /// An autolink `<scheme:...>`.
    Link(Link),
    /// A reference-style link resolved through the reference store.
    LinkReference(LinkReference),
    /// `!` followed by a reference-style link.
    Image(ImageReference),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text {
    pub span: Span,
    pub value: String,
}

/// Visible label of a link: its raw text and the inlines parsed from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkLabel {
    pub text: String,
    pub inlines: Vec<InlineNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkDestination {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkTitle {
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub span: Span,
    pub label: LinkLabel,
    pub destination: LinkDestination,
    pub title: LinkTitle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkReference {
    pub span: Span,
    pub label: LinkLabel,
    /// Normalized label the reference store was queried with.
    pub key: String,
    pub destination: LinkDestination,
    pub title: LinkTitle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReference {
    /// Span including the leading `!`.
    pub span: Span,
    pub reference: LinkReference,
}

/// The target a reference label resolves to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkDefinition {
    pub destination: LinkDestination,
    pub title: LinkTitle,
}

impl Text {
    pub fn new(span: Span, value: impl Into<String>) -> Self {
        Self {
            span,
            value: value.into(),
        }
    }
}

impl LinkDestination {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl LinkTitle {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.as_deref().is_none_or(str::is_empty)
    }
}

impl LinkDefinition {
    pub fn new(url: impl Into<String>, title: Option<String>) -> Self {
        Self {
            destination: LinkDestination::new(url),
            title: LinkTitle { text: title },
        }
    }
}

impl InlineNode {
    /// Extracts the full span from any inline node variant.
    pub fn span(&self) -> Span {
        match self {
            InlineNode::Text(t) => t.span,
            InlineNode::Link(l) => l.span,
            InlineNode::LinkReference(r) => r.span,
            InlineNode::Image(i) => i.span,
        }
    }

    /// The source text this node was parsed from.
    pub fn literal<'a>(&self, content: &'a str) -> &'a str {
        self.span().slice(content)
    }

    /// The plain-text rendering: text values and link label text.
    pub fn plain_text(&self) -> String {
        match self {
            InlineNode::Text(t) => t.value.clone(),
            InlineNode::Link(l) => plain_text(&l.label.inlines),
            InlineNode::LinkReference(r) => plain_text(&r.label.inlines),
            InlineNode::Image(i) => plain_text(&i.reference.label.inlines),
        }
    }
}

/// Concatenates the plain text of a node sequence.
pub fn plain_text(nodes: &[InlineNode]) -> String {
    nodes.iter().map(InlineNode::plain_text).collect()
}

/// Appends `node`, merging it into a directly preceding text node.
pub fn push_merged(out: &mut Vec<InlineNode>, node: InlineNode) {
    if let (Some(InlineNode::Text(prev)), InlineNode::Text(next)) = (out.last_mut(), &node)
        && prev.span.end == next.span.start
    {
        prev.span.end = next.span.end;
        prev.value.push_str(&next.value);
        return;
    }
    out.push(node);
}
