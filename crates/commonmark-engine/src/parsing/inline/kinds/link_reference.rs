use std::collections::HashMap;

use crate::parsing::{
    cursor::Cursor,
    inline::{
        parser::{InlineContext, parse_inlines},
        types::{LinkLabel, LinkReference},
    },
    references::normalize_label,
    rope::span::Span,
};

pub const LEAD: &str = "[";

/// Longest accepted reference label, in chars.
pub const MAX_LABEL_LEN: usize = 999;

/// The label part following the link text.
enum LabelForm<'a> {
    /// `[text][label]`
    Full(&'a str),
    /// `[label][]`
    Collapsed,
    /// `[label]`
    Shortcut,
}

/// Parses a reference-style link and resolves it through the reference
/// store. An unknown label is a no-match and the cursor is restored.
pub fn parse(ctx: &InlineContext<'_>, cursor: &mut Cursor<'_>) -> Option<LinkReference> {
    if cursor.current_char() != '[' {
        return None;
    }
    let saved = cursor.save();
    let reference = attempt(ctx, cursor);
    if reference.is_none() {
        saved.restore(cursor);
    }
    reference
}

fn attempt(ctx: &InlineContext<'_>, cursor: &mut Cursor<'_>) -> Option<LinkReference> {
    let start = cursor.pos();
    let close = match ctx.brackets() {
        Some(index) => index.close_of(start),
        None => BracketIndex::new(cursor).close_of(start),
    }?;
    cursor.advance(1);
    let text_base = cursor.pos();
    let text = cursor.take_to(close);
    cursor.advance(1);

    let label = match trailing_label(cursor) {
        LabelForm::Full(label) => label,
        LabelForm::Collapsed | LabelForm::Shortcut if is_valid_label(text) => text,
        _ => return None,
    };
    let key = normalize_label(label);
    if key.is_empty() {
        return None;
    }
    let Some(definition) = ctx.references.lookup(&key) else {
        log::trace!("no link definition for {key:?}");
        return None;
    };

    let inlines = parse_inlines(&ctx.nested(), &mut Cursor::with_base(text, text_base));
    Some(LinkReference {
        span: Span::new(start, cursor.pos()),
        label: LinkLabel {
            text: text.to_string(),
            inlines,
        },
        key,
        destination: definition.destination.clone(),
        title: definition.title.clone(),
    })
}

/// Matching `]` for every `[` of a text, honoring backslash escapes. Link
/// text may hold balanced brackets, so an opening bracket's link text ends
/// at its pair.
#[derive(Debug)]
pub struct BracketIndex {
    /// Absolute position of `[` to absolute position of its `]`.
    closes: HashMap<usize, usize>,
}

impl BracketIndex {
    /// Pairs the brackets from the cursor's position to the end of its text.
    pub fn new(cursor: &Cursor<'_>) -> Self {
        let mut scan = cursor.clone();
        let mut open = vec![];
        let mut closes = HashMap::new();
        loop {
            let at = scan.pos();
            match scan.take() {
                None => break,
                Some('\\') => skip_escaped(&mut scan),
                Some('[') => open.push(at),
                Some(']') => {
                    if let Some(from) = open.pop() {
                        closes.insert(from, at);
                    }
                }
                Some(_) => {}
            }
        }
        Self { closes }
    }

    /// The `]` closing the `[` at absolute position `open`, if any.
    pub fn close_of(&self, open: usize) -> Option<usize> {
        self.closes.get(&open).copied()
    }
}

fn trailing_label<'a>(cursor: &mut Cursor<'a>) -> LabelForm<'a> {
    if cursor.current_char() != '[' {
        return LabelForm::Shortcut;
    }
    let cp = cursor.save();
    cursor.advance(1);
    match scan_label(cursor) {
        Some("") => LabelForm::Collapsed,
        Some(label) if !label.trim().is_empty() => LabelForm::Full(label),
        _ => {
            cp.restore(cursor);
            LabelForm::Shortcut
        }
    }
}

/// Label after the opening `[`: no unescaped brackets, bounded length.
fn scan_label<'a>(cursor: &mut Cursor<'a>) -> Option<&'a str> {
    let from = cursor.position();
    for _ in 0..=MAX_LABEL_LEN {
        let end = cursor.position();
        match cursor.take()? {
            '\\' => skip_escaped(cursor),
            '[' => return None,
            ']' => {
                let label = &cursor.text()[from..end];
                return (label.chars().count() <= MAX_LABEL_LEN).then_some(label);
            }
            _ => {}
        }
    }
    None
}

fn skip_escaped(cursor: &mut Cursor<'_>) {
    if matches!(cursor.current_char(), '[' | ']' | '\\') {
        cursor.advance(1);
    }
}

/// Link text doubling as a label (collapsed and shortcut forms).
fn is_valid_label(text: &str) -> bool {
    let mut cursor = Cursor::new(text);
    while let Some(c) = cursor.take() {
        match c {
            '\\' => skip_escaped(&mut cursor),
            '[' | ']' => return false,
            _ => {}
        }
    }
    text.chars().count() <= MAX_LABEL_LEN
}
