use serde::Serialize;

use crate::parsing::{
    cursor::Cursor,
    inline::{kinds::escape::escaped_string, parser::InlineContext, types::plain_text},
};

/// Fenced code block syntax. All fence knowledge lives here: opening,
/// continuation, closing and the info string.
pub struct CodeFence;

/// The opening fence as recorded when the block opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fence {
    /// `` ` `` or `~`.
    pub char: char,
    /// Length of the opening run; a closing run must be at least this long.
    pub length: usize,
    /// Indent of the opening fence, stripped from each content line.
    pub offset: usize,
}

/// Metadata of a closed fenced code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FencedCode {
    pub fence: Fence,
    /// Decoded info string: escapes and entities resolved, spaces collapsed.
    pub info: String,
}

impl CodeFence {
    pub const BACKTICK: char = '`';
    pub const TILDE: char = '~';
    pub const MIN_LENGTH: usize = 3;
    pub const MAX_INDENT: usize = 3;

    /// Parses an opening fence. On success the cursor sits at the start of
    /// the info string; otherwise it is restored.
    pub fn parse_start(cursor: &mut Cursor<'_>) -> Option<Fence> {
        let saved = cursor.save();
        let offset = cursor.advance_while_max(|c| c == ' ', Self::MAX_INDENT);

        let fence_char = cursor.current_char();
        if fence_char == Self::BACKTICK || fence_char == Self::TILDE {
            let length = cursor.advance_while(|c| c == fence_char);
            let info_ok = fence_char == Self::TILDE || !cursor.contains(fence_char);
            if length >= Self::MIN_LENGTH && info_ok {
                return Some(Fence {
                    char: fence_char,
                    length,
                    offset,
                });
            }
        }

        saved.restore(cursor);
        None
    }

    /// Continuation: skips up to `offset` spaces. A fence stays open until
    /// [`closes`](Self::closes) says otherwise.
    pub fn match_next_line(fence: &Fence, cursor: &mut Cursor<'_>) -> bool {
        cursor.advance_while_max(|c| c == ' ', fence.offset);
        true
    }

    /// True if the rest of the line is a closing fence for `fence`: at most
    /// three spaces, a run of the fence char at least as long as the
    /// opening, then only spaces or tabs. Never moves the cursor.
    pub fn closes(fence: &Fence, cursor: &mut Cursor<'_>) -> bool {
        let saved = cursor.save();
        cursor.advance_while_max(|c| c == ' ', Self::MAX_INDENT);
        let closes = cursor.current_char() == fence.char
            && cursor.advance_while(|c| c == fence.char) >= fence.length
            && cursor.rest().chars().all(|c| c == ' ' || c == '\t');
        saved.restore(cursor);
        closes
    }

    /// Turns the raw lines of a closed block into `(metadata, contents)`.
    /// The first line is the info string; the rest are the contents,
    /// newline-joined with a trailing newline.
    pub fn finish(fence: Fence, lines: &[String], ctx: &InlineContext<'_>) -> (FencedCode, String) {
        let (info, contents) = match lines.split_first() {
            Some((first, rest)) => (decode_info(first, ctx), rest),
            None => (String::new(), &[][..]),
        };
        let contents = if contents.is_empty() {
            String::new()
        } else {
            let mut joined = contents.join("\n");
            joined.push('\n');
            joined
        };
        (FencedCode { fence, info }, contents)
    }
}

/// Escapes and entities decoded, runs of whitespace collapsed, trimmed.
fn decode_info(raw: &str, ctx: &InlineContext<'_>) -> String {
    let nodes = escaped_string().parse_many(ctx, &mut Cursor::new(raw));
    plain_text(&nodes).split_whitespace().collect::<Vec<_>>().join(" ")
}

impl FencedCode {
    /// The info string split on spaces.
    pub fn info_words(&self) -> impl Iterator<Item = &str> {
        self.info.split(' ').filter(|w| !w.is_empty())
    }

    /// The first info word, conventionally the language.
    pub fn language(&self) -> Option<&str> {
        self.info_words().next()
    }
}
