use xi_rope::Rope;

use super::span::Span;

/// A reference to a single line in the rope with its byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// 1-based line number.
    pub number: usize,
    /// Byte span of this line in the rope (includes the line ending if present).
    pub span: Span,
    /// The line text without its line ending.
    pub text: String,
}

/// Returns the lines of `rope` with their byte spans.
///
/// `\n`, `\r\n` and a bare `\r` all end a line. Uses `lines_raw` so spans
/// keep accounting for the terminators.
pub fn lines_with_spans(rope: &Rope) -> Vec<LineRef> {
    let mut out = Vec::new();
    let mut offset = 0usize;

    for raw in rope.lines_raw(..) {
        let raw: &str = raw.as_ref();
        let body = raw.strip_suffix('\n').unwrap_or(raw);
        let body = body.strip_suffix('\r').unwrap_or(body);

        // Bare `\r` inside the chunk also terminates lines.
        let mut pieces = body.split('\r').peekable();
        let mut local = 0usize;
        while let Some(piece) = pieces.next() {
            let start = offset + local;
            local += piece.len();
            let end = if pieces.peek().is_some() {
                local += 1;
                offset + local
            } else {
                offset + raw.len()
            };
            out.push(LineRef {
                number: out.len() + 1,
                span: Span { start, end },
                text: piece.to_string(),
            });
        }
        offset += raw.len();
    }
    out
}

/// Expands tabs in the leading whitespace of `line` to the next multiple of
/// four columns. Tabs after the first other character are kept verbatim.
pub fn expand_leading_tabs(line: &str) -> String {
    const TAB_STOP: usize = 4;

    let mut out = String::with_capacity(line.len());
    let mut column = 0usize;
    for (i, c) in line.char_indices() {
        match c {
            ' ' => {
                out.push(' ');
                column += 1;
            }
            '\t' => {
                let width = TAB_STOP - column % TAB_STOP;
                out.extend(std::iter::repeat_n(' ', width));
                column += width;
            }
            _ => {
                out.push_str(&line[i..]);
                return out;
            }
        }
    }
    out
}
