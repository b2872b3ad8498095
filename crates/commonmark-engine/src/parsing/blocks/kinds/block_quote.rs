use crate::parsing::cursor::Cursor;

/// Blockquote block type with owned delimiter constant.
///
/// The same marker both opens a blockquote and continues it on later
/// lines.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';
    pub const MAX_INDENT: usize = 3;

    /// Consumes `>` after at most three spaces of indent, plus one optional
    /// following space. Leaves the cursor alone when there is no marker.
    pub fn parse_marker(cursor: &mut Cursor<'_>) -> bool {
        if cursor.indent() > Self::MAX_INDENT || cursor.first_non_space_char() != Self::PREFIX {
            return false;
        }
        cursor.advance_to_first_non_space();
        cursor.advance(1);
        if cursor.current_char() == ' ' {
            cursor.advance(1);
        }
        true
    }
}
