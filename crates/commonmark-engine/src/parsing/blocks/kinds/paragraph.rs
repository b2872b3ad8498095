use crate::parsing::cursor::Cursor;

/// Paragraph block type (marker struct).
///
/// Paragraphs have no delimiters - they are the default leaf block
/// when no other block opener matches. Inline parsing is applied
/// to paragraph content.
pub struct Paragraph;

impl Paragraph {
    /// A paragraph continues on any non-blank line.
    pub fn match_next_line(cursor: &Cursor<'_>) -> bool {
        !cursor.is_blank()
    }

    /// The part of a line a paragraph keeps: leading spaces dropped.
    pub fn line_content<'a>(cursor: &mut Cursor<'a>) -> &'a str {
        cursor.advance_to_first_non_space();
        cursor.rest()
    }

    /// Joins paragraph lines and trims trailing whitespace.
    pub fn content(lines: &[String]) -> String {
        lines.join("\n").trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_end_paragraphs() {
        assert!(Paragraph::match_next_line(&Cursor::new("text")));
        assert!(!Paragraph::match_next_line(&Cursor::new("   ")));
        assert!(!Paragraph::match_next_line(&Cursor::new("")));
    }

    #[test]
    fn leading_spaces_are_dropped() {
        let mut cur = Cursor::new("   abc  ");
        assert_eq!(Paragraph::line_content(&mut cur), "abc  ");
    }

    #[test]
    fn content_joins_and_trims() {
        let lines = vec!["a ".to_string(), "b  ".to_string()];
        assert_eq!(Paragraph::content(&lines), "a \nb");
    }
}
