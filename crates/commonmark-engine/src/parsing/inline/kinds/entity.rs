use crate::parsing::{
    cursor::Cursor,
    inline::types::{InlineNode, Text},
    rope::span::Span,
};

pub const LEAD: &str = "&";

const MAX_NAME_LEN: usize = 32;
const MAX_DECIMAL_DIGITS: usize = 7;
const MAX_HEX_DIGITS: usize = 6;

/// Parses a character reference: `&name;`, `&#digits;` or `&#xhex;`.
///
/// Named references are decoded with `html_escape`; an unknown name is a
/// no-match. Numeric references to U+0000 or to invalid code points decode
/// to U+FFFD.
pub fn parse(cursor: &mut Cursor<'_>) -> Option<InlineNode> {
    if cursor.current_char() != '&' {
        return None;
    }
    let saved = cursor.save();
    let start = cursor.pos();
    cursor.advance(1);

    let decoded = if cursor.current_char() == '#' {
        cursor.advance(1);
        decode_numeric(cursor)
    } else {
        decode_named(cursor, saved.position())
    };

    match decoded {
        Some(value) => Some(InlineNode::Text(Text::new(
            Span::new(start, cursor.pos()),
            value,
        ))),
        None => {
            saved.restore(cursor);
            None
        }
    }
}

fn decode_numeric(cursor: &mut Cursor<'_>) -> Option<String> {
    let hex = matches!(cursor.current_char(), 'x' | 'X');
    if hex {
        cursor.advance(1);
    }
    let digits = if hex {
        cursor.take_while_max(|c| c.is_ascii_hexdigit(), MAX_HEX_DIGITS + 1)
    } else {
        cursor.take_while_max(|c| c.is_ascii_digit(), MAX_DECIMAL_DIGITS + 1)
    };
    let max = if hex { MAX_HEX_DIGITS } else { MAX_DECIMAL_DIGITS };
    if digits.is_empty() || digits.len() > max || cursor.take() != Some(';') {
        return None;
    }
    let code = u32::from_str_radix(digits, if hex { 16 } else { 10 }).ok()?;
    let c = match code {
        0 => char::REPLACEMENT_CHARACTER,
        n => char::from_u32(n).unwrap_or(char::REPLACEMENT_CHARACTER),
    };
    Some(c.to_string())
}

fn decode_named(cursor: &mut Cursor<'_>, start: usize) -> Option<String> {
    if !cursor.current_char().is_ascii_alphabetic() {
        return None;
    }
    let name = cursor.take_while_max(|c| c.is_ascii_alphanumeric(), MAX_NAME_LEN + 1);
    if name.len() > MAX_NAME_LEN || cursor.take() != Some(';') {
        return None;
    }
    let literal = &cursor.text()[start..cursor.position()];
    let decoded = html_escape::decode_html_entities(literal);
    // A known name decodes to one or two code points; anything else means
    // the name was unknown or only a legacy prefix of it was recognised.
    if decoded == literal || decoded.chars().count() > 2 {
        return None;
    }
    Some(decoded.into_owned())
}
