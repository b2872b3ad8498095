/// Truncates `s` to at most `max` bytes (on a char boundary) with a "..."
/// suffix if anything was cut. Newlines are shown escaped.
///
/// Used for human-readable snapshot output.
pub fn preview(s: &str, max: usize) -> String {
    let mut out = if s.len() > max {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        let mut t = s[..cut].to_string();
        t.push_str("...");
        t
    } else {
        s.to_string()
    };
    if out.contains('\n') {
        out = out.replace('\n', "\\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_text_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
    }

    #[test]
    fn preview_exact_length_unchanged() {
        assert_eq!(preview("hello", 5), "hello");
    }

    #[test]
    fn preview_truncates_long_text() {
        assert_eq!(preview("hello world", 5), "hello...");
    }

    #[test]
    fn preview_truncates_to_zero() {
        assert_eq!(preview("hello", 0), "...");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("héllo", 2), "h...");
    }

    #[test]
    fn preview_escapes_newlines() {
        assert_eq!(preview("a\nb", 10), "a\\nb");
    }
}
