//! # Cursor
//!
//! A backtracking scanner over one input string. Every block- and
//! inline-parser attempt is speculative: it takes a [`Checkpoint`] with
//! [`Cursor::save`], consumes characters, and on failure restores the
//! checkpoint so the attempt leaves no trace.
//!
//! Positions are byte offsets into UTF-8 text and always sit on char
//! boundaries. Counts (`advance`, `count_while`, `take_n`) are in chars.

/// Sentinel returned by [`Cursor::current_char`] at end of text.
pub const END: char = '\0';

/// A cursor for character-by-character parsing with position tracking.
///
/// Operates over a string slice while tracking the absolute byte position
/// in the enclosing text (via `base` offset).
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    base: usize,
    position: usize,
}

/// A saved cursor position.
///
/// Checkpoints nest freely. Restoring an outer checkpoint makes any inner
/// checkpoint taken after it stale; a stale checkpoint must not be restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    position: usize,
}

impl Checkpoint {
    /// Local byte position this checkpoint was taken at.
    pub fn position(self) -> usize {
        self.position
    }

    /// Resets `cursor` to this checkpoint.
    ///
    /// # Panics
    /// Panics if the checkpoint does not belong to `cursor`'s text.
    pub fn restore(self, cursor: &mut Cursor<'_>) {
        assert!(
            self.position <= cursor.text.len() && cursor.text.is_char_boundary(self.position),
            "checkpoint at {} is not a valid position in a text of {} bytes",
            self.position,
            cursor.text.len()
        );
        cursor.position = self.position;
    }

    /// The text consumed between this checkpoint and the cursor's position.
    ///
    /// # Panics
    /// Panics if the cursor is behind the checkpoint.
    pub fn literal<'a>(self, cursor: &Cursor<'a>) -> &'a str {
        assert!(
            self.position <= cursor.position,
            "checkpoint at {} is ahead of the cursor at {}",
            self.position,
            cursor.position
        );
        &cursor.text[self.position..cursor.position]
    }
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `text`.
    pub fn new(text: &'a str) -> Self {
        Self::with_base(text, 0)
    }

    /// Creates a new cursor at the start of `text` whose absolute positions
    /// are offset by `base`.
    pub fn with_base(text: &'a str, base: usize) -> Self {
        Self {
            text,
            base,
            position: 0,
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Current byte position relative to the start of the text.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the current absolute byte position (base + local index).
    pub fn pos(&self) -> usize {
        self.base + self.position
    }

    /// Returns true if at end of text.
    pub fn is_eof(&self) -> bool {
        self.position >= self.text.len()
    }

    /// Peeks at the current char without advancing.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The current char, or [`END`] at end of text.
    pub fn current_char(&self) -> char {
        self.peek().unwrap_or(END)
    }

    /// The char `relative` chars ahead of the current one, or [`END`].
    pub fn char_at(&self, relative: usize) -> char {
        self.rest().chars().nth(relative).unwrap_or(END)
    }

    /// The unconsumed remainder of the text.
    pub fn rest(&self) -> &'a str {
        &self.text[self.position..]
    }

    pub fn save(&self) -> Checkpoint {
        Checkpoint {
            position: self.position,
        }
    }

    /// Advances by up to `count` chars, clamped at end of text.
    /// Returns the number of chars actually advanced.
    pub fn advance(&mut self, count: usize) -> usize {
        let (chars, bytes) = self.measure(count, |_| true);
        self.position += bytes;
        chars
    }

    /// Advances while `predicate` holds for the current char.
    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) -> usize {
        self.advance_while_max(predicate, usize::MAX)
    }

    /// Advances while `predicate` holds, consuming at most `max` chars.
    pub fn advance_while_max(&mut self, predicate: impl Fn(char) -> bool, max: usize) -> usize {
        let (chars, bytes) = self.measure(max, predicate);
        self.position += bytes;
        chars
    }

    /// Non-mutating counterpart of [`advance_while`](Self::advance_while).
    pub fn count_while(&self, predicate: impl Fn(char) -> bool) -> usize {
        self.count_while_max(predicate, usize::MAX)
    }

    /// Non-mutating counterpart of [`advance_while_max`](Self::advance_while_max).
    pub fn count_while_max(&self, predicate: impl Fn(char) -> bool, max: usize) -> usize {
        self.measure(max, predicate).0
    }

    /// Consumes and returns the current char; `None` at end of text.
    pub fn take(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Consumes and returns exactly `count` chars.
    ///
    /// # Panics
    /// Panics if fewer than `count` chars remain. Callers bound-check with
    /// [`count_while`](Self::count_while) or [`starts_with`](Self::starts_with) first.
    pub fn take_n(&mut self, count: usize) -> &'a str {
        let (chars, bytes) = self.measure(count, |_| true);
        assert!(
            chars == count,
            "take_n({count}) with only {chars} chars left at byte {}",
            self.position
        );
        self.take_bytes(bytes)
    }

    /// Consumes and returns the run of chars satisfying `predicate`.
    pub fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        self.take_while_max(predicate, usize::MAX)
    }

    /// Consumes and returns at most `max` chars satisfying `predicate`.
    pub fn take_while_max(&mut self, predicate: impl Fn(char) -> bool, max: usize) -> &'a str {
        let (_, bytes) = self.measure(max, predicate);
        self.take_bytes(bytes)
    }

    /// Consumes and returns everything up to the absolute position `end`.
    ///
    /// # Panics
    /// Panics if `end` is behind the cursor, past the text, or inside a char.
    pub fn take_to(&mut self, end: usize) -> &'a str {
        assert!(
            end >= self.pos()
                && end - self.base <= self.text.len()
                && self.text.is_char_boundary(end - self.base),
            "take_to({end}) is not ahead of the cursor at {}",
            self.pos()
        );
        self.take_bytes(end - self.base - self.position)
    }

    /// Consumes and returns everything up to (not including) `stop`.
    pub fn take_while_not(&mut self, stop: char) -> &'a str {
        self.take_while(|c| c != stop)
    }

    /// Lookahead equality check starting `relative` chars ahead.
    /// Out-of-range lookahead is simply `false`.
    pub fn starts_with(&self, literal: &str, relative: usize) -> bool {
        let mut rest = self.rest().chars();
        for _ in 0..relative {
            if rest.next().is_none() {
                return false;
            }
        }
        rest.as_str().starts_with(literal)
    }

    /// True if the maximal run of `c` containing the current position is at
    /// least `count` chars long. Scans both directions; never moves.
    pub fn part_of_sequence(&self, c: char, count: usize) -> bool {
        if self.peek() != Some(c) {
            return count == 0;
        }
        let before = self.text[..self.position]
            .chars()
            .rev()
            .take_while(|&x| x == c)
            .count();
        let after = self.rest().chars().take_while(|&x| x == c).count();
        before + after >= count
    }

    /// True if the rest of the text contains `c`.
    pub fn contains(&self, c: char) -> bool {
        self.rest().contains(c)
    }

    /// Local byte offset of the first non-space char at or after the
    /// current position (text length if there is none). Only ASCII spaces
    /// count.
    pub fn first_non_space(&self) -> usize {
        self.position + self.rest().bytes().take_while(|&b| b == b' ').count()
    }

    pub fn first_non_space_char(&self) -> char {
        self.text[self.first_non_space()..]
            .chars()
            .next()
            .unwrap_or(END)
    }

    /// True if only spaces remain.
    pub fn is_blank(&self) -> bool {
        self.first_non_space() == self.text.len()
    }

    /// Number of spaces before the first non-space char.
    pub fn indent(&self) -> usize {
        self.first_non_space() - self.position
    }

    pub fn advance_to_first_non_space(&mut self) {
        self.position = self.first_non_space();
    }

    pub fn advance_to_end(&mut self) {
        self.position = self.text.len();
    }

    /// Skips spaces, tabs and newlines. Returns the number skipped.
    pub fn skip_whitespace(&mut self) -> usize {
        self.advance_while(is_whitespace)
    }

    /// Returns (chars, bytes) of the run from the current position that
    /// satisfies `predicate`, capped at `max` chars.
    fn measure(&self, max: usize, predicate: impl Fn(char) -> bool) -> (usize, usize) {
        let mut chars = 0;
        let mut bytes = 0;
        for c in self.rest().chars() {
            if chars >= max || !predicate(c) {
                break;
            }
            chars += 1;
            bytes += c.len_utf8();
        }
        (chars, bytes)
    }

    fn take_bytes(&mut self, bytes: usize) -> &'a str {
        let start = self.position;
        self.position += bytes;
        &self.text[start..self.position]
    }
}

/// Space, tab or newline.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}
