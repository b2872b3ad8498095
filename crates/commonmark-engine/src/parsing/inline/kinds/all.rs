use crate::parsing::{
    charset::CharSet,
    cursor::Cursor,
    inline::types::{InlineNode, Text},
    rope::span::Span,
};

/// Greedy run combinator: consumes the longest run (up to `max` chars) of
/// chars in `chars` and emits it as one text node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllParser {
    pub chars: CharSet,
    pub max: usize,
}

impl AllParser {
    pub fn new(chars: CharSet) -> Self {
        Self::with_max(chars, usize::MAX)
    }

    pub fn with_max(chars: CharSet, max: usize) -> Self {
        Self { chars, max }
    }

    /// Run of any char *not* in `chars`.
    pub fn except(chars: &CharSet) -> Self {
        Self::new(chars.complement())
    }

    pub fn can_parse(&self, cursor: &Cursor<'_>) -> bool {
        self.chars.is_any() && cursor.peek().is_some_and(|c| self.chars.contains(c))
    }

    /// Fails if the set is empty or no char qualifies.
    pub fn parse(&self, cursor: &mut Cursor<'_>) -> Option<InlineNode> {
        if !self.chars.is_any() {
            return None;
        }
        let start = cursor.pos();
        let run = cursor.take_while_max(|c| self.chars.contains(c), self.max);
        if run.is_empty() {
            return None;
        }
        Some(InlineNode::Text(Text::new(
            Span::new(start, cursor.pos()),
            run,
        )))
    }
}
