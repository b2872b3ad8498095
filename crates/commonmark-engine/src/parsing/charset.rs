//! Immutable character sets used for inline dispatch and greedy runs.
//!
//! ASCII membership is a single bit test; the rare non-ASCII members live
//! in a sorted vector.

/// A set of chars, possibly stored as the complement of its members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharSet {
    ascii: u128,
    other: Vec<char>,
    negated: bool,
}

impl CharSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The set of every char in `members`.
    pub fn of(members: &str) -> Self {
        members.chars().collect()
    }

    /// ASCII control chars, space and DEL: U+0000..=U+0020 and U+007F.
    pub fn control() -> Self {
        let mut set: CharSet = ('\0'..=' ').collect();
        set.ascii |= 1 << 0x7f;
        set
    }

    pub fn contains(&self, c: char) -> bool {
        let raw = if c.is_ascii() {
            self.ascii & (1u128 << (c as u32)) != 0
        } else {
            self.other.binary_search(&c).is_ok()
        };
        raw != self.negated
    }

    /// True if the set has at least one member.
    pub fn is_any(&self) -> bool {
        self.negated || self.ascii != 0 || !self.other.is_empty()
    }

    /// True if some member lies outside ASCII.
    pub fn has_non_ascii(&self) -> bool {
        self.negated || !self.other.is_empty()
    }

    /// Every char not in `self`.
    #[must_use]
    pub fn complement(&self) -> Self {
        Self {
            negated: !self.negated,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn union(&self, rhs: &CharSet) -> Self {
        match (self.negated, rhs.negated) {
            (false, false) => self.raw_union(rhs),
            // ¬a ∪ ¬b = ¬(a ∩ b)
            (true, true) => self.raw_intersection(rhs).complement(),
            // ¬a ∪ b = ¬(a \ b)
            (true, false) => self.raw_difference(rhs).complement(),
            (false, true) => rhs.raw_difference(self).complement(),
        }
    }

    /// ASCII members in ascending order.
    pub fn ascii_members(&self) -> impl Iterator<Item = char> + '_ {
        (0u8..128).map(char::from).filter(|&c| self.contains(c))
    }

    fn raw_union(&self, rhs: &CharSet) -> Self {
        let mut other = self.other.clone();
        other.extend(rhs.other.iter().copied());
        other.sort_unstable();
        other.dedup();
        Self {
            ascii: self.ascii | rhs.ascii,
            other,
            negated: false,
        }
    }

    fn raw_intersection(&self, rhs: &CharSet) -> Self {
        Self {
            ascii: self.ascii & rhs.ascii,
            other: self
                .other
                .iter()
                .copied()
                .filter(|c| rhs.other.binary_search(c).is_ok())
                .collect(),
            negated: false,
        }
    }

    fn raw_difference(&self, rhs: &CharSet) -> Self {
        Self {
            ascii: self.ascii & !rhs.ascii,
            other: self
                .other
                .iter()
                .copied()
                .filter(|c| rhs.other.binary_search(c).is_err())
                .collect(),
            negated: false,
        }
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut set = CharSet::empty();
        for c in iter {
            if c.is_ascii() {
                set.ascii |= 1u128 << (c as u32);
            } else {
                set.other.push(c);
            }
        }
        set.other.sort_unstable();
        set.other.dedup();
        set
    }
}
