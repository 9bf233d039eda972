//! Relation values and the events that change them

use crate::category::ItemRef;

/// What is known about whether two items correspond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RelationValue {
    /// Nothing decided yet
    #[default]
    Unknown,

    /// The two items belong together
    True,

    /// The two items are known not to belong together
    False,
}

impl RelationValue {
    /// Get the value name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationValue::Unknown => "maybe",
            RelationValue::True => "is",
            RelationValue::False => "not",
        }
    }

    /// Single-character glyph used in grid cells
    pub fn glyph(&self) -> char {
        match self {
            RelationValue::Unknown => '.',
            RelationValue::True => 'O',
            RelationValue::False => 'X',
        }
    }

    /// Parse a value from a string (`is`, `not`, `maybe` and a few aliases)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "is" | "true" | "yes" | "o" => Some(RelationValue::True),
            "not" | "isnot" | "false" | "no" | "x" => Some(RelationValue::False),
            "maybe" | "unknown" | "?" | "." => Some(RelationValue::Unknown),
            _ => None,
        }
    }

    /// True for the two confirmed values
    pub fn is_decided(&self) -> bool {
        !matches!(self, RelationValue::Unknown)
    }

    /// Whether replacing `self` with `next` flips a confirmed value
    pub fn contradicts(&self, next: RelationValue) -> bool {
        matches!(
            (self, next),
            (RelationValue::True, RelationValue::False) | (RelationValue::False, RelationValue::True)
        )
    }

    /// The opposite confirmed value; Unknown stays Unknown
    pub fn toggled(&self) -> Self {
        match self {
            RelationValue::Unknown => RelationValue::Unknown,
            RelationValue::True => RelationValue::False,
            RelationValue::False => RelationValue::True,
        }
    }
}

impl std::fmt::Display for RelationValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid relation: {}", s))
    }
}

/// A decided relation handed over by the deduction engine or the user:
/// `a` relates to `b` with `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationEvent {
    /// First item
    pub a: ItemRef,
    /// New value for the pair
    pub value: RelationValue,
    /// Second item
    pub b: ItemRef,
}

impl RelationEvent {
    /// Create a new event
    pub fn new(a: ItemRef, value: RelationValue, b: ItemRef) -> Self {
        Self { a, value, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_values() {
        assert_eq!(RelationValue::parse("is"), Some(RelationValue::True));
        assert_eq!(RelationValue::parse("NOT"), Some(RelationValue::False));
        assert_eq!(RelationValue::parse("maybe"), Some(RelationValue::Unknown));
        assert_eq!(RelationValue::parse("perhaps"), None);
        assert!("sometimes".parse::<RelationValue>().is_err());
    }

    #[test]
    fn test_contradiction() {
        assert!(RelationValue::True.contradicts(RelationValue::False));
        assert!(RelationValue::False.contradicts(RelationValue::True));
        assert!(!RelationValue::True.contradicts(RelationValue::True));
        assert!(!RelationValue::Unknown.contradicts(RelationValue::False));
        assert!(!RelationValue::True.contradicts(RelationValue::Unknown));
    }

    #[test]
    fn test_toggle_and_default() {
        assert_eq!(RelationValue::default(), RelationValue::Unknown);
        assert_eq!(RelationValue::True.toggled(), RelationValue::False);
        assert_eq!(RelationValue::False.toggled(), RelationValue::True);
        assert_eq!(RelationValue::Unknown.toggled(), RelationValue::Unknown);
    }
}
