#![forbid(unsafe_code)]

//! Navigation targets accepted by [`MotionController::goto`](crate::MotionController::goto).
//!
//! The string form is what a markup attribute or a command line would carry:
//!
//! | Input | Target |
//! |-------|--------|
//! | `prev` | [`GotoTarget::Prev`] |
//! | `next` | [`GotoTarget::Next`] |
//! | `-240px` | [`GotoTarget::Offset`]`(-240.0)` |
//!
//! Surrounding whitespace is ignored. Indices and item references have no
//! string form; they come from code.

use std::str::FromStr;

use crate::axis::Direction;
use crate::error::ParseTargetError;
use crate::layout::ItemId;

/// Where a goto should land.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GotoTarget {
    /// Boundary of the item at this index.
    Index(usize),
    /// Boundary of the referenced item.
    Item(ItemId),
    /// A literal logical offset.
    Offset(f64),
    /// The adjacent boundary toward the content start.
    Prev,
    /// The adjacent boundary toward the content end.
    Next,
}

impl FromStr for GotoTarget {
    type Err = ParseTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(ParseTargetError::Empty);
        }
        match input {
            "prev" => return Ok(Self::Prev),
            "next" => return Ok(Self::Next),
            _ => {}
        }
        let Some(number) = input.strip_suffix("px") else {
            return Err(ParseTargetError::unrecognised(input));
        };
        number
            .parse::<i64>()
            .map(|px| Self::Offset(px as f64))
            .map_err(|_| ParseTargetError::InvalidOffset {
                input: input.to_owned(),
            })
    }
}

impl From<usize> for GotoTarget {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<ItemId> for GotoTarget {
    fn from(id: ItemId) -> Self {
        Self::Item(id)
    }
}

impl From<Direction> for GotoTarget {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Prev => Self::Prev,
            Direction::Next => Self::Next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keywords_and_pixels() {
        assert_eq!("prev".parse(), Ok(GotoTarget::Prev));
        assert_eq!("  next\n".parse(), Ok(GotoTarget::Next));
        assert_eq!("-240px".parse(), Ok(GotoTarget::Offset(-240.0)));
        assert_eq!("0px".parse(), Ok(GotoTarget::Offset(0.0)));
        assert_eq!("+15px".parse(), Ok(GotoTarget::Offset(15.0)));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("".parse::<GotoTarget>(), Err(ParseTargetError::Empty));
        assert_eq!("   ".parse::<GotoTarget>(), Err(ParseTargetError::Empty));
        assert_eq!(
            "sideways".parse::<GotoTarget>(),
            Err(ParseTargetError::unrecognised("sideways"))
        );
        assert!(matches!(
            "12.5px".parse::<GotoTarget>(),
            Err(ParseTargetError::InvalidOffset { .. })
        ));
        assert!(matches!(
            "px".parse::<GotoTarget>(),
            Err(ParseTargetError::InvalidOffset { .. })
        ));
        assert!("Prev".parse::<GotoTarget>().is_err(), "keywords are case-sensitive");
        assert!("3".parse::<GotoTarget>().is_err());
    }

    #[test]
    fn conversions() {
        assert_eq!(GotoTarget::from(3), GotoTarget::Index(3));
        assert_eq!(GotoTarget::from(ItemId(9)), GotoTarget::Item(ItemId(9)));
        assert_eq!(GotoTarget::from(Direction::Prev), GotoTarget::Prev);
        assert_eq!(GotoTarget::from(Direction::Next), GotoTarget::Next);
    }
}
