//! Group identity types shared by every component.

use std::fmt;

/// Index of a group inside a flattened preference table.
///
/// Group counts stay in the thousands, so `u32` halves the footprint of the
/// O(m·w) tables compared to `usize`.
pub type GroupId = u32;

/// Number of individuals represented by a group, or matched in one cell.
pub type Quota = u32;

/// Which side of the market a group belongs to.
///
/// Men-groups propose; women-groups accept, displace or reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Proposing side
    Men,
    /// Accepting side
    Women,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Men => f.write_str("men"),
            Side::Women => f.write_str("women"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_display() {
        assert_eq!(Side::Men.to_string(), "men");
        assert_eq!(Side::Women.to_string(), "women");
    }
}
