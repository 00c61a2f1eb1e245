use std::fmt;

use enumset::EnumSetType;

/// Discrete heading, in counter-clockwise order starting from `+x`.
#[derive(EnumSetType, Debug, Hash)]
pub enum Orientation {
    East,
    North,
    West,
    South,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::East,
        Orientation::North,
        Orientation::West,
        Orientation::South,
    ];

    #[inline(always)]
    pub fn index(self) -> u8 {
        self as u8
    }

    #[inline(always)]
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index % 4) as usize]
    }

    /// Rotates counter-clockwise by `quarter_turns`.
    #[inline(always)]
    pub fn rotated(self, quarter_turns: u8) -> Self {
        Self::from_index(self.index() + quarter_turns % 4)
    }

    /// Number of counter-clockwise quarter turns needed to go from `self` to `other`.
    #[inline(always)]
    pub fn turns_to(self, other: Orientation) -> u8 {
        (other.index() + 4 - self.index()) % 4
    }

    /// Cell offset of one step forward.
    #[inline(always)]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Orientation::East => (1, 0),
            Orientation::North => (0, 1),
            Orientation::West => (-1, 0),
            Orientation::South => (0, -1),
        }
    }
}

/// A pose on the grid: a cell and the heading the agent faces in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Waypoint {
    pub x: i32,
    pub y: i32,
    pub orientation: Orientation,
}

impl Waypoint {
    pub const fn new(x: i32, y: i32, orientation: Orientation) -> Self {
        Waypoint { x, y, orientation }
    }

    #[inline(always)]
    pub fn position(self) -> (i32, i32) {
        (self.x, self.y)
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {:?})", self.x, self.y, self.orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Orientation::*;

    #[test]
    fn rotation_wraps() {
        assert_eq!(East.rotated(1), North);
        assert_eq!(South.rotated(1), East);
        assert_eq!(West.rotated(3), North);
        assert_eq!(North.rotated(6), South);
        assert_eq!(Orientation::from_index(7), South);
    }

    #[test]
    fn turns_to_is_counter_clockwise() {
        assert_eq!(East.turns_to(North), 1);
        assert_eq!(East.turns_to(South), 3);
        assert_eq!(North.turns_to(North), 0);
        assert_eq!(South.turns_to(North), 2);
    }

    #[test]
    fn offsets_are_unit_vectors() {
        for o in Orientation::ALL {
            let (dx, dy) = o.offset();
            assert_eq!(dx.abs() + dy.abs(), 1);
            let (bx, by) = o.rotated(2).offset();
            assert_eq!((dx, dy), (-bx, -by));
        }
    }
}
