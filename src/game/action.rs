use serde::{Deserialize, Serialize};

/// Direction the snake is heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four headings, used for uniform sampling on reset
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    ///
    /// The y axis grows downwards, so `Up` is `(0, -1)`.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Heading after a right turn: `(dx, dy) -> (dy, -dx)`
    pub fn turned_right(&self) -> Direction {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// Heading after a left turn: `(dx, dy) -> (-dy, dx)`
    pub fn turned_left(&self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    /// Heading after applying a relative action
    pub fn apply(&self, action: Action) -> Direction {
        match action {
            Action::Straight => *self,
            Action::TurnRight => self.turned_right(),
            Action::TurnLeft => self.turned_left(),
        }
    }
}

/// Relative action taken by the agent
///
/// Turns are relative to the current heading, so a 180-degree reversal
/// cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Keep the current heading (index 0)
    Straight,
    /// Rotate the heading by 90 degrees to the right (index 1)
    TurnRight,
    /// Rotate the heading by 90 degrees to the left (index 2)
    TurnLeft,
}

impl Action {
    pub const COUNT: usize = 3;

    pub const ALL: [Action; Action::COUNT] =
        [Action::Straight, Action::TurnRight, Action::TurnLeft];

    pub fn index(&self) -> usize {
        match self {
            Action::Straight => 0,
            Action::TurnRight => 1,
            Action::TurnLeft => 2,
        }
    }

    /// Convert a discrete action index back to an action
    pub fn from_index(idx: usize) -> Option<Action> {
        Action::ALL.get(idx).copied()
    }
}
