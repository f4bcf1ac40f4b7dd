use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Direction, GameState};

/// Number of boolean features in an observation
pub const FEATURE_COUNT: usize = 11;

/// Compact 11-feature observation used as the Q-table key
///
/// Feature layout:
/// - 0..3: danger straight / right / left
/// - 3..7: heading Right / Left / Down / Up
/// - 7..11: food is right of / left of / below / above the head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateEncoding([bool; FEATURE_COUNT]);

impl StateEncoding {
    pub fn from_features(features: [bool; FEATURE_COUNT]) -> Self {
        Self(features)
    }

    pub fn features(&self) -> &[bool; FEATURE_COUNT] {
        &self.0
    }

    pub fn danger_straight(&self) -> bool {
        self.0[0]
    }

    pub fn danger_right(&self) -> bool {
        self.0[1]
    }

    pub fn danger_left(&self) -> bool {
        self.0[2]
    }

    /// The heading encoded in the one-hot direction block
    pub fn heading(&self) -> Option<Direction> {
        match [self.0[3], self.0[4], self.0[5], self.0[6]] {
            [true, false, false, false] => Some(Direction::Right),
            [false, true, false, false] => Some(Direction::Left),
            [false, false, true, false] => Some(Direction::Down),
            [false, false, false, true] => Some(Direction::Up),
            _ => None,
        }
    }
}

impl fmt::Display for StateEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Encode the game state from the snake's point of view
///
/// Only the three tiles adjacent to the head along the available moves are
/// inspected, so the result depends on nothing but snake, heading and food.
pub fn create_observation(state: &GameState) -> StateEncoding {
    let head = state.snake.head();
    let food = state.food;
    let heading = state.snake.direction;

    let danger = |dir: Direction| state.is_dangerous(head.moved_in_direction(dir));

    StateEncoding([
        danger(heading),
        danger(heading.turned_right()),
        danger(heading.turned_left()),
        heading == Direction::Right,
        heading == Direction::Left,
        heading == Direction::Down,
        heading == Direction::Up,
        food.x > head.x,
        food.x < head.x,
        food.y > head.y,
        food.y < head.y,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, Position, Snake};

    fn state_at(head: Position, direction: Direction, food: Position) -> GameState {
        GameState::new(Snake::new(head, direction, 1), food, 10)
    }

    #[test]
    fn test_open_field_has_no_danger() {
        let state = state_at(Position::new(5, 5), Direction::Up, Position::new(5, 5));
        let obs = create_observation(&state);

        assert!(!obs.danger_straight());
        assert!(!obs.danger_right());
        assert!(!obs.danger_left());
    }

    #[test]
    fn test_heading_is_one_hot() {
        for dir in Direction::ALL {
            let state = state_at(Position::new(5, 5), dir, Position::new(0, 0));
            let obs = create_observation(&state);

            let hot = obs.features()[3..7].iter().filter(|&&b| b).count();
            assert_eq!(hot, 1);
            assert_eq!(obs.heading(), Some(dir));
        }
    }

    #[test]
    fn test_wall_danger_straight_at_edge() {
        let state = state_at(Position::new(9, 5), Direction::Right, Position::new(0, 0));
        let obs = create_observation(&state);

        assert!(obs.danger_straight());
        assert!(!obs.danger_right());
        assert!(!obs.danger_left());
    }

    #[test]
    fn test_side_dangers_follow_turn_table() {
        // Heading Up in the top-left corner: straight hits y = -1 and a right
        // turn (Up -> Left) hits x = -1; a left turn (Up -> Right) is open
        let state = state_at(Position::new(0, 0), Direction::Up, Position::new(5, 5));
        let obs = create_observation(&state);

        assert!(obs.danger_straight());
        assert!(obs.danger_right());
        assert!(!obs.danger_left());
    }

    #[test]
    fn test_body_counts_as_danger() {
        let snake = Snake::from_body(
            vec![Position::new(5, 5), Position::new(6, 5), Position::new(6, 6)],
            Direction::Up,
        )
        .unwrap();
        let state = GameState::new(snake, Position::new(0, 0), 10);
        let obs = create_observation(&state);

        // Up -> Left is free; Up -> Right lands on (6, 5)
        assert!(!obs.danger_straight());
        assert!(!obs.danger_right());
        assert!(obs.danger_left());
    }

    #[test]
    fn test_food_direction_flags() {
        let state = state_at(Position::new(5, 5), Direction::Up, Position::new(7, 2));
        let obs = create_observation(&state);
        let f = obs.features();

        assert!(f[7]); // right of head
        assert!(!f[8]);
        assert!(!f[9]);
        assert!(f[10]); // above head
    }

    #[test]
    fn test_food_on_same_column() {
        let state = state_at(Position::new(5, 5), Direction::Up, Position::new(5, 8));
        let f = *create_observation(&state).features();

        assert!(!f[7]);
        assert!(!f[8]);
        assert!(f[9]);
        assert!(!f[10]);
    }

    #[test]
    fn test_encoding_is_reproducible() {
        let state = state_at(Position::new(3, 4), Direction::Left, Position::new(8, 1));
        assert_eq!(create_observation(&state), create_observation(&state.clone()));
    }

    #[test]
    fn test_display_as_bits() {
        let state = state_at(Position::new(9, 5), Direction::Right, Position::new(0, 0));
        assert_eq!(create_observation(&state).to_string(), "10010000101");
    }
}
