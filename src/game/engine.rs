use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{CollisionType, GameState, Position, Snake},
};
use crate::error::ConfigError;
use rand::Rng;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Whether the step budget ended the episode
    pub truncated: bool,
    /// Whether the snake now covers every tile
    pub board_full: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Reward for this step (for RL training)
    pub reward: f32,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
///
/// Randomness is supplied by the caller on every call so a whole run can be
/// replayed from one seed.
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
}

impl GameEngine {
    /// Create a new game engine, refusing configurations that cannot be played
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    ///
    /// The snake is a single segment at the start position with a random
    /// heading; food lands on a random free tile.
    pub fn reset<R: Rng + ?Sized>(&self, rng: &mut R) -> GameState {
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        let snake = Snake::new(self.config.start_position, direction, 1);

        // A validated grid always has a free tile next to a one-segment snake
        let food = self
            .spawn_food_avoid_snake(&snake, rng)
            .unwrap_or(self.config.start_position);

        GameState::new(snake, food, self.config.tile_count)
    }

    /// Execute one step of the game
    pub fn step<R: Rng + ?Sized>(
        &self,
        state: &mut GameState,
        action: Action,
        rng: &mut R,
    ) -> StepResult {
        if !state.is_alive {
            return StepResult {
                reward: 0.0,
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: None,
                    truncated: false,
                    board_full: false,
                },
            };
        }

        state.snake.direction = state.snake.direction.apply(action);

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        let mut info = StepInfo {
            ate_food: false,
            collision_type: None,
            truncated: false,
            board_full: false,
        };

        let reward = if let Some(collision_type) = self.check_collision(state, new_head) {
            // Snake stays where it was
            state.is_alive = false;
            info.collision_type = Some(collision_type);
            self.config.death_penalty
        } else if new_head == state.food {
            state.snake.move_snake(true);
            state.score += 1;
            info.ate_food = true;

            match self.spawn_food_avoid_snake(&state.snake, rng) {
                Some(food) => state.food = food,
                None => {
                    state.is_alive = false;
                    info.board_full = true;
                }
            }

            self.config.food_reward
        } else {
            state.snake.move_snake(false);
            self.config.step_penalty
        };

        state.steps += 1;
        if state.is_alive && state.steps > self.config.max_steps {
            state.is_alive = false;
            info.truncated = true;
        }

        StepResult {
            reward,
            terminated: !state.is_alive,
            info,
        }
    }

    /// Check if the new head position causes a collision
    ///
    /// Every current segment counts, including the tail that would have moved.
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn food at a random empty position, or `None` when the board is full
    fn spawn_food_avoid_snake<R: Rng + ?Sized>(
        &self,
        snake: &Snake,
        rng: &mut R,
    ) -> Option<Position> {
        let n = self.config.tile_count;
        if snake.len() >= n * n {
            return None;
        }

        loop {
            let x = rng.gen_range(0..n) as i32;
            let y = rng.gen_range(0..n) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn engine(config: GameConfig) -> GameEngine {
        GameEngine::new(config).unwrap()
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GameConfig {
            max_steps: 0,
            ..Default::default()
        };
        assert_eq!(
            GameEngine::new(config).unwrap_err(),
            ConfigError::ZeroStepBudget
        );
    }

    #[test]
    fn test_reset() {
        let engine = engine(GameConfig::default());
        let mut rng = rng();
        let state = engine.reset(&mut rng);

        assert!(state.is_alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Position::new(10, 10));
        assert!(!state.snake.occupies(state.food));
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_reset_samples_every_heading() {
        let engine = engine(GameConfig::default());
        let mut rng = rng();
        let mut seen = std::collections::HashSet::new();

        for _ in 0..200 {
            seen.insert(engine.reset(&mut rng).snake.direction);
        }

        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_basic_movement() {
        let engine = engine(GameConfig::small());
        let mut rng = rng();
        let mut state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 1),
            Position::new(0, 0),
            10,
        );

        let result = engine.step(&mut state, Action::Straight, &mut rng);

        assert!(!result.terminated);
        assert!(!result.info.ate_food);
        assert_eq!(result.reward, -1.0);
        assert_eq!(state.steps, 1);
        assert_eq!(state.snake.head(), Position::new(6, 5));
        assert_eq!(state.snake.len(), 1);
    }

    #[test]
    fn test_turns_follow_rotation_table() {
        let engine = engine(GameConfig::small());
        let mut rng = rng();
        let mut state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Up, 1),
            Position::new(0, 0),
            10,
        );

        engine.step(&mut state, Action::TurnRight, &mut rng);
        assert_eq!(state.snake.direction, Direction::Left);
        assert_eq!(state.snake.head(), Position::new(4, 5));

        engine.step(&mut state, Action::TurnLeft, &mut rng);
        assert_eq!(state.snake.direction, Direction::Up);
        assert_eq!(state.snake.head(), Position::new(4, 4));
    }

    #[test]
    fn test_food_consumption() {
        let engine = engine(GameConfig::small());
        let mut rng = rng();
        let mut state = engine.reset(&mut rng);

        // Place food directly in front of snake
        let head = state.snake.head();
        state.food = head.moved_in_direction(state.snake.direction);
        let initial_length = state.snake.len();

        let result = engine.step(&mut state, Action::Straight, &mut rng);

        assert!(result.info.ate_food);
        assert!(!result.terminated);
        assert_eq!(result.reward, 10.0);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), initial_length + 1);
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn test_wall_collision() {
        let engine = engine(GameConfig::small());
        let mut rng = rng();
        let mut state = GameState::new(
            Snake::new(Position::new(0, 5), Direction::Left, 3),
            Position::new(5, 5),
            10,
        );
        let before = state.snake.clone();

        let result = engine.step(&mut state, Action::Straight, &mut rng);

        assert!(result.terminated);
        assert_eq!(result.reward, -10.0);
        assert!(!state.is_alive);
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.snake.body, before.body);
    }

    #[test]
    fn test_self_collision() {
        let engine = engine(GameConfig::small());
        let mut rng = rng();

        // Heading Right with body (5,5) (4,5) (4,6) (5,6): turning right
        // points Up, turning left points Down onto (5,6)
        let snake = Snake::from_body(
            vec![
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(4, 6),
                Position::new(5, 6),
            ],
            Direction::Right,
        )
        .unwrap();
        let mut state = GameState::new(snake, Position::new(8, 8), 10);

        let result = engine.step(&mut state, Action::TurnLeft, &mut rng);

        assert!(result.terminated);
        assert_eq!(result.reward, -10.0);
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_tail_tile_counts_as_collision() {
        let engine = engine(GameConfig::small());
        let mut rng = rng();

        // A 2x2 loop where the head would step onto the current tail
        let snake = Snake::from_body(
            vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
                Position::new(6, 5),
            ],
            Direction::Up,
        )
        .unwrap();
        let mut state = GameState::new(snake, Position::new(0, 0), 10);

        let result = engine.step(&mut state, Action::TurnLeft, &mut rng);

        assert!(result.terminated);
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_step_budget_truncates_episode() {
        let config = GameConfig {
            max_steps: 4,
            ..GameConfig::small()
        };
        let engine = engine(config);
        let mut rng = rng();
        let mut state = GameState::new(
            Snake::new(Position::new(1, 1), Direction::Right, 1),
            Position::new(9, 9),
            10,
        );

        // Circle inside a 2x2 block: never collides, never eats
        let moves = [
            Action::Straight,
            Action::TurnLeft,
            Action::TurnLeft,
            Action::TurnLeft,
        ];
        for action in moves {
            let result = engine.step(&mut state, action, &mut rng);
            assert!(!result.terminated);
        }

        let result = engine.step(&mut state, Action::TurnLeft, &mut rng);
        assert!(result.terminated);
        assert!(result.info.truncated);
        assert_eq!(result.info.collision_type, None);
        assert_eq!(result.reward, -1.0);
        assert_eq!(state.steps, 5);
    }

    #[test]
    fn test_filling_the_board_ends_the_episode() {
        let engine = engine(GameConfig::new(2));
        let mut rng = rng();
        let snake = Snake::from_body(
            vec![Position::new(0, 1), Position::new(0, 0), Position::new(1, 0)],
            Direction::Down,
        )
        .unwrap();
        let mut state = GameState::new(snake, Position::new(1, 1), 2);

        // Heading Down, a right turn points Right onto the food
        let result = engine.step(&mut state, Action::TurnRight, &mut rng);

        assert!(result.terminated);
        assert!(result.info.board_full);
        assert_eq!(result.reward, 10.0);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let engine = engine(GameConfig::small());
        let mut rng = rng();
        let mut state = engine.reset(&mut rng);
        state.is_alive = false;
        let steps_before = state.steps;

        let result = engine.step(&mut state, Action::Straight, &mut rng);

        assert!(result.terminated);
        assert_eq!(result.reward, 0.0);
        assert_eq!(state.steps, steps_before);
    }
}
