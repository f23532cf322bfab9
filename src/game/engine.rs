use std::collections::HashSet;

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use super::{
    action::Action,
    arena::Arena,
    config::GameConfig,
    error::GameError,
    state::{Grid, Position, SnakeBody},
};

/// What the snake ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit itself
    SelfCollision,
    /// Snake hit an obstacle
    Obstacle,
}

/// Where a game stands after the latest step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver(CollisionType),
    /// No free cell was left for food
    Won,
}

impl GameStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Points scored this step
    pub points: u32,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Body cells, tail to head
    pub snake: Vec<Position>,
    pub head: Position,
    pub food: Option<Position>,
    /// Obstacle cells in row-major order
    pub obstacles: Vec<Position>,
    pub score: u32,
    pub status: GameStatus,
}

/// Runs one game at a time: owns the snake, the arena and the RNG.
///
/// The engine is headless. A host shell feeds it one [`Action`] per tick and
/// reads [`GameEngine::snapshot`] back for display.
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    grid: Grid,
    rng: R,
    snake: SnakeBody,
    arena: Arena,
    score: u32,
    ticks: u32,
    status: GameStatus,
}

impl GameEngine<StdRng> {
    /// Engine whose layouts are fully determined by `seed`
    pub fn from_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create a new game engine and set up the first game
    pub fn new(config: GameConfig, rng: R) -> Result<Self, GameError> {
        config.validate()?;
        let grid = config.grid()?;
        let snake = SnakeBody::with_direction(grid, grid.center(), config.start_direction)?;

        let mut engine = Self {
            config,
            grid,
            rng,
            snake,
            arena: Arena::new(grid),
            score: 0,
            ticks: 0,
            status: GameStatus::Playing,
        };
        engine.reset()?;
        Ok(engine)
    }

    /// Reset the game to initial state
    ///
    /// The snake respawns at the grid centre, obstacles are regenerated
    /// around it and food is placed on a free cell.
    pub fn reset(&mut self) -> Result<(), GameError> {
        let start = self.grid.center();
        self.snake = SnakeBody::with_direction(self.grid, start, self.config.start_direction)?;

        let reserved = HashSet::from([start]);
        let placed = self.arena.generate_obstacles(
            &mut self.rng,
            self.config.obstacle_range(),
            self.config.obstacles_exclude_border,
            &reserved,
        )?;

        self.score = 0;
        self.ticks = 0;
        self.status = match self.arena.place_food(&mut self.rng, &reserved) {
            Some(_) => GameStatus::Playing,
            None => GameStatus::Won,
        };

        debug!(
            obstacles = placed,
            food = ?self.arena.food(),
            start = %start,
            "game reset"
        );
        Ok(())
    }

    /// Execute one tick: turn, move, eat, then check for collisions
    pub fn step(&mut self, action: Action) -> StepResult {
        if self.status.is_finished() {
            return StepResult {
                points: 0,
                terminated: true,
                info: StepInfo::default(),
            };
        }

        if let Action::Move(direction) = action {
            self.snake.change_direction(direction);
        }

        self.snake.move_snake();
        self.ticks += 1;

        let head = self.snake.head();
        let ate_food = self.arena.is_food(head);
        let mut points = 0;

        if ate_food {
            self.snake.grow();
            self.score = self.score.saturating_add(self.config.food_score);
            points = self.config.food_score;

            let occupied: HashSet<Position> = self.snake.cells().copied().collect();
            match self.arena.place_food(&mut self.rng, &occupied) {
                Some(food) => debug!(at = %head, next = %food, score = self.score, "food eaten"),
                None => {
                    debug!(score = self.score, "no free cell left for food");
                    self.status = GameStatus::Won;
                }
            }
        }

        let collision_type = if self.snake.check_self_collision() {
            Some(CollisionType::SelfCollision)
        } else if self.arena.check_obstacle_collision(head) {
            Some(CollisionType::Obstacle)
        } else {
            None
        };

        if let Some(collision) = collision_type {
            debug!(?collision, at = %head, ticks = self.ticks, "game over");
            self.status = GameStatus::GameOver(collision);
        }

        StepResult {
            points,
            terminated: self.status.is_finished(),
            info: StepInfo {
                ate_food,
                collision_type,
            },
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &SnakeBody {
        &self.snake
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Ticks played since the last reset
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut obstacles: Vec<Position> = self.arena.obstacles().iter().copied().collect();
        obstacles.sort_by_key(|cell| (cell.y, cell.x));

        Snapshot {
            snake: self.snake.occupied_cells(),
            head: self.snake.head(),
            food: self.arena.food(),
            obstacles,
            score: self.score,
            status: self.status,
        }
    }

    /// Swap in a hand-built snake, e.g. to set up a scenario
    pub fn set_snake(&mut self, snake: SnakeBody) -> Result<(), GameError> {
        if snake.grid() != self.grid {
            return Err(GameError::GridMismatch {
                width: snake.grid().width(),
                height: snake.grid().height(),
                expected_width: self.grid.width(),
                expected_height: self.grid.height(),
            });
        }
        self.snake = snake;
        Ok(())
    }

    /// Put the food on a specific cell
    pub fn set_food(&mut self, cell: Position) -> Result<(), GameError> {
        self.arena.set_food(self.grid.check(cell)?);
        Ok(())
    }
}
