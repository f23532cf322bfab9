//! Per-session statistics across many games
//!
//! Totals cover the whole session; means are taken over a rolling window of
//! the most recent games, kept in a [`RingBuffer`].

use crate::game::{CollisionType, GameStatus, StepResult};
use crate::ring_buffer::{CapacityError, RingBuffer};

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    SelfCollision,
    Obstacle,
    /// The snake left no room for food
    Won,
    /// Stopped by the caller's tick limit
    TickLimit,
}

impl GameOutcome {
    /// Outcome for a game that stopped in `status`
    pub fn from_status(status: GameStatus) -> Self {
        match status {
            GameStatus::GameOver(CollisionType::SelfCollision) => GameOutcome::SelfCollision,
            GameStatus::GameOver(CollisionType::Obstacle) => GameOutcome::Obstacle,
            GameStatus::Won => GameOutcome::Won,
            GameStatus::Playing => GameOutcome::TickLimit,
        }
    }
}

/// Session statistics with rolling averages
///
/// # Example
///
/// ```rust
/// use ring_snake::metrics::{GameOutcome, SessionStats};
///
/// let mut stats = SessionStats::new(10).unwrap();
/// stats.on_game_over(30, 120, 4, GameOutcome::SelfCollision);
///
/// assert_eq!(stats.games_played(), 1);
/// assert_eq!(stats.high_score(), 30);
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// Final scores (rolling window)
    recent_scores: RingBuffer<u32>,
    /// Game lengths in ticks (rolling window)
    recent_ticks: RingBuffer<u32>,

    games_played: u32,
    high_score: u32,
    longest_snake: usize,
    food_eaten: u32,
    total_ticks: u64,

    self_collisions: u32,
    obstacle_hits: u32,
    wins: u32,
    tick_limits: u32,
}

impl SessionStats {
    /// Create a tracker averaging over the last `window_size` games
    pub fn new(window_size: usize) -> Result<Self, CapacityError> {
        Ok(Self {
            recent_scores: RingBuffer::new(window_size)?,
            recent_ticks: RingBuffer::new(window_size)?,
            games_played: 0,
            high_score: 0,
            longest_snake: 0,
            food_eaten: 0,
            total_ticks: 0,
            self_collisions: 0,
            obstacle_hits: 0,
            wins: 0,
            tick_limits: 0,
        })
    }

    /// Record one engine step
    pub fn on_step(&mut self, result: &StepResult) {
        self.total_ticks += 1;
        if result.info.ate_food {
            self.food_eaten += 1;
        }
    }

    pub fn on_game_over(&mut self, score: u32, ticks: u32, snake_len: usize, outcome: GameOutcome) {
        self.recent_scores.enqueue(score);
        self.recent_ticks.enqueue(ticks);

        self.games_played += 1;
        self.high_score = self.high_score.max(score);
        self.longest_snake = self.longest_snake.max(snake_len);

        match outcome {
            GameOutcome::SelfCollision => self.self_collisions += 1,
            GameOutcome::Obstacle => self.obstacle_hits += 1,
            GameOutcome::Won => self.wins += 1,
            GameOutcome::TickLimit => self.tick_limits += 1,
        }
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn longest_snake(&self) -> usize {
        self.longest_snake
    }

    pub fn food_eaten(&self) -> u32 {
        self.food_eaten
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Number of games that ended with `outcome`
    pub fn outcome_count(&self, outcome: GameOutcome) -> u32 {
        match outcome {
            GameOutcome::SelfCollision => self.self_collisions,
            GameOutcome::Obstacle => self.obstacle_hits,
            GameOutcome::Won => self.wins,
            GameOutcome::TickLimit => self.tick_limits,
        }
    }

    /// Mean final score over the rolling window, 0.0 before any game ends
    pub fn mean_score(&self) -> f32 {
        Self::mean(&self.recent_scores)
    }

    /// Mean game length over the rolling window
    pub fn mean_ticks(&self) -> f32 {
        Self::mean(&self.recent_ticks)
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Games: {} | High score: {} | Mean score: {:.2} | Mean ticks: {:.1} | Food: {} | Longest: {} | Self: {} | Obstacle: {} | Won: {} | Tick limit: {}",
            self.games_played,
            self.high_score,
            self.mean_score(),
            self.mean_ticks(),
            self.food_eaten,
            self.longest_snake,
            self.self_collisions,
            self.obstacle_hits,
            self.wins,
            self.tick_limits,
        )
    }

    fn mean(window: &RingBuffer<u32>) -> f32 {
        if window.is_empty() {
            0.0
        } else {
            window.iter().map(|&v| v as f32).sum::<f32>() / window.len() as f32
        }
    }
}
