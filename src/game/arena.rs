//! Obstacles and food.
//!
//! Placement is driven by a caller-supplied RNG so that a seeded generator
//! reproduces the same layout every time.

use std::{collections::HashSet, ops::RangeInclusive};

use rand::{Rng, seq::SliceRandom};

use super::{
    error::GameError,
    state::{Grid, Position},
};

/// Static obstacles plus the current food cell
#[derive(Debug, Clone)]
pub struct Arena {
    grid: Grid,
    obstacles: HashSet<Position>,
    food: Option<Position>,
}

impl Arena {
    /// An empty arena: no obstacles, no food yet
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            obstacles: HashSet::new(),
            food: None,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn obstacles(&self) -> &HashSet<Position> {
        &self.obstacles
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn is_food(&self, cell: Position) -> bool {
        self.food == Some(cell)
    }

    /// Pure membership test against the obstacle set
    pub fn check_obstacle_collision(&self, cell: Position) -> bool {
        self.obstacles.contains(&cell)
    }

    /// Replace the obstacle set with a fresh random one.
    ///
    /// The number of obstacles is drawn uniformly from `count` and capped by
    /// how many cells are eligible. Border cells are skipped when
    /// `exclude_border` is set, and `reserved` cells are never used. Nothing
    /// guarantees the remaining free space is connected.
    ///
    /// Returns the number of obstacles placed.
    pub fn generate_obstacles<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: RangeInclusive<usize>,
        exclude_border: bool,
        reserved: &HashSet<Position>,
    ) -> Result<usize, GameError> {
        if count.is_empty() {
            return Err(GameError::InvalidObstacleRange {
                min: *count.start(),
                max: *count.end(),
            });
        }

        let candidates: Vec<Position> = self
            .grid
            .cells()
            .filter(|cell| !(exclude_border && self.grid.is_border(*cell)))
            .filter(|cell| !reserved.contains(cell))
            .collect();

        let wanted = rng.gen_range(count).min(candidates.len());
        self.obstacles = candidates.choose_multiple(rng, wanted).copied().collect();

        Ok(self.obstacles.len())
    }

    /// Put the food on `cell` directly, bypassing the free-cell check
    pub fn set_food(&mut self, cell: Position) {
        self.food = Some(cell);
    }

    /// Remove every obstacle
    pub fn clear_obstacles(&mut self) {
        self.obstacles.clear();
    }

    /// Move the food to a random free cell.
    ///
    /// A cell is free when it is neither in `excluded` nor an obstacle. When
    /// no free cell is left the food is removed and `None` is returned; what
    /// that means for the game is up to the caller.
    pub fn place_food<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        excluded: &HashSet<Position>,
    ) -> Option<Position> {
        let free: Vec<Position> = self
            .grid
            .cells()
            .filter(|cell| !excluded.contains(cell) && !self.obstacles.contains(cell))
            .collect();

        self.food = free.choose(rng).copied();
        self.food
    }
}
