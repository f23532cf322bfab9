//! Greedy policy used to drive headless games

use rand::Rng;

use crate::game::{Action, Direction, GameEngine, Grid, Position};

/// Steers towards the food one step at a time.
///
/// Each tick it looks at the three legal turns, drops the ones that would hit
/// an obstacle or the body, and takes the one closest to the food. When every
/// turn is fatal it keeps going straight. It never looks more than one cell
/// ahead, so it can still trap itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }

    pub fn choose<R: Rng>(&self, engine: &GameEngine<R>) -> Action {
        let snake = engine.snake();
        let arena = engine.arena();
        let grid = snake.grid();
        let head = snake.head();
        let food = arena.food();

        // The tail moves out of the way unless growth is pending
        let vacating = (!snake.has_pending_growth() && snake.len() > 1).then(|| snake.tail());

        Direction::ALL
            .into_iter()
            .filter(|direction| !snake.direction().is_opposite(*direction))
            .map(|direction| (direction, grid.wrap(head.moved_in_direction(direction))))
            .filter(|&(_, next)| !arena.check_obstacle_collision(next))
            .filter(|&(_, next)| !snake.contains(next) || Some(next) == vacating)
            .min_by_key(|&(_, next)| food.map_or(0, |food| toroidal_distance(grid, next, food)))
            .map(|(direction, _)| Action::Move(direction))
            .unwrap_or(Action::Continue)
    }
}

/// Manhattan distance on a grid whose edges wrap
pub fn toroidal_distance(grid: Grid, a: Position, b: Position) -> u32 {
    let axis = |from: i32, to: i32, size: usize| {
        let direct = from.abs_diff(to);
        direct.min(size as u32 - direct)
    };
    axis(a.x, b.x, grid.width()) + axis(a.y, b.y, grid.height())
}
