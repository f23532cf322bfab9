use std::{fmt, mem};

use super::{action::Direction, error::GameError};
use crate::ring_buffer::{self, RingBuffer};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Dimensions of the playing field. Edges wrap around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    /// Both dimensions must be positive, fit in `i32`, and their product in `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        let fits = |n: usize| n > 0 && i32::try_from(n).is_ok();
        if !fits(width) || !fits(height) || width.checked_mul(height).is_none() {
            return Err(GameError::InvalidGrid { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells; also the most a snake can ever occupy
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    /// Fold a position back onto the grid, toroidally
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(
            pos.x.rem_euclid(self.width as i32),
            pos.y.rem_euclid(self.height as i32),
        )
    }

    /// Cells on the outermost ring
    pub fn is_border(&self, pos: Position) -> bool {
        pos.x == 0
            || pos.y == 0
            || pos.x == self.width as i32 - 1
            || pos.y == self.height as i32 - 1
    }

    /// Centre cell, rounding down
    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }

    pub(crate) fn check(&self, pos: Position) -> Result<Position, GameError> {
        if self.contains(pos) {
            Ok(pos)
        } else {
            Err(GameError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// The snake, stored tail-to-head in a ring buffer sized to the whole grid.
///
/// Moving enqueues a new head and dequeues the old tail, so a step costs
/// O(1) no matter how long the snake is. Because capacity equals the number
/// of grid cells the buffer never has to evict anything during play.
#[derive(Debug, Clone)]
pub struct SnakeBody {
    body: RingBuffer<Position>,
    grid: Grid,
    direction: Direction,
    pending_growth: bool,
}

impl SnakeBody {
    /// A one-cell snake heading right
    pub fn new(grid: Grid, start: Position) -> Result<Self, GameError> {
        Self::with_direction(grid, start, Direction::Right)
    }

    pub fn with_direction(
        grid: Grid,
        start: Position,
        direction: Direction,
    ) -> Result<Self, GameError> {
        Self::from_cells(grid, [start], direction)
    }

    /// Build a snake from cells listed tail first, head last.
    pub fn from_cells<I>(grid: Grid, cells: I, direction: Direction) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = Position>,
    {
        let cells: Vec<Position> = cells.into_iter().collect();
        if cells.is_empty() {
            return Err(GameError::EmptyBody);
        }
        if cells.len() > grid.cell_count() {
            return Err(GameError::BodyTooLong {
                len: cells.len(),
                capacity: grid.cell_count(),
            });
        }

        let mut body = RingBuffer::new(grid.cell_count())?;
        for cell in cells {
            body.enqueue(grid.check(cell)?);
        }

        Ok(Self {
            body,
            grid,
            direction,
            pending_growth: false,
        })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn has_pending_growth(&self) -> bool {
        self.pending_growth
    }

    /// Turn, unless the turn is a 180-degree reversal (silently ignored).
    pub fn change_direction(&mut self, new_direction: Direction) {
        if !self.direction.is_opposite(new_direction) {
            self.direction = new_direction;
        }
    }

    /// Advance one cell in the current direction, wrapping at the edges.
    ///
    /// A pending `grow()` is consumed here: the tail stays put and the body
    /// gets one cell longer.
    pub fn move_snake(&mut self) {
        let new_head = self
            .grid
            .wrap(self.head().moved_in_direction(self.direction));

        let grows = mem::take(&mut self.pending_growth);

        // A snake covering the whole grid drops its tail first so the
        // enqueue never evicts
        if !grows && self.body.is_full() {
            self.body.dequeue();
            self.body.enqueue(new_head);
            return;
        }

        self.body.enqueue(new_head);
        if !grows {
            self.body.dequeue();
        }
    }

    /// Request one extra cell, applied on the next `move_snake`.
    pub fn grow(&mut self) {
        self.pending_growth = true;
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        *self
            .body
            .peek_head()
            .expect("snake body always holds at least its head")
    }

    /// Get the tail position (oldest segment)
    pub fn tail(&self) -> Position {
        *self
            .body
            .peek_tail()
            .expect("snake body always holds at least its head")
    }

    /// Body cells from tail to head
    pub fn occupied_cells(&self) -> Vec<Position> {
        self.body.to_vec()
    }

    /// Borrowing view of the body, tail to head
    pub fn cells(&self) -> ring_buffer::Iter<'_, Position> {
        self.body.iter()
    }

    /// True if the head sits on any other segment.
    ///
    /// The head is the newest entry in the buffer, so only the entries before
    /// it are compared.
    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.body
            .iter()
            .take(self.body.len() - 1)
            .any(|&cell| cell == head)
    }

    /// Check if position is covered by any segment, head included
    pub fn contains(&self, pos: Position) -> bool {
        self.body.iter().any(|&cell| cell == pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a constructed snake
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: usize, height: usize) -> Grid {
        Grid::new(width, height).unwrap()
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_invalid_grid() {
        assert_eq!(
            Grid::new(0, 10).unwrap_err(),
            GameError::InvalidGrid {
                width: 0,
                height: 10
            }
        );
        assert!(Grid::new(10, 0).is_err());
        assert!(Grid::new(usize::MAX, 1).is_err());
    }

    #[test]
    fn test_grid_wrap_and_bounds() {
        let grid = grid(10, 8);
        assert_eq!(grid.cell_count(), 80);
        assert!(grid.contains(Position::new(9, 7)));
        assert!(!grid.contains(Position::new(10, 0)));
        assert!(!grid.contains(Position::new(0, -1)));

        assert_eq!(grid.wrap(Position::new(10, 3)), Position::new(0, 3));
        assert_eq!(grid.wrap(Position::new(-1, 3)), Position::new(9, 3));
        assert_eq!(grid.wrap(Position::new(4, -1)), Position::new(4, 7));
        assert_eq!(grid.wrap(Position::new(4, 8)), Position::new(4, 0));
        assert_eq!(grid.cells().count(), 80);
    }

    #[test]
    fn test_grid_border() {
        let grid = grid(5, 5);
        assert!(grid.is_border(Position::new(0, 2)));
        assert!(grid.is_border(Position::new(4, 4)));
        assert!(!grid.is_border(Position::new(2, 2)));
        assert_eq!(grid.center(), Position::new(2, 2));
    }

    #[test]
    fn test_snake_creation() {
        let snake = SnakeBody::new(grid(10, 10), Position::new(5, 5)).unwrap();
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.direction(), Direction::Right);
        assert!(!snake.has_pending_growth());
        assert_eq!(snake.occupied_cells(), vec![Position::new(5, 5)]);
    }

    #[test]
    fn test_snake_rejects_bad_cells() {
        let grid = grid(4, 4);
        assert!(matches!(
            SnakeBody::new(grid, Position::new(4, 0)),
            Err(GameError::OutOfBounds { x: 4, y: 0, .. })
        ));
        assert_eq!(
            SnakeBody::from_cells(grid, Vec::new(), Direction::Up).unwrap_err(),
            GameError::EmptyBody
        );

        let too_many = (0..17).map(|i| Position::new(i % 4, (i / 4) % 4));
        assert_eq!(
            SnakeBody::from_cells(grid, too_many, Direction::Up).unwrap_err(),
            GameError::BodyTooLong {
                len: 17,
                capacity: 16
            }
        );
    }

    #[test]
    fn test_three_moves_without_growth() {
        let mut snake = SnakeBody::new(grid(10, 10), Position::new(5, 5)).unwrap();
        for _ in 0..3 {
            snake.move_snake();
        }

        assert_eq!(snake.head(), Position::new(8, 5));
        assert_eq!(snake.occupied_cells(), vec![Position::new(8, 5)]);
    }

    #[test]
    fn test_reversal_ignored() {
        let grid = grid(10, 10);
        for direction in Direction::ALL {
            let mut snake = SnakeBody::with_direction(grid, Position::new(5, 5), direction).unwrap();
            snake.change_direction(direction.opposite());
            assert_eq!(snake.direction(), direction);
        }
    }

    #[test]
    fn test_non_reversal_accepted() {
        let grid = grid(10, 10);
        for current in Direction::ALL {
            for requested in Direction::ALL {
                if current.is_opposite(requested) {
                    continue;
                }
                let mut snake = SnakeBody::with_direction(grid, Position::new(5, 5), current).unwrap();
                snake.change_direction(requested);
                assert_eq!(snake.direction(), requested);
            }
        }
    }

    #[test]
    fn test_movement_wraps_every_edge() {
        let grid = grid(10, 6);
        let cases = [
            (Position::new(9, 3), Direction::Right, Position::new(0, 3)),
            (Position::new(0, 3), Direction::Left, Position::new(9, 3)),
            (Position::new(4, 0), Direction::Up, Position::new(4, 5)),
            (Position::new(4, 5), Direction::Down, Position::new(4, 0)),
        ];

        for (start, direction, expected) in cases {
            let mut snake = SnakeBody::with_direction(grid, start, direction).unwrap();
            snake.move_snake();
            assert_eq!(snake.head(), expected, "moving {:?} from {}", direction, start);
        }
    }

    #[test]
    fn test_growth_is_deferred_to_next_move() {
        let mut snake = SnakeBody::new(grid(10, 10), Position::new(2, 2)).unwrap();
        snake.grow();

        // Nothing happens until the snake moves
        assert_eq!(snake.len(), 1);
        assert!(snake.has_pending_growth());

        snake.move_snake();
        assert_eq!(snake.len(), 2);
        assert!(!snake.has_pending_growth());
        assert_eq!(
            snake.occupied_cells(),
            vec![Position::new(2, 2), Position::new(3, 2)]
        );

        snake.move_snake();
        assert_eq!(snake.len(), 2);
        assert_eq!(
            snake.occupied_cells(),
            vec![Position::new(3, 2), Position::new(4, 2)]
        );
    }

    #[test]
    fn test_self_collision_detected() {
        // Tail first: (1,4) .. (1,1) with the head at (1,1)
        let cells = [
            Position::new(1, 4),
            Position::new(1, 3),
            Position::new(1, 2),
            Position::new(1, 1),
        ];
        let mut snake = SnakeBody::from_cells(grid(10, 10), cells, Direction::Down).unwrap();
        assert_eq!(snake.head(), Position::new(1, 1));
        assert!(!snake.check_self_collision());

        snake.move_snake();
        assert_eq!(snake.head(), Position::new(1, 2));
        assert!(snake.check_self_collision());
    }

    #[test]
    fn test_no_collision_in_open_space() {
        let cells = [Position::new(1, 1), Position::new(2, 1), Position::new(3, 1)];
        let mut snake = SnakeBody::from_cells(grid(10, 10), cells, Direction::Right).unwrap();

        for _ in 0..4 {
            snake.move_snake();
            assert!(!snake.check_self_collision());
        }
        assert_eq!(snake.head(), Position::new(7, 1));
        assert_eq!(snake.tail(), Position::new(5, 1));
    }

    #[test]
    fn test_moving_onto_old_tail_is_not_collision() {
        // 2x2 loop: the head chases the tail that vacates on the same move
        let cells = [
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1),
            Position::new(0, 1),
        ];
        let mut snake = SnakeBody::from_cells(grid(4, 4), cells, Direction::Up).unwrap();
        snake.move_snake();

        assert_eq!(snake.head(), Position::new(0, 0));
        assert!(!snake.check_self_collision());
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_full_grid_snake_keeps_length() {
        let cells = [Position::new(0, 0), Position::new(1, 0)];
        let mut snake = SnakeBody::from_cells(grid(2, 1), cells, Direction::Right).unwrap();

        snake.move_snake();
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position::new(0, 0));
        assert_eq!(snake.tail(), Position::new(1, 0));
    }

    #[test]
    fn test_contains() {
        let cells = [Position::new(1, 1), Position::new(2, 1)];
        let snake = SnakeBody::from_cells(grid(5, 5), cells, Direction::Right).unwrap();
        assert!(snake.contains(Position::new(1, 1)));
        assert!(snake.contains(Position::new(2, 1)));
        assert!(!snake.contains(Position::new(3, 1)));
        assert_eq!(snake.cells().count(), 2);
    }
}
