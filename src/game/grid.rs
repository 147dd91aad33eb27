//! The discrete playing field and its wrap-around arithmetic.

use rand::Rng;

use super::action::Direction;
use super::error::GameError;
use super::state::Position;

/// A field of `field_width` x `field_height` pixels cut into square cells
///
/// Positions are kept in pixels and are always multiples of `cell_size`.
/// Leaving one edge re-enters from the opposite one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridWorld {
    field_width: i32,
    field_height: i32,
    cell_size: i32,
}

impl GridWorld {
    /// Cut a field into cells
    ///
    /// The cell size and both field dimensions must be positive, and each
    /// dimension a whole multiple of the cell size, so the field holds at
    /// least one cell.
    pub fn new(field_width: i32, field_height: i32, cell_size: i32) -> Result<Self, GameError> {
        if cell_size <= 0 {
            return Err(GameError::InvalidConfig(
                "cell_size must be positive".to_string(),
            ));
        }
        if field_width <= 0 || field_height <= 0 {
            return Err(GameError::InvalidConfig(
                "field dimensions must be positive".to_string(),
            ));
        }
        if field_width % cell_size != 0 || field_height % cell_size != 0 {
            return Err(GameError::InvalidConfig(
                "field dimensions must be multiples of cell_size".to_string(),
            ));
        }

        Ok(Self {
            field_width,
            field_height,
            cell_size,
        })
    }

    pub fn field_width(&self) -> i32 {
        self.field_width
    }

    pub fn field_height(&self) -> i32 {
        self.field_height
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn columns(&self) -> i32 {
        self.field_width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.field_height / self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        (self.columns() as usize) * (self.rows() as usize)
    }

    /// Middle of the field, snapped down onto the cell grid
    pub fn center(&self) -> Position {
        let x = (self.field_width / 2) / self.cell_size * self.cell_size;
        let y = (self.field_height / 2) / self.cell_size * self.cell_size;
        Position::new(x, y)
    }

    /// Fold a position back onto the field along both axes
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(
            pos.x.rem_euclid(self.field_width),
            pos.y.rem_euclid(self.field_height),
        )
    }

    /// The neighbouring cell in `direction`, wrapping at the edges
    pub fn step(&self, pos: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        self.wrap(pos.moved_by(dx * self.cell_size, dy * self.cell_size))
    }

    /// Check if a position lies on the field and on the cell grid
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.field_width
            && pos.y >= 0
            && pos.y < self.field_height
            && pos.x % self.cell_size == 0
            && pos.y % self.cell_size == 0
    }

    /// Column and row of a cell
    pub fn cell_index(&self, pos: Position) -> (usize, usize) {
        (
            (pos.x / self.cell_size) as usize,
            (pos.y / self.cell_size) as usize,
        )
    }

    /// Pick a uniformly random cell that is not in `excluding`
    ///
    /// After `max_attempts` unlucky draws the field is scanned row by row for
    /// the first free cell, so a crowded board still gets an answer. Only a
    /// board with no free cell at all yields [`GameError::BoardFull`].
    pub fn random_cell<R: Rng>(
        &self,
        rng: &mut R,
        excluding: &[Position],
        max_attempts: u32,
    ) -> Result<Position, GameError> {
        for _ in 0..max_attempts {
            let x = rng.gen_range(0..self.columns()) * self.cell_size;
            let y = rng.gen_range(0..self.rows()) * self.cell_size;
            let pos = Position::new(x, y);

            if !excluding.contains(&pos) {
                return Ok(pos);
            }
        }

        tracing::warn!(
            attempts = max_attempts,
            excluded = excluding.len(),
            "random placement exhausted, scanning for a free cell"
        );

        (0..self.rows())
            .flat_map(|row| (0..self.columns()).map(move |col| (col, row)))
            .map(|(col, row)| Position::new(col * self.cell_size, row * self.cell_size))
            .find(|pos| !excluding.contains(pos))
            .ok_or(GameError::BoardFull {
                attempts: max_attempts,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn grid() -> GridWorld {
        GridWorld::new(640, 480, 20).unwrap()
    }

    #[test]
    fn test_dimensions() {
        let grid = grid();
        assert_eq!(grid.columns(), 32);
        assert_eq!(grid.rows(), 24);
        assert_eq!(grid.cell_count(), 768);
        assert_eq!(grid.center(), Position::new(320, 240));
    }

    #[test]
    fn test_rejects_fields_without_cells() {
        for (width, height, cell) in [(10, 10, 20), (0, 480, 20), (640, 480, 0), (650, 480, 20)] {
            assert!(matches!(
                GridWorld::new(width, height, cell),
                Err(GameError::InvalidConfig(_))
            ));
        }
        assert!(GridWorld::new(20, 20, 20).is_ok());
    }

    #[test]
    fn test_wrap_stays_on_field_and_is_idempotent() {
        let grid = grid();
        let samples = [
            Position::new(-20, -20),
            Position::new(640, 480),
            Position::new(660, 0),
            Position::new(-1300, 980),
            Position::new(100, 100),
        ];

        for pos in samples {
            let wrapped = grid.wrap(pos);
            assert!(wrapped.x >= 0 && wrapped.x < 640);
            assert!(wrapped.y >= 0 && wrapped.y < 480);
            assert_eq!(grid.wrap(wrapped), wrapped);
        }
    }

    #[test]
    fn test_step_wraps_at_edges() {
        let grid = grid();
        assert_eq!(
            grid.step(Position::new(620, 0), Direction::Right),
            Position::new(0, 0)
        );
        assert_eq!(
            grid.step(Position::new(0, 0), Direction::Left),
            Position::new(620, 0)
        );
        assert_eq!(
            grid.step(Position::new(40, 0), Direction::Up),
            Position::new(40, 460)
        );
        assert_eq!(
            grid.step(Position::new(40, 460), Direction::Down),
            Position::new(40, 0)
        );
    }

    #[test]
    fn test_contains() {
        let grid = grid();
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(620, 460)));
        assert!(!grid.contains(Position::new(640, 0)));
        assert!(!grid.contains(Position::new(-20, 0)));
        assert!(!grid.contains(Position::new(10, 0)));
    }

    #[test]
    fn test_random_cell_avoids_excluded() {
        let grid = GridWorld::new(60, 20, 20).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let excluding = [Position::new(0, 0), Position::new(20, 0)];

        for _ in 0..50 {
            let pos = grid.random_cell(&mut rng, &excluding, 1024).unwrap();
            assert_eq!(pos, Position::new(40, 0));
        }
    }

    #[test]
    fn test_random_cell_scans_when_draws_run_out() {
        let grid = GridWorld::new(100, 100, 20).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let excluding: Vec<Position> = (0..5)
            .flat_map(|row| (0..5).map(move |col| Position::new(col * 20, row * 20)))
            .filter(|pos| *pos != Position::new(80, 80))
            .collect();

        // A single draw almost never lands on the one free cell.
        let pos = grid.random_cell(&mut rng, &excluding, 1).unwrap();
        assert_eq!(pos, Position::new(80, 80));
    }

    #[test]
    fn test_random_cell_board_full() {
        let grid = GridWorld::new(40, 20, 20).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let excluding = [Position::new(0, 0), Position::new(20, 0)];

        assert_eq!(
            grid.random_cell(&mut rng, &excluding, 8),
            Err(GameError::BoardFull { attempts: 8 })
        );
    }
}
