//! Directional movement between cells.

use super::grid::{CellCoord, Dimensions};

/// One of the four arrow directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
}

impl NavDirection {
    /// Neighbouring cell in this direction, or `None` at the grid edge
    pub fn step(self, from: CellCoord, dimensions: Dimensions) -> Option<CellCoord> {
        let CellCoord { row, col } = from;
        match self {
            Self::Up if row > 0 => Some(CellCoord::new(row - 1, col)),
            Self::Down if row + 1 < dimensions.rows => Some(CellCoord::new(row + 1, col)),
            Self::Left if col > 0 => Some(CellCoord::new(row, col - 1)),
            Self::Right if col + 1 < dimensions.columns => Some(CellCoord::new(row, col + 1)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIMS: Dimensions = Dimensions {
        rows: 3,
        columns: 4,
    };

    #[test]
    fn test_step_inside() {
        let from = CellCoord::new(1, 1);
        assert_eq!(NavDirection::Up.step(from, DIMS), Some(CellCoord::new(0, 1)));
        assert_eq!(NavDirection::Down.step(from, DIMS), Some(CellCoord::new(2, 1)));
        assert_eq!(NavDirection::Left.step(from, DIMS), Some(CellCoord::new(1, 0)));
        assert_eq!(NavDirection::Right.step(from, DIMS), Some(CellCoord::new(1, 2)));
    }

    #[test]
    fn test_step_at_edges() {
        assert_eq!(NavDirection::Up.step(CellCoord::new(0, 2), DIMS), None);
        assert_eq!(NavDirection::Down.step(CellCoord::new(2, 2), DIMS), None);
        assert_eq!(NavDirection::Left.step(CellCoord::new(1, 0), DIMS), None);
        assert_eq!(NavDirection::Right.step(CellCoord::new(1, 3), DIMS), None);
    }
}
