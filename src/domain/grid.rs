//! Grid model: cell contents plus the single edit target.

use std::rc::Rc;

/// A (row, column) coordinate inside the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Fixed grid size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

impl Dimensions {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Check whether a coordinate falls inside these dimensions
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row < self.rows && coord.col < self.columns
    }
}

/// Result of changing the edit target.
///
/// Owners use this to run their enter/leave hooks exactly once per
/// transition instead of on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditTransition {
    pub previous: Option<CellCoord>,
    pub current: Option<CellCoord>,
}

impl EditTransition {
    /// The cell that just entered edit state, if any
    pub fn entered(&self) -> Option<CellCoord> {
        match self.current {
            Some(coord) if self.previous != Some(coord) => Some(coord),
            _ => None,
        }
    }

    /// The cell that just left edit state, if any
    pub fn left(&self) -> Option<CellCoord> {
        match self.previous {
            Some(coord) if self.current != Some(coord) => Some(coord),
            _ => None,
        }
    }

    /// Whether the edit target actually changed
    pub fn is_change(&self) -> bool {
        self.previous != self.current
    }
}

/// Authoritative grid state.
///
/// Rows are reference counted and replaced wholesale on every write, so a
/// caller holding an older row keeps seeing the old contents and can detect
/// changes with [`Rc::ptr_eq`].
#[derive(Debug, Clone)]
pub struct GridModel {
    rows: Vec<Rc<Vec<String>>>,
    columns: usize,
    edit_target: Option<CellCoord>,
}

impl GridModel {
    /// Create a grid with every cell empty
    pub fn new(dimensions: Dimensions) -> Self {
        assert!(
            dimensions.rows > 0 && dimensions.columns > 0,
            "grid must have at least one row and one column, got {}x{}",
            dimensions.rows,
            dimensions.columns
        );

        let rows = (0..dimensions.rows)
            .map(|_| Rc::new(vec![String::new(); dimensions.columns]))
            .collect();

        Self {
            rows,
            columns: dimensions.columns,
            edit_target: None,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.row_count(), self.columns)
    }

    /// Text of a single cell
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.check_bounds(row, col);
        &self.rows[row][col]
    }

    /// Shared handle to a whole row
    pub fn row(&self, row: usize) -> &Rc<Vec<String>> {
        &self.rows[row]
    }

    /// Iterate over all rows in order
    pub fn rows(&self) -> impl Iterator<Item = &Rc<Vec<String>>> {
        self.rows.iter()
    }

    /// Replace the text of one cell.
    ///
    /// The containing row is swapped for a new allocation; every other row
    /// keeps its identity.
    pub fn set_cell(&mut self, row: usize, col: usize, text: impl Into<String>) {
        self.check_bounds(row, col);

        let mut updated = self.rows[row].as_ref().clone();
        updated[col] = text.into();
        self.rows[row] = Rc::new(updated);
    }

    pub fn edit_target(&self) -> Option<CellCoord> {
        self.edit_target
    }

    pub fn is_editing(&self, row: usize, col: usize) -> bool {
        self.edit_target == Some(CellCoord::new(row, col))
    }

    /// Put a cell into edit state, implicitly taking it away from any other
    pub fn set_edit_target(&mut self, row: usize, col: usize) -> EditTransition {
        self.check_bounds(row, col);
        self.replace_edit_target(Some(CellCoord::new(row, col)))
    }

    pub fn clear_edit_target(&mut self) -> EditTransition {
        self.replace_edit_target(None)
    }

    fn replace_edit_target(&mut self, target: Option<CellCoord>) -> EditTransition {
        let previous = std::mem::replace(&mut self.edit_target, target);
        EditTransition {
            previous,
            current: target,
        }
    }

    fn check_bounds(&self, row: usize, col: usize) {
        assert!(
            row < self.row_count() && col < self.columns,
            "cell ({}, {}) is outside the {}x{} grid",
            row,
            col,
            self.row_count(),
            self.columns
        );
    }
}
