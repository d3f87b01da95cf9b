//! Grid container: lays out the cells, routes cell events into the model,
//! and moves the edit target with the arrow keys.

use super::grid_square::{CellEditor, GridSquareWidget, SquareEvent};
use crate::domain::{CellCoord, Dimensions, EditTransition, GridLayout, GridModel, NavDirection};
use crossterm::event::KeyEvent;
use ratatui::prelude::*;

/// Columns reserved for the `HH:00` row labels of the schedule layout
const LABEL_WIDTH: u16 = 7;

/// Owner of the grid state and the one live edit field
pub struct GridContainer {
    model: GridModel,
    layout: GridLayout,
    editor: Option<CellEditor>,
    selection: CellCoord,
    /// First row drawn when the grid is taller than the screen
    scroll: usize,
}

impl GridContainer {
    /// Create an empty grid for the given layout
    pub fn new(layout: GridLayout) -> Self {
        Self {
            model: GridModel::new(layout.dimensions()),
            layout,
            editor: None,
            selection: CellCoord::default(),
            scroll: 0,
        }
    }

    pub fn model(&self) -> &GridModel {
        &self.model
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Edit field of the cell in edit state
    pub fn editor(&self) -> Option<&CellEditor> {
        self.editor.as_ref()
    }

    /// Cell highlighted for keyboard activation
    pub fn selection(&self) -> CellCoord {
        self.selection
    }

    pub fn is_editing(&self) -> bool {
        self.model.edit_target().is_some()
    }

    /// First visible row
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Scroll so the edited cell, or the selection when idle, is one of
    /// `visible_rows` drawn rows
    pub fn scroll_to_focus(&mut self, visible_rows: usize) {
        if visible_rows == 0 {
            return;
        }

        let focus = self.model.edit_target().unwrap_or(self.selection).row;
        if focus < self.scroll {
            self.scroll = focus;
        } else if focus >= self.scroll + visible_rows {
            self.scroll = focus + 1 - visible_rows;
        }

        let max_scroll = self.model.row_count().saturating_sub(visible_rows);
        self.scroll = self.scroll.min(max_scroll);
    }

    /// Apply an event reported by the cell at `coord`
    pub fn handle_square_event(&mut self, coord: CellCoord, event: SquareEvent) {
        match event {
            SquareEvent::FocusRequested => {
                let transition = self.model.set_edit_target(coord.row, coord.col);
                self.apply_transition(transition);
            }
            SquareEvent::ValueChanged(text) => {
                self.model.set_cell(coord.row, coord.col, text);
            }
            SquareEvent::EditFinished => {
                if self.model.edit_target() == Some(coord) {
                    let transition = self.model.clear_edit_target();
                    self.apply_transition(transition);
                }
            }
        }
    }

    /// Put a cell into edit state, as a click on it would
    pub fn request_focus(&mut self, coord: CellCoord) {
        self.handle_square_event(coord, SquareEvent::FocusRequested);
    }

    /// Blur the edited cell, if any
    pub fn finish_edit(&mut self) {
        if let Some(coord) = self.model.edit_target() {
            self.handle_square_event(coord, SquareEvent::EditFinished);
        }
    }

    /// Forward a non-navigation key to the edit field
    pub fn edit_input(&mut self, key: KeyEvent) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        let coord = editor.coord();
        if let Some(event) = editor.handle_key(key) {
            self.handle_square_event(coord, event);
        }
    }

    /// Move the edit target one cell; returns false at the edge or when idle.
    ///
    /// The source cell gets no finished event: its text is already committed.
    pub fn navigate(&mut self, direction: NavDirection) -> bool {
        let Some(from) = self.model.edit_target() else {
            return false;
        };

        match direction.step(from, self.model.dimensions()) {
            Some(to) => {
                tracing::debug!("Navigating {:?} from {:?} to {:?}", direction, from, to);
                let transition = self.model.set_edit_target(to.row, to.col);
                self.apply_transition(transition);
                true
            }
            None => false,
        }
    }

    /// Move the display-mode selection one cell
    pub fn move_selection(&mut self, direction: NavDirection) {
        if let Some(to) = direction.step(self.selection, self.model.dimensions()) {
            self.selection = to;
        }
    }

    /// Start editing the selected cell
    pub fn activate_selection(&mut self) {
        self.request_focus(self.selection);
    }

    /// Handle a left click at terminal position (x, y).
    ///
    /// A click outside the edited cell blurs it first; a click on a cell
    /// then requests focus for that cell.
    pub fn handle_click(&mut self, geometry: &GridGeometry, x: u16, y: u16) {
        let hit = geometry.cell_at(x, y);

        if let Some(editing) = self.model.edit_target() {
            if hit == Some(editing) {
                return;
            }
            self.finish_edit();
        }

        if let Some(coord) = hit {
            self.request_focus(coord);
        }
    }

    /// Run the enter/leave hooks for an edit target change
    fn apply_transition(&mut self, transition: EditTransition) {
        if let Some(left) = transition.left() {
            if self.editor.as_ref().is_some_and(|e| e.coord() == left) {
                self.editor = None;
            }
            tracing::debug!("Cell {:?} left edit state", left);
        }

        if let Some(entered) = transition.entered() {
            // Focus hook: runs once per transition, never on re-render
            let value = self.model.cell(entered.row, entered.col);
            self.editor = Some(CellEditor::open(entered, value));
            self.selection = entered;
            tracing::debug!("Cell {:?} entered edit state", entered);
        }
    }
}

/// Screen placement of every cell for a given area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    area: Rect,
    label_width: u16,
    cell_width: u16,
    cell_height: u16,
    dimensions: Dimensions,
    first_row: usize,
}

impl GridGeometry {
    pub fn new(area: Rect, layout: &GridLayout, cell_width: u16, cell_height: u16) -> Self {
        Self {
            area,
            label_width: if layout.has_row_labels() { LABEL_WIDTH } else { 0 },
            cell_width,
            cell_height,
            dimensions: layout.dimensions(),
            first_row: 0,
        }
    }

    /// Start drawing at `first_row` instead of the top row
    pub fn with_first_row(mut self, first_row: usize) -> Self {
        self.first_row = first_row;
        self
    }

    /// Number of whole cell rows the area can hold
    pub fn visible_rows(&self) -> usize {
        (self.area.height / self.cell_height.max(1)) as usize
    }

    /// Box of a cell, or `None` if it does not fit on screen
    pub fn cell_rect(&self, coord: CellCoord) -> Option<Rect> {
        if !self.dimensions.contains(coord) || coord.row < self.first_row {
            return None;
        }

        let x = self.area.x as usize
            + self.label_width as usize
            + coord.col * self.cell_width as usize;
        let y = self.area.y as usize
            + (coord.row - self.first_row) * self.cell_height as usize;

        let fits_x = x + self.cell_width as usize <= self.area.right() as usize;
        let fits_y = y + self.cell_height as usize <= self.area.bottom() as usize;
        if !(fits_x && fits_y) {
            return None;
        }

        Some(Rect::new(x as u16, y as u16, self.cell_width, self.cell_height))
    }

    /// Area of a row's time label, for layouts that have one
    pub fn label_rect(&self, row: usize) -> Option<Rect> {
        if self.label_width == 0 {
            return None;
        }
        let first = self.cell_rect(CellCoord::new(row, 0))?;
        Some(Rect::new(self.area.x, first.y, self.label_width, first.height))
    }

    /// Cell under a terminal position
    pub fn cell_at(&self, x: u16, y: u16) -> Option<CellCoord> {
        let left = self.area.x.saturating_add(self.label_width);
        if x < left || y < self.area.y {
            return None;
        }

        let col = ((x - left) / self.cell_width) as usize;
        let row = self.first_row + ((y - self.area.y) / self.cell_height) as usize;
        let coord = CellCoord::new(row, col);

        self.cell_rect(coord).map(|_| coord)
    }
}

/// Widget drawing the whole grid from a container
pub struct GridContainerWidget<'a> {
    container: &'a GridContainer,
    cell_width: u16,
    cell_height: u16,
}

impl<'a> GridContainerWidget<'a> {
    pub fn new(container: &'a GridContainer, cell_width: u16, cell_height: u16) -> Self {
        Self {
            container,
            cell_width,
            cell_height,
        }
    }
}

impl Widget for GridContainerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let container = self.container;
        let layout = container.layout();
        let geometry = GridGeometry::new(area, layout, self.cell_width, self.cell_height)
            .with_first_row(container.scroll());
        let editing = container.is_editing();

        for (row_idx, row) in container.model().rows().enumerate() {
            let label = layout.row_label(row_idx);
            if let (Some(label), Some(rect)) = (label, geometry.label_rect(row_idx)) {
                buf.set_string(
                    rect.x + 1,
                    rect.y + rect.height / 2,
                    label,
                    Style::default().fg(Color::Cyan),
                );
            }

            for (col_idx, value) in row.iter().enumerate() {
                let coord = CellCoord::new(row_idx, col_idx);
                let Some(rect) = geometry.cell_rect(coord) else {
                    continue;
                };

                let editor = container.editor().filter(|e| e.coord() == coord);
                GridSquareWidget::new(value)
                    .editor(editor)
                    .selected(!editing && container.selection() == coord)
                    .render(rect, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(grid: &mut GridContainer, text: &str) {
        for c in text.chars() {
            grid.edit_input(key(KeyCode::Char(c)));
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_click_enters_edit_on_that_cell_only() {
        let mut grid = GridContainer::new(GridLayout::default());
        grid.request_focus(CellCoord::new(2, 3));

        assert_eq!(grid.model().edit_target(), Some(CellCoord::new(2, 3)));
        assert_eq!(grid.editor().map(CellEditor::coord), Some(CellCoord::new(2, 3)));
        for row in 0..5 {
            for col in 0..5 {
                assert_eq!(grid.model().is_editing(row, col), (row, col) == (2, 3));
            }
        }
    }

    #[test]
    fn test_typing_commits_immediately_and_survives_blur() {
        let mut grid = GridContainer::new(GridLayout::default());
        grid.request_focus(CellCoord::new(0, 0));
        type_text(&mut grid, "hello");
        assert_eq!(grid.model().cell(0, 0), "hello");

        grid.finish_edit();
        assert!(!grid.is_editing());
        assert!(grid.editor().is_none());
        assert_eq!(grid.model().cell(0, 0), "hello");
    }

    #[test]
    fn test_enter_matches_blur() {
        let mut via_enter = GridContainer::new(GridLayout::default());
        via_enter.request_focus(CellCoord::new(1, 1));
        type_text(&mut via_enter, "abc");
        via_enter.edit_input(key(KeyCode::Enter));

        let mut via_blur = GridContainer::new(GridLayout::default());
        via_blur.request_focus(CellCoord::new(1, 1));
        type_text(&mut via_blur, "abc");
        via_blur.finish_edit();

        for grid in [&via_enter, &via_blur] {
            assert_eq!(grid.model().edit_target(), None);
            assert!(grid.editor().is_none());
            assert_eq!(grid.model().cell(1, 1), "abc");
        }
    }

    #[test]
    fn test_arrow_down_moves_edit_target() {
        let mut grid = GridContainer::new(GridLayout::default());
        grid.request_focus(CellCoord::new(3, 2));

        assert!(grid.navigate(NavDirection::Down));
        assert_eq!(grid.model().edit_target(), Some(CellCoord::new(4, 2)));
        assert_eq!(grid.editor().map(CellEditor::coord), Some(CellCoord::new(4, 2)));

        // Bottom edge: no-op
        assert!(!grid.navigate(NavDirection::Down));
        assert_eq!(grid.model().edit_target(), Some(CellCoord::new(4, 2)));
    }

    #[test]
    fn test_navigation_at_every_edge_is_noop() {
        let mut grid = GridContainer::new(GridLayout::uniform(2, 2));
        grid.request_focus(CellCoord::new(0, 0));
        assert!(!grid.navigate(NavDirection::Up));
        assert!(!grid.navigate(NavDirection::Left));
        assert!(grid.navigate(NavDirection::Right));
        assert!(!grid.navigate(NavDirection::Right));
        assert!(grid.navigate(NavDirection::Down));
        assert!(!grid.navigate(NavDirection::Down));
        assert_eq!(grid.model().edit_target(), Some(CellCoord::new(1, 1)));
    }

    #[test]
    fn test_navigation_without_edit_target_does_nothing() {
        let mut grid = GridContainer::new(GridLayout::default());
        assert!(!grid.navigate(NavDirection::Down));
        assert_eq!(grid.model().edit_target(), None);
    }

    #[test]
    fn test_navigation_keeps_committed_text_and_prefills_target() {
        let mut grid = GridContainer::new(GridLayout::default());
        grid.request_focus(CellCoord::new(1, 0));
        type_text(&mut grid, "below");
        grid.navigate(NavDirection::Up);
        type_text(&mut grid, "above");

        grid.navigate(NavDirection::Down);
        assert_eq!(grid.model().cell(0, 0), "above");
        assert_eq!(grid.model().cell(1, 0), "below");
        assert_eq!(grid.editor().map(CellEditor::value), Some("below"));
    }

    #[test]
    fn test_focus_hook_runs_once_per_transition() {
        let mut grid = GridContainer::new(GridLayout::default());
        grid.request_focus(CellCoord::new(0, 0));
        type_text(&mut grid, "abc");
        grid.edit_input(key(KeyCode::Home));
        assert_eq!(grid.editor().map(CellEditor::cursor), Some((0, 0)));

        // Re-rendering and re-requesting the same cell keep the field as is
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        GridContainerWidget::new(&grid, 12, 3).render(area, &mut buf);
        grid.request_focus(CellCoord::new(0, 0));
        assert_eq!(grid.editor().map(CellEditor::cursor), Some((0, 0)));
    }

    #[test]
    fn test_stale_finished_event_is_ignored() {
        let mut grid = GridContainer::new(GridLayout::default());
        grid.request_focus(CellCoord::new(0, 0));
        grid.navigate(NavDirection::Right);
        grid.handle_square_event(CellCoord::new(0, 0), SquareEvent::EditFinished);
        assert_eq!(grid.model().edit_target(), Some(CellCoord::new(0, 1)));
    }

    #[test]
    fn test_selection_moves_and_activates() {
        let mut grid = GridContainer::new(GridLayout::uniform(3, 3));
        grid.move_selection(NavDirection::Up);
        assert_eq!(grid.selection(), CellCoord::new(0, 0));
        grid.move_selection(NavDirection::Right);
        grid.move_selection(NavDirection::Down);
        assert_eq!(grid.selection(), CellCoord::new(1, 1));

        grid.activate_selection();
        assert_eq!(grid.model().edit_target(), Some(CellCoord::new(1, 1)));
    }

    #[test]
    fn test_geometry_hit_testing() {
        let layout = GridLayout::default();
        let geometry = GridGeometry::new(Rect::new(2, 1, 100, 30), &layout, 10, 3);

        assert_eq!(
            geometry.cell_rect(CellCoord::new(1, 2)),
            Some(Rect::new(22, 4, 10, 3))
        );
        assert_eq!(geometry.cell_at(22, 4), Some(CellCoord::new(1, 2)));
        assert_eq!(geometry.cell_at(31, 6), Some(CellCoord::new(1, 2)));
        assert_eq!(geometry.cell_at(1, 1), None);
        // Past the last column
        assert_eq!(geometry.cell_at(60, 2), None);
    }

    #[test]
    fn test_geometry_skips_label_column() {
        let layout = GridLayout::schedule(9, 12, 1);
        let geometry = GridGeometry::new(Rect::new(0, 0, 40, 20), &layout, 10, 3);

        assert_eq!(geometry.cell_at(3, 0), None);
        assert_eq!(geometry.cell_at(LABEL_WIDTH, 0), Some(CellCoord::new(0, 0)));
        assert_eq!(geometry.label_rect(2), Some(Rect::new(0, 6, LABEL_WIDTH, 3)));
    }

    #[test]
    fn test_click_elsewhere_blurs_then_focuses() {
        let layout = GridLayout::default();
        let geometry = GridGeometry::new(Rect::new(0, 0, 100, 30), &layout, 10, 3);
        let mut grid = GridContainer::new(layout);

        grid.handle_click(&geometry, 1, 1);
        assert_eq!(grid.model().edit_target(), Some(CellCoord::new(0, 0)));

        // Same cell: ignored, field untouched
        type_text(&mut grid, "x");
        grid.handle_click(&geometry, 2, 1);
        assert_eq!(grid.editor().map(CellEditor::value), Some("x"));

        grid.handle_click(&geometry, 11, 4);
        assert_eq!(grid.model().edit_target(), Some(CellCoord::new(1, 1)));

        // Outside every cell: plain blur
        grid.handle_click(&geometry, 99, 29);
        assert_eq!(grid.model().edit_target(), None);
        assert_eq!(grid.model().cell(0, 0), "x");
    }

    #[test]
    fn test_scroll_follows_focus() {
        let mut grid = GridContainer::new(GridLayout::default_schedule());
        grid.request_focus(CellCoord::new(0, 0));
        for _ in 0..8 {
            grid.navigate(NavDirection::Down);
            grid.scroll_to_focus(4);
        }
        assert_eq!(grid.scroll(), 5);

        grid.navigate(NavDirection::Up);
        grid.scroll_to_focus(4);
        assert_eq!(grid.scroll(), 5);

        grid.finish_edit();
        for _ in 0..8 {
            grid.move_selection(NavDirection::Up);
        }
        grid.scroll_to_focus(4);
        assert_eq!(grid.scroll(), 0);

        // Taller screen than grid: nothing to scroll
        for _ in 0..8 {
            grid.move_selection(NavDirection::Down);
        }
        grid.scroll = 3;
        grid.scroll_to_focus(20);
        assert_eq!(grid.scroll(), 0);
    }

    #[test]
    fn test_scrolled_geometry() {
        let layout = GridLayout::default_schedule();
        let geometry =
            GridGeometry::new(Rect::new(0, 0, 40, 12), &layout, 10, 3).with_first_row(5);

        assert_eq!(geometry.visible_rows(), 4);
        assert_eq!(geometry.cell_rect(CellCoord::new(4, 0)), None);
        assert_eq!(
            geometry.cell_rect(CellCoord::new(5, 0)),
            Some(Rect::new(LABEL_WIDTH, 0, 10, 3))
        );
        assert_eq!(geometry.cell_at(LABEL_WIDTH, 10), Some(CellCoord::new(8, 0)));
        assert_eq!(geometry.label_rect(8), Some(Rect::new(0, 9, LABEL_WIDTH, 3)));
    }

    #[test]
    fn test_render_schedule_labels_and_values() {
        let mut grid = GridContainer::new(GridLayout::schedule(9, 12, 1));
        grid.request_focus(CellCoord::new(1, 0));
        type_text(&mut grid, "standup");
        grid.finish_edit();

        let area = Rect::new(0, 0, 30, 9);
        let mut buf = Buffer::empty(area);
        GridContainerWidget::new(&grid, 12, 3).render(area, &mut buf);

        assert!(row_text(&buf, 1).contains("09:00"));
        assert!(row_text(&buf, 4).contains("10:00"));
        assert!(row_text(&buf, 4).contains("standup"));
        assert!(row_text(&buf, 7).contains("11:00"));
    }
}
