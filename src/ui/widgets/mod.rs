//! Reusable UI widgets for grid-tui.

pub mod grid_container;
pub mod grid_square;
pub mod help;
pub mod text_input;
pub mod todo_list;
