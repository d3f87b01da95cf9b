//! Domain entities for grid-tui.
//!
//! This module contains the core state types:
//! - GridModel: Cell contents and the single edit target
//! - GridLayout: Uniform or schedule layout configuration
//! - NavDirection: Arrow-key movement between cells
//! - TodoItem: An entry of the persisted to-do list

mod grid;
mod layout;
mod navigation;
mod todo;

pub use grid::{CellCoord, Dimensions, EditTransition, GridModel};
pub use layout::GridLayout;
pub use navigation::NavDirection;
pub use todo::TodoItem;
