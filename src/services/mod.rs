//! Infrastructure services for grid-tui.
//!
//! This module contains:
//! - TodoStore: JSON-file persistence for the to-do list

mod todo_store;

pub use todo_store::TodoStore;
