//! UI components for grid-tui.
//!
//! This module contains:
//! - layout: Main layout rendering
//! - input: Keyboard input handling
//! - widgets: Grid, cell, and to-do widgets

pub mod input;
pub mod layout;
pub mod widgets;
