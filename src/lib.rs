//! grid-tui: editable terminal grid
//!
//! This crate provides a keyboard- and mouse-driven editable grid (uniform
//! or hour-labeled schedule layout) together with a persisted to-do list.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod ui;

pub use app::App;
pub use config::AppConfig;
pub use error::{AppError, Result};
