//! Keyboard input handling with vim-style navigation support.

use crate::domain::NavDirection;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Moving the selection around, no cell being edited
    #[default]
    Normal,
    /// A grid cell's edit field has focus
    Insert,
    /// A dialog text input has focus
    Command,
}

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // Selection
    Select,
    Back,
    FinishEdit,

    // To-do list
    ToggleTodos,
    AddTodo,
    DeleteTodo,

    // Misc
    Help,
    Quit,
}

impl Action {
    /// Arrow direction carried by a movement action
    pub fn direction(self) -> Option<NavDirection> {
        match self {
            Self::MoveUp => Some(NavDirection::Up),
            Self::MoveDown => Some(NavDirection::Down),
            Self::MoveLeft => Some(NavDirection::Left),
            Self::MoveRight => Some(NavDirection::Right),
            _ => None,
        }
    }
}

/// Keyboard bindings configuration
pub struct KeyBindings {
    pub vim_navigation: bool,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            vim_navigation: true,
        }
    }
}

/// Input handler for processing keyboard events
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    /// Create a new input handler
    pub fn new(vim_navigation: bool) -> Self {
        Self {
            bindings: KeyBindings { vim_navigation },
        }
    }

    /// Handle a key event and return the corresponding action
    pub fn handle_key(&self, key: KeyEvent, mode: InputMode) -> Option<Action> {
        match mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Insert => self.handle_insert_key(key),
            InputMode::Command => self.handle_command_key(key),
        }
    }

    /// Handle key in normal mode
    fn handle_normal_key(&self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match key.code {
            // Navigation - arrow keys always work
            KeyCode::Up => Some(Action::MoveUp),
            KeyCode::Down => Some(Action::MoveDown),
            KeyCode::Left => Some(Action::MoveLeft),
            KeyCode::Right => Some(Action::MoveRight),

            // Vim-style navigation (j/k/h/l)
            KeyCode::Char('j') if self.bindings.vim_navigation => Some(Action::MoveDown),
            KeyCode::Char('k') if self.bindings.vim_navigation => Some(Action::MoveUp),
            KeyCode::Char('h') if self.bindings.vim_navigation => Some(Action::MoveLeft),
            KeyCode::Char('l') if self.bindings.vim_navigation => Some(Action::MoveRight),

            // Selection
            KeyCode::Enter => Some(Action::Select),
            KeyCode::Char(' ') => Some(Action::Select),

            // Back/Quit
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Char('q') => Some(Action::Quit),

            // To-do list
            KeyCode::Char('t') => Some(Action::ToggleTodos),
            KeyCode::Char('a') => Some(Action::AddTodo),
            KeyCode::Char('d') => Some(Action::DeleteTodo),

            KeyCode::Char('?') => Some(Action::Help),

            _ => None,
        }
    }

    /// Handle key while a cell is being edited.
    ///
    /// Arrow keys are claimed here so the edit field never moves its caret
    /// with them.
    fn handle_insert_key(&self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::FinishEdit);
        }

        match key.code {
            KeyCode::Up => Some(Action::MoveUp),
            KeyCode::Down => Some(Action::MoveDown),
            KeyCode::Left => Some(Action::MoveLeft),
            KeyCode::Right => Some(Action::MoveRight),
            // Esc blurs the field; Enter finishes the same way
            KeyCode::Enter | KeyCode::Esc => Some(Action::FinishEdit),
            // Other keys are handled by the cell editor
            _ => None,
        }
    }

    /// Handle key in command mode
    fn handle_command_key(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Enter => Some(Action::Select),
            _ => None,
        }
    }
}
