//! Application state and main event loop.

use crate::config::AppConfig;
use crate::error::{AppError, Result, StoreError};
use crate::services::TodoStore;
use crate::ui::input::{Action, InputHandler, InputMode};
use crate::ui::widgets::grid_container::{GridContainer, GridGeometry};
use crate::ui::widgets::help::HelpViewState;
use crate::ui::widgets::text_input::TextInputAction;
use crate::ui::widgets::todo_list::TodoViewState;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::prelude::*;
use std::time::{Duration, Instant};

/// Application view state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    /// The editable grid
    #[default]
    Grid,
    /// Persisted to-do list
    Todos,
    /// Help overlay showing keybindings
    Help,
}

/// Main application state
pub struct App {
    /// Loaded configuration
    pub config: AppConfig,
    /// Grid state and its edit field
    pub grid: GridContainer,
    /// Persisted to-do list, if enabled and available
    pub todos: Option<TodoStore>,

    // UI State
    /// Current view
    pub view: AppView,
    /// View to return to when help closes
    pub previous_view: AppView,
    /// Error message to display
    pub error_message: Option<String>,
    /// Terminal area of the last drawn frame
    pub frame_area: Rect,
    /// State for the to-do view
    pub todo_view_state: TodoViewState,
    /// State for help view (scroll position)
    pub help_view_state: HelpViewState,

    input_handler: InputHandler,
}

impl App {
    /// Create a new application instance
    pub fn new(config: AppConfig) -> Self {
        let grid = GridContainer::new(config.layout.clone());
        let input_handler = InputHandler::new(config.ui.vim_navigation);

        let mut error_message = None;
        let todos = if config.todo.enabled {
            match Self::open_todos(&config) {
                Ok(store) => Some(store),
                Err(e) => {
                    tracing::warn!("To-do list unavailable: {}", e);
                    error_message = Some(format!("Failed to load to-do list: {}", e));
                    None
                }
            }
        } else {
            None
        };

        Self {
            config,
            grid,
            todos,
            view: AppView::Grid,
            previous_view: AppView::Grid,
            error_message,
            frame_area: Rect::default(),
            todo_view_state: TodoViewState::new(),
            help_view_state: HelpViewState::new(),
            input_handler,
        }
    }

    fn open_todos(config: &AppConfig) -> std::result::Result<TodoStore, StoreError> {
        let path = config
            .todo
            .storage_path()
            .ok_or(StoreError::NoDataDirectory)?;
        TodoStore::open(path)
    }

    /// Input mode implied by the current view and focus
    pub fn input_mode(&self) -> InputMode {
        match self.view {
            AppView::Grid if self.grid.is_editing() => InputMode::Insert,
            AppView::Todos if self.todo_view_state.is_adding() => InputMode::Command,
            _ => InputMode::Normal,
        }
    }

    /// Cell placement for the last drawn frame
    pub fn grid_geometry(&self) -> GridGeometry {
        GridGeometry::new(
            crate::ui::layout::grid_area(self.frame_area),
            self.grid.layout(),
            self.config.ui.cell_width,
            self.config.ui.cell_height,
        )
        .with_first_row(self.grid.scroll())
    }

    /// Keep the edited or selected row on screen
    pub fn sync_grid_scroll(&mut self) {
        let visible_rows = self.grid_geometry().visible_rows();
        self.grid.scroll_to_focus(visible_rows);
    }

    /// Open the to-do view
    pub fn open_todos_view(&mut self) {
        self.view = AppView::Todos;
        let count = self.todos.as_ref().map_or(0, TodoStore::len);
        self.todo_view_state.clamp(count);
    }

    /// Open the help overlay over the current view
    pub fn open_help(&mut self) {
        if self.view != AppView::Help {
            self.previous_view = self.view;
        }
        self.help_view_state.fit(self.frame_area.height);
        self.view = AppView::Help;
    }

    /// Close the help overlay
    pub fn close_help(&mut self) {
        self.view = self.previous_view;
    }

    /// Handle keyboard input and return true if should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Clear error on any key press
        self.error_message = None;

        let quit = match self.view {
            AppView::Grid => self.handle_grid_key(key),
            AppView::Todos => self.handle_todo_key(key),
            AppView::Help => self.handle_help_key(key),
        };

        self.sync_grid_scroll();
        quit
    }

    /// Handle keys in the grid view
    fn handle_grid_key(&mut self, key: KeyEvent) -> bool {
        let mode = self.input_mode();
        let action = self.input_handler.handle_key(key, mode);

        if mode == InputMode::Insert {
            match action {
                Some(Action::FinishEdit) => self.grid.finish_edit(),
                Some(action) => {
                    if let Some(direction) = action.direction() {
                        self.grid.navigate(direction);
                    }
                }
                None => self.grid.edit_input(key),
            }
            return false;
        }

        let Some(action) = action else {
            return false;
        };

        if let Some(direction) = action.direction() {
            self.grid.move_selection(direction);
            return false;
        }

        match action {
            Action::Select => self.grid.activate_selection(),
            Action::ToggleTodos => self.open_todos_view(),
            Action::Help => self.open_help(),
            Action::Back | Action::Quit => return true,
            _ => {}
        }

        false
    }

    /// Handle keys in the to-do view
    fn handle_todo_key(&mut self, key: KeyEvent) -> bool {
        if self.todo_view_state.is_adding() {
            self.handle_todo_input_key(key);
            return false;
        }

        let Some(action) = self.input_handler.handle_key(key, InputMode::Normal) else {
            return false;
        };

        let count = self.todos.as_ref().map_or(0, TodoStore::len);
        match action {
            Action::MoveUp => self.todo_view_state.select_previous(),
            Action::MoveDown => self.todo_view_state.select_next(count),
            Action::Select => self.toggle_selected_todo(),
            Action::AddTodo if self.todos.is_some() => self.todo_view_state.start_adding(),
            Action::DeleteTodo => self.delete_selected_todo(),
            Action::Back | Action::ToggleTodos => self.view = AppView::Grid,
            Action::Help => self.open_help(),
            Action::Quit => return true,
            _ => {}
        }

        false
    }

    /// Handle keys in the add-to-do dialog
    fn handle_todo_input_key(&mut self, key: KeyEvent) {
        let Some(input) = self.todo_view_state.input.as_mut() else {
            return;
        };

        match input.handle_key(key) {
            TextInputAction::Submit => {
                let text = input.value().to_string();
                self.submit_todo(&text);
            }
            TextInputAction::Cancel => self.todo_view_state.stop_adding(),
            TextInputAction::Changed => self.todo_view_state.input_error = None,
            TextInputAction::None => {}
        }
    }

    /// Add a to-do from the dialog text
    pub fn submit_todo(&mut self, text: &str) {
        let Some(store) = self.todos.as_mut() else {
            self.todo_view_state.stop_adding();
            return;
        };

        match store.add(text) {
            Ok(_) => {
                self.todo_view_state.stop_adding();
                self.todo_view_state.selected_index = store.len().saturating_sub(1);
            }
            Err(StoreError::EmptyText) => {
                self.todo_view_state.input_error = Some(StoreError::EmptyText.to_string());
            }
            Err(e) => {
                self.todo_view_state.stop_adding();
                self.error_message = Some(format!("Failed to save to-do: {}", e));
            }
        }
    }

    /// Flip the done flag of the selected to-do
    pub fn toggle_selected_todo(&mut self) {
        let Some(store) = self.todos.as_mut() else {
            return;
        };
        let Some(id) = store.items().get(self.todo_view_state.selected_index).map(|i| i.id) else {
            return;
        };

        if let Err(e) = store.toggle(id) {
            self.error_message = Some(format!("Failed to update to-do: {}", e));
        }
    }

    /// Remove the selected to-do
    pub fn delete_selected_todo(&mut self) {
        let Some(store) = self.todos.as_mut() else {
            return;
        };
        let Some(id) = store.items().get(self.todo_view_state.selected_index).map(|i| i.id) else {
            return;
        };

        if let Err(e) = store.remove(id) {
            self.error_message = Some(format!("Failed to delete to-do: {}", e));
        }
        self.todo_view_state.clamp(store.len());
    }

    /// Handle keys in help view
    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                self.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.help_view_state.scroll_up(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.help_view_state.scroll_down(1);
            }
            KeyCode::PageUp | KeyCode::Char('b') => {
                self.help_view_state.page_up();
            }
            KeyCode::PageDown | KeyCode::Char('f') => {
                self.help_view_state.page_down();
            }
            _ => {}
        }
        false
    }

    /// Handle mouse input; only left clicks on the grid matter
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.view != AppView::Grid {
            return;
        }

        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let geometry = self.grid_geometry();
            self.grid.handle_click(&geometry, mouse.column, mouse.row);
            self.sync_grid_scroll();
        }
    }

    /// Run the main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);
        let mut last_tick = Instant::now();

        loop {
            self.sync_grid_scroll();
            let completed = terminal.draw(|f| crate::ui::layout::draw(f, self))?;
            self.frame_area = completed.area;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());

            if event::poll(timeout).map_err(|e| AppError::Terminal(e.to_string()))? {
                match event::read().map_err(|e| AppError::Terminal(e.to_string()))? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            break;
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => {
                        tracing::debug!("Terminal resized to {}x{}", width, height);
                        if self.view == AppView::Help {
                            self.help_view_state.fit(height);
                        }
                    }
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
            }
        }

        Ok(())
    }
}
