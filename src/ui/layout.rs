//! Main layout rendering for the TUI.

use crate::app::{App, AppView};
use crate::ui::widgets::grid_container::GridContainerWidget;
use crate::ui::widgets::help::HelpWidget;
use crate::ui::widgets::text_input::TodoInputDialog;
use crate::ui::widgets::todo_list::TodoListWidget;
use ratatui::{
    layout::Margin,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::rc::Rc;

/// Draw the main application UI
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    match app.view {
        AppView::Grid => draw_grid(frame, app, area),
        AppView::Todos => draw_todos(frame, app, area),
        AppView::Help => {
            match app.previous_view {
                AppView::Todos => draw_todos(frame, app, area),
                _ => draw_grid(frame, app, area),
            }
            draw_help(frame, app, area);
        }
    }

    if let Some(ref error) = app.error_message {
        draw_error_overlay(frame, error, area);
    }
}

/// Header, content, footer split shared by every view
fn view_chunks(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(area)
}

/// Screen area the grid cells are laid out in
pub fn grid_area(area: Rect) -> Rect {
    view_chunks(area)[1].inner(Margin {
        horizontal: 1,
        vertical: 0,
    })
}

fn draw_header(frame: &mut Frame, title: &str, area: Rect) {
    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_footer(frame: &mut Frame, text: &str, area: Rect) {
    let footer = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}

/// Draw the grid view
fn draw_grid(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = view_chunks(area);
    let layout = app.grid.layout();

    draw_header(frame, &format!("grid-tui - {}", layout.title()), chunks[0]);

    let grid = GridContainerWidget::new(
        &app.grid,
        app.config.ui.cell_width,
        app.config.ui.cell_height,
    );
    frame.render_widget(grid, grid_area(area));

    let footer_text = if app.grid.is_editing() {
        " Arrows: Move | Enter/Esc: Done editing "
    } else {
        " Click on a square to edit. Use arrow keys to navigate. | t: To-do | ?: Help | q: Quit "
    };
    draw_footer(frame, footer_text, chunks[2]);
}

/// Draw the to-do list view
fn draw_todos(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = view_chunks(area);

    draw_header(frame, "grid-tui - To-do", chunks[0]);

    match &app.todos {
        Some(store) if !store.is_empty() => {
            let list = TodoListWidget::new(store.items(), app.todo_view_state.selected_index);
            frame.render_widget(list, chunks[1]);
        }
        Some(_) => {
            let empty_msg = Paragraph::new("Nothing to do.\n\nPress 'a' to add an item.")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" To-do "))
                .alignment(Alignment::Center);
            frame.render_widget(empty_msg, chunks[1]);
        }
        None => {
            let message = "The to-do list is unavailable (disabled or no data directory).";
            let unavailable = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" To-do "))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(unavailable, chunks[1]);
        }
    }

    draw_footer(
        frame,
        " j/k: Navigate | Enter: Toggle | a: Add | d: Delete | t/Esc: Grid | ?: Help ",
        chunks[2],
    );

    if let Some(ref input) = app.todo_view_state.input {
        let popup_area = centered_rect(60, 40, area);
        let dialog =
            TodoInputDialog::new(input).error(app.todo_view_state.input_error.as_deref());
        frame.render_widget(dialog, popup_area);
    }
}

/// Draw help overlay
fn draw_help(frame: &mut Frame, app: &App, area: Rect) {
    frame.render_widget(HelpWidget::new(&app.help_view_state), area);
}

/// Draw error message overlay
fn draw_error_overlay(frame: &mut Frame, error: &str, area: Rect) {
    let popup_area = centered_rect(60, 20, area);

    frame.render_widget(Clear, popup_area);

    let error_widget = Paragraph::new(error)
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Error"),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(error_widget, popup_area);
}

/// Create a centered rectangle for popups
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
