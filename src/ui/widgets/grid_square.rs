//! Single grid cell: static display or an edit field backed by tui-textarea.

use crate::domain::CellCoord;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_textarea::{CursorMove, Input, Key, TextArea};

/// Glyph drawn (hidden) in empty cells so the content row is never blank
pub const PLACEHOLDER: &str = ".";

/// User intent reported by a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareEvent {
    /// Click (or keyboard activation) on a display cell
    FocusRequested,
    /// The edit field's text changed
    ValueChanged(String),
    /// The edit field lost focus or Enter was pressed
    EditFinished,
}

/// Edit field of the cell currently in edit state.
///
/// Created once when the cell enters edit state; dropped when it leaves.
pub struct CellEditor {
    coord: CellCoord,
    textarea: TextArea<'static>,
}

impl CellEditor {
    /// Open a focused field pre-filled with `value`, caret at the end
    pub fn open(coord: CellCoord, value: &str) -> Self {
        let mut textarea = TextArea::new(vec![value.to_string()]);
        textarea.set_cursor_line_style(Style::default());
        textarea.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
        textarea.set_max_histories(0);
        textarea.move_cursor(CursorMove::End);

        Self { coord, textarea }
    }

    pub fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Current field text
    pub fn value(&self) -> &str {
        self.textarea
            .lines()
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Caret position as (line, column)
    pub fn cursor(&self) -> (usize, usize) {
        self.textarea.cursor()
    }

    /// Feed a key to the field and report what happened
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SquareEvent> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Enter | KeyCode::Esc => return Some(SquareEvent::EditFinished),
            // Terminals may report Enter as Ctrl+M / Ctrl+J
            KeyCode::Char('m') | KeyCode::Char('j') if ctrl => {
                return Some(SquareEvent::EditFinished)
            }
            // Arrows belong to grid navigation
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => return None,
            _ => {}
        }

        if self.textarea.input(convert_key_event(key)) {
            Some(SquareEvent::ValueChanged(self.value().to_string()))
        } else {
            None
        }
    }
}

/// Convert crossterm KeyEvent to tui-textarea Input
fn convert_key_event(key: KeyEvent) -> Input {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    let key = match key.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::F(n) => Key::F(n),
        _ => Key::Null,
    };

    Input {
        key,
        ctrl,
        alt,
        shift,
    }
}

/// Widget rendering one cell
pub struct GridSquareWidget<'a> {
    value: &'a str,
    editor: Option<&'a CellEditor>,
    selected: bool,
}

impl<'a> GridSquareWidget<'a> {
    pub fn new(value: &'a str) -> Self {
        Self {
            value,
            editor: None,
            selected: false,
        }
    }

    /// Render in edit state using this field
    pub fn editor(mut self, editor: Option<&'a CellEditor>) -> Self {
        self.editor = editor;
        self
    }

    /// Highlight as the keyboard selection
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl Widget for GridSquareWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = match (self.editor, self.selected) {
            (Some(_), _) => Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(Color::Cyan)),
            (None, true) => Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
            (None, false) => Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        };

        let inner = block.inner(area);
        block.render(area, buf);

        match self.editor {
            Some(editor) => Widget::render(&editor.textarea, inner, buf),
            None if self.value.is_empty() => {
                Paragraph::new(PLACEHOLDER)
                    .style(Style::default().add_modifier(Modifier::HIDDEN))
                    .render(inner, buf);
            }
            None => Paragraph::new(self.value).render(inner, buf),
        }
    }
}
