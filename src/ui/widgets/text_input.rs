//! Single-line text input used by the add-to-do dialog.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear},
};

/// Single-line text input widget
pub struct TextInputWidget<'a> {
    state: &'a TextInputState,
    placeholder: &'a str,
    title: &'a str,
}

impl<'a> TextInputWidget<'a> {
    pub fn new(state: &'a TextInputState) -> Self {
        Self {
            state,
            placeholder: "",
            title: "Input",
        }
    }

    /// Set placeholder text
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Set title
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }
}

impl Widget for TextInputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.title));

        let inner = block.inner(area);
        block.render(area, buf);

        let cursor_style = Style::default().fg(Color::Black).bg(Color::White);
        let value = self.state.value();

        if value.is_empty() {
            buf.set_string(inner.x, inner.y, " ", cursor_style);
            buf.set_string(
                inner.x + 1,
                inner.y,
                self.placeholder,
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        let split = self.state.byte_offset(self.state.cursor);
        let (before, rest) = value.split_at(split);
        let mut rest_chars = rest.chars();
        let under_cursor = rest_chars.next().map(String::from).unwrap_or_else(|| " ".into());

        let line = Line::from(vec![
            Span::raw(before),
            Span::styled(under_cursor, cursor_style),
            Span::raw(rest_chars.as_str()),
        ]);
        buf.set_line(inner.x, inner.y, &line, inner.width);
    }
}

/// State for text input
#[derive(Debug, Default, Clone)]
pub struct TextInputState {
    /// Current value
    pub value: String,
    /// Cursor position (character index)
    pub cursor: usize,
}

impl TextInputState {
    /// Create a new text input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial value, cursor at the end
    pub fn with_value(value: String) -> Self {
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Byte offset of a character index
    fn byte_offset(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(idx, _)| idx)
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> TextInputAction {
        match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return TextInputAction::None;
                }
                let at = self.byte_offset(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                TextInputAction::Changed
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.value.remove(at);
                    TextInputAction::Changed
                } else {
                    TextInputAction::None
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.char_len() {
                    let at = self.byte_offset(self.cursor);
                    self.value.remove(at);
                    TextInputAction::Changed
                } else {
                    TextInputAction::None
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                TextInputAction::None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                TextInputAction::None
            }
            KeyCode::Home => {
                self.cursor = 0;
                TextInputAction::None
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                TextInputAction::None
            }
            KeyCode::Enter => TextInputAction::Submit,
            KeyCode::Esc => TextInputAction::Cancel,
            _ => TextInputAction::None,
        }
    }

    /// Get the current value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Actions that can result from text input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInputAction {
    /// No action
    None,
    /// Value changed
    Changed,
    /// User submitted (Enter)
    Submit,
    /// User cancelled (Esc)
    Cancel,
}

/// Dialog for adding a to-do item
pub struct TodoInputDialog<'a> {
    input: &'a TextInputState,
    error: Option<&'a str>,
}

impl<'a> TodoInputDialog<'a> {
    pub fn new(input: &'a TextInputState) -> Self {
        Self { input, error: None }
    }

    /// Set error message
    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }
}

impl Widget for TodoInputDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Add To-do ");
        let inner = block.inner(area);
        block.render(area, buf);

        buf.set_string(
            inner.x + 1,
            inner.y + 1,
            "What needs doing?",
            Style::default().fg(Color::White),
        );

        let input_area = Rect {
            x: inner.x + 1,
            y: inner.y + 3,
            width: inner.width.saturating_sub(2),
            height: 3,
        };
        TextInputWidget::new(self.input)
            .title("To-do")
            .placeholder("e.g. book the meeting room")
            .render(input_area, buf);

        if let Some(error) = self.error {
            buf.set_string(
                inner.x + 1,
                inner.y + 7,
                error,
                Style::default().fg(Color::Red),
            );
        }

        let help_y = inner.y + inner.height.saturating_sub(2);
        buf.set_string(
            inner.x + 1,
            help_y,
            "Enter: Add | Esc: Cancel",
            Style::default().fg(Color::DarkGray),
        );
    }
}
