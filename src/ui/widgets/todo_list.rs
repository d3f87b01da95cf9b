//! To-do list widget and its view state.

use super::text_input::TextInputState;
use crate::domain::TodoItem;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState},
};

/// Widget for displaying the to-do list
pub struct TodoListWidget<'a> {
    items: &'a [TodoItem],
    selected_index: usize,
}

impl<'a> TodoListWidget<'a> {
    pub fn new(items: &'a [TodoItem], selected_index: usize) -> Self {
        Self {
            items,
            selected_index,
        }
    }

    fn build_items(&self) -> Vec<ListItem<'a>> {
        self.items
            .iter()
            .map(|item| {
                let style = if item.done {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };

                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", item.marker()), Style::default().fg(Color::Green)),
                    Span::styled(item.text.as_str(), style),
                ]))
            })
            .collect()
    }
}

impl Widget for TodoListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items = self.build_items();

        let mut state = ListState::default();
        if !self.items.is_empty() {
            state.select(Some(self.selected_index));
        }

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" To-do "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        StatefulWidget::render(list, area, buf, &mut state);
    }
}

/// State for the to-do view
#[derive(Debug, Default, Clone)]
pub struct TodoViewState {
    /// Selected item index
    pub selected_index: usize,
    /// Input of the add dialog while it is open
    pub input: Option<TextInputState>,
    /// Error shown inside the add dialog
    pub input_error: Option<String>,
}

impl TodoViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_adding(&self) -> bool {
        self.input.is_some()
    }

    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn select_next(&mut self, count: usize) {
        if self.selected_index + 1 < count {
            self.selected_index += 1;
        }
    }

    /// Keep the selection inside a list that just shrank
    pub fn clamp(&mut self, count: usize) {
        self.selected_index = self.selected_index.min(count.saturating_sub(1));
    }

    /// Open the add dialog
    pub fn start_adding(&mut self) {
        self.input = Some(TextInputState::new());
        self.input_error = None;
    }

    /// Close the add dialog
    pub fn stop_adding(&mut self) {
        self.input = None;
        self.input_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_bounds() {
        let mut state = TodoViewState::new();
        state.select_previous();
        assert_eq!(state.selected_index, 0);

        state.select_next(3);
        state.select_next(3);
        state.select_next(3);
        assert_eq!(state.selected_index, 2);

        state.clamp(1);
        assert_eq!(state.selected_index, 0);
        state.clamp(0);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn test_add_dialog_lifecycle() {
        let mut state = TodoViewState::new();
        assert!(!state.is_adding());
        state.start_adding();
        assert!(state.is_adding());
        state.input_error = Some("oops".to_string());
        state.stop_adding();
        assert!(!state.is_adding());
        assert!(state.input_error.is_none());
    }

    #[test]
    fn test_render_marks_done_items() {
        let mut done = TodoItem::new("laundry");
        done.done = true;
        let items = vec![TodoItem::new("groceries"), done];

        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        TodoListWidget::new(&items, 0).render(area, &mut buf);

        let row = |y: u16| -> String { (0..30).map(|x| buf[(x, y)].symbol()).collect() };
        assert!(row(1).contains("[ ] groceries"));
        assert!(row(2).contains("[x] laundry"));
    }
}
