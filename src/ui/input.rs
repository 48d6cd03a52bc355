use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::Palette;

/// Single-line text input with a labelled border and placeholder text.
pub struct TextInput {
    value: String,
    cursor: usize,
    label: String,
    placeholder: String,
    active: bool,
}

impl TextInput {
    pub fn new(label: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            label: label.into(),
            placeholder: placeholder.into(),
            active: false,
        }
    }

    /// Set whether the input has focus
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value, placing the cursor at the end
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    /// Take the current value and clear the input
    pub fn take_value(&mut self) -> String {
        let value = self.value.clone();
        self.clear();
        value
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Handle keyboard input. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => {
                // Control chords belong to the application, not the field
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return false;
                }

                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let prev = previous_boundary(&self.value, self.cursor);
                    self.value.remove(prev);
                    self.cursor = prev;
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                }
                true
            }
            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor = previous_boundary(&self.value, self.cursor);
                }
                true
            }
            KeyCode::Right => {
                if self.cursor < self.value.len() {
                    self.cursor = next_boundary(&self.value, self.cursor);
                }
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.len();
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let display = if self.value.is_empty() && !self.active {
            self.placeholder.clone()
        } else if self.active {
            let before = &self.value[..self.cursor];
            let after = &self.value[self.cursor..];
            format!("{}▊{}", before, after)
        } else {
            self.value.clone()
        };

        let style = if self.value.is_empty() && !self.active {
            Style::default().fg(palette.muted)
        } else {
            Style::default().fg(palette.text)
        };

        let border_style = if self.active {
            Style::default().fg(palette.primary)
        } else {
            Style::default().fg(palette.border)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.label.clone());

        frame.render_widget(Paragraph::new(display).style(style).block(block), area);
    }
}

fn previous_boundary(s: &str, from: usize) -> usize {
    let mut idx = from - 1;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn next_boundary(s: &str, from: usize) -> usize {
    let mut idx = from + 1;
    while idx < s.len() && !s.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}
