use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::prefs::{PreferenceRecord, Theme};
use crate::ui::input::TextInput;
use crate::ui::theme::Palette;

/// Outcome of a key event on the settings screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    None,
    /// Persist the API base URL (with the simulated save delay)
    Save(String),
    /// Return to the wizard
    Close,
}

/// Settings screen: API base URL with a delayed save, plus the theme row.
pub struct SettingsView {
    api_input: TextInput,
    saving: bool,
    saved: bool,
}

impl SettingsView {
    pub fn new() -> Self {
        let mut api_input = TextInput::new("API Base URL", "https://api.example.com/v1");
        api_input.set_active(true);

        Self {
            api_input,
            saving: false,
            saved: false,
        }
    }

    /// Refresh the form from the loaded preference record. Called whenever
    /// the screen is (re)opened so edits never start from stale text.
    pub fn sync_from(&mut self, record: &PreferenceRecord) {
        self.api_input.set_value(record.api_base_url.clone());
        self.saved = false;
    }

    pub fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn mark_saved(&mut self) {
        self.saved = true;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SettingsAction {
        // The save control is disabled while a save is in flight.
        if self.saving {
            return SettingsAction::None;
        }

        match key.code {
            KeyCode::Enter => SettingsAction::Save(self.api_input.value().to_string()),
            KeyCode::Esc => SettingsAction::Close,
            _ => {
                if self.api_input.handle_key(key) {
                    self.saved = false;
                }
                SettingsAction::None
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette, theme: Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // heading
                Constraint::Length(3), // api url input
                Constraint::Length(2), // save status
                Constraint::Length(3), // theme row
                Constraint::Min(0),
            ])
            .split(area);

        let heading = vec![
            Line::from(Span::styled(
                "Settings",
                Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Connect Core-X Architect to your custom backend or Gemini API endpoint.",
                Style::default().fg(palette.muted),
            )),
        ];
        frame.render_widget(Paragraph::new(heading), chunks[0]);

        self.api_input.render(frame, chunks[1], palette);

        let status = if self.saving {
            Line::from(Span::styled("Saving…", Style::default().fg(palette.accent)))
        } else if self.saved {
            Line::from(Span::styled(
                "✓ Settings saved",
                Style::default().fg(palette.success),
            ))
        } else {
            Line::from(Span::styled(
                "Enter: save  |  Esc: back",
                Style::default().fg(palette.muted),
            ))
        };
        frame.render_widget(Paragraph::new(status), chunks[2]);

        let theme_line = Line::from(vec![
            Span::styled("Theme: ", Style::default().fg(palette.muted)),
            Span::styled(
                theme.as_str(),
                Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (Ctrl+T to toggle)", Style::default().fg(palette.muted)),
        ]);
        frame.render_widget(
            Paragraph::new(theme_line).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.border))
                    .title("Appearance"),
            ),
            chunks[3],
        );
    }
}

impl Default for SettingsView {
    fn default() -> Self {
        Self::new()
    }
}
