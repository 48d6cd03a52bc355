use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::input::TextInput;
use crate::ui::theme::Palette;
use crate::wizard::options::{Database, Feature, Language, FEATURES};
use crate::wizard::session::{SubmissionState, WizardSession, WizardStep};

/// Outcome of a key event on the wizard screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardViewAction {
    None,
    /// Begin the simulated generation request
    Generate,
    /// Leave the wizard for the landing screen
    Exit,
}

/// One selectable row on the stack configuration step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Language(Language),
    Database(Database),
    Feature(&'static Feature),
    Generate,
}

fn rows() -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    rows.extend(Language::all().iter().copied().map(Row::Language));
    rows.extend(Database::all().iter().copied().map(Row::Database));
    rows.extend(FEATURES.iter().map(Row::Feature));
    rows.push(Row::Generate);
    rows
}

/// Presentation state for the two wizard steps. All decision logic lives in
/// `WizardSession`; this view only edits text and moves a cursor.
pub struct WizardView {
    description: TextInput,
    schema: TextInput,
    attaching: bool,
    cursor: usize,
}

impl WizardView {
    pub fn new() -> Self {
        let mut description = TextInput::new(
            "Project Description",
            "Describe the backend you need, e.g. \"An invoicing API with user accounts\"",
        );
        description.set_active(true);

        Self {
            description,
            schema: TextInput::new("Schema file", "schema.sql"),
            attaching: false,
            cursor: 0,
        }
    }

    /// Clear all view state for a fresh session ("new project").
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn handle_key(&mut self, key: KeyEvent, session: &mut WizardSession) -> WizardViewAction {
        if self.attaching {
            return self.handle_attach_key(key, session);
        }

        match session.step() {
            WizardStep::Overview => self.handle_overview_key(key, session),
            WizardStep::StackConfig => self.handle_stack_key(key, session),
        }
    }

    fn handle_attach_key(&mut self, key: KeyEvent, session: &mut WizardSession) -> WizardViewAction {
        match key.code {
            KeyCode::Enter => {
                let name = self.schema.take_value().trim().to_string();
                if !name.is_empty() {
                    // Only the display name is recorded; content is never read.
                    session.attach_schema(name);
                }
                self.stop_attaching();
            }
            KeyCode::Esc => {
                self.schema.clear();
                self.stop_attaching();
            }
            _ => {
                self.schema.handle_key(key);
            }
        }
        WizardViewAction::None
    }

    fn handle_overview_key(&mut self, key: KeyEvent, session: &mut WizardSession) -> WizardViewAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('a') => self.start_attaching(),
                KeyCode::Char('d') => session.clear_schema(),
                _ => {}
            }
            return WizardViewAction::None;
        }

        match key.code {
            KeyCode::Enter => {
                // Guarded transition; silently stays put when not satisfied.
                session.advance();
                WizardViewAction::None
            }
            KeyCode::Esc => WizardViewAction::Exit,
            _ => {
                if self.description.handle_key(key) {
                    session.set_description(self.description.value());
                }
                WizardViewAction::None
            }
        }
    }

    fn handle_stack_key(&mut self, key: KeyEvent, session: &mut WizardSession) -> WizardViewAction {
        let rows = rows();

        match key.code {
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.cursor + 1 < rows.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => match rows[self.cursor] {
                Row::Language(language) => {
                    session.set_language(language);
                }
                Row::Database(database) => {
                    session.set_database(database);
                }
                Row::Feature(feature) => {
                    session.toggle_feature(feature.id);
                }
                Row::Generate => {
                    if session.can_submit() {
                        return WizardViewAction::Generate;
                    }
                }
            },
            KeyCode::Esc => {
                session.back();
            }
            _ => {}
        }

        WizardViewAction::None
    }

    fn start_attaching(&mut self) {
        self.attaching = true;
        self.schema.set_active(true);
        self.description.set_active(false);
    }

    fn stop_attaching(&mut self) {
        self.attaching = false;
        self.schema.set_active(false);
        self.description.set_active(true);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette, session: &WizardSession) {
        match session.step() {
            WizardStep::Overview => self.render_overview(frame, area, palette, session),
            WizardStep::StackConfig => self.render_stack(frame, area, palette, session),
        }
    }

    fn render_overview(
        &self,
        frame: &mut Frame,
        area: Rect,
        palette: &Palette,
        session: &WizardSession,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // step header
                Constraint::Length(3), // description input
                Constraint::Length(3), // schema row (attached name or prompt)
                Constraint::Length(2), // next hint
                Constraint::Min(0),
            ])
            .split(area);

        let header = Line::from(Span::styled(
            "Step 1 of 2 — Project Overview",
            Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(header), chunks[0]);

        self.description.render(frame, chunks[1], palette);

        if self.attaching {
            self.schema.render(frame, chunks[2], palette);
        } else {
            let schema_line = match &session.fields().schema_file {
                Some(name) => Line::from(vec![
                    Span::styled("Schema: ", Style::default().fg(palette.muted)),
                    Span::styled(name.clone(), Style::default().fg(palette.success)),
                    Span::styled("  (Ctrl+D to remove)", Style::default().fg(palette.muted)),
                ]),
                None => Line::from(Span::styled(
                    "No schema attached  (Ctrl+A to attach one)",
                    Style::default().fg(palette.muted),
                )),
            };
            frame.render_widget(
                Paragraph::new(schema_line).block(Block::default().borders(Borders::ALL)),
                chunks[2],
            );
        }

        let next = if session.can_advance() {
            Line::from(Span::styled(
                "Enter: continue to stack configuration →",
                Style::default().fg(palette.primary),
            ))
        } else {
            Line::from(Span::styled(
                "Describe your project or attach a schema to continue",
                Style::default().fg(palette.disabled),
            ))
        };
        frame.render_widget(Paragraph::new(next), chunks[3]);
    }

    fn render_stack(
        &self,
        frame: &mut Frame,
        area: Rect,
        palette: &Palette,
        session: &WizardSession,
    ) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([Constraint::Length(44), Constraint::Min(20)])
            .split(area);

        self.render_options(frame, columns[0], palette, session);
        self.render_result(frame, columns[1], palette, session);
    }

    fn render_options(
        &self,
        frame: &mut Frame,
        area: Rect,
        palette: &Palette,
        session: &WizardSession,
    ) {
        let mut lines = vec![
            Line::from(Span::styled(
                "Step 2 of 2 — Stack Configuration",
                Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        let fields = session.fields();
        let mut index = 0usize;

        lines.push(section_header("Language", palette));
        for language in Language::all() {
            let marker = if fields.language == *language { "(•)" } else { "( )" };
            lines.push(self.option_line(
                index,
                marker,
                language.label(),
                language.is_available(),
                palette,
            ));
            index += 1;
        }

        lines.push(Line::from(""));
        lines.push(section_header("Database", palette));
        for database in Database::all() {
            let marker = if fields.database == *database { "(•)" } else { "( )" };
            lines.push(self.option_line(
                index,
                marker,
                database.label(),
                database.is_available(),
                palette,
            ));
            index += 1;
        }

        lines.push(Line::from(""));
        lines.push(section_header("Features", palette));
        for feature in FEATURES {
            let marker = if fields.selected_features.contains(feature.id) {
                "[x]"
            } else {
                "[ ]"
            };
            lines.push(self.option_line(index, marker, feature.label, feature.available, palette));
            index += 1;
        }

        lines.push(Line::from(""));
        lines.push(self.generate_line(index, palette, session));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn option_line(
        &self,
        index: usize,
        marker: &str,
        label: &str,
        available: bool,
        palette: &Palette,
    ) -> Line<'static> {
        let selected = self.cursor == index;

        let mut style = if available {
            Style::default().fg(palette.text)
        } else {
            Style::default().fg(palette.disabled)
        };
        if selected {
            style = style.add_modifier(Modifier::REVERSED);
        }

        let suffix = if available { "" } else { "  (coming soon)" };
        Line::from(Span::styled(format!(" {} {}{}", marker, label, suffix), style))
    }

    fn generate_line(&self, index: usize, palette: &Palette, session: &WizardSession) -> Line<'static> {
        let selected = self.cursor == index;

        let (text, mut style) = if session.is_generating() {
            (
                "  Generating…  ".to_string(),
                Style::default().fg(palette.disabled),
            )
        } else {
            (
                "  Generate Backend  ".to_string(),
                Style::default()
                    .fg(palette.background)
                    .bg(palette.primary)
                    .add_modifier(Modifier::BOLD),
            )
        };
        if selected && !session.is_generating() {
            style = style.bg(palette.accent);
        }

        Line::from(Span::styled(text, style))
    }

    fn render_result(
        &self,
        frame: &mut Frame,
        area: Rect,
        palette: &Palette,
        session: &WizardSession,
    ) {
        let (title, lines) = match session.submission() {
            SubmissionState::Idle => (
                "Generation",
                vec![Line::from(Span::styled(
                    "Configure your stack, then select Generate Backend.",
                    Style::default().fg(palette.muted),
                ))],
            ),
            SubmissionState::Pending => (
                "Generation",
                vec![Line::from(Span::styled(
                    "⏳ Generating your backend…",
                    Style::default().fg(palette.accent),
                ))],
            ),
            SubmissionState::Complete(report) => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        "✓ Generation complete",
                        Style::default().fg(palette.success).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                ];
                for text in report.summary.lines() {
                    lines.push(Line::from(Span::styled(
                        text.to_string(),
                        Style::default().fg(palette.text),
                    )));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Files:",
                    Style::default().fg(palette.primary),
                )));
                for file in &report.files {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", file),
                        Style::default().fg(palette.text),
                    )));
                }
                ("Result", lines)
            }
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(title);
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }
}

fn section_header(text: &str, palette: &Palette) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(palette.muted).add_modifier(Modifier::BOLD),
    ))
}

impl Default for WizardView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(view: &mut WizardView, session: &mut WizardSession, s: &str) {
        for c in s.chars() {
            view.handle_key(key(KeyCode::Char(c)), session);
        }
    }

    #[test]
    fn test_typing_syncs_description() {
        let mut view = WizardView::new();
        let mut session = WizardSession::new();

        type_str(&mut view, &mut session, "A chat API");
        assert_eq!(session.fields().description, "A chat API");
    }

    #[test]
    fn test_enter_advances_only_when_guard_holds() {
        let mut view = WizardView::new();
        let mut session = WizardSession::new();

        view.handle_key(key(KeyCode::Enter), &mut session);
        assert_eq!(session.step(), WizardStep::Overview);

        type_str(&mut view, &mut session, "x");
        view.handle_key(key(KeyCode::Enter), &mut session);
        assert_eq!(session.step(), WizardStep::StackConfig);
    }

    #[test]
    fn test_attach_schema_flow() {
        let mut view = WizardView::new();
        let mut session = WizardSession::new();

        view.handle_key(ctrl('a'), &mut session);
        type_str(&mut view, &mut session, "schema.sql");
        view.handle_key(key(KeyCode::Enter), &mut session);

        assert_eq!(session.fields().schema_file.as_deref(), Some("schema.sql"));
        // Description stayed untouched while attaching.
        assert!(session.fields().description.is_empty());

        view.handle_key(ctrl('d'), &mut session);
        assert!(session.fields().schema_file.is_none());
    }

    #[test]
    fn test_attach_cancel_records_nothing() {
        let mut view = WizardView::new();
        let mut session = WizardSession::new();

        view.handle_key(ctrl('a'), &mut session);
        type_str(&mut view, &mut session, "sch");
        view.handle_key(key(KeyCode::Esc), &mut session);

        assert!(session.fields().schema_file.is_none());
    }

    #[test]
    fn test_stack_cursor_selects_and_toggles() {
        let mut view = WizardView::new();
        let mut session = WizardSession::new();
        type_str(&mut view, &mut session, "x");
        view.handle_key(key(KeyCode::Enter), &mut session);

        // First feature row sits after 3 languages + 3 databases.
        for _ in 0..6 {
            view.handle_key(key(KeyCode::Down), &mut session);
        }
        view.handle_key(key(KeyCode::Char(' ')), &mut session);
        assert!(session.fields().selected_features.contains("auth"));

        view.handle_key(key(KeyCode::Char(' ')), &mut session);
        assert!(!session.fields().selected_features.contains("auth"));
    }

    #[test]
    fn test_generate_row_emits_action() {
        let mut view = WizardView::new();
        let mut session = WizardSession::new();
        type_str(&mut view, &mut session, "x");
        view.handle_key(key(KeyCode::Enter), &mut session);

        let last = rows().len() - 1;
        for _ in 0..last {
            view.handle_key(key(KeyCode::Down), &mut session);
        }

        assert_eq!(
            view.handle_key(key(KeyCode::Enter), &mut session),
            WizardViewAction::Generate
        );
    }

    #[test]
    fn test_esc_goes_back_then_exits() {
        let mut view = WizardView::new();
        let mut session = WizardSession::new();
        type_str(&mut view, &mut session, "x");
        view.handle_key(key(KeyCode::Enter), &mut session);

        assert_eq!(
            view.handle_key(key(KeyCode::Esc), &mut session),
            WizardViewAction::None
        );
        assert_eq!(session.step(), WizardStep::Overview);

        assert_eq!(
            view.handle_key(key(KeyCode::Esc), &mut session),
            WizardViewAction::Exit
        );
    }
}
