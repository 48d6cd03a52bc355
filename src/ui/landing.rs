use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::input::TextInput;
use crate::ui::theme::Palette;

/// Outcome of a key event on the landing screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LandingAction {
    None,
    StartWizard,
    Subscribe(String),
}

/// Newsletter form status, rendered inline under the email field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubscribeStatus {
    #[default]
    Idle,
    Submitting,
    Subscribed,
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LandingFocus {
    #[default]
    Start,
    Email,
}

/// Landing screen: hero copy, feature cards and the newsletter form.
pub struct LandingView {
    email: TextInput,
    status: SubscribeStatus,
    focus: LandingFocus,
}

const FEATURE_CARDS: &[(&str, &str)] = &[
    (
        "Secure by Design",
        "OWASP-compliant code generation with input validation built-in.",
    ),
    (
        "Powered by Gemini",
        "Advanced AI that understands your schema and requirements.",
    ),
    (
        "Production Ready",
        "Clean, modular, documented code as a foundation for scale.",
    ),
];

impl LandingView {
    pub fn new() -> Self {
        Self {
            email: TextInput::new("Stay Updated", "Enter your email"),
            status: SubscribeStatus::Idle,
            focus: LandingFocus::Start,
        }
    }

    pub fn status(&self) -> &SubscribeStatus {
        &self.status
    }

    pub fn set_status(&mut self, status: SubscribeStatus) {
        self.status = status;
    }

    /// Record a successful subscription and reset the form.
    pub fn mark_subscribed(&mut self) {
        self.email.clear();
        self.status = SubscribeStatus::Subscribed;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> LandingAction {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    LandingFocus::Start => LandingFocus::Email,
                    LandingFocus::Email => LandingFocus::Start,
                };
                self.email.set_active(self.focus == LandingFocus::Email);
                LandingAction::None
            }
            KeyCode::Enter => match self.focus {
                LandingFocus::Start => LandingAction::StartWizard,
                LandingFocus::Email => LandingAction::Subscribe(self.email.value().to_string()),
            },
            _ => {
                if self.focus == LandingFocus::Email && self.email.handle_key(key) {
                    // Typing again after a failed attempt clears the message
                    if matches!(self.status, SubscribeStatus::Invalid(_)) {
                        self.status = SubscribeStatus::Idle;
                    }
                }
                LandingAction::None
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(5), // hero
                Constraint::Length(2), // start button
                Constraint::Length(8), // feature cards
                Constraint::Length(3), // email input
                Constraint::Length(2), // form status
                Constraint::Min(0),
            ])
            .split(area);

        self.render_hero(frame, chunks[0], palette);
        self.render_start(frame, chunks[1], palette);
        self.render_cards(frame, chunks[2], palette);
        self.email.render(frame, chunks[3], palette);
        self.render_status(frame, chunks[4], palette);
    }

    fn render_hero(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let lines = vec![
            Line::from(vec![
                Span::styled("Your AI ", Style::default().fg(palette.text).add_modifier(Modifier::BOLD)),
                Span::styled(
                    "Backend",
                    Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" Architect", Style::default().fg(palette.text).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Generate secure, production-ready backend code in seconds.",
                Style::default().fg(palette.muted),
            )),
            Line::from(Span::styled(
                "Stop wasting time on boilerplate and focus on business logic.",
                Style::default().fg(palette.muted),
            )),
        ];

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }

    fn render_start(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let style = if self.focus == LandingFocus::Start {
            Style::default()
                .fg(palette.background)
                .bg(palette.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.primary)
        };

        let button = Line::from(Span::styled("  Start Generating →  ", style));
        frame.render_widget(Paragraph::new(button).alignment(Alignment::Center), area);
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(area);

        for (i, (title, desc)) in FEATURE_CARDS.iter().enumerate() {
            let lines = vec![
                Line::from(Span::styled(
                    *title,
                    Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(*desc, Style::default().fg(palette.muted))),
            ];

            let card = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(ratatui::widgets::Wrap { trim: true });
            frame.render_widget(card, columns[i]);
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let line = match &self.status {
            SubscribeStatus::Idle => Line::from(Span::styled(
                "Join our newsletter for the latest Core-X updates.",
                Style::default().fg(palette.muted),
            )),
            SubscribeStatus::Submitting => Line::from(Span::styled(
                "Subscribing…",
                Style::default().fg(palette.accent),
            )),
            SubscribeStatus::Subscribed => Line::from(Span::styled(
                "Thanks for subscribing! We'll be in touch.",
                Style::default().fg(palette.success),
            )),
            SubscribeStatus::Invalid(message) => Line::from(Span::styled(
                message.clone(),
                Style::default().fg(palette.error),
            )),
        };

        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}

impl Default for LandingView {
    fn default() -> Self {
        Self::new()
    }
}
