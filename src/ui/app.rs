use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::audit::ActivityLogger;
use crate::generator::client::GeneratorClient;
use crate::newsletter;
use crate::prefs::PreferenceStore;
use crate::ui::landing::{LandingAction, LandingView, SubscribeStatus};
use crate::ui::settings_view::{SettingsAction, SettingsView};
use crate::ui::theme::Palette;
use crate::ui::wizard_view::{WizardView, WizardViewAction};
use crate::wizard::session::WizardSession;

/// Which screen is currently routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Landing,
    Wizard,
    Settings,
}

impl Screen {
    fn breadcrumb(self) -> &'static str {
        match self {
            Screen::Landing => "Home",
            Screen::Wizard => "Home / New Project Wizard",
            Screen::Settings => "Home / Settings",
        }
    }
}

/// Main application state
pub struct App {
    prefs: PreferenceStore,
    session: WizardSession,
    generator: Box<dyn GeneratorClient>,
    logger: Option<ActivityLogger>,

    screen: Screen,
    landing: LandingView,
    wizard: WizardView,
    settings: SettingsView,

    should_quit: bool,
    error_message: Option<String>,
}

impl App {
    /// Create a new App over an injected preference store and generation
    /// backend. The store is consumed unloaded; `run` performs the load
    /// after the first frame.
    pub fn new(prefs: PreferenceStore, generator: Box<dyn GeneratorClient>) -> Self {
        Self {
            prefs,
            session: WizardSession::new(),
            generator,
            logger: ActivityLogger::new().ok(),
            screen: Screen::Landing,
            landing: LandingView::new(),
            wizard: WizardView::new(),
            settings: SettingsView::new(),
            should_quit: false,
            error_message: None,
        }
    }

    /// Run the application event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        // The first frame renders with defaults; preferences load right
        // after, so an initial default is never written over a persisted
        // value and the restored theme styles every subsequent frame.
        terminal.draw(|f| self.render(f))?;
        self.load_preferences();

        loop {
            terminal.draw(|f| self.render(f))?;

            // Poll for events with 100ms timeout for refresh
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key_event(key, terminal).await?;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn load_preferences(&mut self) {
        if let Err(e) = self.prefs.load() {
            self.error_message = Some(format!("Failed to persist early preference write: {}", e));
        }
        self.settings.sync_from(self.prefs.record());
    }

    /// Handle keyboard events
    async fn handle_key_event<B: Backend>(
        &mut self,
        key: KeyEvent,
        terminal: &mut Terminal<B>,
    ) -> io::Result<()> {
        // Only handle key press events (not release or repeat)
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // Clear error message on any key
        if self.error_message.is_some() {
            self.error_message = None;
            return Ok(());
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Ok(());
                }
                KeyCode::Char('t') => {
                    if let Err(e) = self.prefs.toggle_theme() {
                        self.error_message = Some(format!("Failed to persist theme: {}", e));
                    }
                    return Ok(());
                }
                KeyCode::Char('n') => {
                    self.new_project();
                    return Ok(());
                }
                KeyCode::Char('s') => {
                    self.settings.sync_from(self.prefs.record());
                    self.screen = Screen::Settings;
                    return Ok(());
                }
                _ => {}
            }
        }

        match self.screen {
            Screen::Landing => match self.landing.handle_key(key) {
                LandingAction::StartWizard => self.screen = Screen::Wizard,
                LandingAction::Subscribe(email) => {
                    self.submit_newsletter(terminal, &email).await?;
                }
                LandingAction::None => {}
            },
            Screen::Wizard => match self.wizard.handle_key(key, &mut self.session) {
                WizardViewAction::Generate => self.run_generation(terminal).await?,
                WizardViewAction::Exit => self.screen = Screen::Landing,
                WizardViewAction::None => {}
            },
            Screen::Settings => match self.settings.handle_key(key) {
                SettingsAction::Save(url) => self.save_settings(terminal, &url).await?,
                SettingsAction::Close => self.screen = Screen::Wizard,
                SettingsAction::None => {}
            },
        }

        Ok(())
    }

    /// The "new project" action: a fresh session at the canonical defaults.
    fn new_project(&mut self) {
        self.session.reset();
        self.wizard.reset();
        self.screen = Screen::Wizard;
    }

    async fn submit_newsletter<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        email: &str,
    ) -> io::Result<()> {
        if let Err(e) = newsletter::validate_email(email) {
            // The single field-level validation error in the app.
            self.landing.set_status(SubscribeStatus::Invalid(e.to_string()));
            return Ok(());
        }

        self.landing.set_status(SubscribeStatus::Submitting);
        terminal.draw(|f| self.render(f))?;

        match newsletter::subscribe(email).await {
            Ok(()) => self.landing.mark_subscribed(),
            Err(e) => self.landing.set_status(SubscribeStatus::Invalid(e.to_string())),
        }

        Ok(())
    }

    async fn run_generation<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        // Re-entrancy guard: a pending submission yields no spec.
        let Some(spec) = self.session.begin_submission() else {
            return Ok(());
        };

        if let Some(logger) = &self.logger {
            let _ = logger.log_generation(&spec);
        }

        // Show the pending state before awaiting the simulated backend.
        terminal.draw(|f| self.render(f))?;

        match self.generator.generate(&spec).await {
            Ok(report) => self.session.complete_submission(report),
            Err(e) => {
                self.session.abort_submission();
                self.error_message = Some(format!("Generation failed: {}", e));
            }
        }

        Ok(())
    }

    async fn save_settings<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        url: &str,
    ) -> io::Result<()> {
        self.settings.set_saving(true);
        terminal.draw(|f| self.render(f))?;

        let result = self.prefs.save_api_base_url_delayed(url).await;
        self.settings.set_saving(false);

        match result {
            Ok(()) => {
                self.settings.mark_saved();
                if let Some(logger) = &self.logger {
                    let _ = logger.log_settings_save(url);
                }
            }
            Err(e) => {
                self.error_message = Some(format!("Failed to save settings: {}", e));
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        // Clear the entire frame to prevent artifacts
        frame.render_widget(ratatui::widgets::Clear, frame.area());

        let palette = Palette::for_theme(self.prefs.theme());
        frame.render_widget(
            Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
            frame.area(),
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(5),    // Screen content
                Constraint::Length(1), // Status
            ])
            .split(frame.area());

        let title = format!(
            "Core-X Architect — {}  [{}]",
            self.screen.breadcrumb(),
            self.prefs.theme().as_str()
        );
        let title_block = Block::default()
            .title(title)
            .title_alignment(ratatui::layout::Alignment::Left)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border));
        frame.render_widget(title_block, chunks[0]);

        match self.screen {
            Screen::Landing => self.landing.render(frame, chunks[1], &palette),
            Screen::Wizard => self.wizard.render(frame, chunks[1], &palette, &self.session),
            Screen::Settings => {
                self.settings
                    .render(frame, chunks[1], &palette, self.prefs.theme())
            }
        }

        if let Some(ref error) = self.error_message {
            frame.render_widget(
                Paragraph::new(format!("Error: {} | Press any key", error))
                    .style(Style::default().fg(palette.error)),
                chunks[2],
            );
            return;
        }

        let status_text = match self.screen {
            Screen::Landing => {
                "Tab: focus | Enter: select | Ctrl+N: new project | Ctrl+S: settings | Ctrl+T: theme | Ctrl+Q: quit"
            }
            Screen::Wizard => {
                if self.session.is_generating() {
                    "Generating… please wait"
                } else {
                    "↑/↓: move | Enter/Space: select | Esc: back | Ctrl+S: settings | Ctrl+T: theme | Ctrl+Q: quit"
                }
            }
            Screen::Settings => {
                if self.settings.is_saving() {
                    "Saving… please wait"
                } else {
                    "Enter: save | Esc: back | Ctrl+T: theme | Ctrl+Q: quit"
                }
            }
        };
        frame.render_widget(
            Paragraph::new(status_text).style(Style::default().fg(palette.muted)),
            chunks[2],
        );
    }

    /// Check if the app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
