use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use corex::generator::SimulatedGenerator;
use corex::prefs::{FileStorage, PreferenceStore};
use corex::ui::App;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;

#[tokio::main]
async fn main() -> io::Result<()> {
    // Resolve the preference file location
    let storage = match FileStorage::default_path() {
        Ok(path) => FileStorage::new(path),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let prefs = PreferenceStore::new(Box::new(storage));

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(prefs, Box::new(SimulatedGenerator::new()));
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}
