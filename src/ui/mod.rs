pub mod app;
pub mod input;
pub mod landing;
pub mod settings_view;
pub mod theme;
pub mod wizard_view;

pub use app::{App, Screen};
pub use input::TextInput;
pub use landing::LandingView;
pub use settings_view::SettingsView;
pub use theme::Palette;
pub use wizard_view::WizardView;
