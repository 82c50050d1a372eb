pub mod app;
pub mod deck;
pub mod event;
pub mod input;
pub mod keymap;
pub mod layout;
pub mod navbar;
pub mod scroll;
pub mod surface;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use deck::Deck;
pub use surface::TerminalSurface;
pub use theme::{load_theme, Theme};
