// App module for techradar-tui
// Handles application state and input

pub mod animation;
pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, AppScreen};
