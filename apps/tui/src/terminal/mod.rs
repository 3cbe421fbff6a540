mod setup;

pub use setup::{cleanup_terminal, setup_terminal};
