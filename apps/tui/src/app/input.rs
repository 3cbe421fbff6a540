use crossterm::event::KeyCode;

use crate::app::state::{App, AppScreen};

/// One handler for every screen; the radar and blip-table screens share the
/// selection keys so the highlighted blip stays in sync between them.
pub fn handle_input(app: &mut App, code: KeyCode) {
    match app.screen {
        AppScreen::Help => handle_help_keys(app, code),
        AppScreen::Radar | AppScreen::Blips => handle_browse_keys(app, code),
    }
}

fn handle_help_keys(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') => app.screen = AppScreen::Radar,
        _ => {}
    }
}

fn handle_browse_keys(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::F(1) | KeyCode::Char('?') => app.screen = AppScreen::Help,
        KeyCode::Char('l') => {
            app.screen = if app.screen == AppScreen::Blips {
                AppScreen::Radar
            } else {
                AppScreen::Blips
            };
        }
        KeyCode::Esc => app.screen = AppScreen::Radar,
        KeyCode::Char('r') => app.reroll_layout(),
        KeyCode::Char(' ') => app.toggle_sweep(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.jump_backward(5),
        KeyCode::PageDown => app.jump_forward(5),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        _ => {}
    }
}
