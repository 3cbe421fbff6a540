// UI module for techradar-tui
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::{App, AppScreen};
use ratatui::style::Color;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    match app.screen {
        AppScreen::Radar => screens::radar::render_radar_screen(app, f),
        AppScreen::Blips => screens::blips::render_blips_view(app, f),
        AppScreen::Help => {
            let area = f.area();
            screens::help::render_help(f, area);
        }
    }
}

/// Maps the engine's `#rrggbb` colors onto terminal RGB, falling back to
/// gray for anything it can't parse.
pub fn hex_color(hex: &str) -> Color {
    let Some(digits) = hex.strip_prefix('#') else {
        return Color::Gray;
    };
    if digits.len() != 6 {
        return Color::Gray;
    }
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
    };
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Gray,
    }
}

#[cfg(test)]
mod tests {
    use super::hex_color;
    use ratatui::style::Color;

    #[test]
    fn parses_engine_palette_colors() {
        assert_eq!(hex_color("#f47560"), Color::Rgb(0xf4, 0x75, 0x60));
    }

    #[test]
    fn malformed_colors_fall_back_to_gray() {
        assert_eq!(hex_color("f47560"), Color::Gray);
        assert_eq!(hex_color("#f475"), Color::Gray);
        assert_eq!(hex_color("#zzzzzz"), Color::Gray);
    }
}
