use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn render_help(f: &mut Frame<'_>, area: Rect) {
    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let key = |name: &'static str, description: &'static str| {
        TextLine::from(vec![
            Span::styled(
                format!("  {name}"),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" - {description}"), Style::default()),
        ])
    };

    let help_text = vec![
        TextLine::from(Span::styled(
            "Tech Radar Viewer",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(
            "Blips are packed into their sector/ring cells by simulated annealing; \
             every re-pack draws a fresh random layout with no two blips overlapping \
             where the cell allows it.",
        ),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        key("F1 / ?", "Toggle this help screen"),
        key("Esc", "Back to the radar"),
        key("l", "Toggle the blip table"),
        key("r", "Re-pack the layout with a fresh seed"),
        key("Space", "Pause or resume the sweep"),
        key("Up/Down", "Select the previous/next blip"),
        key("PgUp/PgDn", "Jump five rows"),
        key("Home/End", "First/last blip"),
        key("q", "Quit"),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Radar shape:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        TextLine::from("  Sectors and rings come from RADAR_SECTORS / RADAR_RINGS (or"),
        TextLine::from("  --sectors / --rings), rings listed innermost first. The seed"),
        TextLine::from("  for a reproducible layout comes from --seed."),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Press Esc to close this help screen",
            Style::default().fg(Color::Yellow),
        )),
    ];

    let help_paragraph = Paragraph::new(Text::from(help_text))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, area);
}
