use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::ui::hex_color;
use crate::ui::widgets::radar::render_packed_radar;

pub fn render_radar_screen(app: &App, f: &mut Frame<'_>) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Radar + sidebar
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_layout[0]);

    render_packed_radar(app, f, content[0]);
    render_sidebar(app, f, content[1]);
    render_status(app, f, main_layout[1]);
    render_shortcuts(f, main_layout[2]);
}

fn render_sidebar(app: &App, f: &mut Frame<'_>, area: ratatui::layout::Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(4)])
        .split(area);

    render_selected_blip(app, f, chunks[0]);
    render_sector_legend(app, f, chunks[1]);
}

fn render_selected_blip(app: &App, f: &mut Frame<'_>, area: ratatui::layout::Rect) {
    let block = Block::default()
        .title(" Selected ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let label_style = Style::default().fg(Color::Gray);
    let value_style = Style::default().fg(Color::Yellow);

    let lines = app.selected_record().map_or_else(
        || vec![TextLine::from(Span::styled("No blip selected", label_style))],
        |record| {
            vec![
                TextLine::from(vec![
                    Span::styled("Name: ", label_style),
                    Span::styled(
                        record.name.clone(),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                ]),
                TextLine::from(vec![
                    Span::styled("Sector: ", label_style),
                    Span::styled(
                        record.sector.clone().unwrap_or_else(|| "(none)".to_string()),
                        value_style,
                    ),
                ]),
                TextLine::from(vec![
                    Span::styled("Ring: ", label_style),
                    Span::styled(
                        record.ring.clone().unwrap_or_else(|| "(none)".to_string()),
                        value_style,
                    ),
                ]),
                TextLine::from(vec![
                    Span::styled("Added: ", label_style),
                    Span::styled(record.created.clone(), value_style),
                ]),
                TextLine::from(Span::raw(
                    record.description.clone().unwrap_or_default(),
                )),
            ]
        },
    );

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_sector_legend(app: &App, f: &mut Frame<'_>, area: ratatui::layout::Rect) {
    let block = Block::default()
        .title(" Sectors ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let lines: Vec<TextLine<'_>> = app
        .settings
        .sectors
        .iter()
        .map(|sector| {
            let count = app
                .visible_records
                .iter()
                .filter_map(|&index| app.blips.get(index))
                .filter(|record| record.sector.as_deref() == Some(sector.as_str()))
                .count();
            let swatch_color = sector_color(app, sector);

            TextLine::from(vec![
                Span::styled("● ", Style::default().fg(swatch_color)),
                Span::styled(sector.clone(), Style::default().fg(Color::White)),
                Span::styled(format!("  {count}"), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(Text::from(lines)).block(block);
    f.render_widget(paragraph, area);
}

/// Color of a sector's blips: the packed color of any blip in that sector.
fn sector_color(app: &App, sector: &str) -> Color {
    let Some(layout) = app.layout.as_ref() else {
        return Color::Gray;
    };
    layout
        .blips
        .iter()
        .zip(&app.visible_records)
        .find(|(_, &record_index)| {
            app.blips
                .get(record_index)
                .and_then(|record| record.sector.as_deref())
                == Some(sector)
        })
        .map_or(Color::Gray, |(blip, _)| hex_color(&blip.color))
}

fn render_status(app: &App, f: &mut Frame<'_>, area: ratatui::layout::Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let style = if app.status_message.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };
    let paragraph = Paragraph::new(Span::styled(app.status_message.clone(), style))
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: ratatui::layout::Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let hint_style = Style::default().fg(Color::Gray);

    let shortcuts = TextLine::from(vec![
        Span::styled("F1", key_style),
        Span::styled(": Help | ", hint_style),
        Span::styled("r", key_style),
        Span::styled(": Re-pack | ", hint_style),
        Span::styled("l", key_style),
        Span::styled(": Blip table | ", hint_style),
        Span::styled("↑/↓", key_style),
        Span::styled(": Select | ", hint_style),
        Span::styled("Space", key_style),
        Span::styled(": Pause sweep | ", hint_style),
        Span::styled("q", key_style),
        Span::styled(": Quit", hint_style),
    ]);

    let paragraph = Paragraph::new(shortcuts).alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
