use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::App;
use crate::ui::hex_color;

pub fn render_blips_view(app: &App, f: &mut Frame<'_>) {
    let area = f.area();

    let Some(layout) = app.layout.as_ref().filter(|layout| !layout.blips.is_empty()) else {
        let block = Block::default()
            .title("Blips Table")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let paragraph = Paragraph::new("No blips found.")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    };

    let header = Row::new(vec![
        Cell::from("ID"),
        Cell::from("Name"),
        Cell::from("Sector"),
        Cell::from("Ring"),
        Cell::from("Added"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let total_rows = layout.blips.len();
    let max_visible_rows = area.height.saturating_sub(7) as usize;

    let mut scroll_offset = 0;
    if total_rows > max_visible_rows {
        if app.selected_index >= max_visible_rows + scroll_offset {
            scroll_offset = app.selected_index.saturating_sub(max_visible_rows) + 1;
        } else if app.selected_index < scroll_offset {
            scroll_offset = app.selected_index;
        }
    }

    let rows = layout
        .blips
        .iter()
        .zip(&app.visible_records)
        .enumerate()
        .skip(scroll_offset)
        .take(max_visible_rows)
        .filter_map(|(i, (packed, &record_index))| {
            let record = app.blips.get(record_index)?;
            let is_selected = i == app.selected_index;
            let style = if is_selected {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(hex_color(&packed.color))
            };

            Some(
                Row::new(vec![
                    Cell::from(record.id.to_string()),
                    Cell::from(record.name.clone()),
                    Cell::from(record.sector.clone().unwrap_or_default()),
                    Cell::from(record.ring.clone().unwrap_or_default()),
                    Cell::from(record.created.clone()),
                ])
                .style(style),
            )
        });

    let widths = [
        Constraint::Length(4),
        Constraint::Length(22),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    "Blips Table ({} of {})",
                    app.selected_index + 1,
                    total_rows
                ))
                .borders(Borders::ALL),
        )
        .column_spacing(1);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    f.render_widget(table, chunks[0]);

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let help_text = vec![
        Span::styled("ESC", key_style),
        Span::raw(": Back to Radar   "),
        Span::styled("↑/↓", key_style),
        Span::raw(": Navigate   "),
        Span::styled("PgUp/PgDn", key_style),
        Span::raw(": Jump 5 rows   "),
        Span::styled("Home/End", key_style),
        Span::raw(": First/Last   "),
        Span::styled("q", key_style),
        Span::raw(": Quit"),
    ];

    let help_paragraph = Paragraph::new(TextLine::from(help_text))
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Center);

    f.render_widget(help_paragraph, chunks[1]);
}
