use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line as TextLine;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::state::CANVAS_SIZE;
use crate::app::App;
use crate::ui::hex_color;

// Room outside the frame for sector labels.
const CANVAS_MARGIN: f64 = 12.0;
const LABEL_OFFSET: f64 = 5.0;

/// The layout engine works in screen coordinates (y down); the canvas is y
/// up.
fn flip(y: f64) -> f64 {
    CANVAS_SIZE - y
}

pub fn render_packed_radar(app: &App, f: &mut Frame<'_>, area: Rect) {
    if area.width < 8 || area.height < 6 {
        return;
    }

    let block = Block::default()
        .title("Tech Radar")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (Some(frame), Some(layout)) = (app.frame.as_ref(), app.layout.as_ref()) else {
        let paragraph = Paragraph::new("No layout available")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, inner);
        return;
    };

    let size = inner.width.min(inner.height * 2);
    let square = Rect {
        x: inner.x + (inner.width - size) / 2,
        y: inner.y + (inner.height - size / 2) / 2,
        width: size,
        height: size / 2,
    };

    let center_x = frame.center_x;
    let center_y = flip(frame.center_y);
    let max_radius = frame.radius;

    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                // Ring boundaries, innermost first; radii[0] is the center.
                for &ring_radius in frame.radii.iter().skip(1) {
                    ctx.draw(&Circle {
                        x: center_x,
                        y: center_y,
                        radius: ring_radius,
                        color: Color::DarkGray,
                    });
                }

                // Sector boundary lines; a single sector has no boundary.
                if frame.angles.len() > 1 {
                    for &angle in &frame.angles {
                        ctx.draw(&CanvasLine {
                            x1: center_x,
                            y1: center_y,
                            x2: angle.cos().mul_add(max_radius, center_x),
                            y2: center_y - angle.sin() * max_radius,
                            color: Color::DarkGray,
                        });
                    }
                }

                // Sector labels sit on the bisectors, just outside the frame.
                for (label, &angle) in app.settings.sectors.iter().zip(&frame.label_angles) {
                    let label_radius = max_radius + LABEL_OFFSET;
                    let x = angle.cos().mul_add(label_radius, center_x);
                    let y = center_y - angle.sin() * label_radius;
                    ctx.print(
                        x,
                        y,
                        TextLine::styled(label.clone(), Style::default().fg(Color::Gray)),
                    );
                }

                // Radar sweep.
                let sweep_angle = app.animation_counter;
                ctx.draw(&CanvasLine {
                    x1: center_x,
                    y1: center_y,
                    x2: sweep_angle.cos().mul_add(max_radius, center_x),
                    y2: center_y - sweep_angle.sin() * max_radius,
                    color: Color::Cyan,
                });
                let ghost_angle = sweep_angle - std::f64::consts::PI / 18.0;
                ctx.draw(&CanvasLine {
                    x1: center_x,
                    y1: center_y,
                    x2: ghost_angle.cos().mul_add(max_radius * 0.92, center_x),
                    y2: center_y - ghost_angle.sin() * (max_radius * 0.92),
                    color: Color::DarkGray,
                });

                // Packed blips at engine positions and colors.
                for blip in &layout.blips {
                    ctx.draw(&Circle {
                        x: blip.x,
                        y: flip(blip.y),
                        radius: blip.radius,
                        color: hex_color(&blip.color),
                    });
                }

                if let Some(selected) = layout.blips.get(app.selected_index) {
                    ctx.draw(&Circle {
                        x: selected.x,
                        y: flip(selected.y),
                        radius: selected.radius * 1.8,
                        color: Color::White,
                    });
                }
            })
            .x_bounds([-CANVAS_MARGIN, CANVAS_SIZE + CANVAS_MARGIN])
            .y_bounds([-CANVAS_MARGIN, CANVAS_SIZE + CANVAS_MARGIN]),
        square,
    );
}
