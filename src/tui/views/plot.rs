use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Rectangle};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::sync::Mode;
use crate::tui::draw::Palette;
use crate::tui::state::ExplorerState;

/// Draw the scatter plot and return the inner area used for mouse mapping.
/// Canvas y grows upward, plot pixels grow downward, so y is flipped.
pub fn draw_plot(f: &mut Frame, area: Rect, state: &ExplorerState, palette: &Palette) -> Rect {
    let plot_area = *state.sync.dataset().area();
    let frame = state.frame();
    let flip = |y: f64| plot_area.height - y;

    let title = format!(
        "Commits by time of day ({} shown, {})",
        frame.visible_count, frame.selection_label
    );
    let block = Block::default()
        .title(Span::styled(title, palette.title()))
        .borders(Borders::ALL);
    let inner = block.inner(area);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, plot_area.width])
        .y_bounds([0.0, plot_area.height])
        .paint(|ctx| {
            for tick in &frame.y_ticks {
                ctx.draw(&CanvasLine {
                    x1: plot_area.left(),
                    y1: flip(tick.position),
                    x2: plot_area.right(),
                    y2: flip(tick.position),
                    color: palette.grid,
                });
            }
            ctx.layer();

            for p in &frame.points {
                let color = if p.hovered {
                    palette.hovered
                } else if p.selected {
                    palette.selected
                } else {
                    palette.dot
                };
                ctx.draw(&Circle {
                    x: p.cx,
                    y: flip(p.cy),
                    radius: p.r,
                    color,
                });
            }

            if let Mode::Brush { rect: Some(rect) } = frame.mode {
                ctx.layer();
                ctx.draw(&Rectangle {
                    x: rect.x0,
                    y: flip(rect.y1),
                    width: rect.x1 - rect.x0,
                    height: rect.y1 - rect.y0,
                    color: palette.brush,
                });
            }

            for tick in frame.y_ticks.iter().step_by(2) {
                ctx.print(
                    0.0,
                    flip(tick.position),
                    Span::styled(tick.label.clone(), Style::default().fg(palette.dim)),
                );
            }
            for tick in &frame.x_ticks {
                ctx.print(
                    tick.position,
                    0.0,
                    Span::styled(tick.label.clone(), Style::default().fg(palette.dim)),
                );
            }
        });

    f.render_widget(canvas, area);
    inner
}
