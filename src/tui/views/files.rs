use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use super::{header_cell, truncate_left};
use crate::tui::draw::{hex_color, Palette};
use crate::tui::state::ExplorerState;

/// File strip: one row per file, one coloured block per line.
pub fn draw_files_panel(f: &mut Frame, area: Rect, state: &ExplorerState, palette: &Palette) {
    let frame = state.frame();
    let name_width = 18usize;
    let strip_width = usize::from(area.width.saturating_sub(name_width as u16 + 10));

    let rows: Vec<Row> = frame
        .files
        .iter()
        .map(|file| {
            let mut spans: Vec<Span> = file
                .swatches
                .iter()
                .take(strip_width)
                .map(|s| Span::styled("▪", Style::default().fg(hex_color(&s.color))))
                .collect();
            if file.swatches.len() > strip_width {
                spans.push(Span::styled("…", palette.muted()));
            }
            Row::new(vec![
                Cell::from(truncate_left(&file.name, name_width)),
                Cell::from(format!("{:>5}", file.lines)),
                Cell::from(Line::from(spans)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(name_width as u16),
            Constraint::Length(6),
            Constraint::Min(4),
        ],
    )
    .header(Row::new([
        header_cell("File", palette.accent),
        header_cell("Lines", palette.accent),
        header_cell("", palette.accent),
    ]))
    .block(
        Block::default()
            .title(Span::styled(
                format!("Files ({})", frame.files.len()),
                palette.title(),
            ))
            .borders(Borders::ALL),
    );
    f.render_widget(table, area);
}
