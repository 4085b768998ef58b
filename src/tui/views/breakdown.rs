use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::draw::{hex_color, proportion_bar, Palette};
use crate::tui::state::ExplorerState;
use crate::util::format_percent;

pub fn draw_breakdown_panel(f: &mut Frame, area: Rect, state: &ExplorerState, palette: &Palette) {
    let frame = state.frame();
    let mut lines = vec![Line::from(Span::styled(
        frame.selection_label.clone(),
        palette.title(),
    ))];
    if frame.breakdown_is_fallback && !frame.breakdown.is_empty() {
        lines.push(Line::from(Span::styled("all commits", palette.muted())));
    }

    let bar_width = usize::from(area.width.saturating_sub(26)).max(4);
    for (share, swatch) in frame.breakdown.languages.iter().zip(&frame.legend) {
        let color = hex_color(&swatch.color);
        lines.push(Line::from(vec![
            Span::styled("■ ", Style::default().fg(color)),
            Span::raw(format!("{:<6}", share.language)),
            Span::raw(format!("{:>5} lines {:>6} ", share.count, format_percent(share.proportion))),
            Span::styled(proportion_bar(share.proportion, bar_width), Style::default().fg(color)),
        ]));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled("Languages", palette.title()))
            .borders(Borders::ALL),
    );
    f.render_widget(panel, area);
}
