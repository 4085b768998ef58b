use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::draw::Palette;
use crate::tui::state::ExplorerState;

/// Mode, filters and the tooltip for the hovered commit.
pub fn draw_header(f: &mut Frame, area: Rect, state: &ExplorerState, palette: &Palette) {
    let frame = state.frame();
    let mut spans = vec![
        Span::styled(
            format!(" {} ", frame.mode.name()),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::raw(" "),
    ];

    let query = if state.search_mode {
        format!("/{}▏", state.search_query)
    } else if state.sync.state().filter.query.is_empty() {
        String::new()
    } else {
        format!("/{}", state.sync.state().filter.query)
    };
    if !query.is_empty() {
        spans.push(Span::styled(query, Style::default().fg(palette.accent)));
        spans.push(Span::raw("  "));
    }

    let slider = match frame.slider_max {
        Some(max) => format!("until {} ({:.0}%)", max.format("%b %-d %H:%M"), state.slider()),
        None => "all time".to_string(),
    };
    spans.push(Span::styled(slider, palette.muted()));

    if let Some(tip) = &frame.tooltip {
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(
            tip.id.clone(),
            Style::default().fg(palette.selected).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(
            " {} · {} {} · {} lines",
            tip.author, tip.date, tip.time, tip.lines_edited
        )));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(Span::styled("locmeta", palette.title()))
            .borders(Borders::ALL),
    );
    f.render_widget(header, area);
}

pub fn draw_footer(f: &mut Frame, area: Rect, status: Option<&str>, palette: &Palette) {
    let text = match status {
        Some(msg) => Span::styled(msg.to_string(), Style::default().fg(palette.accent)),
        None => Span::styled(
            "drag: brush  j/k: story  [ ]: slider  /: search  ←/→: hover  c: copy  t: theme  h: help  q: quit",
            palette.muted(),
        ),
    };
    f.render_widget(Paragraph::new(Line::from(text)), area);
}
