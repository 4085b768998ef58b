use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::draw::Palette;
use crate::tui::state::ExplorerState;

pub fn draw_story_panel(f: &mut Frame, area: Rect, state: &ExplorerState, palette: &Palette) {
    let title = match state.story_index {
        Some(i) => format!("Story {}/{}", i + 1, state.story.len()),
        None => format!("Story ({} steps, j/k to scroll)", state.story.len()),
    };
    let body = match state.current_step() {
        Some(step) => vec![Line::from(step.text.clone())],
        None => vec![Line::from(Span::styled(
            "Scroll to walk through the commits one at a time.",
            palette.muted(),
        ))],
    };

    let panel = Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(title, palette.title()))
                .borders(Borders::ALL),
        );
    f.render_widget(panel, area);
}
