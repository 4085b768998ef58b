use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::centered_rect;

fn section(title: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )])
}

/// Draw the modal help overlay describing selection, story and shortcuts.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(70, 80, area);

    f.render_widget(Clear, help_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "locmeta - Help",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        section("Selection:"),
        Line::from("  Mouse drag  Brush a rectangle on the plot"),
        Line::from("  Esc         Clear the brush"),
        Line::from(""),
        section("Story:"),
        Line::from("  j/k or ↓/↑ Next / previous commit in the story"),
        Line::from("  Mouse wheel Scroll the story"),
        Line::from("  g/G         First / last step"),
        Line::from(""),
        section("Filters:"),
        Line::from("  /           Search by commit, author or file"),
        Line::from("  [ / ]       Move the time slider"),
        Line::from("  0           Reset the slider"),
        Line::from(""),
        section("Details:"),
        Line::from("  ←/→, mouse  Hover a commit"),
        Line::from("  c           Copy the commit URL"),
        Line::from(""),
        section("General:"),
        Line::from("  t           Cycle colour scheme (saved)"),
        Line::from("  h, F1       Toggle this help"),
        Line::from("  q           Quit application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press 'h' or 'Esc' to close this help",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_paragraph, help_area);
}
