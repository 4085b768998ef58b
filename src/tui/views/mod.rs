use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Cell;

mod breakdown;
mod files;
mod header;
mod help;
mod plot;
mod story;

pub use breakdown::draw_breakdown_panel;
pub use files::draw_files_panel;
pub use header::{draw_footer, draw_header};
pub use help::draw_help_overlay;
pub use plot::draw_plot;
pub use story::draw_story_panel;

/// Convenience helper to build a styled table header cell.
pub(crate) fn header_cell(text: &str, color: Color) -> Cell<'static> {
    Cell::from(text.to_string()).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

/// Truncate to `max` characters, keeping the tail of paths readable.
pub(crate) fn truncate_left(s: &str, max: usize) -> String {
    let count = s.chars().count();
    if count > max {
        let tail: String = s.chars().skip(count - max.saturating_sub(1)).collect();
        format!("…{tail}")
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_paths_keep_their_tail() {
        assert_eq!(truncate_left("src/main.ts", 20), "src/main.ts");
        assert_eq!(truncate_left("src/deeply/nested/file.rs", 8), "…file.rs");
    }
}
