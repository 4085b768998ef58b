use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, error};

use super::draw::palette;
use super::events::{handle_key_events, handle_mouse_event};
use super::layout::explorer_layout;
use super::state::ExplorerState;
use super::views::{
    draw_breakdown_panel, draw_files_panel, draw_footer, draw_header, draw_help_overlay,
    draw_plot, draw_story_panel,
};
use crate::config::MetaConfig;
use crate::error::Result;
use crate::sync::Dataset;

pub fn run(dataset: Dataset, config: MetaConfig, config_path: Option<PathBuf>) -> Result<()> {
    let mut state = ExplorerState::new(dataset, config.theme, config_path);

    enable_raw_mode()?;
    execute!(io::stdout(), EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    let outcome = event_loop(&mut terminal, &mut state);

    terminal.clear()?;
    execute!(io::stdout(), DisableMouseCapture)?;
    disable_raw_mode()?;
    outcome
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut ExplorerState,
) -> Result<()> {
    loop {
        let pal = palette(state.scheme);
        let draw_result = terminal.draw(|f| {
            let size = f.size();
            let layout = explorer_layout(size);

            draw_header(f, layout.header, state, &pal);
            state.plot_rect = draw_plot(f, layout.plot, state, &pal);
            draw_breakdown_panel(f, layout.breakdown, state, &pal);
            draw_files_panel(f, layout.files, state, &pal);
            draw_story_panel(f, layout.story, state, &pal);
            let status = state.status().map(str::to_string);
            draw_footer(f, layout.footer, status.as_deref(), &pal);

            if state.show_help {
                draw_help_overlay(f, size);
            }
        });

        if let Err(e) = draw_result {
            error!(error = %e, "draw failed");
        }

        if poll(Duration::from_millis(200))? {
            match read()? {
                Event::Key(key_event) => {
                    if handle_key_events(key_event, state) {
                        break;
                    }
                }
                Event::Mouse(mouse_event) => handle_mouse_event(mouse_event, state),
                Event::Resize(w, h) => debug!(w, h, "resize"),
                _ => {}
            }
        }
    }
    Ok(())
}
