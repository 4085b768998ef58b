use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use super::state::{ExplorerState, SLIDER_STEP};

mod actions;

use actions::*;

/// Handle a keyboard event, mutating explorer state and returning `true` if the loop should exit.
pub fn handle_key_events(key_event: KeyEvent, state: &mut ExplorerState) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    if state.show_help {
        if matches!(key_event.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::F(1)) {
            state.show_help = false;
        } else if key_event.code == KeyCode::Char('q') {
            return true;
        }
        return false;
    }

    if state.search_mode {
        handle_search_input(key_event.code, state);
        return false;
    }

    match key_event.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = true,
        KeyCode::Char('/') => {
            state.search_mode = true;
            state.search_query = state.sync.state().filter.query.clone();
        }
        KeyCode::Down | KeyCode::Char('j') => state.step_story(1),
        KeyCode::Up | KeyCode::Char('k') => state.step_story(-1),
        KeyCode::Char('g') => state.step_story(-(state.story.len() as isize)),
        KeyCode::Char('G') => state.step_story(state.story.len() as isize),
        KeyCode::Char(']') => state.nudge_slider(SLIDER_STEP),
        KeyCode::Char('[') => state.nudge_slider(-SLIDER_STEP),
        KeyCode::Char('0') => state.nudge_slider(100.0),
        KeyCode::Left => state.cycle_hover(-1),
        KeyCode::Right => state.cycle_hover(1),
        KeyCode::Esc => state.clear_brush(),
        KeyCode::Char('c') => copy_focused_url(state),
        KeyCode::Char('t') => cycle_theme(state),
        _ => {}
    }

    false
}

/// Search keystrokes re-filter the view on every change.
fn handle_search_input(code: KeyCode, state: &mut ExplorerState) {
    match code {
        KeyCode::Esc => {
            state.search_mode = false;
            state.search_query.clear();
            state.push_search();
        }
        KeyCode::Enter => {
            state.search_mode = false;
        }
        KeyCode::Backspace => {
            state.search_query.pop();
            state.push_search();
        }
        KeyCode::Char(c) => {
            state.search_query.push(c);
            state.push_search();
        }
        _ => {}
    }
}

/// Drag on the plot brushes, movement hovers, the wheel scrolls the story.
pub fn handle_mouse_event(mouse_event: MouseEvent, state: &mut ExplorerState) {
    let at = state.cell_to_plot(mouse_event.column, mouse_event.row);
    match mouse_event.kind {
        MouseEventKind::ScrollUp => state.step_story(-1),
        MouseEventKind::ScrollDown => state.step_story(1),
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(at) = at {
                state.begin_brush(at);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(at) = at {
                state.drag_brush(at);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => state.end_brush(at),
        MouseEventKind::Moved => {
            if let Some(at) = at {
                state.hover_at(at);
            }
        }
        _ => {}
    }
}
