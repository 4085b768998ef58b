use crate::config::save_theme;

use super::super::state::ExplorerState;

fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())
}

/// Copy the hovered (or current story) commit URL, surfacing clipboard errors in status.
pub(super) fn copy_focused_url(state: &mut ExplorerState) {
    let Some(url) = state.focused_url() else {
        state.set_status("No commit URL to copy");
        return;
    };
    match copy_to_clipboard(&url) {
        Ok(()) => state.set_status(format!("Copied: {url}")),
        Err(err) => state.set_status(format!("Clipboard error: {err}")),
    }
}

/// Move to the next colour scheme and persist it.
pub(super) fn cycle_theme(state: &mut ExplorerState) {
    let next = state.scheme.next();
    state.scheme = next;
    match save_theme(state.config_path.as_deref(), next) {
        Ok(_) => state.set_status(format!("Theme: {}", next.label())),
        Err(err) => state.set_status(format!("Theme: {} (not saved: {err})", next.label())),
    }
}
