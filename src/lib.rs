pub mod aggregate;
pub mod breakdown;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod logging;
pub mod model;
pub mod output;
pub mod profile;
pub mod projection;
pub mod projects;
pub mod selection;
pub mod story;
pub mod svg;
pub mod sync;
pub mod tui;
pub mod util;

#[cfg(test)]
mod test_support;
