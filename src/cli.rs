use crate::config::ColorScheme;
use crate::profile::GITHUB_USERS_API;
use crate::selection::BrushCorners;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "locmeta")]
#[command(about = "Commit history analytics over a line-level code export")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, global = true, default_value = "loc.csv", help = "Line export CSV (path or http(s) URL)")]
    pub data: String,

    #[arg(long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,

    #[arg(long, global = true, help = "Show a spinner while loading data")]
    pub progress: bool,
}

/// View filters shared by the commands that render a frame.
#[derive(Args, Clone, Default)]
pub struct ViewArgs {
    #[arg(long, help = "Only commits at or before this instant (RFC3339 or YYYY-MM-DD)")]
    pub until: Option<String>,

    #[arg(long, help = "Brush rectangle in plot pixels: x0,y0,x1,y1")]
    pub brush: Option<BrushCorners>,

    #[arg(long, help = "Time slider position, 0-100")]
    pub slider: Option<f64>,

    #[arg(long, help = "Filter by commit id, author or file")]
    pub search: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summary statistics for the whole dataset
    Stats {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Per-commit aggregates in time order
    Commits {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Only commits at or before this instant")]
        until: Option<String>,
    },
    /// Language breakdown of the current selection
    Breakdown {
        #[command(flatten)]
        view: ViewArgs,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Render the scatter plot, breakdown and file strip to SVG
    Plot {
        #[command(flatten)]
        view: ViewArgs,

        #[arg(long, help = "Commit id to show as hovered")]
        hover: Option<String>,

        #[arg(long, value_enum, help = "Colour scheme (defaults to the configured one)")]
        theme: Option<ColorScheme>,

        #[arg(short, long, help = "Output file (stdout when omitted)")]
        out: Option<PathBuf>,
    },
    /// The scroll narrative, one step per commit
    Story {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Files touched by the visible commits
    Files {
        #[command(flatten)]
        view: ViewArgs,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Interactive explorer in the terminal
    #[command(alias = "tui", alias = "ui")]
    Explore,
    /// Project list with per-year pie
    Projects {
        #[arg(long, default_value = "projects.json", help = "Project list JSON (path or URL)")]
        source: String,

        #[arg(long, help = "Filter titles containing this text")]
        query: Option<String>,

        #[arg(long, help = "Only projects from this year")]
        year: Option<String>,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Public GitHub profile counters
    Profile {
        username: String,

        #[arg(long, default_value = GITHUB_USERS_API, help = "Users endpoint (URL or local directory)")]
        api: String,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Show or persist the colour scheme
    Theme {
        #[arg(value_enum)]
        scheme: Option<ColorScheme>,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        use crate::commands;
        match self.command {
            Commands::Stats { json } => commands::stats(&self.common, json),
            Commands::Commits { json, ndjson, until } => {
                commands::commits(&self.common, until.as_deref(), json, ndjson)
            }
            Commands::Breakdown { view, json } => commands::breakdown(&self.common, &view, json),
            Commands::Plot {
                view,
                hover,
                theme,
                out,
            } => commands::plot(&self.common, &view, hover, theme, out.as_deref()),
            Commands::Story { json } => commands::story(&self.common, json),
            Commands::Files { view, json, ndjson } => {
                commands::files(&self.common, &view, json, ndjson)
            }
            Commands::Explore => commands::explore(&self.common),
            Commands::Projects {
                source,
                query,
                year,
                json,
            } => commands::projects(&source, query.as_deref(), year.as_deref(), json),
            Commands::Profile {
                username,
                api,
                json,
            } => commands::profile(&username, &api, json),
            Commands::Theme { scheme } => commands::theme(&self.common, scheme),
        }
    }
}
