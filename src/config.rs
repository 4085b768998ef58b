use crate::error::{MetaError, Result};
use crate::projection::{Margin, PlotArea};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The one persisted preference: which colour scheme to render with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
    #[default]
    Auto,
}

impl ColorScheme {
    /// Value for the CSS `color-scheme` property.
    pub fn css_value(&self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
            ColorScheme::Auto => "light dark",
        }
    }

    /// Spelling used in the config file.
    pub fn key(&self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
            ColorScheme::Auto => "auto",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColorScheme::Light => "Light",
            ColorScheme::Dark => "Dark",
            ColorScheme::Auto => "Automatic",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ColorScheme::Auto => ColorScheme::Light,
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Auto,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    #[serde(default)]
    pub theme: ColorScheme,
    #[serde(default)]
    pub plot: PlotConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

/// [plot] section: scatter plot geometry in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_margin_top")]
    pub margin_top: f64,
    #[serde(default = "default_margin_right")]
    pub margin_right: f64,
    #[serde(default = "default_margin_bottom")]
    pub margin_bottom: f64,
    #[serde(default = "default_margin_left")]
    pub margin_left: f64,
}

/// [site] section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Commit links are `{commit_url_base}/{id}`.
    #[serde(default)]
    pub commit_url_base: Option<String>,
}

fn default_width() -> f64 {
    1000.0
}

fn default_height() -> f64 {
    600.0
}

fn default_margin_top() -> f64 {
    10.0
}

fn default_margin_right() -> f64 {
    10.0
}

fn default_margin_bottom() -> f64 {
    30.0
}

fn default_margin_left() -> f64 {
    20.0
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin_top: default_margin_top(),
            margin_right: default_margin_right(),
            margin_bottom: default_margin_bottom(),
            margin_left: default_margin_left(),
        }
    }
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            theme: ColorScheme::default(),
            plot: PlotConfig::default(),
            site: SiteConfig::default(),
        }
    }
}

impl PlotConfig {
    pub fn area(&self) -> PlotArea {
        PlotArea::new(
            self.width,
            self.height,
            Margin {
                top: self.margin_top,
                right: self.margin_right,
                bottom: self.margin_bottom,
                left: self.margin_left,
            },
        )
    }
}

pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("locmeta").join("config.toml"))
}

fn read_table(path: &Path) -> Result<Option<toml::map::Map<String, toml::Value>>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    match content.parse::<toml::Value>()? {
        toml::Value::Table(t) => Ok(Some(t)),
        _ => Err(MetaError::Config(format!(
            "{}: top level must be a table",
            path.display()
        ))),
    }
}

/// Load config. Priority: `explicit` file > global `~/.config/locmeta/config.toml`
/// > built-in defaults. A broken global file is skipped with a warning; a broken
/// explicit file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<MetaConfig> {
    let global_table = match global_config_path() {
        Some(p) => read_table(&p).unwrap_or_else(|e| {
            warn!(path = %p.display(), error = %e, "ignoring unreadable global config");
            None
        }),
        None => None,
    };

    let explicit_table = match explicit {
        Some(p) => {
            let table = read_table(p)?;
            if table.is_none() {
                return Err(MetaError::Config(format!("{} not found", p.display())));
            }
            table
        }
        None => None,
    };

    let merged = match (global_table, explicit_table) {
        (Some(mut global), Some(local)) => {
            deep_merge(&mut global, local);
            toml::Value::Table(global)
        }
        (Some(global), None) => toml::Value::Table(global),
        (None, Some(local)) => toml::Value::Table(local),
        (None, None) => return Ok(MetaConfig::default()),
    };

    let config: MetaConfig = merged.try_into()?;
    debug!(?config, "config loaded");
    Ok(config)
}

/// Recursively merge `overlay` into `base`. Overlay values win.
fn deep_merge(
    base: &mut toml::map::Map<String, toml::Value>,
    overlay: toml::map::Map<String, toml::Value>,
) {
    for (key, value) in overlay {
        match (base.get_mut(&key), &value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(overlay_table)) => {
                deep_merge(base_table, overlay_table.clone());
            }
            _ => {
                base.insert(key, value);
            }
        }
    }
}

/// Persist the colour scheme, leaving every other key of the file untouched.
pub fn save_theme(explicit: Option<&Path>, scheme: ColorScheme) -> Result<PathBuf> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => global_config_path()
            .ok_or_else(|| MetaError::Config("could not determine config directory".into()))?,
    };
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let mut table = read_table(&path)?.unwrap_or_default();
    table.insert(
        "theme".to_string(),
        toml::Value::String(scheme.key().to_string()),
    );
    std::fs::write(&path, toml::to_string_pretty(&toml::Value::Table(table))?)?;
    debug!(path = %path.display(), ?scheme, "theme saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_plot_geometry() {
        let area = MetaConfig::default().plot.area();
        assert_eq!(area.width, 1000.0);
        assert_eq!(area.bottom(), 570.0);
        assert_eq!(area.left(), 20.0);
    }

    #[test]
    fn explicit_file_overrides_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "theme = \"dark\"\n[plot]\nwidth = 800\n[site]\ncommit_url_base = \"https://example.com/c\"\n",
        )
        .unwrap();
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.theme, ColorScheme::Dark);
        assert_eq!(cfg.plot.width, 800.0);
        assert_eq!(cfg.plot.height, 600.0);
        assert_eq!(cfg.site.commit_url_base.as_deref(), Some("https://example.com/c"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn save_theme_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[plot]\nwidth = 640\n").unwrap();
        save_theme(Some(&path), ColorScheme::Light).unwrap();
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.theme, ColorScheme::Light);
        assert_eq!(cfg.plot.width, 640.0);
    }

    #[test]
    fn theme_cycles_through_all_schemes() {
        let s = ColorScheme::Auto;
        assert_eq!(s.next().next().next(), ColorScheme::Auto);
    }
}
