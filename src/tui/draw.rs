use ratatui::style::{Color, Modifier, Style};

use crate::config::ColorScheme;

/// Terminal colours for one scheme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub dot: Color,
    pub selected: Color,
    pub hovered: Color,
    pub brush: Color,
    pub grid: Color,
}

/// Terminals don't report their background, so `Auto` keeps default colours.
pub fn palette(scheme: ColorScheme) -> Palette {
    match scheme {
        ColorScheme::Light => Palette {
            text: Color::Black,
            dim: Color::DarkGray,
            accent: Color::Blue,
            dot: Color::Rgb(70, 130, 180),
            selected: Color::Rgb(255, 107, 107),
            hovered: Color::Black,
            brush: Color::Gray,
            grid: Color::Gray,
        },
        ColorScheme::Dark => Palette {
            text: Color::White,
            dim: Color::Gray,
            accent: Color::Yellow,
            dot: Color::Rgb(100, 160, 220),
            selected: Color::Rgb(255, 107, 107),
            hovered: Color::White,
            brush: Color::DarkGray,
            grid: Color::DarkGray,
        },
        ColorScheme::Auto => Palette {
            text: Color::Reset,
            dim: Color::Gray,
            accent: Color::Yellow,
            dot: Color::Cyan,
            selected: Color::Red,
            hovered: Color::Reset,
            brush: Color::DarkGray,
            grid: Color::DarkGray,
        },
    }
}

impl Palette {
    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.dim)
    }
}

/// `#rrggbb` to a terminal colour; anything else falls back to white.
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 {
        return Color::White;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::White,
    }
}

const LEVELS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Fixed-width bar for a proportion in `[0, 1]`.
pub fn proportion_bar(proportion: f64, width: usize) -> String {
    let exact = proportion.clamp(0.0, 1.0) * width as f64;
    let full = exact.floor() as usize;
    let mut bar = "█".repeat(full);
    if full < width {
        let frac = exact - full as f64;
        if frac > 0.0 {
            let idx = ((frac * (LEVELS.len() - 1) as f64).round() as usize).min(LEVELS.len() - 1);
            bar.push_str(LEVELS[idx]);
            bar.push_str(&" ".repeat(width - full - 1));
        } else {
            bar.push_str(&" ".repeat(width - full));
        }
    }
    bar
}
