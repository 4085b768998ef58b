//! Standalone SVG rendering of a [`RenderFrame`]: the scatter plot with its
//! axes and brush, followed by the language breakdown and the file strip.

use crate::config::ColorScheme;
use crate::projection::PlotArea;
use crate::sync::{Mode, RenderFrame};
use crate::util::format_percent;
use std::fmt::Write;

const ROW_HEIGHT: f64 = 18.0;
const SWATCH: f64 = 6.0;
const MAX_FILES: usize = 25;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn style_block(scheme: ColorScheme) -> String {
    let light = "svg { background: #ffffff; color: #1f2328; } \
                 .axis, .tick-label, .legend { fill: #1f2328; stroke: none; } \
                 .axis-line { stroke: #1f2328; } .gridlines line { stroke: #d0d7de; }";
    let dark = "svg { background: #0d1117; color: #e6edf3; } \
                .axis, .tick-label, .legend { fill: #e6edf3; stroke: none; } \
                .axis-line { stroke: #e6edf3; } .gridlines line { stroke: #30363d; }";
    let base = "circle { fill: steelblue; fill-opacity: 0.7; } \
                circle.selected { fill: #ff6b6b; } \
                circle.hovered { fill-opacity: 1; } \
                .brush { fill: #777; fill-opacity: 0.3; stroke: #fff; } \
                text { font: 11px sans-serif; }";
    let palette = match scheme {
        ColorScheme::Light => light.to_string(),
        ColorScheme::Dark => dark.to_string(),
        ColorScheme::Auto => format!("{light} @media (prefers-color-scheme: dark) {{ {dark} }}"),
    };
    format!("<style>{base} {palette}</style>")
}

pub fn render_svg(frame: &RenderFrame, area: &PlotArea, scheme: ColorScheme) -> String {
    let legend_rows = frame.breakdown.languages.len() + 2;
    let file_rows = frame.files.len().min(MAX_FILES) + 1;
    let total_height = area.height + 20.0 + (legend_rows + file_rows) as f64 * ROW_HEIGHT;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" style="overflow: visible; color-scheme: {cs}">"#,
        w = area.width,
        h = total_height,
        cs = scheme.css_value(),
    );
    svg.push_str(&style_block(scheme));
    svg.push('\n');

    write_axes(&mut svg, frame, area);
    write_dots(&mut svg, frame);

    if let Mode::Brush { rect: Some(rect) } = frame.mode {
        let _ = writeln!(
            svg,
            r#"<rect class="brush" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/>"#,
            rect.x0,
            rect.y0,
            rect.x1 - rect.x0,
            rect.y1 - rect.y0
        );
    }

    let mut y = area.height + 20.0;
    write_breakdown(&mut svg, frame, area, &mut y);
    write_files(&mut svg, frame, area, &mut y);

    svg.push_str("</svg>\n");
    svg
}

fn write_axes(svg: &mut String, frame: &RenderFrame, area: &PlotArea) {
    svg.push_str(r#"<g class="gridlines">"#);
    for tick in &frame.y_ticks {
        let _ = write!(
            svg,
            r#"<line x1="{:.2}" x2="{:.2}" y1="{:.2}" y2="{:.2}"/>"#,
            area.left(),
            area.right(),
            tick.position,
            tick.position
        );
    }
    svg.push_str("</g>\n");

    let _ = write!(
        svg,
        r#"<g class="x-axis"><line class="axis-line" x1="{:.2}" x2="{:.2}" y1="{b:.2}" y2="{b:.2}"/>"#,
        area.left(),
        area.right(),
        b = area.bottom()
    );
    for tick in &frame.x_ticks {
        let _ = write!(
            svg,
            r#"<text class="tick-label" x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            tick.position,
            area.bottom() + 16.0,
            escape(&tick.label)
        );
    }
    svg.push_str("</g>\n");

    let _ = write!(
        svg,
        r#"<g class="y-axis"><line class="axis-line" x1="{l:.2}" x2="{l:.2}" y1="{:.2}" y2="{:.2}"/>"#,
        area.top(),
        area.bottom(),
        l = area.left()
    );
    for tick in &frame.y_ticks {
        let _ = write!(
            svg,
            r#"<text class="tick-label" x="{:.2}" y="{:.2}" text-anchor="end">{}</text>"#,
            area.left() - 4.0,
            tick.position + 4.0,
            escape(&tick.label)
        );
    }
    svg.push_str("</g>\n");
}

fn write_dots(svg: &mut String, frame: &RenderFrame) {
    svg.push_str(r#"<g class="dots">"#);
    svg.push('\n');
    for p in &frame.points {
        let mut classes = Vec::new();
        if p.selected {
            classes.push("selected");
        }
        if p.hovered {
            classes.push("hovered");
        }
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, classes.join(" "))
        };
        let _ = writeln!(
            svg,
            r#"<circle data-id="{id}" cx="{:.2}" cy="{:.2}" r="{r:.2}" style="--r: {r:.2}"{class_attr}><title>{id}</title></circle>"#,
            p.cx,
            p.cy,
            id = escape(&p.id),
            r = p.r,
        );
    }
    svg.push_str("</g>\n");
}

fn write_breakdown(svg: &mut String, frame: &RenderFrame, area: &PlotArea, y: &mut f64) {
    let _ = writeln!(
        svg,
        r#"<text class="legend" x="{:.2}" y="{:.2}" font-weight="bold">{}</text>"#,
        area.left(),
        *y,
        escape(&frame.selection_label)
    );
    *y += ROW_HEIGHT;
    svg.push_str(r#"<g class="language-breakdown">"#);
    for (share, swatch) in frame.breakdown.languages.iter().zip(&frame.legend) {
        let _ = write!(
            svg,
            r#"<rect x="{:.2}" y="{:.2}" width="10" height="10" fill="{}"/>"#,
            area.left(),
            *y - 9.0,
            swatch.color
        );
        let _ = write!(
            svg,
            r#"<text class="legend" x="{:.2}" y="{:.2}">{}: {} lines ({})</text>"#,
            area.left() + 14.0,
            *y,
            escape(&share.language),
            share.count,
            format_percent(share.proportion)
        );
        *y += ROW_HEIGHT;
    }
    svg.push_str("</g>\n");
    *y += ROW_HEIGHT;
}

fn write_files(svg: &mut String, frame: &RenderFrame, area: &PlotArea, y: &mut f64) {
    svg.push_str(r#"<g class="files">"#);
    svg.push('\n');
    let label_width = 240.0;
    for file in frame.files.iter().take(MAX_FILES) {
        let _ = write!(
            svg,
            r#"<text class="legend" x="{:.2}" y="{:.2}">{} ({} lines)</text>"#,
            area.left(),
            *y,
            escape(&file.name),
            file.lines
        );
        let per_row = ((area.width - label_width - area.left()) / SWATCH).max(1.0) as usize;
        for (i, swatch) in file.swatches.iter().take(per_row).enumerate() {
            let _ = write!(
                svg,
                r#"<rect class="loc" x="{:.2}" y="{:.2}" width="{w:.1}" height="{w:.1}" fill="{}"/>"#,
                area.left() + label_width + i as f64 * SWATCH,
                *y - SWATCH - 2.0,
                swatch.color,
                w = SWATCH - 1.0,
            );
        }
        svg.push('\n');
        *y += ROW_HEIGHT;
    }
    svg.push_str("</g>\n");
}
