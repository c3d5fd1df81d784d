use crate::config::RenderConfig;
use crate::layout::{AircraftIcon, DiagramRenderState, Frame, Rect, RunwayLabel, Strip};
use crate::theme::Theme;
use std::path::{Path, PathBuf};

const CENTER: f32 = 50.0;
// Unit airplane, nose up, spanning -1..1 on both axes.
const AIRCRAFT_PATH: &str = "M 0 -1 L 0.15 -0.3 L 1 0.2 L 1 0.35 L 0.15 0.1 L 0.12 0.7 L 0.4 0.9 L 0.4 1 L 0 0.9 L -0.4 1 L -0.4 0.9 L -0.12 0.7 L -0.15 0.1 L -1 0.35 L -1 0.2 L -0.15 -0.3 Z";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "png")]
    #[error("failed to parse generated SVG: {0}")]
    Svg(#[from] usvg::Error),
    #[error("failed to allocate {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },
    #[error("failed to encode PNG {path}: {message}")]
    Encode { path: PathBuf, message: String },
}

pub fn render_svg(state: &DiagramRenderState, theme: &Theme, config: &RenderConfig) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 100 100\">",
        config.width, config.height
    ));
    svg.push_str(&format!(
        "<rect width=\"100\" height=\"100\" fill=\"{}\"/>",
        theme.background
    ));

    let rotation = state.airport_rotation;
    svg.push_str(&format!(
        "<g class=\"ground\" transform=\"rotate({rotation:.2} {CENTER} {CENTER})\">"
    ));
    svg.push_str(&rect_svg(&state.ramp, &theme.ramp_color));
    svg.push_str(&rect_svg(&state.taxiway_connector, &theme.taxiway_color));
    svg.push_str(&rect_svg(&state.taxiway, &theme.taxiway_color));
    if let Some(secondary) = &state.secondary_runway {
        svg.push_str(&strip_svg(secondary, &theme.runway_color, "secondary-runway"));
    }
    for strip in &state.runways {
        svg.push_str(&strip_svg(strip, &theme.runway_color, "runway"));
    }
    for label in &state.labels {
        svg.push_str(&label_svg(label, rotation, theme));
    }
    if let Some(icon) = state.aircraft.filter(|icon| icon.frame == Frame::Ground) {
        svg.push_str(&aircraft_svg(&icon, theme, config));
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"world\">");
    if config.show_compass {
        svg.push_str(&compass_svg(theme));
    }
    if let Some(icon) = state.aircraft.filter(|icon| icon.frame == Frame::World) {
        svg.push_str(&aircraft_svg(&icon, theme, config));
    }
    if config.show_status && !state.status.is_empty() {
        svg.push_str(&format!(
            "<text class=\"status\" x=\"2\" y=\"98.5\" font-family=\"{}\" font-size=\"{:.2}\" fill=\"{}\">{}</text>",
            theme.font_family,
            theme.font_size * 0.8,
            theme.text_color,
            escape_xml(&state.status)
        ));
    }
    svg.push_str("</g>");

    svg.push_str("</svg>");
    svg
}

fn rect_svg(rect: &Rect, fill: &str) -> String {
    format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
        rect.x, rect.y, rect.width, rect.height, fill
    )
}

fn strip_svg(strip: &Strip, fill: &str, class: &str) -> String {
    let transform = if strip.angle == 0.0 {
        String::new()
    } else {
        format!(
            " transform=\"rotate({:.2} {:.2} {:.2})\"",
            strip.angle, strip.cx, strip.cy
        )
    };
    format!(
        "<rect class=\"{class}\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{fill}\"{transform}/>",
        strip.x(),
        strip.y(),
        strip.width,
        strip.length,
    )
}

// The group sits inside the rotated ground frame; only the glyph turns back.
fn label_svg(label: &RunwayLabel, airport_rotation: f32, theme: &Theme) -> String {
    let fill = if label.active {
        theme.active_label_color.as_str()
    } else {
        theme.runway_label_color.as_str()
    };
    format!(
        "<g transform=\"translate({:.2} {:.2})\"><text class=\"runway-label\" transform=\"rotate({:.2})\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{:.2}\" font-weight=\"bold\" fill=\"{}\">{}</text></g>",
        label.x,
        label.y,
        -airport_rotation,
        theme.font_family,
        theme.font_size * 0.75,
        fill,
        escape_xml(&label.text)
    )
}

fn aircraft_svg(icon: &AircraftIcon, theme: &Theme, config: &RenderConfig) -> String {
    let scale = (config.aircraft_size / 2.0).max(0.1);
    format!(
        "<g class=\"aircraft\" transform=\"translate({:.2} {:.2}) rotate({:.2}) scale({:.2})\"><path d=\"{AIRCRAFT_PATH}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{:.3}\"/></g>",
        icon.x,
        icon.y,
        icon.rotation,
        scale,
        theme.aircraft_fill,
        theme.aircraft_stroke,
        0.3 / scale
    )
}

fn compass_svg(theme: &Theme) -> String {
    let mut out = String::new();
    for (letter, x, y) in [
        ("N", 50.0, 4.5),
        ("E", 96.0, 50.0),
        ("S", 50.0, 93.5),
        ("W", 4.0, 50.0),
    ] {
        out.push_str(&format!(
            "<text class=\"compass\" x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{:.2}\" fill=\"{}\">{letter}</text>",
            theme.font_family,
            theme.font_size,
            theme.compass_color
        ));
    }
    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<(), RenderError> {
    match output {
        Some(path) => {
            std::fs::write(path, svg).map_err(|source| RenderError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &RenderConfig,
) -> Result<(), RenderError> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    if let Some(size) = usvg::Size::from_wh(render_cfg.width, render_cfg.height) {
        opt.default_size = size;
    }
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height()).ok_or(
        RenderError::Pixmap {
            width: size.width(),
            height: size.height(),
        },
    )?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output).map_err(|err| RenderError::Encode {
        path: output.to_path_buf(),
        message: err.to_string(),
    })?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
