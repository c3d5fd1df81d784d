use airport_diagram::{RenderOptions, ThemeMode, parse_position, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiagramRenderOptions {
    theme: Option<String>,
    is_towered: Option<bool>,
    width: Option<f32>,
    height: Option<f32>,
    font_family: Option<String>,
    seed: Option<u64>,
}

fn build_render_options(options: DiagramRenderOptions) -> RenderOptions {
    let mode = options
        .theme
        .as_deref()
        .and_then(ThemeMode::from_name)
        .unwrap_or_default();
    let mut render_options = RenderOptions::for_mode(mode);

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(width) = options.width {
        render_options.render.width = width;
    }
    if let Some(height) = options.height {
        render_options.render.height = height;
    }
    render_options.is_towered = options.is_towered.unwrap_or(false);
    render_options.seed = options.seed;

    render_options
}

#[wasm_bindgen]
pub fn render_airport_svg(
    position: &str,
    weather: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<DiagramRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        DiagramRenderOptions::default()
    };

    Ok(render_with_options(position, weather, &build_render_options(options)))
}

/// The placement as JSON, for the flight-info panel.
#[wasm_bindgen]
pub fn parse_position_json(text: &str) -> Result<String, JsValue> {
    serde_json::to_string(&parse_position(text))
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
