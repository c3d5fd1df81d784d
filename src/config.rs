use crate::theme::{Theme, ThemeMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RampConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            x: 18.0,
            y: 54.0,
            width: 18.0,
            height: 16.0,
        }
    }
}

/// Ground-frame geometry in diagram units (the square is 0–100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub runway_width: f32,
    pub runway_start_y: f32,
    pub runway_end_y: f32,
    pub parallel_offset: f32,
    pub parallel_runway_width: f32,
    pub label_near_y: f32,
    pub label_far_y: f32,
    pub taxiway_x: f32,
    pub taxiway_width: f32,
    pub connector_y: f32,
    pub ramp: RampConfig,
    pub secondary_runway_length: f32,
    pub secondary_runway_width: f32,
    pub secondary_runway_angle: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            runway_width: 6.0,
            runway_start_y: 15.0,
            runway_end_y: 85.0,
            parallel_offset: 5.0,
            parallel_runway_width: 4.0,
            label_near_y: 80.0,
            label_far_y: 20.0,
            taxiway_x: 42.0,
            taxiway_width: 2.5,
            connector_y: 62.0,
            ramp: RampConfig::default(),
            secondary_runway_length: 50.0,
            secondary_runway_width: 4.0,
            secondary_runway_angle: 45.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    /// Icon size in diagram units.
    pub aircraft_size: f32,
    pub show_compass: bool,
    pub show_status: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
            aircraft_size: 6.0,
            show_compass: true,
            show_status: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Config {
    pub fn for_mode(mode: ThemeMode) -> Self {
        Self {
            theme: mode.theme(),
            ..Default::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    text_color: Option<String>,
    runway_color: Option<String>,
    runway_label_color: Option<String>,
    active_label_color: Option<String>,
    taxiway_color: Option<String>,
    ramp_color: Option<String>,
    aircraft_fill: Option<String>,
    aircraft_stroke: Option<String>,
    compass_color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfig>,
    render: Option<RenderConfig>,
}

/// Loads a JSON (or JSON5) config file over the defaults. `None` yields the
/// defaults for `mode`.
pub fn load_config(path: Option<&Path>, mode: ThemeMode) -> Result<Config, ConfigError> {
    let mut config = Config::for_mode(mode);
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse_config_file(&contents).map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })?;
    apply_config_file(&mut config, parsed);
    Ok(config)
}

fn parse_config_file(contents: &str) -> Result<ConfigFile, String> {
    match serde_json::from_str::<ConfigFile>(contents) {
        Ok(parsed) => Ok(parsed),
        Err(json_err) => json5::from_str::<ConfigFile>(contents)
            .map_err(|json5_err| format!("{json_err}; as JSON5: {json5_err}")),
    }
}

fn apply_config_file(config: &mut Config, parsed: ConfigFile) {
    if let Some(name) = parsed.theme.as_deref() {
        match ThemeMode::from_name(name) {
            Some(mode) => config.theme = mode.theme(),
            None => tracing::warn!(theme = name, "unknown theme, keeping default palette"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        let theme = &mut config.theme;
        if let Some(v) = vars.font_family {
            theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            theme.font_size = v;
        }
        if let Some(v) = vars.background {
            theme.background = v;
        }
        if let Some(v) = vars.text_color {
            theme.text_color = v;
        }
        if let Some(v) = vars.runway_color {
            theme.runway_color = v;
        }
        if let Some(v) = vars.runway_label_color {
            theme.runway_label_color = v;
        }
        if let Some(v) = vars.active_label_color {
            theme.active_label_color = v;
        }
        if let Some(v) = vars.taxiway_color {
            theme.taxiway_color = v;
        }
        if let Some(v) = vars.ramp_color {
            theme.ramp_color = v;
        }
        if let Some(v) = vars.aircraft_fill {
            theme.aircraft_fill = v;
        }
        if let Some(v) = vars.aircraft_stroke {
            theme.aircraft_stroke = v;
        }
        if let Some(v) = vars.compass_color {
            theme.compass_color = v;
        }
    }

    if let Some(layout) = parsed.layout {
        config.layout = layout;
    }
    if let Some(render) = parsed.render {
        config.render = render;
    }
}
