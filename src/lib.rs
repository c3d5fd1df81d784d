#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod locations;
pub mod parser;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use ir::{Compass, PlacementKind, PositionResult, RunwayDesignator, RunwaySide};
pub use layout::{DiagramRenderState, compute_layout, layout, resolve_active_runway};
pub use parser::{FixedIndex, IndexSource, classify, parse_position, parse_position_with};
pub use render::render_svg;
pub use theme::{Theme, ThemeMode};

use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Everything a one-shot render needs besides the input text.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    pub is_towered: bool,
    /// Seeds the fallback placement; `None` uses the thread RNG.
    pub seed: Option<u64>,
}

impl RenderOptions {
    pub fn dark() -> Self {
        Self::for_mode(ThemeMode::Dark)
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        Self {
            theme: mode.theme(),
            ..Default::default()
        }
    }

    pub fn from_config(config: Config) -> Self {
        Self {
            theme: config.theme,
            layout: config.layout,
            render: config.render,
            ..Default::default()
        }
    }
}

/// Parses `position`, picks the active runway from `position` or `weather`
/// and computes the diagram state.
pub fn diagram_state(
    position: &str,
    weather: &str,
    options: &RenderOptions,
) -> DiagramRenderState {
    let placement = match options.seed {
        Some(seed) => parse_position_with(position, &mut SmallRng::seed_from_u64(seed)),
        None => parse_position(position),
    };
    let runway = resolve_active_runway(position, weather);
    compute_layout(runway, options.is_towered, &placement, &options.layout)
}

/// Position and weather text in, SVG out.
pub fn render_with_options(position: &str, weather: &str, options: &RenderOptions) -> String {
    let state = diagram_state(position, weather, options);
    render_svg(&state, &options.theme, &options.render)
}
