use crate::config::LayoutConfig;
use crate::ir::{PositionResult, RunwayDesignator, RunwaySide};
use crate::parser::extract;
use serde::Serialize;

/// Runway drawn straight up the unrotated diagram.
pub const BASELINE_RUNWAY: u8 = 36;
const DEFAULT_ACTIVE: &str = "36";
const DEFAULT_OPPOSITE: &str = "18";

/// Which sub-tree of the diagram an element is emitted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Frame {
    /// Rotates with the active runway.
    Ground,
    /// Never rotates; positions are true compass directions.
    World,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunwayGeometry {
    Single,
    Parallel,
}

/// A runway rectangle centered at (`cx`, `cy`), `angle` degrees from the
/// ground frame's vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Strip {
    pub cx: f32,
    pub cy: f32,
    pub width: f32,
    pub length: f32,
    pub angle: f32,
}

impl Strip {
    pub fn x(&self) -> f32 {
        self.cx - self.width / 2.0
    }

    pub fn y(&self) -> f32 {
        self.cy - self.length / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Runway number painted at one end of a strip. Drawn inside the ground
/// frame and counter-rotated so it reads upright.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunwayLabel {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AircraftIcon {
    pub frame: Frame,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramRenderState {
    /// Rotation applied to the ground frame about the diagram center.
    pub airport_rotation: f32,
    pub active_runway: String,
    pub runway_suffix: String,
    pub opposite_runway: String,
    pub opposite_suffix: String,
    pub is_towered: bool,
    pub geometry: RunwayGeometry,
    pub runways: Vec<Strip>,
    pub labels: Vec<RunwayLabel>,
    /// Illustrative crossing runway for towered fields.
    pub secondary_runway: Option<Strip>,
    pub taxiway: Rect,
    pub taxiway_connector: Rect,
    pub ramp: Rect,
    /// `None` when the placement is not valid.
    pub aircraft: Option<AircraftIcon>,
    pub placement: PositionResult,
    /// Single-line flight-info text, the placement label.
    pub status: String,
}

/// Ground-frame rotation that turns runway `number` onto the diagram's
/// vertical axis: 10° per runway-number unit away from runway 36.
pub fn airport_rotation(number: u8) -> f32 {
    ((i32::from(number) - i32::from(BASELINE_RUNWAY)) * 10).rem_euclid(360) as f32
}

/// Suffix of the same pavement seen from the other end.
pub fn paired_suffix(suffix: &str) -> &'static str {
    RunwaySide::from_token(&suffix.to_ascii_lowercase()).map_or("", |side| side.paired().letter())
}

/// The designator in the position text, else the one announced in the
/// weather text.
pub fn resolve_active_runway(position: &str, weather: &str) -> Option<RunwayDesignator> {
    extract::runway(&position.to_lowercase()).or_else(|| extract::runway_in_use(weather))
}

pub fn layout(
    runway: Option<RunwayDesignator>,
    is_towered: bool,
    placement: &PositionResult,
) -> DiagramRenderState {
    compute_layout(runway, is_towered, placement, &LayoutConfig::default())
}

pub fn compute_layout(
    runway: Option<RunwayDesignator>,
    is_towered: bool,
    placement: &PositionResult,
    config: &LayoutConfig,
) -> DiagramRenderState {
    let (airport_rotation, active_runway, runway_suffix, opposite_runway, opposite_suffix) =
        match runway {
            Some(runway) => {
                (
                    airport_rotation(runway.number),
                    runway.number.to_string(),
                    runway.suffix().to_string(),
                    runway.reciprocal_number().to_string(),
                    paired_suffix(runway.suffix()).to_string(),
                )
            }
            None => (
                0.0,
                DEFAULT_ACTIVE.to_string(),
                String::new(),
                DEFAULT_OPPOSITE.to_string(),
                String::new(),
            ),
        };
    let parallel = runway.is_some_and(RunwayDesignator::is_parallel);
    let geometry = if parallel {
        RunwayGeometry::Parallel
    } else {
        RunwayGeometry::Single
    };

    let active_label = format!("{active_runway}{runway_suffix}");
    let opposite_label = format!("{opposite_runway}{opposite_suffix}");
    let (runways, labels) = match geometry {
        RunwayGeometry::Single => {
            single_runway(config, active_label.clone(), opposite_label.clone())
        }
        RunwayGeometry::Parallel => parallel_runways(
            config,
            &active_runway,
            &opposite_runway,
            runway.and_then(|r| r.side),
        ),
    };

    let secondary_runway = is_towered.then(|| Strip {
        cx: 50.0,
        cy: 50.0,
        width: config.secondary_runway_width,
        length: config.secondary_runway_length,
        angle: config.secondary_runway_angle,
    });

    let aircraft = placement.valid.then(|| AircraftIcon {
        frame: if placement.is_on_ground {
            Frame::Ground
        } else {
            Frame::World
        },
        x: placement.x,
        y: placement.y,
        rotation: placement.rotation,
    });

    tracing::debug!(
        active = %active_label,
        opposite = %opposite_label,
        airport_rotation,
        ?geometry,
        is_towered,
        "computed diagram layout"
    );

    DiagramRenderState {
        airport_rotation,
        active_runway,
        runway_suffix,
        opposite_runway,
        opposite_suffix,
        is_towered,
        geometry,
        runways,
        labels,
        secondary_runway,
        taxiway: Rect {
            x: config.taxiway_x - config.taxiway_width / 2.0,
            y: config.runway_start_y,
            width: config.taxiway_width,
            height: config.runway_end_y - config.runway_start_y,
        },
        taxiway_connector: Rect {
            x: config.ramp.x + config.ramp.width,
            y: config.connector_y - config.taxiway_width / 2.0,
            width: (config.taxiway_x - config.ramp.x - config.ramp.width).max(0.0),
            height: config.taxiway_width,
        },
        ramp: Rect {
            x: config.ramp.x,
            y: config.ramp.y,
            width: config.ramp.width,
            height: config.ramp.height,
        },
        aircraft,
        status: placement.label.clone(),
        placement: placement.clone(),
    }
}

fn strip_at(config: &LayoutConfig, cx: f32, width: f32) -> Strip {
    Strip {
        cx,
        cy: (config.runway_start_y + config.runway_end_y) / 2.0,
        width,
        length: config.runway_end_y - config.runway_start_y,
        angle: 0.0,
    }
}

fn single_runway(
    config: &LayoutConfig,
    near: String,
    far: String,
) -> (Vec<Strip>, Vec<RunwayLabel>) {
    let strip = strip_at(config, 50.0, config.runway_width);
    let labels = vec![
        RunwayLabel {
            x: strip.cx,
            y: config.label_near_y,
            text: near,
            active: true,
        },
        RunwayLabel {
            x: strip.cx,
            y: config.label_far_y,
            text: far,
            active: false,
        },
    ];
    (vec![strip], labels)
}

// Looking up the near end, the left strip is nL and its far end oR.
fn parallel_runways(
    config: &LayoutConfig,
    active: &str,
    opposite: &str,
    side: Option<RunwaySide>,
) -> (Vec<Strip>, Vec<RunwayLabel>) {
    let left = strip_at(config, 50.0 - config.parallel_offset, config.parallel_runway_width);
    let right = strip_at(config, 50.0 + config.parallel_offset, config.parallel_runway_width);
    let left_active = side == Some(RunwaySide::Left);
    let right_active = side == Some(RunwaySide::Right);
    let labels = vec![
        RunwayLabel {
            x: left.cx,
            y: config.label_near_y,
            text: format!("{active}L"),
            active: left_active,
        },
        RunwayLabel {
            x: right.cx,
            y: config.label_near_y,
            text: format!("{active}R"),
            active: right_active,
        },
        RunwayLabel {
            x: left.cx,
            y: config.label_far_y,
            text: format!("{opposite}R"),
            active: left_active,
        },
        RunwayLabel {
            x: right.cx,
            y: config.label_far_y,
            text: format!("{opposite}L"),
            active: right_active,
        },
    ];
    (vec![left, right], labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Point;
    use crate::parser::{FixedIndex, parse_position_with};

    fn rwy(number: u8, side: Option<RunwaySide>) -> Option<RunwayDesignator> {
        RunwayDesignator::new(number, side)
    }

    fn ground_placement() -> PositionResult {
        PositionResult::on_ground(Point::new(42.0, 80.0), 90.0, "Holding short RWY 27".into())
    }

    #[test]
    fn rotation_for_every_runway_number() {
        for n in 1..=36u8 {
            let expected = ((i32::from(n) - 36) * 10).rem_euclid(360) as f32;
            assert_eq!(airport_rotation(n), expected, "runway {n}");
            assert!((0.0..360.0).contains(&airport_rotation(n)));
        }
        assert_eq!(airport_rotation(36), 0.0);
        assert_eq!(airport_rotation(9), 90.0);
        assert_eq!(airport_rotation(27), 270.0);
        assert_eq!(airport_rotation(18), 180.0);
        assert_eq!(airport_rotation(1), 10.0);
    }

    #[test]
    fn opposite_runway_for_every_number() {
        for n in 1..=36u8 {
            let state = layout(rwy(n, None), false, &ground_placement());
            let expected = if n <= 18 { n + 18 } else { n - 18 };
            assert_eq!(state.opposite_runway, expected.to_string());
            let back = layout(rwy(expected, None), false, &ground_placement());
            assert_eq!(back.opposite_runway, n.to_string());
        }
    }

    #[test]
    fn paired_suffix_is_an_involution() {
        assert_eq!(paired_suffix("L"), "R");
        assert_eq!(paired_suffix("R"), "L");
        assert_eq!(paired_suffix("C"), "C");
        assert_eq!(paired_suffix(""), "");
        for suffix in ["L", "R", "C", ""] {
            assert_eq!(paired_suffix(paired_suffix(suffix)), suffix);
        }
    }

    #[test]
    fn opposite_suffix_pairs_sides() {
        for (side, expected) in [
            (Some(RunwaySide::Left), "R"),
            (Some(RunwaySide::Right), "L"),
            (Some(RunwaySide::Center), "C"),
            (None, ""),
        ] {
            let state = layout(rwy(27, side), false, &ground_placement());
            assert_eq!(state.opposite_runway, "9");
            assert_eq!(state.opposite_suffix, expected);
        }
    }

    #[test]
    fn missing_runway_defaults_to_36_18() {
        let state = layout(None, false, &ground_placement());
        assert_eq!(state.airport_rotation, 0.0);
        assert_eq!(state.active_runway, "36");
        assert_eq!(state.opposite_runway, "18");
        assert_eq!(state.runway_suffix, "");
        assert_eq!(state.opposite_suffix, "");
        assert_eq!(state.geometry, RunwayGeometry::Single);
    }

    #[test]
    fn parallel_runways_get_four_labels() {
        let state = layout(rwy(27, Some(RunwaySide::Left)), false, &ground_placement());
        assert_eq!(state.geometry, RunwayGeometry::Parallel);
        assert_eq!(state.runway_suffix, "L");
        assert_eq!(state.opposite_runway, "9");
        assert_eq!(state.opposite_suffix, "R");
        assert_eq!(state.runways.len(), 2);
        assert_eq!(state.runways[0].cx, 45.0);
        assert_eq!(state.runways[1].cx, 55.0);
        let texts: Vec<&str> = state.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["27L", "27R", "9R", "9L"]);
        let active: Vec<bool> = state.labels.iter().map(|l| l.active).collect();
        assert_eq!(active, [true, false, true, false]);
    }

    #[test]
    fn center_suffix_draws_single_runway() {
        let state = layout(rwy(18, Some(RunwaySide::Center)), false, &ground_placement());
        assert_eq!(state.geometry, RunwayGeometry::Single);
        assert_eq!(state.runways.len(), 1);
        let texts: Vec<&str> = state.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["18C", "36C"]);
    }

    #[test]
    fn secondary_runway_only_when_towered() {
        let placement = ground_placement();
        assert!(layout(rwy(9, None), false, &placement).secondary_runway.is_none());
        let towered = layout(rwy(9, None), true, &placement);
        let strip = towered.secondary_runway.unwrap();
        assert_eq!(strip.angle, 45.0);
        // the crossing runway never changes the rotation math
        assert_eq!(towered.airport_rotation, 90.0);
    }

    #[test]
    fn frame_follows_on_ground_flag() {
        let ground = parse_position_with("holding short runway 27", &mut FixedIndex(0));
        let state = layout(rwy(27, None), false, &ground);
        let icon = state.aircraft.unwrap();
        assert_eq!(icon.frame, Frame::Ground);
        assert_eq!((icon.x, icon.y, icon.rotation), (42.0, 80.0, 90.0));
        assert_eq!(state.status, "Holding short RWY 27");

        let airborne = parse_position_with("10 miles north", &mut FixedIndex(0));
        let state = layout(rwy(27, None), false, &airborne);
        assert_eq!(state.aircraft.unwrap().frame, Frame::World);
    }

    #[test]
    fn invalid_placement_has_no_aircraft() {
        let state = layout(rwy(27, None), false, &PositionResult::invalid());
        assert!(state.aircraft.is_none());
        assert_eq!(state.status, "");
    }

    #[test]
    fn position_runway_wins_over_weather() {
        assert_eq!(
            resolve_active_runway("holding short runway 9", "runway 27 in use"),
            rwy(9, None)
        );
        assert_eq!(
            resolve_active_runway("on the ramp", "landing runway 27L"),
            rwy(27, Some(RunwaySide::Left))
        );
        assert_eq!(resolve_active_runway("on the ramp", "wind calm"), None);
    }

    #[test]
    fn layout_is_idempotent() {
        let placement = ground_placement();
        let first = layout(rwy(4, Some(RunwaySide::Right)), true, &placement);
        let second = layout(rwy(4, Some(RunwaySide::Right)), true, &placement);
        assert_eq!(first.airport_rotation, second.airport_rotation);
        assert_eq!(first.labels, second.labels);
        assert_eq!(first.runways, second.runways);
        assert_eq!(first.aircraft, second.aircraft);
    }
}
