pub mod extract;

use crate::ir::{Compass, PlacementKind, PositionResult};
use crate::locations::{AirportLocations, PatternLeg};
use rand::Rng;
use rand::rngs::{SmallRng, StdRng, ThreadRng};

/// Source of the index used to pick a fallback anchor.
pub trait IndexSource {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl IndexSource for SmallRng {
    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

impl IndexSource for StdRng {
    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

impl IndexSource for ThreadRng {
    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Always picks the same index (wrapped to the slice length).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedIndex(pub usize);

impl IndexSource for FixedIndex {
    fn pick(&mut self, len: usize) -> usize {
        self.0 % len
    }
}

/// The position text with the fields every category may consult.
struct PositionText<'a> {
    original: &'a str,
    lower: String,
    runway: Option<crate::ir::RunwayDesignator>,
    altitude: Option<u32>,
    explicit_rotation: Option<f32>,
}

impl<'a> PositionText<'a> {
    fn new(original: &'a str) -> Self {
        let lower = original.to_lowercase();
        Self {
            original,
            runway: extract::runway(&lower),
            altitude: extract::altitude(&lower),
            explicit_rotation: extract::explicit_rotation(&lower),
            lower,
        }
    }

    fn has(&self, needle: &str) -> bool {
        self.lower.contains(needle)
    }

    fn has_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|needle| self.lower.contains(needle))
    }

    fn altitude_suffix(&self) -> String {
        self.altitude
            .map(|ft| format!(", {ft} ft"))
            .unwrap_or_default()
    }

    fn rotation_or(&self, default: f32) -> f32 {
        self.explicit_rotation.unwrap_or(default)
    }
}

struct Category {
    kind: PlacementKind,
    matches: fn(&PositionText<'_>) -> bool,
    place: fn(&PositionText<'_>) -> PositionResult,
}

// Order is observable: ambiguous text lands in the first category that matches.
const CATEGORIES: [Category; 9] = [
    Category {
        kind: PlacementKind::MilesDirection,
        matches: matches_miles_direction,
        place: place_miles_direction,
    },
    Category {
        kind: PlacementKind::DirectionOf,
        matches: matches_direction_of,
        place: place_direction_of,
    },
    Category {
        kind: PlacementKind::Ramp,
        matches: matches_ramp,
        place: place_ramp,
    },
    Category {
        kind: PlacementKind::HoldingShort,
        matches: matches_holding_short,
        place: place_holding_short,
    },
    Category {
        kind: PlacementKind::Taxiway,
        matches: matches_taxiway,
        place: place_taxiway,
    },
    Category {
        kind: PlacementKind::Runway,
        matches: matches_runway,
        place: place_runway,
    },
    Category {
        kind: PlacementKind::PatternLeg,
        matches: matches_pattern_leg,
        place: place_pattern_leg,
    },
    Category {
        kind: PlacementKind::Approach,
        matches: matches_approach,
        place: place_approach,
    },
    Category {
        kind: PlacementKind::Departure,
        matches: matches_departure,
        place: place_departure,
    },
];

const RAMP_KEYWORDS: &[&str] = &[
    "ramp",
    "terminal",
    "apron",
    "parked",
    "general aviation",
    "parking area",
    "ga parking",
];
const APPROACH_KEYWORDS: &[&str] = &["approach", "final", "arriving", "inbound"];
const DEPARTURE_KEYWORDS: &[&str] = &[
    "depart",
    "takeoff",
    "take off",
    "taking off",
    "outbound",
    "climbing out",
];
// A named runway only means "on the runway" when nothing says airborne.
const AIRBORNE_CUES: &[&str] = &[
    "approach",
    "depart",
    "inbound",
    "outbound",
    "miles",
    "downwind",
    "base",
    "final",
    "crosswind",
    "upwind",
];
const ON_RUNWAY_PHRASES: &[&str] = &[
    "on runway",
    "on the runway",
    "on rwy",
    "onto runway",
    "onto the runway",
    "lined up",
    "line up",
];

/// Places an aircraft described by free text, using the thread RNG for
/// text that matches no category.
pub fn parse_position(text: &str) -> PositionResult {
    parse_position_with(text, &mut rand::rng())
}

pub fn parse_position_with(text: &str, source: &mut dyn IndexSource) -> PositionResult {
    if text.trim().is_empty() {
        return PositionResult::invalid();
    }
    let text = PositionText::new(text);
    let (kind, result) = match CATEGORIES.iter().find(|category| (category.matches)(&text)) {
        Some(category) => (category.kind, (category.place)(&text)),
        None => (PlacementKind::Fallback, place_fallback(&text, source)),
    };
    tracing::debug!(
        ?kind,
        label = %result.label,
        x = result.x,
        y = result.y,
        rotation = result.rotation,
        "placed aircraft"
    );
    result
}

/// The category `parse_position` would use for `text`.
pub fn classify(text: &str) -> PlacementKind {
    if text.trim().is_empty() {
        return PlacementKind::Invalid;
    }
    let text = PositionText::new(text);
    CATEGORIES
        .iter()
        .find(|category| (category.matches)(&text))
        .map_or(PlacementKind::Fallback, |category| category.kind)
}

fn matches_miles_direction(text: &PositionText<'_>) -> bool {
    extract::miles_direction(&text.lower).is_some()
}

fn matches_direction_of(text: &PositionText<'_>) -> bool {
    extract::direction_of(&text.lower).is_some()
}

fn matches_ramp(text: &PositionText<'_>) -> bool {
    text.has_any(RAMP_KEYWORDS)
}

fn matches_holding_short(text: &PositionText<'_>) -> bool {
    text.has_any(&["holding short", "hold short"])
}

fn matches_taxiway(text: &PositionText<'_>) -> bool {
    text.has("taxi")
}

fn matches_pattern_leg(text: &PositionText<'_>) -> bool {
    pattern_leg(text).is_some()
}

fn matches_approach(text: &PositionText<'_>) -> bool {
    text.has_any(APPROACH_KEYWORDS)
}

fn matches_departure(text: &PositionText<'_>) -> bool {
    text.has_any(DEPARTURE_KEYWORDS)
}

fn border_rotation(text: &PositionText<'_>, direction: Compass, landing: &[&str]) -> f32 {
    if let Some(rotation) = text.explicit_rotation {
        return rotation;
    }
    if text.has_any(landing) {
        return match text.runway {
            // landing traffic faces the reciprocal of the runway heading
            Some(runway) => runway.approach_heading(),
            None => AirportLocations::inbound_rotation(direction),
        };
    }
    if text.has_any(&["outbound", "departing"]) {
        return match text.runway {
            Some(runway) => runway.heading(),
            None => AirportLocations::outbound_rotation(direction),
        };
    }
    0.0
}

fn place_miles_direction(text: &PositionText<'_>) -> PositionResult {
    let found = extract::miles_direction(&text.lower).unwrap_or(extract::MilesDirection {
        miles: String::new(),
        direction: Compass::North,
    });
    let rotation = border_rotation(
        text,
        found.direction,
        &["inbound", "approaching", "for landing"],
    );
    PositionResult::airborne(
        AirportLocations::border(found.direction),
        rotation,
        format!(
            "{} {} {}{}",
            found.miles,
            found.unit(),
            found.direction,
            text.altitude_suffix()
        ),
    )
}

fn place_direction_of(text: &PositionText<'_>) -> PositionResult {
    let direction = extract::direction_of(&text.lower).unwrap_or(Compass::North);
    let rotation = border_rotation(
        text,
        direction,
        &["inbound", "approaching", "for landing", "landing"],
    );
    PositionResult::airborne(
        AirportLocations::border(direction),
        rotation,
        text.original.to_string(),
    )
}

fn place_ramp(text: &PositionText<'_>) -> PositionResult {
    let label = if text.has("terminal") {
        "At terminal"
    } else if text.has("apron") {
        "On apron"
    } else if text.has("parked") {
        "Parked"
    } else if text.has_any(&["general aviation", "parking area", "ga parking"]) {
        "GA parking"
    } else {
        "On the ramp"
    };
    PositionResult::on_ground(
        AirportLocations::RAMP,
        text.rotation_or(0.0),
        label.to_string(),
    )
}

fn place_holding_short(text: &PositionText<'_>) -> PositionResult {
    let label = match text.runway {
        Some(runway) => format!("Holding short RWY {runway}"),
        None => "Holding short".to_string(),
    };
    // nose toward the runway centerline
    PositionResult::on_ground(
        AirportLocations::HOLDING_SHORT,
        text.rotation_or(90.0),
        label,
    )
}

fn place_taxiway(text: &PositionText<'_>) -> PositionResult {
    PositionResult::on_ground(
        AirportLocations::TAXIWAY,
        text.rotation_or(0.0),
        "On taxiway".to_string(),
    )
}

fn matches_runway(text: &PositionText<'_>) -> bool {
    if !text.has_any(&["runway", "rwy"]) {
        return false;
    }
    text.has_any(ON_RUNWAY_PHRASES) || !text.has_any(AIRBORNE_CUES)
}

fn place_runway(text: &PositionText<'_>) -> PositionResult {
    let default = if text.has_any(&["taking off", "takeoff"]) {
        0.0
    } else if text.has_any(&["landing", "on approach"]) {
        180.0
    } else {
        0.0
    };
    let label = match text.runway {
        Some(runway) => format!("On RWY {runway}"),
        None => "On Runway".to_string(),
    };
    PositionResult::on_ground(AirportLocations::RUNWAY, text.rotation_or(default), label)
}

fn pattern_leg(text: &PositionText<'_>) -> Option<PatternLeg> {
    PatternLeg::ALL
        .into_iter()
        .find(|leg| text.has(leg.keyword()))
}

fn place_pattern_leg(text: &PositionText<'_>) -> PositionResult {
    let leg = pattern_leg(text).unwrap_or(PatternLeg::Downwind);
    let anchor = AirportLocations::pattern_leg(leg);
    PositionResult::airborne(
        anchor.point,
        text.rotation_or(anchor.rotation),
        format!("In {} leg{}", leg.keyword(), text.altitude_suffix()),
    )
}

fn place_approach(text: &PositionText<'_>) -> PositionResult {
    let direction = extract::compass_keyword(&text.lower)
        .or_else(|| {
            text.runway
                .map(|runway| Compass::from_heading(runway.approach_heading()))
        })
        .unwrap_or(Compass::South);
    let anchor = AirportLocations::approaching(direction);
    let rotation = text.explicit_rotation.unwrap_or_else(|| {
        text.runway
            .map_or(anchor.rotation, |runway| runway.approach_heading())
    });
    let label = match text.runway {
        Some(runway) => format!("Approaching RWY {runway}{}", text.altitude_suffix()),
        None => format!("Approaching{}", text.altitude_suffix()),
    };
    PositionResult::airborne(anchor.point, rotation, label)
}

fn place_departure(text: &PositionText<'_>) -> PositionResult {
    let direction = extract::compass_keyword(&text.lower)
        .or_else(|| text.runway.map(|runway| Compass::from_heading(runway.heading())))
        .unwrap_or(Compass::North);
    let anchor = AirportLocations::departing(direction);
    let rotation = text.explicit_rotation.unwrap_or_else(|| {
        text.runway
            .map_or(anchor.rotation, |runway| runway.heading())
    });
    let label = match text.runway {
        Some(runway) => format!("Departing RWY {runway}{}", text.altitude_suffix()),
        None => format!("Departing{}", text.altitude_suffix()),
    };
    PositionResult::airborne(anchor.point, rotation, label)
}

fn place_fallback(text: &PositionText<'_>, source: &mut dyn IndexSource) -> PositionResult {
    let anchors = AirportLocations::AWAY;
    let anchor = anchors[source.pick(anchors.len()) % anchors.len()];
    PositionResult::airborne(
        anchor.point,
        text.rotation_or(anchor.rotation),
        text.original.to_string(),
    )
}
