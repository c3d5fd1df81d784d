use serde::Serialize;
use std::fmt;

/// The eight compass points, in clockwise order starting at north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compass {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Compass {
    pub const ALL: [Compass; 8] = [
        Compass::North,
        Compass::NorthEast,
        Compass::East,
        Compass::SouthEast,
        Compass::South,
        Compass::SouthWest,
        Compass::West,
        Compass::NorthWest,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "north" => Some(Self::North),
            "northeast" => Some(Self::NorthEast),
            "east" => Some(Self::East),
            "southeast" => Some(Self::SouthEast),
            "south" => Some(Self::South),
            "southwest" => Some(Self::SouthWest),
            "west" => Some(Self::West),
            "northwest" => Some(Self::NorthWest),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::NorthEast => "northeast",
            Self::East => "east",
            Self::SouthEast => "southeast",
            Self::South => "south",
            Self::SouthWest => "southwest",
            Self::West => "west",
            Self::NorthWest => "northwest",
        }
    }

    /// Position in clockwise order, north = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn bearing(self) -> f32 {
        self.index() as f32 * 45.0
    }

    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 4) % 8]
    }

    /// Buckets a heading into the 45° sector centered on each compass point.
    /// Sector boundaries sit at 22.5°, 67.5°, ...
    pub fn from_heading(heading: f32) -> Self {
        let normalized = normalize_degrees(heading);
        let sector = ((normalized + 22.5) / 45.0).floor() as usize % 8;
        Self::ALL[sector]
    }
}

impl fmt::Display for Compass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parallel-runway side letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RunwaySide {
    Left,
    Right,
    Center,
}

impl RunwaySide {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "l" | "left" => Some(Self::Left),
            "r" | "right" => Some(Self::Right),
            "c" | "center" | "centre" => Some(Self::Center),
            _ => None,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Self::Left => "L",
            Self::Right => "R",
            Self::Center => "C",
        }
    }

    /// The side as seen from the other end of the same pavement.
    pub fn paired(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Center => Self::Center,
        }
    }
}

/// A runway designator such as `27L`. `number` is always within 1..=36.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RunwayDesignator {
    pub number: u8,
    pub side: Option<RunwaySide>,
}

impl RunwayDesignator {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 36;

    /// Returns `None` when `number` is not a valid runway number.
    pub fn new(number: u8, side: Option<RunwaySide>) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&number)
            .then_some(Self { number, side })
    }

    /// Magnetic heading of the runway in degrees, `number * 10` mod 360.
    pub fn heading(self) -> f32 {
        (u32::from(self.number) * 10 % 360) as f32
    }

    /// The direction a landing aircraft arrives from, `heading + 180`.
    pub fn approach_heading(self) -> f32 {
        ((u32::from(self.number) * 10 + 180) % 360) as f32
    }

    pub fn reciprocal_number(self) -> u8 {
        if self.number <= 18 {
            self.number + 18
        } else {
            self.number - 18
        }
    }

    pub fn reciprocal(self) -> Self {
        Self {
            number: self.reciprocal_number(),
            side: self.side.map(RunwaySide::paired),
        }
    }

    pub fn suffix(self) -> &'static str {
        self.side.map(RunwaySide::letter).unwrap_or("")
    }

    pub fn is_parallel(self) -> bool {
        matches!(self.side, Some(RunwaySide::Left | RunwaySide::Right))
    }
}

impl fmt::Display for RunwayDesignator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.suffix())
    }
}

/// Placement category, in the order the parser tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlacementKind {
    Invalid,
    MilesDirection,
    DirectionOf,
    Ramp,
    HoldingShort,
    Taxiway,
    Runway,
    PatternLeg,
    Approach,
    Departure,
    Fallback,
}

/// Where an aircraft is drawn on the diagram.
///
/// `x`/`y` are in the 0–100 diagram square with (50, 50) at the airport
/// center; `rotation` is degrees clockwise from north, in `[0, 360)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionResult {
    pub valid: bool,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub label: String,
    pub is_on_ground: bool,
}

impl PositionResult {
    pub fn invalid() -> Self {
        Self {
            valid: false,
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            label: String::new(),
            is_on_ground: false,
        }
    }

    pub fn airborne(point: Point, rotation: f32, label: String) -> Self {
        Self {
            valid: true,
            x: point.x,
            y: point.y,
            rotation: normalize_degrees(rotation),
            label,
            is_on_ground: false,
        }
    }

    pub fn on_ground(point: Point, rotation: f32, label: String) -> Self {
        Self {
            is_on_ground: true,
            ..Self::airborne(point, rotation, label)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Wraps any angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
