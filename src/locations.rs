//! Fixed reference geometry for the diagram square.
//!
//! Every coordinate lies in `[0, 100] x [0, 100]`, north up. Rotations are
//! compass degrees, clockwise from north.

use crate::ir::{Compass, Point};

/// An anchor point together with the way an aircraft there faces by default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub point: Point,
    pub rotation: f32,
}

impl Anchor {
    const fn new(x: f32, y: f32, rotation: f32) -> Self {
        Self {
            point: Point::new(x, y),
            rotation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternLeg {
    Downwind,
    Base,
    Final,
    Crosswind,
    Upwind,
}

impl PatternLeg {
    /// Checked in this order; the first leg named in the text wins.
    pub const ALL: [PatternLeg; 5] = [
        PatternLeg::Downwind,
        PatternLeg::Base,
        PatternLeg::Final,
        PatternLeg::Crosswind,
        PatternLeg::Upwind,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Downwind => "downwind",
            Self::Base => "base",
            Self::Final => "final",
            Self::Crosswind => "crosswind",
            Self::Upwind => "upwind",
        }
    }
}

pub struct AirportLocations;

impl AirportLocations {
    pub const RUNWAY: Point = Point::new(50.0, 50.0);
    pub const TAXIWAY: Point = Point::new(42.0, 50.0);
    pub const RAMP: Point = Point::new(27.0, 62.0);
    /// On the taxiway, at the near (numbered) end of the runway.
    pub const HOLDING_SHORT: Point = Point::new(42.0, 80.0);

    const BORDER: [Point; 8] = [
        Point::new(50.0, 1.0),
        Point::new(99.0, 1.0),
        Point::new(99.0, 50.0),
        Point::new(99.0, 99.0),
        Point::new(50.0, 99.0),
        Point::new(1.0, 99.0),
        Point::new(1.0, 50.0),
        Point::new(1.0, 1.0),
    ];

    /// Arriving traffic faces back toward the field.
    const APPROACHING: [Anchor; 8] = [
        Anchor::new(50.0, 15.0, 180.0),
        Anchor::new(85.0, 15.0, 225.0),
        Anchor::new(85.0, 50.0, 270.0),
        Anchor::new(85.0, 85.0, 315.0),
        Anchor::new(50.0, 85.0, 0.0),
        Anchor::new(15.0, 85.0, 45.0),
        Anchor::new(15.0, 50.0, 90.0),
        Anchor::new(15.0, 15.0, 135.0),
    ];

    /// Departing traffic faces away from the field.
    const DEPARTING: [Anchor; 8] = [
        Anchor::new(50.0, 8.0, 0.0),
        Anchor::new(92.0, 8.0, 45.0),
        Anchor::new(92.0, 50.0, 90.0),
        Anchor::new(92.0, 92.0, 135.0),
        Anchor::new(50.0, 92.0, 180.0),
        Anchor::new(8.0, 92.0, 225.0),
        Anchor::new(8.0, 50.0, 270.0),
        Anchor::new(8.0, 8.0, 315.0),
    ];

    /// Quadrant midpoints, each facing the field center.
    pub const AWAY: [Anchor; 4] = [
        Anchor::new(25.0, 25.0, 135.0),
        Anchor::new(75.0, 25.0, 225.0),
        Anchor::new(75.0, 75.0, 315.0),
        Anchor::new(25.0, 75.0, 45.0),
    ];

    /// Border point in the given direction from the field.
    pub fn border(direction: Compass) -> Point {
        Self::BORDER[direction.index()]
    }

    pub fn approaching(direction: Compass) -> Anchor {
        Self::APPROACHING[direction.index()]
    }

    pub fn departing(direction: Compass) -> Anchor {
        Self::DEPARTING[direction.index()]
    }

    /// Heading of an aircraft inbound from `direction`.
    pub fn inbound_rotation(direction: Compass) -> f32 {
        direction.opposite().bearing()
    }

    /// Heading of an aircraft outbound toward `direction`.
    pub fn outbound_rotation(direction: Compass) -> f32 {
        direction.bearing()
    }

    /// Left-hand pattern flown to runway 36 in the unrotated frame.
    pub fn pattern_leg(leg: PatternLeg) -> Anchor {
        match leg {
            PatternLeg::Downwind => Anchor::new(80.0, 50.0, 180.0),
            PatternLeg::Base => Anchor::new(80.0, 88.0, 270.0),
            PatternLeg::Final => Anchor::new(50.0, 90.0, 0.0),
            PatternLeg::Crosswind => Anchor::new(80.0, 12.0, 90.0),
            PatternLeg::Upwind => Anchor::new(50.0, 10.0, 0.0),
        }
    }
}
