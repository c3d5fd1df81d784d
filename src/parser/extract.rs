//! Field extractors over lower-cased position and weather text.
//!
//! Each extractor is independent: it scans the text on its own and returns
//! `None` when its phrase is absent.

use crate::ir::{Compass, RunwayDesignator, RunwaySide, normalize_degrees};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Intercardinals come first so "northeast" is never read as "north".
const DIRECTION: &str = "northeast|northwest|southeast|southwest|north|south|east|west";
const RUNWAY_SUFFIX: &str = r"(?:\s*([lrc])\b|\s+(left|right|center|centre)\b)?";
// Further designators in a list, as in `runways 27l and 27r`.
const RUNWAY_LIST_TAIL: &str =
    r"(?:(?:\s*,\s*|\s+and\s+|\s*&\s*)\d+(?:\s*[lrc]\b|\s+(?:left|right|center|centre)\b)?)*";

static RUNWAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b(?:runway|rwy)\s*(\d+){RUNWAY_SUFFIX}")).unwrap()
});
static ALTITUDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bat\s+(\d{1,3}(?:,\d{3})+|\d+)\s*(?:feet|ft)\b").unwrap());
static FACING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b(?:facing|heading)\s+({DIRECTION})\b")).unwrap());
static HEADING_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bheading\s+(\d{1,3})\b").unwrap());
static BOUND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b({DIRECTION})-?bound\b")).unwrap());
static MILES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(\d+(?:\.\d+)?)\s*(?:miles?|mi|nm)\s+({DIRECTION})\b"
    ))
    .unwrap()
});
static DIRECTION_OF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b({DIRECTION})\s+of\b")).unwrap());
static DIRECTION_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b({DIRECTION})(-?bound)?\b")).unwrap());
static FACING_TAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:facing|heading)\s+$").unwrap());
static IN_USE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:runways?|rwy)\s*(\d+){RUNWAY_SUFFIX}{RUNWAY_LIST_TAIL}\s+in\s+use\b"
    ))
    .unwrap()
});
static ASSIGNED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:landing|departing|expect|active|using)\s+(?:runways?|rwy)\s*(\d+){RUNWAY_SUFFIX}"
    ))
    .unwrap()
});

/// `runway 27L`, `rwy 9`, `runway 04 right`.
pub fn runway(lower: &str) -> Option<RunwayDesignator> {
    RUNWAY_RE
        .captures_iter(lower)
        .find_map(|caps| designator_from_captures(&caps))
}

/// `at 3,000 feet` → `3000`.
pub fn altitude(lower: &str) -> Option<u32> {
    let caps = ALTITUDE_RE.captures(lower)?;
    let digits: String = caps[1].chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// A heading the text states outright: `facing east`, `heading 270`,
/// `northbound`.
pub fn explicit_rotation(lower: &str) -> Option<f32> {
    if let Some(caps) = FACING_RE.captures(lower) {
        return Compass::from_token(&caps[1]).map(Compass::bearing);
    }
    if let Some(caps) = HEADING_NUMBER_RE.captures(lower) {
        let degrees: u16 = caps[1].parse().ok()?;
        return Some(normalize_degrees(f32::from(degrees)));
    }
    BOUND_RE
        .captures(lower)
        .and_then(|caps| Compass::from_token(&caps[1]))
        .map(Compass::bearing)
}

#[derive(Debug, Clone, PartialEq)]
pub struct MilesDirection {
    /// Distance exactly as written, e.g. `"10"` or `"2.5"`.
    pub miles: String,
    pub direction: Compass,
}

impl MilesDirection {
    /// `"mile"` for a distance of exactly one, else `"miles"`.
    pub fn unit(&self) -> &'static str {
        match self.miles.parse::<f32>() {
            Ok(miles) if miles == 1.0 => "mile",
            _ => "miles",
        }
    }
}

/// `10 miles north`, `5 nm southwest`.
pub fn miles_direction(lower: &str) -> Option<MilesDirection> {
    let caps = MILES_RE.captures(lower)?;
    Some(MilesDirection {
        miles: caps[1].to_string(),
        direction: Compass::from_token(&caps[2])?,
    })
}

/// `west of the field`.
pub fn direction_of(lower: &str) -> Option<Compass> {
    DIRECTION_OF_RE
        .captures(lower)
        .and_then(|caps| Compass::from_token(&caps[1]))
}

/// First direction word that is not already a facing/heading/bound phrase,
/// as in `approaching from the east`.
pub fn compass_keyword(lower: &str) -> Option<Compass> {
    DIRECTION_WORD_RE.captures_iter(lower).find_map(|caps| {
        if caps.get(2).is_some() {
            return None;
        }
        let word = caps.get(1)?;
        if FACING_TAIL_RE.is_match(&lower[..word.start()]) {
            return None;
        }
        Compass::from_token(word.as_str())
    })
}

/// Runway-in-use announcement from ATIS or weather text, e.g.
/// `landing runway 27L` or `runway 9 in use`.
pub fn runway_in_use(weather: &str) -> Option<RunwayDesignator> {
    let lower = weather.to_lowercase();
    [&*IN_USE_RE, &*ASSIGNED_RE].into_iter().find_map(|re| {
        re.captures_iter(&lower)
            .find_map(|caps| designator_from_captures(&caps))
    })
}

fn designator_from_captures(caps: &Captures<'_>) -> Option<RunwayDesignator> {
    let raw = caps.get(1)?.as_str();
    let side = caps
        .get(2)
        .or_else(|| caps.get(3))
        .and_then(|m| RunwaySide::from_token(m.as_str()));
    let designator = raw
        .parse::<u8>()
        .ok()
        .and_then(|number| RunwayDesignator::new(number, side));
    match designator {
        Some(designator) => {
            tracing::trace!(%designator, "extracted runway");
            Some(designator)
        }
        None => {
            tracing::warn!(number = raw, "ignoring out-of-range runway number");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rwy(number: u8, side: Option<RunwaySide>) -> Option<RunwayDesignator> {
        RunwayDesignator::new(number, side)
    }

    #[test]
    fn runway_with_letter_and_word_suffix() {
        assert_eq!(runway("holding short runway 27"), rwy(27, None));
        assert_eq!(runway("cleared rwy 9l"), rwy(9, Some(RunwaySide::Left)));
        assert_eq!(runway("runway 04 right"), rwy(4, Some(RunwaySide::Right)));
        assert_eq!(runway("runway 18 c, expect delays"), rwy(18, Some(RunwaySide::Center)));
        assert_eq!(runway("runway27r"), rwy(27, Some(RunwaySide::Right)));
    }

    #[test]
    fn runway_does_not_read_words_as_suffix() {
        assert_eq!(runway("runway 9 leaving"), rwy(9, None));
        assert_eq!(runway("on runway heading"), None);
    }

    #[test]
    fn runway_skips_out_of_range_mentions() {
        assert_eq!(runway("runway 45, then runway 27"), rwy(27, None));
        assert_eq!(runway("runway 0 or rwy 40"), None);
    }

    #[test]
    fn runway_rejects_out_of_range_numbers() {
        assert_eq!(runway("runway 0"), None);
        assert_eq!(runway("runway 37"), None);
        assert_eq!(runway("runway 270"), None);
    }

    #[test]
    fn altitude_strips_grouping() {
        assert_eq!(altitude("approaching at 3,000 feet"), Some(3000));
        assert_eq!(altitude("downwind at 1500 ft"), Some(1500));
        assert_eq!(altitude("at 12,500 feet"), Some(12500));
        assert_eq!(altitude("climbing to 3000 feet"), None);
    }

    #[test]
    fn explicit_rotation_sources() {
        assert_eq!(explicit_rotation("on final, facing east"), Some(90.0));
        assert_eq!(explicit_rotation("heading northwest"), Some(315.0));
        assert_eq!(explicit_rotation("heading 270"), Some(270.0));
        assert_eq!(explicit_rotation("heading 360"), Some(0.0));
        assert_eq!(explicit_rotation("southbound on the taxiway"), Some(180.0));
        assert_eq!(explicit_rotation("northeastbound"), Some(45.0));
        assert_eq!(explicit_rotation("10 miles east"), None);
    }

    #[test]
    fn facing_wins_over_bound() {
        assert_eq!(explicit_rotation("westbound, facing north"), Some(0.0));
    }

    #[test]
    fn miles_direction_keeps_written_distance() {
        let found = miles_direction("10 miles north, inbound").unwrap();
        assert_eq!(found.miles, "10");
        assert_eq!(found.direction, Compass::North);
        let found = miles_direction("2.5 nm southwest").unwrap();
        assert_eq!(found.miles, "2.5");
        assert_eq!(found.direction, Compass::SouthWest);
        assert!(miles_direction("ten miles north").is_none());
        assert_eq!(miles_direction("1 mile east").unwrap().unit(), "mile");
        assert_eq!(miles_direction("1.5 miles east").unwrap().unit(), "miles");
    }

    #[test]
    fn direction_of_reads_intercardinals() {
        assert_eq!(direction_of("northeast of the field"), Some(Compass::NorthEast));
        assert_eq!(direction_of("west of town"), Some(Compass::West));
        assert_eq!(direction_of("west side"), None);
    }

    #[test]
    fn compass_keyword_skips_facing_and_bound() {
        assert_eq!(compass_keyword("approaching from the east"), Some(Compass::East));
        assert_eq!(compass_keyword("facing north, approach from the south"), Some(Compass::South));
        assert_eq!(compass_keyword("eastbound approach"), None);
    }

    #[test]
    fn runway_in_use_patterns() {
        assert_eq!(
            runway_in_use("Wind 270 at 8, Runway 27L in use"),
            rwy(27, Some(RunwaySide::Left))
        );
        assert_eq!(runway_in_use("landing runway 9, departing runway 4"), rwy(9, None));
        assert_eq!(runway_in_use("Expect runway 36 right"), rwy(36, Some(RunwaySide::Right)));
        assert_eq!(runway_in_use("visibility 10, sky clear"), None);
        assert_eq!(runway_in_use("runway 45 in use"), None);
        assert_eq!(
            runway_in_use("ATIS alpha, runways 27L and 27R in use"),
            rwy(27, Some(RunwaySide::Left))
        );
        assert_eq!(runway_in_use("runways 4, 22 and 9 in use"), rwy(4, None));
    }
}
