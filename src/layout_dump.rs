use crate::layout::{DiagramRenderState, Frame, RunwayGeometry};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Flat, tooling-friendly view of a render state.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub airport_rotation: f32,
    pub active: String,
    pub opposite: String,
    pub geometry: RunwayGeometry,
    pub towered: bool,
    pub runways: Vec<StripDump>,
    pub labels: Vec<LabelDump>,
    pub aircraft: Option<AircraftDump>,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StripDump {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub length: f32,
    pub angle: f32,
    pub secondary: bool,
}

#[derive(Debug, Serialize)]
pub struct LabelDump {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct AircraftDump {
    pub frame: Frame,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub on_ground: bool,
}

impl LayoutDump {
    pub fn from_state(state: &DiagramRenderState) -> Self {
        let mut runways: Vec<StripDump> = state
            .runways
            .iter()
            .map(|strip| StripDump {
                x: strip.x(),
                y: strip.y(),
                width: strip.width,
                length: strip.length,
                angle: strip.angle,
                secondary: false,
            })
            .collect();
        if let Some(strip) = &state.secondary_runway {
            runways.push(StripDump {
                x: strip.x(),
                y: strip.y(),
                width: strip.width,
                length: strip.length,
                angle: strip.angle,
                secondary: true,
            });
        }

        let labels = state
            .labels
            .iter()
            .map(|label| LabelDump {
                text: label.text.clone(),
                x: label.x,
                y: label.y,
                active: label.active,
            })
            .collect();

        let aircraft = state.aircraft.map(|icon| AircraftDump {
            frame: icon.frame,
            x: icon.x,
            y: icon.y,
            rotation: icon.rotation,
            on_ground: icon.frame == Frame::Ground,
        });

        Self {
            airport_rotation: state.airport_rotation,
            active: format!("{}{}", state.active_runway, state.runway_suffix),
            opposite: format!("{}{}", state.opposite_runway, state.opposite_suffix),
            geometry: state.geometry,
            towered: state.is_towered,
            runways,
            labels,
            aircraft,
            status: state.status.clone(),
        }
    }
}

pub fn write_layout_dump(path: &Path, state: &DiagramRenderState) -> anyhow::Result<()> {
    let dump = LayoutDump::from_state(state);
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{RunwayDesignator, RunwaySide};
    use crate::layout::layout;
    use crate::parser::{FixedIndex, parse_position_with};

    #[test]
    fn dump_captures_runways_and_aircraft() {
        let placement = parse_position_with("holding short runway 27L", &mut FixedIndex(0));
        let state = layout(RunwayDesignator::new(27, Some(RunwaySide::Left)), true, &placement);
        let dump = LayoutDump::from_state(&state);
        assert_eq!(dump.active, "27L");
        assert_eq!(dump.opposite, "9R");
        assert_eq!(dump.runways.len(), 3);
        assert!(dump.runways[2].secondary);
        let aircraft = dump.aircraft.unwrap();
        assert!(aircraft.on_ground);
        assert_eq!(aircraft.rotation, 90.0);

        let json = serde_json::to_value(LayoutDump::from_state(&state)).unwrap();
        assert_eq!(json["geometry"], "parallel");
        assert_eq!(json["aircraft"]["frame"], "ground");
    }
}
