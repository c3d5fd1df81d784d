use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" | "default" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            Self::Light => Theme::light(),
            Self::Dark => Theme::dark(),
        }
    }
}

/// Colors and type used for the diagram. Purely cosmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub text_color: String,
    pub runway_color: String,
    pub runway_label_color: String,
    pub active_label_color: String,
    pub taxiway_color: String,
    pub ramp_color: String,
    pub aircraft_fill: String,
    pub aircraft_stroke: String,
    pub compass_color: String,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 4.0,
            background: "#F4F6FA".to_string(),
            text_color: "#1C2430".to_string(),
            runway_color: "#4A5568".to_string(),
            runway_label_color: "#FFFFFF".to_string(),
            active_label_color: "#F6E05E".to_string(),
            taxiway_color: "#CBD5E0".to_string(),
            ramp_color: "#E2E8F0".to_string(),
            aircraft_fill: "#2B6CB0".to_string(),
            aircraft_stroke: "#1A365D".to_string(),
            compass_color: "#7A8AA6".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 4.0,
            background: "#111827".to_string(),
            text_color: "#E5E7EB".to_string(),
            runway_color: "#374151".to_string(),
            runway_label_color: "#F9FAFB".to_string(),
            active_label_color: "#FBBF24".to_string(),
            taxiway_color: "#4B5563".to_string(),
            ramp_color: "#1F2937".to_string(),
            aircraft_fill: "#60A5FA".to_string(),
            aircraft_stroke: "#DBEAFE".to_string(),
            compass_color: "#9CA3AF".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names() {
        assert_eq!(ThemeMode::from_name("Dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::from_name(" light "), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::from_name("neon"), None);
        assert_eq!(ThemeMode::Dark.theme(), Theme::dark());
    }

    #[test]
    fn palettes_differ_only_in_color() {
        let light = Theme::light();
        let dark = Theme::dark();
        assert_ne!(light.background, dark.background);
        assert_eq!(light.font_size, dark.font_size);
    }
}
