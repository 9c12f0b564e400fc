use std::fmt;
use std::str::FromStr;

/// Fixed set of low-level shapes a renderer can draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PrimitiveKind {
    /// Unit square centered on the origin.
    Square,
    /// Upward-pointing triangle inscribed in the unit square.
    Triangle,
    /// Unit circle.
    Circle,
    /// Eight rays from the origin to the unit circle.
    RayFan,
    /// Four blades between the origin and the unit circle.
    BladeFan,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 5] = [
        PrimitiveKind::Square,
        PrimitiveKind::Triangle,
        PrimitiveKind::Circle,
        PrimitiveKind::RayFan,
        PrimitiveKind::BladeFan,
    ];

    /// Dense index in `0..ALL.len()`, used for per-kind GPU resource tables.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PrimitiveKind::Square => 0,
            PrimitiveKind::Triangle => 1,
            PrimitiveKind::Circle => 2,
            PrimitiveKind::RayFan => 3,
            PrimitiveKind::BladeFan => 4,
        }
    }
}

/// How primitives are rasterized. Never affects transform math.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum DisplayMode {
    /// Filled triangles.
    #[default]
    Solid,
    /// Outlines.
    Wireframe,
    /// Vertices only.
    Point,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [DisplayMode::Solid, DisplayMode::Wireframe, DisplayMode::Point];

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Solid => "solid",
            DisplayMode::Wireframe => "wireframe",
            DisplayMode::Point => "point",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no display mode.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
#[error("unknown display mode `{0}` (expected solid, wireframe or point)")]
pub struct ParseDisplayModeError(pub String);

impl FromStr for DisplayMode {
    type Err = ParseDisplayModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" | "s" => Ok(DisplayMode::Solid),
            "wireframe" | "w" => Ok(DisplayMode::Wireframe),
            "point" | "points" | "p" => Ok(DisplayMode::Point),
            _ => Err(ParseDisplayModeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_indices_are_dense() {
        for (i, kind) in PrimitiveKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn mode_parses_long_and_short_names() {
        assert_eq!("solid".parse::<DisplayMode>(), Ok(DisplayMode::Solid));
        assert_eq!("W".parse::<DisplayMode>(), Ok(DisplayMode::Wireframe));
        assert_eq!(" Point ".parse::<DisplayMode>(), Ok(DisplayMode::Point));
        assert_eq!("p".parse::<DisplayMode>(), Ok(DisplayMode::Point));
    }

    #[test]
    fn mode_rejects_unknown_names() {
        let err = "filled".parse::<DisplayMode>().unwrap_err();
        assert_eq!(err, ParseDisplayModeError("filled".to_string()));
    }

    #[test]
    fn mode_display_round_trips() {
        for mode in DisplayMode::ALL {
            assert_eq!(mode.to_string().parse::<DisplayMode>(), Ok(mode));
        }
    }

    #[test]
    fn default_mode_is_solid() {
        assert_eq!(DisplayMode::default(), DisplayMode::Solid);
    }
}
