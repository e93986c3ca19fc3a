//! Draw vs erase compositing.

use std::fmt;

/// Stroke mode. Persists across frames until changed or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Draw,
    Erase,
}

impl Mode {
    /// Parse a mode name. Only the literal `"erase"` selects erasing;
    /// every other value, including unknown ones, falls back to drawing.
    pub fn parse(name: &str) -> Self {
        match name {
            "erase" => Self::Erase,
            _ => Self::Draw,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Erase => "erase",
        }
    }

    /// The compositing operation the rendering context uses in this mode.
    pub fn composite_operation(self) -> CompositeOperation {
        match self {
            Self::Draw => CompositeOperation::SourceOver,
            Self::Erase => CompositeOperation::DestinationOut,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The subset of canvas composite operations a stroke surface switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeOperation {
    /// Paint new pixels over existing ones.
    SourceOver,
    /// Remove existing pixels where the stroke lands.
    DestinationOut,
}

impl CompositeOperation {
    /// Name of the rendering-context property carrying the operation.
    pub const PROPERTY: &'static str = "globalCompositeOperation";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SourceOver => "source-over",
            Self::DestinationOut => "destination-out",
        }
    }
}

impl fmt::Display for CompositeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
