use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

const AUTO_KEYWORD: &str = "auto";

/// One axis of a chart size: explicit pixels, or derived from the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "DimensionRepr", into = "DimensionRepr")]
pub enum Dimension {
    Pixels(u32),
    #[default]
    Auto,
}

impl Dimension {
    #[must_use]
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Resolves the dimension against the container's measured extent.
    #[must_use]
    pub fn resolve(self, container_px: u32) -> u32 {
        match self {
            Self::Pixels(px) => px,
            Self::Auto => container_px,
        }
    }

    /// Returns `hint` in pixels when this dimension is `Auto`.
    #[must_use]
    pub fn or_pixels(self, hint: Option<u32>) -> Self {
        match (self, hint) {
            (Self::Auto, Some(px)) => Self::Pixels(px),
            (dimension, _) => dimension,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels(px) => write!(f, "{px}px"),
            Self::Auto => f.write_str(AUTO_KEYWORD),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DimensionRepr {
    Pixels(u32),
    Keyword(String),
}

impl TryFrom<DimensionRepr> for Dimension {
    type Error = ChartError;

    fn try_from(repr: DimensionRepr) -> Result<Self, Self::Error> {
        match repr {
            DimensionRepr::Pixels(px) => Ok(Self::Pixels(px)),
            DimensionRepr::Keyword(keyword) if keyword == AUTO_KEYWORD => Ok(Self::Auto),
            DimensionRepr::Keyword(keyword) => Err(ChartError::InvalidData(format!(
                "dimension must be a pixel count or \"auto\", got \"{keyword}\""
            ))),
        }
    }
}

impl From<Dimension> for DimensionRepr {
    fn from(dimension: Dimension) -> Self {
        match dimension {
            Dimension::Pixels(px) => Self::Pixels(px),
            Dimension::Auto => Self::Keyword(AUTO_KEYWORD.to_owned()),
        }
    }
}

/// Sizing request forwarded to an engine resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResizeOptions {
    #[serde(default)]
    pub width: Dimension,
    #[serde(default)]
    pub height: Dimension,
}

impl ResizeOptions {
    /// Width and height both derived from the container.
    #[must_use]
    pub fn auto() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pixels(width: u32, height: u32) -> Self {
        Self {
            width: Dimension::Pixels(width),
            height: Dimension::Pixels(height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_json_accepts_numbers_and_auto_keyword() {
        let px: Dimension = serde_json::from_str("500").expect("pixels");
        let auto: Dimension = serde_json::from_str("\"auto\"").expect("auto");
        assert_eq!(px, Dimension::Pixels(500));
        assert_eq!(auto, Dimension::Auto);
        assert_eq!(serde_json::to_string(&auto).expect("serialize"), "\"auto\"");
    }

    #[test]
    fn dimension_json_rejects_unknown_keyword() {
        assert!(serde_json::from_str::<Dimension>("\"fill\"").is_err());
    }

    #[test]
    fn auto_dimension_takes_hint_and_container_extent() {
        assert_eq!(Dimension::Auto.or_pixels(Some(320)), Dimension::Pixels(320));
        assert_eq!(Dimension::Pixels(10).or_pixels(Some(320)), Dimension::Pixels(10));
        assert_eq!(Dimension::Auto.resolve(640), 640);
        assert_eq!(Dimension::Pixels(200).to_string(), "200px");
    }
}
