use serde::{Deserialize, Serialize};

pub const DEFAULT_THEME_NAME: &str = "default";

/// Surface technology the engine draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    #[default]
    Canvas,
    Svg,
}

/// Engine theme: a registered theme name or an inline theme object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Theme {
    Named(String),
    Custom(serde_json::Map<String, serde_json::Value>),
}

impl Theme {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Custom(_) => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Named(DEFAULT_THEME_NAME.to_owned())
    }
}
