use serde::{Deserialize, Serialize};

use crate::core::{Dimension, RendererKind, Theme};
use crate::engine::InitConfig;
use crate::error::{ChartError, ChartResult, ErrorPolicy};

/// Lifecycle adapter configuration.
///
/// Serializable so hosts can keep chart setup next to the rest of their
/// persisted UI state. Missing fields take the engine defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterConfig {
    #[serde(default = "default_auto_resize")]
    pub auto_resize: bool,
    #[serde(default)]
    pub renderer: RendererKind,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub width: Dimension,
    #[serde(default)]
    pub height: Dimension,
    #[serde(default)]
    pub error_policy: ErrorPolicy,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            auto_resize: default_auto_resize(),
            renderer: RendererKind::default(),
            theme: Theme::default(),
            width: Dimension::Auto,
            height: Dimension::Auto,
            error_policy: ErrorPolicy::default(),
        }
    }
}

impl AdapterConfig {
    #[must_use]
    pub fn with_auto_resize(mut self, enabled: bool) -> Self {
        self.auto_resize = enabled;
        self
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: RendererKind) -> Self {
        self.renderer = renderer;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the initial engine size handed over at creation time.
    #[must_use]
    pub fn with_size(mut self, width: Dimension, height: Dimension) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    #[must_use]
    pub fn init_config(&self) -> InitConfig {
        InitConfig {
            renderer: self.renderer,
            width: self.width,
            height: self.height,
        }
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize adapter config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse adapter config: {e}")))
    }
}

fn default_auto_resize() -> bool {
    true
}
