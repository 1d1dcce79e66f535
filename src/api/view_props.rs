use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::ChartOptions;

use super::AdapterConfig;

/// How the view decides that the `option` prop changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionChangeDetection {
    /// Every distinct `Rc` is a change, even when structurally equal.
    #[default]
    Identity,
    /// Structurally equal options are not re-applied.
    Structural,
}

impl OptionChangeDetection {
    #[must_use]
    pub fn is_unchanged(self, previous: &Rc<ChartOptions>, next: &Rc<ChartOptions>) -> bool {
        match self {
            Self::Identity => Rc::ptr_eq(previous, next),
            Self::Structural => Rc::ptr_eq(previous, next) || previous == next,
        }
    }
}

/// Inputs supplied by the host on every render pass.
#[derive(Debug, Clone, Default)]
pub struct ChartViewProps {
    /// Container width in pixels; also the initial engine width when the
    /// adapter config leaves it on `auto`.
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub option: Option<Rc<ChartOptions>>,
    pub loading: Option<bool>,
    /// Read once, when the view creates its adapter.
    pub adapter: AdapterConfig,
    pub option_change: OptionChangeDetection,
}

impl ChartViewProps {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_option(self, option: ChartOptions) -> Self {
        self.with_shared_option(Rc::new(option))
    }

    #[must_use]
    pub fn with_shared_option(mut self, option: Rc<ChartOptions>) -> Self {
        self.option = Some(option);
        self
    }

    #[must_use]
    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = Some(loading);
        self
    }

    #[must_use]
    pub fn with_adapter_config(mut self, config: AdapterConfig) -> Self {
        self.adapter = config;
        self
    }

    #[must_use]
    pub fn with_option_change(mut self, detection: OptionChangeDetection) -> Self {
        self.option_change = detection;
        self
    }

    /// Adapter configuration with the size props filled in as sizing hints.
    #[must_use]
    pub fn adapter_config(&self) -> AdapterConfig {
        let mut config = self.adapter.clone();
        config.width = config.width.or_pixels(self.width);
        config.height = config.height.or_pixels(self.height);
        config
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.unwrap_or(false)
    }
}
