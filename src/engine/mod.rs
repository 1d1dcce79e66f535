mod headless;

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

pub use headless::{
    EngineCall, EngineFaults, HeadlessElement, HeadlessEngine, HeadlessInstance,
};

use crate::core::{ChartOptions, Dimension, RendererKind, ResizeOptions, Theme};
use crate::error::ChartResult;

/// Settings passed to the engine when an instance is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InitConfig {
    pub renderer: RendererKind,
    pub width: Dimension,
    pub height: Dimension,
}

/// Factory side of an external chart engine.
///
/// Implementations own no per-instance state; every successful `init` yields
/// an independent instance bound to `element`.
pub trait ChartEngine {
    type Element: Clone + Eq + Hash + Debug + 'static;
    type Instance: ChartInstance + 'static;

    fn init(
        &mut self,
        element: &Self::Element,
        theme: &Theme,
        config: &InitConfig,
    ) -> ChartResult<Self::Instance>;
}

/// One live engine instance drawing into one element.
pub trait ChartInstance {
    /// Replaces the displayed configuration.
    fn set_option(&mut self, options: &ChartOptions) -> ChartResult<()>;
    fn show_loading(&mut self) -> ChartResult<()>;
    fn hide_loading(&mut self) -> ChartResult<()>;
    fn resize(&mut self, options: ResizeOptions) -> ChartResult<()>;
    fn is_disposed(&self) -> bool;
    /// Releases engine resources. Calls after the first are ignored.
    fn dispose(&mut self);
}
