mod options;
mod sizing;
mod theme;

pub use options::ChartOptions;
pub use sizing::{Dimension, ResizeOptions};
pub use theme::{DEFAULT_THEME_NAME, RendererKind, Theme};
