//! Public embedding API: the lifecycle adapter and the chart view built on it.

mod adapter;
mod adapter_config;
mod view;
mod view_props;

pub use adapter::{AdapterPhase, AdapterStats, LifecycleAdapter};
pub use adapter_config::AdapterConfig;
pub use view::{ChartView, ContainerElement, ContainerStyle, RenderStatus, ViewLifecycle};
pub use view_props::{ChartViewProps, OptionChangeDetection};
