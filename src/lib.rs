//! chart-view: embeds an external chart engine into a host UI.
//!
//! The crate binds one engine instance to one container element and keeps
//! it in step with the host's mount/update/unmount cycle and with container
//! resizes. Engines and resize observers plug in through traits, so the same
//! adapter drives a headless engine in tests and a GTK surface on desktop.

pub mod api;
pub mod core;
pub mod engine;
pub mod error;
pub mod observer;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{AdapterConfig, ChartView, ChartViewProps, LifecycleAdapter};
pub use error::{ChartError, ChartResult, ErrorPolicy};
