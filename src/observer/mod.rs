//! Element size-change notification.
//!
//! The adapter registers one callback per bound element and detaches it on
//! dispose. Hosts pick the observer matching their surface: the in-process
//! [`ManualResizeObserver`] for headless use, or the GTK observer behind the
//! `gtk4-adapter` feature.

mod manual;

pub use manual::ManualResizeObserver;

use crate::error::ChartResult;

/// Callback invoked whenever the observed element changes size.
pub type ResizeCallback = Box<dyn FnMut()>;

pub trait ResizeObserver<El> {
    /// Starts notifying `callback` about size changes of `element`.
    fn bind(&mut self, element: &El, callback: ResizeCallback) -> ChartResult<()>;

    /// Detaches every callback registered for `element`.
    fn clear(&mut self, element: &El) -> ChartResult<()>;
}
