use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::ChartOptions;
use crate::engine::ChartEngine;
use crate::error::ChartResult;
use crate::observer::ResizeObserver;

use super::{AdapterPhase, ChartViewProps, LifecycleAdapter};

/// Inline style of the rendered container.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContainerStyle {
    pub width: Option<String>,
    pub height: Option<String>,
}

/// The single element a [`ChartView`] renders; the engine draws inside it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContainerElement {
    pub style: ContainerStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewLifecycle {
    Created,
    Mounted,
    Unmounted,
}

/// Outcome of synchronizing props with the engine.
///
/// Any failed sync sets `Failed`; only successfully applied options move the
/// view back to `Rendered`. Loading toggles never clear a failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderStatus {
    #[default]
    Idle,
    Rendered,
    /// Only reachable when the adapter propagates errors.
    Failed(String),
}

/// Chart component: a sized container plus prop-to-engine synchronization.
///
/// The host drives it through `attach_element` (element ref binding),
/// `mount`, `update` and `unmount`. Engine state follows the props: a changed
/// `option` is applied, a changed `loading` flag toggles the overlay. The
/// adapter is disposed on unmount, or when the view is dropped.
pub struct ChartView<E, O>
where
    E: ChartEngine,
    O: ResizeObserver<E::Element>,
{
    adapter: LifecycleAdapter<E, O>,
    props: ChartViewProps,
    element: Option<E::Element>,
    lifecycle: ViewLifecycle,
    seen_option: Option<Rc<ChartOptions>>,
    seen_loading: Option<Option<bool>>,
    status: RenderStatus,
}

impl<E, O> ChartView<E, O>
where
    E: ChartEngine,
    O: ResizeObserver<E::Element>,
{
    #[must_use]
    pub fn new(engine: E, observer: O, props: ChartViewProps) -> Self {
        let adapter = LifecycleAdapter::new(engine, observer, props.adapter_config());
        Self {
            adapter,
            props,
            element: None,
            lifecycle: ViewLifecycle::Created,
            seen_option: None,
            seen_loading: None,
            status: RenderStatus::Idle,
        }
    }

    #[must_use]
    pub fn props(&self) -> &ChartViewProps {
        &self.props
    }

    #[must_use]
    pub fn adapter(&self) -> &LifecycleAdapter<E, O> {
        &self.adapter
    }

    #[must_use]
    pub fn lifecycle(&self) -> ViewLifecycle {
        self.lifecycle
    }

    #[must_use]
    pub fn status(&self) -> &RenderStatus {
        &self.status
    }

    #[must_use]
    pub fn render(&self) -> ContainerElement {
        ContainerElement {
            style: ContainerStyle {
                width: self.props.width.map(|px| format!("{px}px")),
                height: self.props.height.map(|px| format!("{px}px")),
            },
        }
    }

    /// Element ref binding: the host reports the rendered container handle.
    ///
    /// When the element shows up after mount, the adapter is bound and the
    /// current props are replayed onto the fresh instance.
    pub fn attach_element(&mut self, element: Option<E::Element>) {
        self.element = element;
        if self.lifecycle != ViewLifecycle::Mounted || self.element.is_none() {
            return;
        }
        let was_unbound = self.adapter.phase() == AdapterPhase::Uninitialized;
        self.bind_element();
        if was_unbound && self.adapter.phase() == AdapterPhase::Bound {
            debug!("element attached after mount; replaying props");
            self.sync_option(true);
            self.sync_loading(true);
        }
    }

    pub fn mount(&mut self) {
        if self.lifecycle != ViewLifecycle::Created {
            return;
        }
        self.lifecycle = ViewLifecycle::Mounted;
        self.bind_element();
        self.sync_option(true);
        self.sync_loading(true);
    }

    /// Accepts the props of a new render pass.
    pub fn update(&mut self, props: ChartViewProps) {
        self.props = props;
        if self.lifecycle != ViewLifecycle::Mounted {
            return;
        }
        self.sync_option(false);
        self.sync_loading(false);
    }

    pub fn unmount(&mut self) {
        if self.lifecycle == ViewLifecycle::Mounted {
            self.adapter.dispose();
        }
        self.lifecycle = ViewLifecycle::Unmounted;
    }

    fn bind_element(&mut self) {
        let result = self.adapter.bind(self.element.clone());
        self.record("bind", result);
    }

    fn sync_option(&mut self, force: bool) {
        let Some(option) = self.props.option.clone() else {
            self.seen_option = None;
            return;
        };
        let unchanged = self
            .seen_option
            .as_ref()
            .is_some_and(|seen| self.props.option_change.is_unchanged(seen, &option));
        if unchanged && !force {
            return;
        }
        self.seen_option = Some(Rc::clone(&option));

        let warnings = self.adapter.stats().warnings;
        let result = self.adapter.set_option(&option);
        let applied = result.is_ok()
            && self.adapter.phase() == AdapterPhase::Bound
            && self.adapter.stats().warnings == warnings;
        self.record("set_option", result);
        if applied {
            self.status = RenderStatus::Rendered;
        }
    }

    fn sync_loading(&mut self, force: bool) {
        if !force && self.seen_loading == Some(self.props.loading) {
            return;
        }
        self.seen_loading = Some(self.props.loading);
        let result = if self.props.is_loading() {
            self.adapter.show_loading()
        } else {
            self.adapter.hide_loading()
        };
        self.record("loading", result);
    }

    fn record(&mut self, operation: &'static str, result: ChartResult<()>) {
        if let Err(err) = result {
            warn!(operation, error = %err, "chart view failed to sync");
            self.status = RenderStatus::Failed(err.to_string());
        }
    }
}
