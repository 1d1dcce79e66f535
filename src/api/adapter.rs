use std::cell::RefCell;
use std::mem;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{ChartOptions, ResizeOptions};
use crate::engine::{ChartEngine, ChartInstance};
use crate::error::{ChartError, ChartResult};
use crate::observer::{ResizeCallback, ResizeObserver};

use super::AdapterConfig;

/// Externally visible lifecycle phase of a [`LifecycleAdapter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdapterPhase {
    /// No instance has been created yet.
    Uninitialized,
    /// An engine instance is bound to the element.
    Bound,
    /// Terminal: the instance was disposed and will not be recreated.
    Disposed,
}

/// Counters describing what the adapter did with its engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdapterStats {
    pub instances_created: u64,
    pub resizes_applied: u64,
    /// Resize requests that found no live instance, including observer
    /// callbacks firing after dispose.
    pub resizes_suppressed: u64,
    /// Failures contained under [`crate::ErrorPolicy::LogAndContinue`] or
    /// swallowed by best-effort operations.
    pub warnings: u64,
}

enum Slot<I, El> {
    Uninitialized,
    Bound {
        instance: I,
        element: El,
        observing: bool,
    },
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Liveness {
    Uninitialized,
    Live,
    /// Bound, but the instance reports it was disposed behind our back.
    Stale,
    Disposed,
}

impl<I: ChartInstance, El> Slot<I, El> {
    fn liveness(&self) -> Liveness {
        match self {
            Self::Uninitialized => Liveness::Uninitialized,
            Self::Bound { instance, .. } if instance.is_disposed() => Liveness::Stale,
            Self::Bound { .. } => Liveness::Live,
            Self::Disposed => Liveness::Disposed,
        }
    }
}

/// State shared between the adapter and its resize callback.
struct SharedState<I, El> {
    slot: Slot<I, El>,
    stats: AdapterStats,
}

type SharedHandle<I, El> = Rc<RefCell<SharedState<I, El>>>;

/// Owns one chart-engine instance bound to one element handle.
///
/// The instance is created lazily, at most once, and disposed exactly once:
/// explicitly through [`Self::dispose`] or implicitly when the adapter is
/// dropped. The resize observer callback only holds a weak handle to the
/// adapter state and re-checks the lifecycle phase on every invocation, so a
/// notification arriving after dispose never reaches the engine.
pub struct LifecycleAdapter<E, O>
where
    E: ChartEngine,
    O: ResizeObserver<E::Element>,
{
    engine: E,
    observer: O,
    config: AdapterConfig,
    element: Option<E::Element>,
    state: SharedHandle<E::Instance, E::Element>,
}

impl<E, O> LifecycleAdapter<E, O>
where
    E: ChartEngine,
    O: ResizeObserver<E::Element>,
{
    #[must_use]
    pub fn new(engine: E, observer: O, config: AdapterConfig) -> Self {
        Self {
            engine,
            observer,
            config,
            element: None,
            state: Rc::new(RefCell::new(SharedState {
                slot: Slot::Uninitialized,
                stats: AdapterStats::default(),
            })),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Last element handle handed to [`Self::bind`].
    #[must_use]
    pub fn element(&self) -> Option<&E::Element> {
        self.element.as_ref()
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    #[must_use]
    pub fn phase(&self) -> AdapterPhase {
        match self.state.borrow().slot {
            Slot::Uninitialized => AdapterPhase::Uninitialized,
            Slot::Bound { .. } => AdapterPhase::Bound,
            Slot::Disposed => AdapterPhase::Disposed,
        }
    }

    #[must_use]
    pub fn stats(&self) -> AdapterStats {
        self.state.borrow().stats
    }

    /// Runs `f` against the bound instance, if any.
    pub fn with_instance<T>(&self, f: impl FnOnce(&E::Instance) -> T) -> Option<T> {
        match &self.state.borrow().slot {
            Slot::Bound { instance, .. } => Some(f(instance)),
            _ => None,
        }
    }

    /// Records the element handle without creating an instance.
    ///
    /// The next `set_option` or `show_loading` initializes lazily against it.
    pub fn set_element(&mut self, element: Option<E::Element>) {
        if element.is_some() {
            self.element = element;
        }
    }

    /// Binds the adapter to `element`, creating the engine instance once.
    ///
    /// `None` means the host has no element yet; the call is a no-op and the
    /// host binds again once the element exists. Binding while an instance is
    /// live only records the handle.
    pub fn bind(&mut self, element: Option<E::Element>) -> ChartResult<()> {
        let Some(element) = element else {
            trace!("bind skipped: element unavailable");
            return Ok(());
        };
        self.element = Some(element);
        let result = self.ensure_instance();
        self.settle("bind", result)
    }

    /// Clears the loading overlay and replaces the displayed options.
    pub fn set_option(&mut self, options: &ChartOptions) -> ChartResult<()> {
        let result = self.apply_options(options);
        self.settle("set_option", result)
    }

    pub fn show_loading(&mut self) -> ChartResult<()> {
        let result = self
            .ensure_instance()
            .and_then(|()| self.with_live_instance(|instance| instance.show_loading()));
        trace!(ok = result.is_ok(), "show loading");
        self.settle("show_loading", result)
    }

    /// Hides the loading overlay. Never creates an instance.
    pub fn hide_loading(&mut self) -> ChartResult<()> {
        let liveness = self.state.borrow().slot.liveness();
        let result = match liveness {
            Liveness::Live => self.with_live_instance(|instance| instance.hide_loading()),
            _ => Ok(()),
        };
        trace!(ok = result.is_ok(), "hide loading");
        self.settle("hide_loading", result)
    }

    /// Asks the engine to recompute its layout. Defaults to auto/auto sizing.
    ///
    /// Engine failures are logged and counted, never returned.
    pub fn resize(&self, options: Option<ResizeOptions>) {
        resize_shared(&self.state, options.unwrap_or_default());
    }

    /// Detaches the resize observer and disposes the instance.
    ///
    /// Idempotent; a no-op when nothing was ever bound.
    pub fn dispose(&mut self) {
        let previous = {
            let mut state = self.state.borrow_mut();
            if !matches!(state.slot, Slot::Bound { .. }) {
                return;
            }
            mem::replace(&mut state.slot, Slot::Disposed)
        };
        if let Slot::Bound {
            mut instance,
            element,
            observing,
        } = previous
        {
            self.release(&mut instance, &element, observing);
            debug!(?element, "chart instance disposed");
        }
    }

    fn apply_options(&mut self, options: &ChartOptions) -> ChartResult<()> {
        if !options.is_applicable() {
            return Err(ChartError::InvalidData(
                "chart options must not be null".to_owned(),
            ));
        }
        self.ensure_instance()?;
        self.with_live_instance(|instance| {
            instance.hide_loading()?;
            instance.set_option(options)
        })?;
        trace!("applied chart options");
        Ok(())
    }

    fn ensure_instance(&mut self) -> ChartResult<()> {
        let liveness = self.state.borrow().slot.liveness();
        match liveness {
            Liveness::Live => return Ok(()),
            Liveness::Disposed => return Err(ChartError::Disposed),
            Liveness::Stale => self.drop_stale_instance(),
            Liveness::Uninitialized => {}
        }

        let element = self.element.clone().ok_or(ChartError::ElementUnavailable)?;
        let instance = self
            .engine
            .init(&element, &self.config.theme, &self.config.init_config())?;
        {
            let mut state = self.state.borrow_mut();
            state.slot = Slot::Bound {
                instance,
                element: element.clone(),
                observing: false,
            };
            state.stats.instances_created += 1;
        }
        debug!(
            ?element,
            renderer = ?self.config.renderer,
            width = %self.config.width,
            height = %self.config.height,
            "chart instance created"
        );

        if self.config.auto_resize {
            let callback = resize_callback(Rc::downgrade(&self.state));
            match self.observer.bind(&element, callback) {
                Ok(()) => {
                    if let Slot::Bound { observing, .. } = &mut self.state.borrow_mut().slot {
                        *observing = true;
                    }
                }
                Err(err) => {
                    warn!(error = %err, "auto-resize unavailable; chart keeps its initial size");
                    self.state.borrow_mut().stats.warnings += 1;
                }
            }
        }
        Ok(())
    }

    fn drop_stale_instance(&mut self) {
        let previous = mem::replace(&mut self.state.borrow_mut().slot, Slot::Uninitialized);
        if let Slot::Bound {
            mut instance,
            element,
            observing,
        } = previous
        {
            debug!(?element, "replacing externally disposed chart instance");
            self.release(&mut instance, &element, observing);
        }
    }

    fn release(&mut self, instance: &mut E::Instance, element: &E::Element, observing: bool) {
        if observing {
            if let Err(err) = self.observer.clear(element) {
                warn!(error = %err, ?element, "failed to detach resize observer");
                self.state.borrow_mut().stats.warnings += 1;
            }
        }
        if !instance.is_disposed() {
            instance.dispose();
        }
    }

    fn with_live_instance(
        &self,
        f: impl FnOnce(&mut E::Instance) -> ChartResult<()>,
    ) -> ChartResult<()> {
        let mut state = self.state.borrow_mut();
        match &mut state.slot {
            Slot::Bound { instance, .. } if !instance.is_disposed() => f(instance),
            Slot::Disposed => Err(ChartError::Disposed),
            _ => Err(ChartError::ElementUnavailable),
        }
    }

    fn settle(&self, operation: &'static str, result: ChartResult<()>) -> ChartResult<()> {
        let (result, swallowed) = self.config.error_policy.settle(operation, result);
        if swallowed {
            self.state.borrow_mut().stats.warnings += 1;
        }
        result
    }
}

impl<E, O> Drop for LifecycleAdapter<E, O>
where
    E: ChartEngine,
    O: ResizeObserver<E::Element>,
{
    fn drop(&mut self) {
        self.dispose();
    }
}

fn resize_callback<I, El>(state: Weak<RefCell<SharedState<I, El>>>) -> ResizeCallback
where
    I: ChartInstance + 'static,
    El: 'static,
{
    Box::new(move || match state.upgrade() {
        Some(state) => resize_shared(&state, ResizeOptions::auto()),
        None => trace!("resize notification after adapter drop ignored"),
    })
}

fn resize_shared<I: ChartInstance, El>(
    state: &RefCell<SharedState<I, El>>,
    options: ResizeOptions,
) {
    let Ok(mut guard) = state.try_borrow_mut() else {
        warn!("resize skipped: chart adapter is busy");
        return;
    };
    let state = &mut *guard;
    match &mut state.slot {
        Slot::Bound { instance, .. } if !instance.is_disposed() => {
            match instance.resize(options) {
                Ok(()) => state.stats.resizes_applied += 1,
                Err(err) => {
                    warn!(error = %err, "chart resize failed");
                    state.stats.warnings += 1;
                }
            }
        }
        _ => {
            trace!("resize suppressed: no live chart instance");
            state.stats.resizes_suppressed += 1;
        }
    }
}
