use std::cell::{Cell, RefCell};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::trace;

use crate::core::{ChartOptions, ResizeOptions, Theme};
use crate::error::{ChartError, ChartResult};

use super::{ChartEngine, ChartInstance, InitConfig};

/// In-memory element with a measurable size.
///
/// Clones share the same size cell, so a host can resize the element while
/// the adapter holds its own handle. Identity is the numeric id.
#[derive(Debug, Clone)]
pub struct HeadlessElement {
    id: u64,
    size: Rc<Cell<(u32, u32)>>,
}

impl HeadlessElement {
    #[must_use]
    pub fn new(id: u64, width: u32, height: u32) -> Self {
        Self {
            id,
            size: Rc::new(Cell::new((width, height))),
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.size.get()
    }

    pub fn set_size(&self, width: u32, height: u32) {
        self.size.set((width, height));
    }
}

impl PartialEq for HeadlessElement {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HeadlessElement {}

impl Hash for HeadlessElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Every call the headless engine observed, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EngineCall {
    Init {
        instance: u64,
        element: u64,
        theme: Theme,
        config: InitConfig,
        width: u32,
        height: u32,
    },
    SetOption {
        instance: u64,
        options: ChartOptions,
    },
    ShowLoading {
        instance: u64,
    },
    HideLoading {
        instance: u64,
    },
    Resize {
        instance: u64,
        width: u32,
        height: u32,
    },
    Dispose {
        instance: u64,
    },
}

impl EngineCall {
    #[must_use]
    pub fn instance(&self) -> u64 {
        match self {
            Self::Init { instance, .. }
            | Self::SetOption { instance, .. }
            | Self::ShowLoading { instance }
            | Self::HideLoading { instance }
            | Self::Resize { instance, .. }
            | Self::Dispose { instance } => *instance,
        }
    }
}

/// Failures the headless engine injects on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineFaults {
    pub fail_init: bool,
    pub fail_set_option: bool,
    pub fail_resize: bool,
}

/// Engine used by tests, demos and headless hosts.
///
/// Clones share the call log and fault switches.
#[derive(Debug, Clone, Default)]
pub struct HeadlessEngine {
    next_instance: Rc<Cell<u64>>,
    calls: Rc<RefCell<Vec<EngineCall>>>,
    faults: Rc<Cell<EngineFaults>>,
    live: LiveFlags,
}

/// Disposed flags of instances that have not been disposed yet.
type LiveFlags = Rc<RefCell<IndexMap<u64, Rc<Cell<bool>>>>>;

impl HeadlessEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.borrow().clone()
    }

    #[must_use]
    pub fn calls_for(&self, instance: u64) -> Vec<EngineCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.instance() == instance)
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    #[must_use]
    pub fn instances_created(&self) -> u64 {
        self.next_instance.get()
    }

    pub fn set_faults(&self, faults: EngineFaults) {
        self.faults.set(faults);
    }

    /// Number of instances created and not yet disposed.
    #[must_use]
    pub fn live_instances(&self) -> usize {
        self.live.borrow().len()
    }

    /// Disposes an instance from the engine side, bypassing its owner.
    ///
    /// Returns `false` for unknown or already disposed instances.
    pub fn dispose_instance(&self, instance: u64) -> bool {
        let Some(flag) = self.live.borrow_mut().shift_remove(&instance) else {
            return false;
        };
        if flag.replace(true) {
            return false;
        }
        self.calls.borrow_mut().push(EngineCall::Dispose { instance });
        true
    }
}

impl ChartEngine for HeadlessEngine {
    type Element = HeadlessElement;
    type Instance = HeadlessInstance;

    fn init(
        &mut self,
        element: &HeadlessElement,
        theme: &Theme,
        config: &InitConfig,
    ) -> ChartResult<HeadlessInstance> {
        if self.faults.get().fail_init {
            return Err(ChartError::Engine("headless init rejected".to_owned()));
        }
        let id = self.next_instance.get();
        self.next_instance.set(id + 1);

        let (container_width, container_height) = element.size();
        let width = config.width.resolve(container_width);
        let height = config.height.resolve(container_height);
        self.calls.borrow_mut().push(EngineCall::Init {
            instance: id,
            element: element.id(),
            theme: theme.clone(),
            config: *config,
            width,
            height,
        });
        trace!(instance = id, element = element.id(), width, height, "headless init");
        let disposed = Rc::new(Cell::new(false));
        self.live.borrow_mut().insert(id, Rc::clone(&disposed));

        Ok(HeadlessInstance {
            id,
            element: element.clone(),
            options: None,
            loading: false,
            size: (width, height),
            disposed,
            calls: Rc::clone(&self.calls),
            faults: Rc::clone(&self.faults),
            live: Rc::clone(&self.live),
        })
    }
}

#[derive(Debug)]
pub struct HeadlessInstance {
    id: u64,
    element: HeadlessElement,
    options: Option<ChartOptions>,
    loading: bool,
    size: (u32, u32),
    disposed: Rc<Cell<bool>>,
    calls: Rc<RefCell<Vec<EngineCall>>>,
    faults: Rc<Cell<EngineFaults>>,
    live: LiveFlags,
}

impl HeadlessInstance {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Options currently displayed; each `set_option` replaces the previous value.
    #[must_use]
    pub fn options(&self) -> Option<&ChartOptions> {
        self.options.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    fn record(&self, call: EngineCall) {
        self.calls.borrow_mut().push(call);
    }

    fn ensure_live(&self) -> ChartResult<()> {
        if self.disposed.get() {
            return Err(ChartError::Engine(format!(
                "instance {} used after dispose",
                self.id
            )));
        }
        Ok(())
    }
}

impl ChartInstance for HeadlessInstance {
    fn set_option(&mut self, options: &ChartOptions) -> ChartResult<()> {
        self.record(EngineCall::SetOption {
            instance: self.id,
            options: options.clone(),
        });
        self.ensure_live()?;
        if self.faults.get().fail_set_option {
            return Err(ChartError::Engine("headless set_option rejected".to_owned()));
        }
        self.options = Some(options.clone());
        Ok(())
    }

    fn show_loading(&mut self) -> ChartResult<()> {
        self.record(EngineCall::ShowLoading { instance: self.id });
        self.ensure_live()?;
        self.loading = true;
        Ok(())
    }

    fn hide_loading(&mut self) -> ChartResult<()> {
        self.record(EngineCall::HideLoading { instance: self.id });
        self.ensure_live()?;
        self.loading = false;
        Ok(())
    }

    fn resize(&mut self, options: ResizeOptions) -> ChartResult<()> {
        let (container_width, container_height) = self.element.size();
        let width = options.width.resolve(container_width);
        let height = options.height.resolve(container_height);
        self.record(EngineCall::Resize {
            instance: self.id,
            width,
            height,
        });
        self.ensure_live()?;
        if self.faults.get().fail_resize {
            return Err(ChartError::Engine("headless resize rejected".to_owned()));
        }
        self.size = (width, height);
        Ok(())
    }

    fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    fn dispose(&mut self) {
        if self.disposed.replace(true) {
            return;
        }
        self.live.borrow_mut().shift_remove(&self.id);
        self.record(EngineCall::Dispose { instance: self.id });
    }
}
