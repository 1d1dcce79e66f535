use std::cell::{Cell, RefCell};
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::error::{ChartError, ChartResult};

use super::{ResizeCallback, ResizeObserver};

type SharedCallback = Rc<RefCell<ResizeCallback>>;
type Listeners = SmallVec<[SharedCallback; 1]>;

/// Resize observer driven explicitly by the host through [`Self::notify`].
///
/// Clones share one registry: the adapter owns one clone while the host keeps
/// another to dispatch layout changes.
pub struct ManualResizeObserver<El> {
    registry: Rc<RefCell<IndexMap<El, Listeners>>>,
    fail_bind: Rc<Cell<bool>>,
    fail_clear: Rc<Cell<bool>>,
}

impl<El> Clone for ManualResizeObserver<El> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
            fail_bind: Rc::clone(&self.fail_bind),
            fail_clear: Rc::clone(&self.fail_clear),
        }
    }
}

impl<El> Default for ManualResizeObserver<El> {
    fn default() -> Self {
        Self {
            registry: Rc::new(RefCell::new(IndexMap::new())),
            fail_bind: Rc::new(Cell::new(false)),
            fail_clear: Rc::new(Cell::new(false)),
        }
    }
}

impl<El: fmt::Debug> fmt::Debug for ManualResizeObserver<El> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("ManualResizeObserver")
            .field(
                "listeners",
                &registry
                    .iter()
                    .map(|(element, listeners)| (element, listeners.len()))
                    .collect::<Vec<_>>(),
            )
            .field("fail_bind", &self.fail_bind.get())
            .field("fail_clear", &self.fail_clear.get())
            .finish()
    }
}

impl<El: Clone + Eq + Hash + fmt::Debug> ManualResizeObserver<El> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn listener_count(&self, element: &El) -> usize {
        self.registry
            .borrow()
            .get(element)
            .map_or(0, SmallVec::len)
    }

    #[must_use]
    pub fn is_observing(&self, element: &El) -> bool {
        self.listener_count(element) > 0
    }

    /// Makes subsequent `bind` calls fail without registering the callback.
    pub fn set_fail_bind(&self, fail: bool) {
        self.fail_bind.set(fail);
    }

    /// Makes subsequent `clear` calls fail without detaching anything.
    pub fn set_fail_clear(&self, fail: bool) {
        self.fail_clear.set(fail);
    }

    /// Dispatches a size change of `element` to its listeners.
    ///
    /// The listener list is snapshotted first, so callbacks may bind or clear
    /// listeners without invalidating the dispatch. A callback that is already
    /// running further up the stack is skipped. Returns the number of
    /// callbacks invoked.
    pub fn notify(&self, element: &El) -> usize {
        let listeners: Listeners = match self.registry.borrow().get(element) {
            Some(listeners) => listeners.clone(),
            None => return 0,
        };

        let mut invoked = 0;
        for listener in listeners {
            match listener.try_borrow_mut() {
                Ok(mut callback) => {
                    (*callback)();
                    invoked += 1;
                }
                Err(_) => warn!(?element, "skipping re-entrant resize callback"),
            }
        }
        trace!(?element, invoked, "dispatched resize notification");
        invoked
    }
}

impl<El: Clone + Eq + Hash + fmt::Debug> ResizeObserver<El> for ManualResizeObserver<El> {
    fn bind(&mut self, element: &El, callback: ResizeCallback) -> ChartResult<()> {
        if self.fail_bind.get() {
            return Err(ChartError::Observer(format!("cannot observe {element:?}")));
        }
        self.registry
            .borrow_mut()
            .entry(element.clone())
            .or_default()
            .push(Rc::new(RefCell::new(callback)));
        Ok(())
    }

    fn clear(&mut self, element: &El) -> ChartResult<()> {
        if self.fail_clear.get() {
            return Err(ChartError::Observer(format!(
                "failed to detach listeners from {element:?}"
            )));
        }
        self.registry.borrow_mut().shift_remove(element);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_reaches_every_listener_until_cleared() {
        let mut observer = ManualResizeObserver::<u32>::new();
        let hits = Rc::new(Cell::new(0));
        for _ in 0..2 {
            let hits = Rc::clone(&hits);
            observer
                .bind(&1, Box::new(move || hits.set(hits.get() + 1)))
                .expect("bind");
        }

        assert_eq!(observer.notify(&1), 2);
        assert_eq!(observer.notify(&2), 0);
        observer.clear(&1).expect("clear");
        assert_eq!(observer.notify(&1), 0);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn failing_clear_keeps_listeners_attached() {
        let mut observer = ManualResizeObserver::<u32>::new();
        observer.bind(&1, Box::new(|| {})).expect("bind");
        observer.set_fail_clear(true);
        assert!(matches!(observer.clear(&1), Err(ChartError::Observer(_))));
        assert!(observer.is_observing(&1));
    }

    #[test]
    fn failing_bind_registers_nothing() {
        let mut observer = ManualResizeObserver::<u32>::new();
        observer.set_fail_bind(true);
        assert!(matches!(
            observer.bind(&1, Box::new(|| {})),
            Err(ChartError::Observer(_))
        ));
        assert_eq!(observer.notify(&1), 0);
    }
}
