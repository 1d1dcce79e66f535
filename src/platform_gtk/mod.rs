use std::cell::RefCell;

use gtk4 as gtk;
use gtk4::glib::SignalHandlerId;
use gtk4::prelude::*;
use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::api::ChartView;
use crate::error::ChartResult;
use crate::observer::{ResizeCallback, ResizeObserver};

/// Chart view hosted in a GTK drawing area.
pub type GtkChartView<E> = ChartView<E, GtkResizeObserver>;

/// Follows `gtk::DrawingArea` size changes through its `resize` signal.
#[derive(Debug, Default)]
pub struct GtkResizeObserver {
    handlers: IndexMap<gtk::DrawingArea, SmallVec<[SignalHandlerId; 1]>>,
}

impl GtkResizeObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResizeObserver<gtk::DrawingArea> for GtkResizeObserver {
    fn bind(&mut self, element: &gtk::DrawingArea, callback: ResizeCallback) -> ChartResult<()> {
        let callback = RefCell::new(callback);
        let handler = element.connect_resize(move |_, width, height| {
            trace!(width, height, "drawing area resized");
            match callback.try_borrow_mut() {
                Ok(mut callback) => (*callback)(),
                Err(_) => warn!("skipping re-entrant resize callback"),
            }
        });
        self.handlers
            .entry(element.clone())
            .or_default()
            .push(handler);
        Ok(())
    }

    fn clear(&mut self, element: &gtk::DrawingArea) -> ChartResult<()> {
        if let Some(handlers) = self.handlers.shift_remove(element) {
            for handler in handlers {
                element.disconnect(handler);
            }
        }
        Ok(())
    }
}
