//! Mounts a 500x500 weekly line chart on the headless engine, resizes its
//! container once, unmounts, and prints the engine call log as JSON.

use chart_view::api::{ChartView, ChartViewProps};
use chart_view::core::ChartOptions;
use chart_view::engine::{HeadlessElement, HeadlessEngine};
use chart_view::observer::ManualResizeObserver;
use chart_view::telemetry::init_default_tracing;
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = init_default_tracing();

    let option = ChartOptions::new(json!({
        "xAxis": {
            "type": "category",
            "data": ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        },
        "yAxis": {"type": "value"},
        "series": [{"data": [15, 230, 224, 218, 135, 147, 260], "type": "line"}]
    }));

    let engine = HeadlessEngine::new();
    let observer = ManualResizeObserver::<HeadlessElement>::new();
    let element = HeadlessElement::new(1, 1280, 720);
    let mut view = ChartView::new(
        engine.clone(),
        observer.clone(),
        ChartViewProps::new().with_size(500, 500).with_option(option),
    );

    println!("container: {}", serde_json::to_string(&view.render())?);
    view.attach_element(Some(element.clone()));
    view.mount();

    element.set_size(640, 480);
    observer.notify(&element);

    view.unmount();
    println!("stats: {}", serde_json::to_string(&view.adapter().stats())?);
    println!("{}", serde_json::to_string_pretty(&engine.calls())?);
    Ok(())
}
