use chart_view::api::{AdapterConfig, AdapterPhase, ChartView, ChartViewProps, LifecycleAdapter};
use chart_view::core::ChartOptions;
use chart_view::engine::{EngineCall, HeadlessElement, HeadlessEngine};
use chart_view::observer::ManualResizeObserver;
use proptest::prelude::*;
use serde_json::json;

fn series_options(values: &[i64]) -> ChartOptions {
    ChartOptions::new(json!({"series": [{"type": "bar", "data": values}]}))
}

proptest! {
    #[test]
    fn last_applied_options_are_what_the_engine_holds(
        batches in prop::collection::vec(prop::collection::vec(-1_000i64..1_000, 0..6), 1..12)
    ) {
        let engine = HeadlessEngine::new();
        let mut adapter = LifecycleAdapter::new(
            engine.clone(),
            ManualResizeObserver::<HeadlessElement>::new(),
            AdapterConfig::default(),
        );
        adapter.bind(Some(HeadlessElement::new(1, 400, 300))).expect("bind");

        for values in &batches {
            adapter.set_option(&series_options(values)).expect("set option");
        }

        let expected = series_options(batches.last().expect("non-empty batches"));
        let held = adapter.with_instance(|instance| instance.options().cloned());
        prop_assert_eq!(held, Some(Some(expected)));
        prop_assert_eq!(engine.instances_created(), 1);
    }

    #[test]
    fn dispose_any_number_of_times_disposes_once(repeats in 1usize..8, bind_first in any::<bool>()) {
        let engine = HeadlessEngine::new();
        let mut adapter = LifecycleAdapter::new(
            engine.clone(),
            ManualResizeObserver::<HeadlessElement>::new(),
            AdapterConfig::default(),
        );
        if bind_first {
            adapter.bind(Some(HeadlessElement::new(1, 400, 300))).expect("bind");
        }

        for _ in 0..repeats {
            adapter.dispose();
        }

        let disposals = engine
            .calls()
            .iter()
            .filter(|call| matches!(call, EngineCall::Dispose { .. }))
            .count();
        prop_assert_eq!(disposals, usize::from(bind_first));
        let expected_phase = if bind_first {
            AdapterPhase::Disposed
        } else {
            AdapterPhase::Uninitialized
        };
        prop_assert_eq!(adapter.phase(), expected_phase);
    }

    #[test]
    fn loading_overlay_tracks_the_latest_prop(flags in prop::collection::vec(any::<bool>(), 1..16)) {
        let engine = HeadlessEngine::new();
        let mut view = ChartView::new(
            engine.clone(),
            ManualResizeObserver::<HeadlessElement>::new(),
            ChartViewProps::new().with_size(200, 100).with_loading(flags[0]),
        );
        view.attach_element(Some(HeadlessElement::new(1, 200, 100)));
        view.mount();

        for flag in &flags[1..] {
            view.update(ChartViewProps::new().with_size(200, 100).with_loading(*flag));
        }

        let mut changes = flags.clone();
        changes.dedup();
        let toggles: Vec<bool> = engine
            .calls()
            .iter()
            .filter_map(|call| match call {
                EngineCall::ShowLoading { .. } => Some(true),
                EngineCall::HideLoading { .. } => Some(false),
                _ => None,
            })
            .collect();
        prop_assert_eq!(toggles, changes);
        let loading = view.adapter().with_instance(|instance| instance.is_loading());
        prop_assert_eq!(loading, Some(*flags.last().expect("non-empty flags")));
    }
}
