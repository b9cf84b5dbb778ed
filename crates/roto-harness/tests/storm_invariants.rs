//! Seeded storms: every rest position is in bounds, and runs are reproducible.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use roto_core::{
    AnimationPort, Bounds, MotionConfig, MotionController, MotionEvent, SteppedAnimator,
    StripLayout, TransitionAnimator,
};
use roto_harness::{TraceRecorder, parse_jsonl, run_storm};
use tracing_subscriber::layer::SubscriberExt;

fn strip<A: AnimationPort>(port: A, items: usize) -> MotionController<StripLayout, A> {
    MotionController::new(
        MotionConfig::default(),
        StripLayout::uniform(items, 100.0, 300.0),
        port,
    )
    .expect("valid")
}

fn assert_rests_in_bounds(rec: &TraceRecorder, bounds: Bounds) {
    for line in rec.lines() {
        if line.state == "ready" {
            assert!(
                line.offset >= bounds.min - 1e-9 && line.offset <= bounds.max + 1e-9,
                "seq {} at {}ms rests at {} outside {:?}",
                line.seq,
                line.at_ms,
                line.offset,
                bounds
            );
        }
    }
}

#[test]
fn rests_stay_in_bounds_on_both_backends() {
    for seed in [1, 42, 0xDEAD_BEEF] {
        let mut a = strip(TransitionAnimator::new(0.0), 8);
        let rec = run_storm(&mut a, seed, 400);
        assert_rests_in_bounds(&rec, a.bounds());

        let mut b = strip(SteppedAnimator::new(0.0), 8);
        let rec = run_storm(&mut b, seed, 400);
        assert_rests_in_bounds(&rec, b.bounds());
    }
}

#[test]
fn same_seed_same_checksum() {
    let a = run_storm(&mut strip(TransitionAnimator::new(0.0), 6), 99, 300);
    let b = run_storm(&mut strip(TransitionAnimator::new(0.0), 6), 99, 300);
    assert_eq!(a.checksum(), b.checksum());
    assert_eq!(a.to_jsonl(), b.to_jsonl());

    let c = run_storm(&mut strip(TransitionAnimator::new(0.0), 6), 100, 300);
    assert_ne!(a.checksum(), c.checksum());
}

#[test]
fn storm_trace_parses_back() {
    let rec = run_storm(&mut strip(SteppedAnimator::new(0.0), 5), 7, 150);
    let parsed = parse_jsonl(&rec.to_jsonl()).expect("valid jsonl");
    assert_eq!(parsed, rec.lines());
    let mut last = 0;
    for line in &parsed {
        assert!(line.at_ms >= last, "time went backwards at seq {}", line.seq);
        last = line.at_ms;
    }
}

#[test]
fn storm_ends_at_rest_with_consistent_reachability() {
    let mut c = strip(TransitionAnimator::new(0.0), 8);
    let rec = run_storm(&mut c, 2024, 500);
    let last = rec.lines().last().expect("non-empty trace");
    assert_eq!(last.state, "ready");

    let reported = rec.events().into_iter().rev().find_map(|event| match event {
        MotionEvent::Reachability(r) => Some(r),
        MotionEvent::Changed { .. } => None,
    });
    assert_eq!(reported, Some(c.reachability()));
}

#[test]
fn empty_strip_always_rests_at_zero() {
    let mut c = strip(TransitionAnimator::new(0.0), 0);
    let rec = run_storm(&mut c, 5, 200);
    assert!(rec.changed_indices().is_empty(), "no item to report");
    assert!(
        rec.lines()
            .iter()
            .filter(|l| l.state == "ready")
            .all(|l| l.offset == 0.0)
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_seed_rests_in_bounds(seed in any::<u64>(), items in 0usize..12) {
        let mut c = strip(TransitionAnimator::new(0.0), items);
        let rec = run_storm(&mut c, seed, 120);
        let bounds = c.bounds();
        for line in rec.lines().iter().filter(|l| l.state == "ready") {
            prop_assert!(
                line.offset >= bounds.min - 1e-9 && line.offset <= bounds.max + 1e-9,
                "offset {} outside {:?}", line.offset, bounds
            );
        }
    }
}

// ============================================================================
// Tracing
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    fields: HashMap<String, String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
    spans: Arc<Mutex<Vec<String>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.spans
            .lock()
            .unwrap()
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            fields: visitor.0.into_iter().collect(),
        });
    }
}

#[test]
fn storm_reports_its_checksum() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let spans = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCapture {
        events: Arc::clone(&events),
        spans: Arc::clone(&spans),
    });

    let rec = tracing::subscriber::with_default(subscriber, || {
        run_storm(&mut strip(TransitionAnimator::new(0.0), 5), 11, 80)
    });

    assert!(spans.lock().unwrap().iter().any(|name| name == "roto.storm"));
    let events = events.lock().unwrap();
    let complete = events
        .iter()
        .find(|e| e.fields.get("message").map(String::as_str) == Some("harness.storm_complete"))
        .expect("completion logged");
    assert_eq!(complete.fields.get("checksum"), Some(&rec.checksum()));
    assert_eq!(
        complete.fields.get("lines"),
        Some(&rec.lines().len().to_string())
    );
}
