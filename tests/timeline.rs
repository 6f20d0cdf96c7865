//! Rollover of windowed metrics driven by a manual clock.

use metricraft::prelude::*;
use serde_json::{json, Value};
use std::time::Duration;

const START: u64 = 1_502_442_000;

fn counts(meter: &Meter<Counter>) -> (Vec<f64>, f64) {
    let snap = meter.snapshot();
    let window = snap.as_window().expect("windowed meter");
    (window.counts(), window.total.count().unwrap_or(f64::NAN))
}

#[test]
fn test_counter_window_rollover() {
    let clock = ManualClock::new(Duration::from_secs(START));
    let meter = MetricBuilder::new()
        .window("3s1s")
        .clock(clock.shared())
        .build::<Counter>();

    assert_eq!(counts(&meter), (vec![0.0, 0.0, 0.0], 0.0));

    meter.add(1.0);
    assert_eq!(counts(&meter), (vec![1.0, 0.0, 0.0], 1.0));

    clock.set(Duration::from_secs(START + 1));
    assert_eq!(counts(&meter), (vec![0.0, 1.0, 0.0], 1.0));

    meter.add(5.0);
    assert_eq!(counts(&meter), (vec![5.0, 1.0, 0.0], 6.0));

    clock.set(Duration::from_secs(START + 3));
    assert_eq!(counts(&meter), (vec![0.0, 0.0, 5.0], 5.0));

    clock.set(Duration::from_secs(START + 10));
    assert_eq!(counts(&meter), (vec![0.0, 0.0, 0.0], 0.0));
}

#[test]
fn test_text_form_matches_structured_form() {
    let clock = ManualClock::new(Duration::from_secs(START));
    let meter = MetricBuilder::new()
        .window("3s1s")
        .clock(clock.shared())
        .build::<Counter>();
    meter.add(1.0);
    clock.advance(Duration::from_secs(1));
    meter.add(5.0);

    let expected = json!({
        "interval": 1.0,
        "total": {"type": "c", "count": 6.0},
        "samples": [
            {"type": "c", "count": 5.0},
            {"type": "c", "count": 1.0},
            {"type": "c", "count": 0.0},
        ],
    });

    let text: Value = serde_json::from_str(&meter.to_string()).unwrap();
    assert_eq!(text, expected);
    assert_eq!(meter.snapshot().to_value().unwrap(), expected);
}

#[test]
fn test_back_to_back_snapshots_identical() {
    let clock = ManualClock::new(Duration::from_secs(START));
    let meter = MetricBuilder::new()
        .window("1m1s")
        .clock(clock.shared())
        .build::<Histogram>();
    for i in 0..50_i32 {
        meter.add(f64::from(i));
        clock.advance(Duration::from_millis(250));
    }

    let first = meter.to_string();
    let second = meter.to_string();
    assert_eq!(first, second);
}

#[test]
fn test_composite_of_windows() {
    let clock = ManualClock::new(Duration::from_secs(START));
    let meter = MetricBuilder::new()
        .windows(["3s1s", "1m1s"])
        .clock(clock.shared())
        .build::<Counter>();

    for _ in 0..5 {
        meter.add(1.0);
        clock.advance(Duration::from_secs(1));
    }

    let snap = meter.snapshot();
    let metrics = &snap.as_composite().unwrap().metrics;

    // The short window has forgotten the first two seconds; the long one has not
    let short = metrics[0].as_window().unwrap();
    let long = metrics[1].as_window().unwrap();
    assert_eq!(short.counts(), vec![0.0, 1.0, 1.0]);
    assert_eq!(short.total.count(), Some(2.0));
    assert_eq!(long.total.count(), Some(5.0));
    assert_eq!(long.samples.len(), 60);
}

#[test]
fn test_gauge_window_total() {
    let clock = ManualClock::new(Duration::from_secs(START));
    let meter = MetricBuilder::new()
        .window("5m1m")
        .clock(clock.shared())
        .build::<Gauge>();

    meter.add(2.0);
    clock.advance(Duration::from_secs(60));
    meter.add(6.0);
    meter.add(4.0);

    let snap = meter.snapshot();
    let window = snap.as_window().unwrap();
    assert_eq!(window.interval, 60.0);
    assert_eq!(
        serde_json::to_value(&*window.total).unwrap(),
        json!({"type": "g", "mean": 4.0, "min": 2.0, "max": 6.0})
    );
    assert_eq!(
        serde_json::to_value(&window.samples[0]).unwrap(),
        json!({"type": "g", "mean": 5.0, "min": 4.0, "max": 6.0})
    );
}

#[test]
fn test_reset_clears_every_bucket() {
    let clock = ManualClock::new(Duration::from_secs(START));
    let meter = MetricBuilder::new()
        .window("3s1s")
        .clock(clock.shared())
        .build::<Counter>();
    meter.add(1.0);
    clock.advance(Duration::from_secs(1));
    meter.add(1.0);

    meter.reset();
    assert_eq!(counts(&meter), (vec![0.0, 0.0, 0.0], 0.0));
}
