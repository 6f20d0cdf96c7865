//! Feeds a handful of windowed metrics with random and timed data, then prints them.
//!
//! Time is simulated with a [`ManualClock`] so the run finishes instantly while still
//! spanning several minutes of windows.
//!
//! ```text
//! cargo run --example random_walk
//! ```

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use metricraft::prelude::*;
use rand::Rng;

fn fibrec(n: u32) -> u64 {
    if n <= 1 {
        u64::from(n)
    } else {
        fibrec(n - 1) + fibrec(n - 2)
    }
}

fn windowed(clock: &ManualClock, windows: &[&str]) -> MetricBuilder {
    MetricBuilder::new().windows(windows).clock(clock.shared())
}

fn main() -> Result<()> {
    let clock = ManualClock::new(Duration::from_secs(1_502_442_000));

    let mut metrics: BTreeMap<&str, Box<dyn Metric>> = BTreeMap::new();

    // How long a recursive Fibonacci takes and how often it ran
    metrics.insert(
        "fib:rec:sec",
        Box::new(windowed(&clock, &["120s1s", "15m10s", "1h1m"]).build::<Histogram>()),
    );
    metrics.insert(
        "fib:rec:count",
        Box::new(windowed(&clock, &["120s1s", "15m10s", "1h1m"]).build::<Counter>()),
    );

    // Random numbers always look nice on graphs
    metrics.insert("random:gauge", Box::new(windowed(&clock, &["60s1s"]).build::<Gauge>()));
    metrics.insert(
        "random:hist",
        Box::new(windowed(&clock, &["2m1s", "15m30s", "1h1m"]).build::<Histogram>()),
    );

    // The same kind of definition, read from configuration
    let config: MetricConfig =
        serde_json::from_str(r#"{"kind": "gauge", "windows": ["2ms1s", "15m30s", "1h1m"]}"#)?;
    metrics.insert("walk:position", config.build_with_clock(clock.shared()));

    let mut rng = rand::thread_rng();
    let mut position = 0.0_f64;

    // Five simulated minutes in 123ms steps
    for step in 0..2_440_u32 {
        clock.advance(Duration::from_millis(123));

        metrics["random:gauge"].add(rng.gen::<f64>());
        metrics["random:hist"].add(rng.gen::<f64>() * 100.0);

        position += if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        metrics["walk:position"].add(position);

        if step % 100 == 0 {
            metrics["fib:rec:count"].add(1.0);
            let start = Instant::now();
            let n = fibrec(20 + step % 7);
            metrics["fib:rec:sec"].add(start.elapsed().as_secs_f64());
            std::hint::black_box(n);
        }
    }

    for (name, metric) in &metrics {
        let snapshot = metric.snapshot();
        match snapshot.as_composite() {
            Some(composite) => {
                for (i, window) in composite.metrics.iter().enumerate() {
                    if let Some(view) = window.as_window() {
                        println!("{name}[{i}] interval={}s total={}", view.interval, view.total);
                    }
                }
            }
            None => println!("{name} {snapshot}"),
        }
    }

    println!();
    println!("{}", metrics["random:gauge"].snapshot().to_json_pretty()?);
    Ok(())
}
