//! Uniform vs forward-decay samples over a stream whose level shifts.
//!
//! Both see 20 minutes of ~100ms latencies, then 2 minutes of ~400ms. The
//! uniform sample still reflects the whole stream; the forward-decay sample
//! leans towards the recent regime.

use std::time::{Duration, Instant};

use hakari::{
    ExpDecaySample, Histogram, MetricsConfig, SampleConfig, Statistics, UniformSample,
    DEFAULT_ALPHA,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let uniform = UniformSample::new(1028);
    let decay = ExpDecaySample::new(1028, DEFAULT_ALPHA)?;

    let start = Instant::now();
    let tick = Duration::from_millis(100);
    for i in 0..14_400u32 {
        let now = start + tick * i;
        let level = if i < 12_000 { 100.0 } else { 400.0 };
        let v = level + rng.random_range(-20.0..20.0);
        uniform.update_with_rng(v, &mut rng);
        decay.update_at_with_rng(now, v, &mut rng);
    }

    let ps = [0.5, 0.75, 0.99];
    report("uniform", &uniform, &ps);
    report("exp-decay", &decay, &ps);

    // Switching metrics off hands out inert samples instead.
    let off: Histogram = MetricsConfig::disabled().histogram(&SampleConfig::default())?;
    report("disabled", &off, &ps);

    Ok(())
}

fn report(name: &str, s: &dyn Statistics, ps: &[f64]) {
    let q = s.percentiles(ps);
    println!(
        "{name:>10}: count={:6} size={:5} mean={:8.2} stddev={:7.2} p50={:7.2} p75={:7.2} p99={:7.2}",
        s.count(),
        s.size(),
        s.mean(),
        s.std_dev(),
        q[0],
        q[1],
        q[2]
    );
}
