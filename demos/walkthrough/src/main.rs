//! walkthrough: a two-minute walk through central Paris with the AR view.
//!
//! Drives `ArView` with a synthetic clock: a position fix every second, a
//! noisy compass sample every 50 ms and a tick every 100 ms.  The walker
//! looks around while heading north-east, the compass spikes now and then,
//! the sensor drops out for a few seconds to show the fallback heading, and
//! near the end the phone is raised upright long enough to lock the heading.
//!
//! ```text
//! cargo run -p walkthrough -- [config.json] [pois.geojson|pois.csv]
//! RUST_LOG=debug cargo run -p walkthrough
//! ```

mod city;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ar_core::{PositionFix, ViewConfig};
use ar_feed::load_pois;
use ar_heading::OrientationSample;
use ar_pipeline::{ArViewBuilder, Frame, FrameObserver, FrameStatus};

use city::{START, destination, synthetic_pois};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:            u64 = 7;
const FILLER_POIS:     usize = 80;
const WALK_MS:         u64 = 120_000;
const TICK_MS:         u64 = 100;
const SAMPLE_MS:       u64 = 50;
const FIX_MS:          u64 = 1_000;
const REPORT_MS:       u64 = 5_000;
const WALK_BEARING:    f64 = 45.0;
const WALK_SPEED_MPS:  f64 = 1.4;
const DROPOUT:         (u64, u64) = (60_000, 66_000); // compass silent in this window
const RAISED:          (u64, u64) = (90_000, 96_000); // phone held upright, past the tilt lock
const SPIKE_CHANCE:    f64 = 0.03;

// ── Observer ──────────────────────────────────────────────────────────────────

struct StatusPrinter;

impl FrameObserver for StatusPrinter {
    fn on_status_change(&mut self, from: FrameStatus, to: FrameStatus) {
        println!("  status: {from} -> {to}");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(Path::new(&path))?,
        None       => ViewConfig::phone(),
    };

    let mut rng = SmallRng::seed_from_u64(SEED);
    let mut pois = synthetic_pois(&mut rng, FILLER_POIS);
    if let Some(feed) = args.next() {
        let report = load_pois(Path::new(&feed)).with_context(|| format!("loading {feed}"))?;
        println!("Feed {feed}: {} POIs, {} skipped", report.len(), report.skipped.len());
        pois.extend(report.into_pois());
    }

    println!("=== walkthrough: AR POI view ===");
    println!(
        "POIs: {}  |  range: {} m  |  FOV: {}°  |  max markers: {}",
        pois.len(),
        config.max_distance_m,
        config.fov_deg,
        config.max_visible
    );
    println!();

    let mut view = ArViewBuilder::new(config)
        .pois(pois)
        .observer(StatusPrinter)
        .build()?;

    info!(seed = SEED, walk_ms = WALK_MS, "starting walk");
    let mut now = 0;
    while now <= WALK_MS {
        if now % FIX_MS == 0 {
            let here = destination(START, WALK_BEARING, WALK_SPEED_MPS * now as f64 / 1_000.0);
            let jitter = destination(here, rng.gen_range(0.0..360.0), rng.gen_range(0.0..4.0));
            view.on_position(now, PositionFix::new(jitter.lat, jitter.lon, 5.0));
        }

        let silent = (DROPOUT.0..DROPOUT.1).contains(&now);
        if now % SAMPLE_MS == 0 && !silent {
            view.on_orientation(now, &compass_sample(&mut rng, now));
        }

        if now % TICK_MS == 0 {
            view.tick(now);
        }

        if now % REPORT_MS == 0 {
            report(now, view.frame());
        }
        now += SAMPLE_MS;
    }

    let stabilizer = view.compass().stabilizer();
    println!();
    println!(
        "Compass: {} readings, {} accepted, {} rejected, calibrated: {}",
        stabilizer.readings_seen(),
        stabilizer.accepted(),
        stabilizer.rejected(),
        stabilizer.is_calibrated()
    );
    if let Some(stats) = view.selector().cache_stats() {
        println!("Geo cache: {} hits, {} misses, {} evictions", stats.hits, stats.misses, stats.evictions);
    }
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: &Path) -> Result<ViewConfig> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config: ViewConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// Where the walker is looking at `now_ms`: the walking direction, swept
/// ±40° with a 20 s period, plus sensor noise and the odd spike.
fn compass_sample(rng: &mut SmallRng, now_ms: u64) -> OrientationSample {
    let phase = now_ms as f64 / 20_000.0 * std::f64::consts::TAU;
    let mut heading = WALK_BEARING + 40.0 * phase.sin() + rng.gen_range(-3.0..3.0);
    if rng.gen_bool(SPIKE_CHANCE) {
        heading += 180.0;
    }
    // Mostly held at a reading angle, below the 45° discount threshold.
    let beta = if (RAISED.0..RAISED.1).contains(&now_ms) {
        rng.gen_range(86.0..90.0)
    } else {
        rng.gen_range(20.0..30.0)
    };
    OrientationSample::from_compass(heading.rem_euclid(360.0))
        .with_tilt(beta, rng.gen_range(-3.0..3.0))
}

fn report(now_ms: u64, frame: &Frame) {
    let heading = frame
        .heading
        .map_or_else(|| "none".to_owned(), |h| format!("{:6.1}° {}", h.heading_deg, h.status));
    println!("t={:>5.1}s  heading {heading}  [{}]", now_ms as f64 / 1_000.0, frame.status);

    // Front-most first for reading; the frame itself is back-to-front.
    for m in frame.markers.iter().rev() {
        let badge = m.group_count.map_or_else(String::new, |n| format!(" ×{n}"));
        println!(
            "    {:<28} {:>6.0} m  x={:.2}  dy={:>5.0}px  {:>3.0}px  {}{badge}",
            m.marker.poi.name,
            m.distance_m(),
            m.horizontal_position,
            m.vertical_offset_px,
            m.size_px,
            m.marker.poi.category.style().icon,
        );
    }
}
