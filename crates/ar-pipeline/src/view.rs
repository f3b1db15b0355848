//! `ArView` — the event-driven AR view.

use std::path::PathBuf;

use ar_core::{ObservedState, PointOfInterest, PositionFix, ViewConfig};
use ar_feed::load_pois;
use ar_heading::{CompassTracker, HeadingEstimate, OrientationSample, StabilizerConfig};
use ar_layout::{LayoutParams, resolve_overlaps};
use ar_projection::{EdgeMode, Projector};
use ar_select::{SelectParams, Selector};
use tracing::{debug, info};

use crate::{
    Frame, FrameObserver, FrameStatus, NoopObserver, PipelineResult, RecomputeGate, UpdateThrottle,
};

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent builder for [`ArView`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                        |
/// |---------------------|--------------------------------|
/// | `.pois(v)`          | no POIs                        |
/// | `.feed(path)`       | none; loaded at build time     |
/// | `.observer(o)`      | `NoopObserver`                 |
/// | `.edge_mode(m)`     | `EdgeMode::Soft`               |
/// | `.collapse_groups()`| spread clusters vertically     |
/// | `.subscribed_at(t)` | `0` (sensor watchdog start)    |
///
/// # Example
///
/// ```rust,ignore
/// let mut view = ArViewBuilder::new(ViewConfig::phone())
///     .feed("pois.geojson")
///     .build()?;
/// view.on_position(now, fix);
/// view.on_orientation(now, &OrientationSample::from_alpha(alpha));
/// draw(view.frame());
/// ```
pub struct ArViewBuilder {
    config:        ViewConfig,
    pois:          Vec<PointOfInterest>,
    feed:          Option<PathBuf>,
    observer:      Option<Box<dyn FrameObserver>>,
    edge_mode:     EdgeMode,
    collapse:      bool,
    subscribed_at: u64,
}

impl ArViewBuilder {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            pois:          Vec::new(),
            feed:          None,
            observer:      None,
            edge_mode:     EdgeMode::Soft,
            collapse:      false,
            subscribed_at: 0,
        }
    }

    pub fn pois(mut self, pois: Vec<PointOfInterest>) -> Self {
        self.pois = pois;
        self
    }

    /// Load POIs from a GeoJSON or CSV file at build time, appended after any
    /// supplied with [`pois`](Self::pois).
    pub fn feed(mut self, path: impl Into<PathBuf>) -> Self {
        self.feed = Some(path.into());
        self
    }

    pub fn observer(mut self, observer: impl FrameObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn edge_mode(mut self, mode: EdgeMode) -> Self {
        self.edge_mode = mode;
        self
    }

    /// Merge same-category markers at similar distance into one badge.
    pub fn collapse_groups(mut self) -> Self {
        self.collapse = true;
        self
    }

    /// Clock value at which the orientation subscription started.  The
    /// fallback heading kicks in if no event arrives within the configured
    /// timeout of this.
    pub fn subscribed_at(mut self, now_ms: u64) -> Self {
        self.subscribed_at = now_ms;
        self
    }

    /// Validate the configuration, load the feed, and return a ready view.
    pub fn build(self) -> PipelineResult<ArView> {
        self.config.validate()?;
        let stabilizer = StabilizerConfig::from(&self.config);
        stabilizer.validate()?;

        let mut pois = self.pois;
        if let Some(path) = &self.feed {
            let report = load_pois(path)?;
            info!(
                path = %path.display(),
                loaded = report.len(),
                skipped = report.skipped.len(),
                "loaded POI feed"
            );
            pois.extend(report.into_pois());
        }

        let mut selector = Selector::new(pois, SelectParams::from(&self.config));
        if self.config.cache_capacity > 0 {
            selector = selector.with_cache(self.config.cache_capacity);
        }

        let projector = Projector { edge_mode: self.edge_mode, ..Projector::from(&self.config) };
        let layout = LayoutParams { collapse: self.collapse, ..LayoutParams::from(&self.config) };

        Ok(ArView {
            compass: CompassTracker::new(stabilizer, self.config.sensor_timeout_ms, self.subscribed_at),
            config: self.config,
            selector,
            projector,
            layout,
            latest_fix: None,
            applied_fix: None,
            fix_throttle: UpdateThrottle::default(),
            gate: RecomputeGate::default(),
            frame: Frame::default(),
            observer: self.observer.unwrap_or_else(|| Box::new(NoopObserver)),
        })
    }
}

// ── ArView ────────────────────────────────────────────────────────────────────

/// Owns every stage of the core and turns position, orientation and clock
/// events into [`Frame`]s.
///
/// Each event method returns `true` when it produced a new frame.  The most
/// recent frame is always available from [`frame`](Self::frame).
pub struct ArView {
    config:       ViewConfig,
    selector:     Selector,
    compass:      CompassTracker,
    projector:    Projector,
    layout:       LayoutParams,
    /// Newest accepted fix.
    latest_fix:   Option<PositionFix>,
    /// Fix the visible set was last selected for.  Trails `latest_fix` by at
    /// most the position recompute interval.
    applied_fix:  Option<PositionFix>,
    fix_throttle: UpdateThrottle,
    gate:         RecomputeGate,
    frame:        Frame,
    observer:     Box<dyn FrameObserver>,
}

impl ArView {
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn heading(&self) -> Option<HeadingEstimate> {
        self.compass.estimate()
    }

    pub fn compass(&self) -> &CompassTracker {
        &self.compass
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Snapshot the next frame will be computed from, if both position and
    /// heading are known.
    pub fn observed_state(&self) -> Option<ObservedState> {
        let fix = self.applied_fix?;
        let heading = self.compass.estimate()?;
        Some(ObservedState::from_fix(&fix, heading.heading_deg, heading.calibrated))
    }

    /// New geolocation fix.
    pub fn on_position(&mut self, now_ms: u64, fix: PositionFix) -> bool {
        if !self.fix_throttle.accept(now_ms) {
            self.observer.on_fix_discarded(now_ms);
            return false;
        }
        self.latest_fix = Some(fix);
        if self.gate.on_position(now_ms) {
            self.applied_fix = self.latest_fix;
            self.recompute(now_ms);
            return true;
        }
        false
    }

    /// New orientation event.  Every sample reaches the stabilizer; only the
    /// recompute is rate limited.
    pub fn on_orientation(&mut self, now_ms: u64, sample: &OrientationSample) -> bool {
        if self.compass.on_sample(now_ms, sample).is_none() {
            return false;
        }
        if self.gate.on_orientation(now_ms) {
            self.recompute(now_ms);
            return true;
        }
        false
    }

    /// Periodic clock tick (e.g. every 100 ms).  Advances the fallback
    /// heading when the sensor is silent and flushes held recomputes.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let simulated = self.compass.on_tick(now_ms).is_some();
        let position_due = self.gate.poll_position(now_ms);
        let orientation_due = self.gate.poll_orientation(now_ms);

        if position_due {
            self.applied_fix = self.latest_fix;
        }
        if simulated || position_due || orientation_due {
            self.recompute(now_ms);
            return true;
        }
        false
    }

    /// The platform has no orientation sensor or denied access to it.
    pub fn mark_sensor_unavailable(&mut self, now_ms: u64) {
        self.compass.mark_unavailable(now_ms);
        self.recompute(now_ms);
    }

    /// Replace the POI set and recompute immediately.
    pub fn replace_pois(&mut self, now_ms: u64, pois: Vec<PointOfInterest>) {
        self.selector.replace_pois(pois);
        self.recompute(now_ms);
    }

    /// Recompute unconditionally with the newest fix.
    pub fn refresh(&mut self, now_ms: u64) -> &Frame {
        self.applied_fix = self.latest_fix;
        self.recompute(now_ms);
        &self.frame
    }

    fn recompute(&mut self, now_ms: u64) {
        let heading = self.compass.estimate();
        let status_before = self.frame.status;

        let (markers, status) = match (self.applied_fix, heading) {
            (None, _) => (Vec::new(), FrameStatus::WaitingForPosition),
            (Some(_), None) => (Vec::new(), FrameStatus::WaitingForHeading),
            (Some(fix), Some(h)) => {
                let observed = ObservedState::from_fix(&fix, h.heading_deg, h.calibrated);
                let selected = self.selector.select(Some(&observed));
                let placed = self.projector.place_all(selected, observed.heading_deg, self.config.fov_deg);
                let markers = resolve_overlaps(placed, &self.layout);
                let status = if markers.is_empty() { FrameStatus::NoNearbyPoints } else { FrameStatus::Ready };
                (markers, status)
            }
        };

        debug!(markers = markers.len(), %status, "frame recomputed");
        self.frame = Frame { markers, heading, status, computed_at_ms: now_ms };

        if status != status_before {
            self.observer.on_status_change(status_before, status);
        }
        self.observer.on_frame(&self.frame);
    }
}
