//! Motion trail buffer with retention policies and fade computation.
//!
//! The trail is an append-only, capacity-bounded sequence of markers: either
//! timestamped visual-space points or break sentinels separating visually
//! disjoint segments (no line is drawn across a break).
//!
//! Two retention policies exist. `Controllable` is manual start/stop: points
//! accumulate while not paused and persist until an explicit clear.
//! `Temporary` is a rolling window, aged either by update count or by
//! seconds. Switching mode or unit is a destructive reset.

use std::collections::VecDeque;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Default capacity bound of the trail buffer, in markers.
pub const MAX_TRAIL_POINTS: usize = 10_000;

/// Per-axis absolute difference under which a new point is considered a
/// duplicate of the last stored point.
pub const DUPLICATE_EPSILON: f64 = 1e-4;

/// Floor of the seconds-unit retention window.
const MIN_SECONDS_WINDOW: f64 = 0.05;

/// Retention policy of the trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailMode {
    /// Manual start/stop; the buffer persists until cleared.
    Controllable,
    /// Rolling window aged by [`TemporalUnit`].
    Temporary,
}

/// Aging unit for the `Temporary` retention policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalUnit {
    Updates,
    Seconds,
}

/// A timestamped visual-space trail point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    /// Position in visual space.
    pub pos: DVec3,
    /// Elapsed-seconds timestamp at admission.
    pub t: f64,
}

/// One element of the trail buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrailMarker {
    Point(TrailPoint),
    /// Discontinuity sentinel; segments on either side must not be joined.
    Break,
}

impl TrailMarker {
    /// Returns the contained point, if this marker is not a break.
    #[must_use]
    pub fn point(&self) -> Option<&TrailPoint> {
        match self {
            TrailMarker::Point(p) => Some(p),
            TrailMarker::Break => None,
        }
    }

    /// Returns true if this marker is a break sentinel.
    #[must_use]
    pub fn is_break(&self) -> bool {
        matches!(self, TrailMarker::Break)
    }
}

/// The trail buffer and its admission/retention state.
#[derive(Debug)]
pub struct TrailEngine {
    markers: VecDeque<TrailMarker>,
    mode: TrailMode,
    unit: TemporalUnit,
    /// Window length: a count when unit is `Updates`, seconds otherwise.
    temp_length: f64,
    paused: bool,
    pending_break: bool,
    max_points: usize,
}

impl Default for TrailEngine {
    fn default() -> Self {
        Self {
            markers: VecDeque::new(),
            mode: TrailMode::Controllable,
            unit: TemporalUnit::Updates,
            temp_length: 100.0,
            paused: false,
            pending_break: false,
            max_points: MAX_TRAIL_POINTS,
        }
    }
}

impl TrailEngine {
    /// Creates a trail engine with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current retention mode.
    #[must_use]
    pub fn mode(&self) -> TrailMode {
        self.mode
    }

    /// Sets the retention mode. Changing it clears the buffer.
    pub fn set_mode(&mut self, mode: TrailMode) {
        if mode != self.mode {
            log::debug!("trail mode changed, clearing buffer");
            self.clear();
        }
        self.mode = mode;
    }

    /// Returns the temporal aging unit.
    #[must_use]
    pub fn unit(&self) -> TemporalUnit {
        self.unit
    }

    /// Sets the temporal aging unit. Changing it clears the buffer.
    pub fn set_unit(&mut self, unit: TemporalUnit) {
        if unit != self.unit {
            log::debug!("trail unit changed, clearing buffer");
            self.clear();
        }
        self.unit = unit;
    }

    /// Returns the rolling-window length.
    #[must_use]
    pub fn temp_length(&self) -> f64 {
        self.temp_length
    }

    /// Sets the rolling-window length (count or seconds per the unit).
    pub fn set_temp_length(&mut self, length: f64) {
        self.temp_length = length;
    }

    /// Overrides the marker capacity bound.
    pub fn set_max_points(&mut self, max_points: usize) {
        self.max_points = max_points.max(1);
        self.trim_capacity();
    }

    /// Returns whether admission is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stops admitting points in `Controllable` mode. Buffered state persists.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes admission. The next admitted point starts a new segment so the
    /// gap is not visually connected.
    pub fn resume(&mut self) {
        self.paused = false;
        self.pending_break = true;
    }

    /// Requests a break sentinel before the next admitted point.
    pub fn request_break(&mut self) {
        self.pending_break = true;
    }

    /// Clears the buffer.
    pub fn clear(&mut self) {
        self.markers.clear();
        self.pending_break = false;
    }

    /// Offers a newly mapped visual-space point to the trail at elapsed time
    /// `now`. Returns whether the point was admitted.
    pub fn push(&mut self, pos: DVec3, now: f64) -> bool {
        if self.mode == TrailMode::Controllable && self.paused {
            return false;
        }
        if let Some(last) = self.last_point() {
            if (pos - last.pos).abs().max_element() <= DUPLICATE_EPSILON {
                return false;
            }
        }
        if self.pending_break {
            if !self.markers.is_empty() {
                self.markers.push_back(TrailMarker::Break);
            }
            self.pending_break = false;
        }
        self.markers
            .push_back(TrailMarker::Point(TrailPoint { pos, t: now }));
        self.trim_capacity();
        if self.mode == TrailMode::Temporary {
            self.apply_retention(now);
        }
        true
    }

    /// Expires aged-out points. `push` applies this after every admission;
    /// callers tick it independently so a stationary robot still fades.
    pub fn apply_retention(&mut self, now: f64) {
        if self.mode != TrailMode::Temporary {
            return;
        }
        match self.unit {
            TemporalUnit::Updates => {
                let keep = self.window_count();
                let mut seen = 0usize;
                let mut keep_from = None;
                for (i, marker) in self.markers.iter().enumerate().rev() {
                    if !marker.is_break() {
                        seen += 1;
                        if seen == keep {
                            keep_from = Some(i);
                            break;
                        }
                    }
                }
                // Truncate everything before the oldest in-window point,
                // including any breaks immediately preceding it.
                if let Some(from) = keep_from {
                    if from > 0 {
                        self.markers.drain(..from);
                    }
                }
            }
            TemporalUnit::Seconds => {
                let window = self.window_seconds();
                self.markers.retain(|marker| match marker {
                    TrailMarker::Break => true,
                    TrailMarker::Point(p) => now - p.t <= window,
                });
            }
        }
    }

    /// Fade factor in `[0, 1]` for the marker at `index`.
    ///
    /// `Controllable` trails never fade. Break markers report full opacity;
    /// they are never drawn.
    #[must_use]
    pub fn alpha(&self, index: usize, now: f64) -> f64 {
        if self.mode == TrailMode::Controllable {
            return 1.0;
        }
        let Some(marker) = self.markers.get(index) else {
            return 0.0;
        };
        match self.unit {
            TemporalUnit::Updates => {
                if marker.is_break() {
                    return 1.0;
                }
                let age = self
                    .markers
                    .iter()
                    .skip(index + 1)
                    .filter(|m| !m.is_break())
                    .count();
                let span = self.window_count().saturating_sub(1).max(1);
                clamp01(1.0 - age as f64 / span as f64)
            }
            TemporalUnit::Seconds => match marker.point() {
                Some(p) => clamp01(1.0 - (now - p.t) / self.window_seconds()),
                None => 1.0,
            },
        }
    }

    /// Returns the markers, oldest first.
    pub fn markers(&self) -> impl Iterator<Item = &TrailMarker> {
        self.markers.iter()
    }

    /// Total marker count, breaks included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Returns true if the buffer holds no markers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Number of point markers in the buffer.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.markers.iter().filter(|m| !m.is_break()).count()
    }

    /// Splits the buffer into contiguous segments at break markers.
    ///
    /// Empty runs between consecutive breaks are dropped.
    #[must_use]
    pub fn segments(&self) -> Vec<Vec<TrailPoint>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for marker in &self.markers {
            match marker {
                TrailMarker::Point(p) => current.push(*p),
                TrailMarker::Break => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    fn last_point(&self) -> Option<&TrailPoint> {
        self.markers.iter().rev().find_map(TrailMarker::point)
    }

    fn trim_capacity(&mut self) {
        while self.markers.len() > self.max_points {
            self.markers.pop_front();
        }
    }

    fn window_count(&self) -> usize {
        self.temp_length.floor().max(1.0) as usize
    }

    fn window_seconds(&self) -> f64 {
        self.temp_length.max(MIN_SECONDS_WINDOW)
    }
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
