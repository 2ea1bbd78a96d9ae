//! Telemetry snapshot store and axis mapping.
//!
//! The store holds the latest robot state as a flat key/value map. Keys are
//! robot-defined and discovered dynamically; no schema is enforced beyond the
//! commonly expected `x`, `y`, `z`, `heading`. External transport code merges
//! partial updates in; the mapper and trail engine read the latest snapshot
//! out. There is no history: intermediate states between ticks are dropped
//! (last-write-wins).
//!
//! The store is owned by the session and passed by reference; subscribers are
//! notified synchronously after every merge so high-frequency updates stay
//! cheap.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::axis::Axis;

/// One telemetry value. Robots report numbers for pose channels but may
/// attach arbitrary text or flags under other keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TelemetryValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl TelemetryValue {
    /// Returns the value as a number, parsing numeric text if needed.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TelemetryValue::Number(n) => Some(*n),
            TelemetryValue::Text(s) => s.trim().parse().ok(),
            TelemetryValue::Bool(_) => None,
        }
    }
}

impl From<f64> for TelemetryValue {
    fn from(value: f64) -> Self {
        TelemetryValue::Number(value)
    }
}

impl From<&str> for TelemetryValue {
    fn from(value: &str) -> Self {
        TelemetryValue::Text(value.to_string())
    }
}

/// A flat snapshot of the latest robot state.
pub type TelemetrySnapshot = HashMap<String, TelemetryValue>;

/// Handle returned by [`SnapshotStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&TelemetrySnapshot)>;

/// The process-wide telemetry store: latest snapshot plus subscribers.
///
/// One instance per session, constructed by the application and passed by
/// reference to every consumer.
#[derive(Default)]
pub struct SnapshotStore {
    values: TelemetrySnapshot,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl SnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shallow-merges a partial update into the snapshot and notifies
    /// subscribers.
    pub fn set_state(&mut self, partial: TelemetrySnapshot) {
        for (key, value) in partial {
            self.values.insert(key, value);
        }
        self.notify();
    }

    /// Replaces the snapshot wholesale and notifies subscribers.
    pub fn replace(&mut self, snapshot: TelemetrySnapshot) {
        self.values = snapshot;
        self.notify();
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TelemetryValue> {
        self.values.get(key)
    }

    /// Returns the numeric value stored under `key`, if present and numeric.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(TelemetryValue::as_number)
    }

    /// Returns the current snapshot.
    ///
    /// Consumers must treat it as immutable for the duration of their tick.
    #[must_use]
    pub fn snapshot(&self) -> &TelemetrySnapshot {
        &self.values
    }

    /// Returns an iterator over the currently known keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Clears the snapshot. Subscribers are notified of the empty state.
    pub fn clear(&mut self) {
        self.values.clear();
        self.notify();
    }

    /// Registers a callback invoked after every snapshot change.
    pub fn subscribe(&mut self, listener: impl Fn(&TelemetrySnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a previously registered callback.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(lid, _)| *lid != id);
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.values);
        }
    }
}

impl std::fmt::Debug for SnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotStore")
            .field("values", &self.values)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Selects which telemetry key feeds each visual axis.
///
/// Assignment is exclusive: a key mapped to one axis is cleared from any
/// other axis it was previously assigned to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryMapping {
    pub x: Option<String>,
    pub y: Option<String>,
    pub z: Option<String>,
}

impl TelemetryMapping {
    /// Creates an empty mapping (no axis fed).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the key assigned to `axis`, if any.
    #[must_use]
    pub fn key(&self, axis: Axis) -> Option<&str> {
        match axis {
            Axis::X => self.x.as_deref(),
            Axis::Y => self.y.as_deref(),
            Axis::Z => self.z.as_deref(),
        }
    }

    /// Assigns `key` to `axis`, clearing any prior assignment of the same
    /// key on another axis. `None` unassigns the axis.
    pub fn assign(&mut self, axis: Axis, key: Option<String>) {
        if let Some(new_key) = &key {
            for other in Axis::ALL {
                if other != axis && self.key(other) == Some(new_key.as_str()) {
                    self.set(other, None);
                }
            }
        }
        self.set(axis, key);
    }

    /// Samples the mapped keys from `store` as a data-space point.
    ///
    /// Unassigned axes and missing or non-numeric values read as `0`.
    #[must_use]
    pub fn sample(&self, store: &SnapshotStore) -> glam::DVec3 {
        let component = |key: &Option<String>| {
            key.as_deref()
                .and_then(|k| store.number(k))
                .unwrap_or(0.0)
        };
        glam::DVec3::new(component(&self.x), component(&self.y), component(&self.z))
    }

    fn set(&mut self, axis: Axis, key: Option<String>) {
        match axis {
            Axis::X => self.x = key,
            Axis::Y => self.y = key,
            Axis::Z => self.z = key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn partial(pairs: &[(&str, f64)]) -> TelemetrySnapshot {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), TelemetryValue::Number(*v)))
            .collect()
    }

    #[test]
    fn test_shallow_merge() {
        let mut store = SnapshotStore::new();
        store.set_state(partial(&[("x", 1.0), ("y", 2.0)]));
        store.set_state(partial(&[("y", 5.0)]));
        assert_eq!(store.number("x"), Some(1.0));
        assert_eq!(store.number("y"), Some(5.0));
    }

    #[test]
    fn test_replace_drops_old_keys() {
        let mut store = SnapshotStore::new();
        store.set_state(partial(&[("x", 1.0)]));
        store.replace(partial(&[("y", 2.0)]));
        assert!(store.get("x").is_none());
        assert_eq!(store.number("y"), Some(2.0));
    }

    #[test]
    fn test_numeric_text_parses() {
        let mut store = SnapshotStore::new();
        store.set_state(
            [("h".to_string(), TelemetryValue::Text("3.5".to_string()))]
                .into_iter()
                .collect(),
        );
        assert_eq!(store.number("h"), Some(3.5));
    }

    #[test]
    fn test_subscribe_notify_unsubscribe() {
        let mut store = SnapshotStore::new();
        let count = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&count);
        let id = store.subscribe(move |_| seen.set(seen.get() + 1));

        store.set_state(partial(&[("x", 1.0)]));
        assert_eq!(count.get(), 1);

        store.unsubscribe(id);
        store.set_state(partial(&[("x", 2.0)]));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_mapping_exclusivity() {
        let mut mapping = TelemetryMapping::new();
        mapping.assign(Axis::X, Some("pose_x".to_string()));
        mapping.assign(Axis::Y, Some("pose_x".to_string()));
        assert_eq!(mapping.key(Axis::X), None);
        assert_eq!(mapping.key(Axis::Y), Some("pose_x"));
    }

    #[test]
    fn test_mapping_sample_defaults_to_zero() {
        let mut store = SnapshotStore::new();
        store.set_state(partial(&[("a", 4.0)]));
        let mut mapping = TelemetryMapping::new();
        mapping.assign(Axis::X, Some("a".to_string()));
        mapping.assign(Axis::Z, Some("missing".to_string()));
        assert_eq!(mapping.sample(&store), glam::DVec3::new(4.0, 0.0, 0.0));
    }
}
