use serde::{Deserialize, Serialize};
use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<ViewMetrics>,
}

/// Counters accumulated by one view instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewMetrics {
    pub ticks: usize,
    pub designations_created: usize,
    pub designations_removed: usize,
    pub clicks_discarded: usize,
    pub map_swaps: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ViewMetrics::default()),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut ViewMetrics)) {
        if let Ok(mut metrics) = self.inner.lock() {
            apply(&mut metrics);
        }
    }

    pub fn record_tick(&self) {
        self.update(|m| m.ticks += 1);
    }

    pub fn record_designation(&self) {
        self.update(|m| m.designations_created += 1);
    }

    pub fn record_removal(&self, count: usize) {
        self.update(|m| m.designations_removed += count);
    }

    pub fn record_discard(&self) {
        self.update(|m| m.clicks_discarded += 1);
    }

    pub fn record_map_swap(&self) {
        self.update(|m| m.map_swaps += 1);
    }

    pub fn snapshot(&self) -> ViewMetrics {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            ViewMetrics::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MetricsRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsRecorder")
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let recorder = MetricsRecorder::new();
        recorder.record_tick();
        recorder.record_tick();
        recorder.record_designation();
        recorder.record_removal(3);
        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.ticks, 2);
        assert_eq!(snapshot.designations_created, 1);
        assert_eq!(snapshot.designations_removed, 3);
    }
}
