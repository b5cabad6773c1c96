//! First-load timing of a list view
//!
//! [`PerformanceRecorder`] is a cheap, cloneable handle. The controller and
//! the app runner each hold a clone and mark milestones explicitly, so two
//! lists never share hidden timing state.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

pub enum Message {
    /// Measurement (re)started
    Started { now: Option<Instant> },
    /// The first page with items arrived
    FirstDataReceived {
        now: Option<Instant>,
        item_count: usize,
    },
    /// The first frame was drawn
    FirstRendered { now: Option<Instant> },
    /// The first frame showing list items was drawn
    MeaningfulPaint { now: Option<Instant> },
}

/// Milestones in milliseconds since the measurement started
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub first_render_ms: Option<f64>,
    pub fmp_ms: Option<f64>,
    pub data_load_ms: Option<f64>,
    pub list_item_count: usize,
}

/// Timing state behind the recorder handle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timings {
    started_at: Option<Instant>,
    metrics: PerformanceMetrics,
}

impl Timings {
    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Started { now } => {
                self.started_at = Some(now.unwrap_or_else(Instant::now));
                self.metrics = PerformanceMetrics::default();
            }
            Message::FirstDataReceived { now, item_count } => {
                if self.metrics.data_load_ms.is_none() {
                    self.metrics.data_load_ms = self.elapsed_ms(now);
                    if self.metrics.data_load_ms.is_some() {
                        self.metrics.list_item_count = item_count;
                    }
                }
            }
            Message::FirstRendered { now } => {
                if self.metrics.first_render_ms.is_none() {
                    self.metrics.first_render_ms = self.elapsed_ms(now);
                }
            }
            Message::MeaningfulPaint { now } => {
                if self.metrics.fmp_ms.is_none() {
                    self.metrics.fmp_ms = self.elapsed_ms(now);
                }
            }
        }
    }

    fn elapsed_ms(&self, now: Option<Instant>) -> Option<f64> {
        let started_at = self.started_at?;
        let now = now.unwrap_or_else(Instant::now);
        Some(as_millis(now.saturating_duration_since(started_at)))
    }
}

fn as_millis(duration: Duration) -> f64 {
    duration.as_micros() as f64 / 1000.0
}

/// Shared handle to one list's timings
#[derive(Debug, Clone, Default)]
pub struct PerformanceRecorder {
    timings: Arc<Mutex<Timings>>,
}

impl PerformanceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, message: Message) {
        self.timings.lock().update(message);
    }

    pub fn start(&self) {
        self.record(Message::Started { now: None });
    }

    pub fn mark_first_data(&self, item_count: usize) {
        self.record(Message::FirstDataReceived {
            now: None,
            item_count,
        });
    }

    pub fn mark_first_render(&self) {
        self.record(Message::FirstRendered { now: None });
    }

    pub fn mark_meaningful_paint(&self) {
        self.record(Message::MeaningfulPaint { now: None });
    }

    pub fn is_started(&self) -> bool {
        self.timings.lock().is_started()
    }

    pub fn metrics(&self) -> PerformanceMetrics {
        self.timings.lock().metrics().clone()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_marks_before_start_are_dropped() {
        let recorder = PerformanceRecorder::new();
        recorder.mark_first_data(10);
        recorder.mark_first_render();
        assert!(!recorder.is_started());
        assert_eq!(recorder.metrics(), PerformanceMetrics::default());
    }

    #[test]
    fn test_milestones_are_relative_to_start() {
        let recorder = PerformanceRecorder::new();
        let start = Instant::now();
        recorder.record(Message::Started { now: Some(start) });
        recorder.record(Message::FirstRendered {
            now: Some(start + Duration::from_millis(40)),
        });
        recorder.record(Message::FirstDataReceived {
            now: Some(start + Duration::from_millis(120)),
            item_count: 10,
        });
        recorder.record(Message::MeaningfulPaint {
            now: Some(start + Duration::from_millis(150)),
        });

        let metrics = recorder.metrics();
        assert_eq!(metrics.first_render_ms, Some(40.0));
        assert_eq!(metrics.data_load_ms, Some(120.0));
        assert_eq!(metrics.fmp_ms, Some(150.0));
        assert_eq!(metrics.list_item_count, 10);
    }

    #[test]
    fn test_each_mark_is_recorded_once() {
        let recorder = PerformanceRecorder::new();
        let start = Instant::now();
        recorder.record(Message::Started { now: Some(start) });
        recorder.record(Message::FirstDataReceived {
            now: Some(start + Duration::from_millis(100)),
            item_count: 10,
        });
        recorder.record(Message::FirstDataReceived {
            now: Some(start + Duration::from_millis(900)),
            item_count: 20,
        });

        let metrics = recorder.metrics();
        assert_eq!(metrics.data_load_ms, Some(100.0));
        assert_eq!(metrics.list_item_count, 10);
    }

    #[test]
    fn test_restart_clears_metrics() {
        let recorder = PerformanceRecorder::new();
        recorder.start();
        recorder.mark_first_data(10);
        recorder.start();
        assert_eq!(recorder.metrics(), PerformanceMetrics::default());
    }

    #[test]
    fn test_clones_share_timings() {
        let recorder = PerformanceRecorder::new();
        let handle = recorder.clone();
        recorder.start();
        handle.mark_first_render();
        assert!(recorder.metrics().first_render_ms.is_some());
    }
}
