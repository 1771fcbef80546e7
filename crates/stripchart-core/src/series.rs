// File: crates/stripchart-core/src/series.rs
// Summary: Append-only time-series buffer with running bounds, and its shared, timer-driven handle.
// Notes:
// - Only `StreamingChart::render` evicts samples. A host that keeps appending
//   without rendering grows the buffer linearly.
// - `reset_bounds` scans every retained sample, including the one expired
//   sample kept for the entering curve segment, so reported bounds can lag
//   the visible window until the next reset.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::error::Result;
use crate::options::TimeSeriesOptions;
use crate::schedule::{spawn_ticker, TickerHandle};

/// One `(timestamp, value)` observation. Timestamps are epoch milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub timestamp: i64,
    pub value: f64,
}

impl Sample {
    pub const fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

impl From<(i64, f64)> for Sample {
    fn from((timestamp, value): (i64, f64)) -> Self {
        Self { timestamp, value }
    }
}

/// Chronological sample buffer. Producers must append in non-decreasing
/// timestamp order; nothing is re-sorted.
#[derive(Clone, Debug, Default)]
pub struct TimeSeries {
    options: TimeSeriesOptions,
    data: VecDeque<Sample>,
    max_value: Option<f64>,
    min_value: Option<f64>,
}

impl TimeSeries {
    pub fn new(options: TimeSeriesOptions) -> Self {
        Self { options, ..Self::default() }
    }

    /// Build a series from existing samples with bounds already computed.
    pub fn from_samples(options: TimeSeriesOptions, samples: impl IntoIterator<Item = Sample>) -> Self {
        let mut s = Self::new(options);
        for sample in samples {
            s.append(sample.timestamp, sample.value);
        }
        s
    }

    pub fn append(&mut self, timestamp: i64, value: f64) {
        self.data.push_back(Sample { timestamp, value });
        self.max_value = Some(self.max_value.map_or(value, |m| m.max(value)));
        self.min_value = Some(self.min_value.map_or(value, |m| m.min(value)));
    }

    /// Recompute min/max from scratch over the retained samples.
    pub fn reset_bounds(&mut self) {
        self.max_value = None;
        self.min_value = None;
        for s in &self.data {
            self.max_value = Some(self.max_value.map_or(s.value, |m| m.max(s.value)));
            self.min_value = Some(self.min_value.map_or(s.value, |m| m.min(s.value)));
        }
    }

    /// Drop samples that lie entirely left of `left_edge`, keeping the newest
    /// expired one so the segment entering the window can still be drawn.
    /// Returns the number of dropped samples.
    pub fn drop_expired(&mut self, left_edge: f64) -> usize {
        let mut dropped = 0;
        while self.data.len() >= 2 && (self.data[1].timestamp as f64) < left_edge {
            self.data.pop_front();
            dropped += 1;
        }
        dropped
    }

    pub fn data(&self) -> &VecDeque<Sample> {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.data.front()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.data.back()
    }

    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    pub fn min_value(&self) -> Option<f64> {
        self.min_value
    }

    pub fn options(&self) -> &TimeSeriesOptions {
        &self.options
    }
}

pub(crate) fn lock_recovering<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("recovering poisoned lock");
        poisoned.into_inner()
    })
}

struct SeriesInner {
    series: Mutex<TimeSeries>,
    bounds_timer: Mutex<Option<TickerHandle<Weak<SeriesInner>>>>,
}

/// Thread-safe handle to a [`TimeSeries`]. Clones share the same buffer;
/// identity (for [`StreamingChart::remove_series`](crate::StreamingChart::remove_series))
/// is pointer identity.
#[derive(Clone)]
pub struct SharedSeries {
    inner: Arc<SeriesInner>,
}

impl SharedSeries {
    pub fn new(options: TimeSeriesOptions) -> Self {
        Self::from_series(TimeSeries::new(options))
    }

    pub fn from_series(series: TimeSeries) -> Self {
        Self {
            inner: Arc::new(SeriesInner {
                series: Mutex::new(series),
                bounds_timer: Mutex::new(None),
            }),
        }
    }

    /// Lock the buffer for reading or bulk mutation.
    pub fn lock(&self) -> MutexGuard<'_, TimeSeries> {
        lock_recovering(&self.inner.series)
    }

    pub fn append(&self, timestamp: i64, value: f64) {
        self.lock().append(timestamp, value);
    }

    pub fn reset_bounds(&self) {
        self.lock().reset_bounds();
    }

    /// `(min, max)` as currently tracked.
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        let s = self.lock();
        (s.min_value(), s.max_value())
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Start the bounds-reset timer if the series options enable it.
    /// Idempotent; returns whether a timer is running afterwards.
    pub fn start(&self) -> Result<bool> {
        let options = *self.lock().options();
        if !options.reset_bounds {
            return Ok(false);
        }
        let mut slot = lock_recovering(&self.inner.bounds_timer);
        if slot.as_ref().is_some_and(TickerHandle::is_running) {
            return Ok(true);
        }
        let interval = options.reset_interval();
        let handle = spawn_ticker(
            "stripchart-bounds-reset",
            interval,
            Arc::downgrade(&self.inner),
            |weak| {
                // The series is gone once every handle has been dropped.
                let inner = weak.upgrade()?;
                let mut series = lock_recovering(&inner.series);
                series.reset_bounds();
                tracing::trace!(len = series.len(), "bounds reset");
                Some(series.options().reset_interval())
            },
        )?;
        *slot = Some(handle);
        tracing::debug!(interval_ms = interval.as_millis() as u64, "bounds-reset timer started");
        Ok(true)
    }

    /// Cancel the bounds-reset timer and wait for it to finish.
    pub fn stop(&self) {
        let handle = lock_recovering(&self.inner.bounds_timer).take();
        if let Some(handle) = handle {
            handle.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        lock_recovering(&self.inner.bounds_timer)
            .as_ref()
            .is_some_and(TickerHandle::is_running)
    }
}

impl std::fmt::Debug for SharedSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.lock();
        f.debug_struct("SharedSeries")
            .field("len", &s.len())
            .field("min_value", &s.min_value())
            .field("max_value", &s.max_value())
            .finish()
    }
}
