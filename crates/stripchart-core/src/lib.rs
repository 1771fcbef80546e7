// File: crates/stripchart-core/src/lib.rs
// Summary: Core library entry point; exports the time-series buffer, streaming chart and surface contract.

pub mod chart;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod options;
pub mod recording;
pub mod scale;
pub mod schedule;
pub mod series;
pub mod stream;
pub mod surface;

pub use chart::{SeriesEntry, SharedChart, StreamingChart};
pub use color::Color;
pub use config::StreamConfig;
pub use error::{ChartError, Result};
pub use geometry::{Path, PathCmd, Point, Rect};
pub use options::{ChartOptions, GridOptions, LabelOptions, SeriesOptions, TimeSeriesOptions};
pub use recording::{DrawOp, RecordingSurface};
pub use scale::{TimeWindow, ValueScale};
pub use series::{Sample, SharedSeries, TimeSeries};
pub use stream::{stream_to, RenderLoop};
pub use surface::{DrawSurface, Stroke};
