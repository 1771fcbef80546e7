// File: crates/stripchart-core/src/config.rs
// Summary: TOML configuration file describing a chart and the series it plots.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chart::StreamingChart;
use crate::error::{ChartError, Result};
use crate::options::{ChartOptions, SeriesOptions, TimeSeriesOptions};
use crate::series::SharedSeries;

/// Root of a stripchart TOML file.
///
/// ```toml
/// [chart]
/// millis_per_pixel = 20
/// [chart.grid]
/// stroke_style = "rgb(125, 0, 0)"
///
/// [[series]]
/// name = "events"
/// stroke_style = "#00ff00"
/// fill_style = "rgba(0, 255, 0, 0.4)"
/// line_width = 3
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub chart: ChartOptions,
    pub series: Vec<SeriesConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesConfig {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub buffer: TimeSeriesOptions,
    #[serde(flatten)]
    pub draw: SeriesOptions,
}

impl StreamConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|e| ChartError::Config(format!("TOML parse error: {e}")))?;
        config.chart.validate()?;
        for sc in &config.series {
            sc.buffer
                .validate()
                .map_err(|e| ChartError::Config(format!("series '{}': {e}", sc.name)))?;
        }
        Ok(config)
    }

    /// Build the chart plus one (not yet started) series per `[[series]]` entry,
    /// in file order.
    pub fn build(&self) -> (StreamingChart, Vec<(String, SharedSeries)>) {
        let mut chart = StreamingChart::new(self.chart);
        let mut handles = Vec::with_capacity(self.series.len());
        for sc in &self.series {
            let series = SharedSeries::new(sc.buffer);
            chart.add_series(&series, sc.draw);
            handles.push((sc.name.clone(), series));
        }
        (chart, handles)
    }
}

/// Load configuration from a TOML file. Returns `StreamConfig::default()` if
/// the file doesn't exist.
pub fn load(path: impl AsRef<Path>) -> Result<StreamConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!("Config file not found at '{}'; using defaults.", path.display());
        return Ok(StreamConfig::default());
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ChartError::Config(format!("cannot read '{}': {e}", path.display())))?;
    let config = StreamConfig::from_toml_str(&raw)?;
    tracing::info!(path = %path.display(), series = config.series.len(), "loaded config");
    Ok(config)
}
