// File: crates/demo/src/main.rs
// Summary: Demo feeds synthetic or CSV-replayed samples into a streaming chart and writes PNG frames.

mod signal;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use stripchart_core::recording::replay_ops;
use stripchart_core::schedule::now_millis;
use stripchart_core::{
    config, Color, DrawOp, RecordingSurface, SeriesOptions, SharedSeries, StreamConfig, StreamingChart,
    TimeSeriesOptions,
};
use stripchart_render_skia::SkiaSurface;
use tracing_subscriber::EnvFilter;

use signal::{RandomWalk, Source};

const USAGE: &str = "usage: stripchart-demo [--config FILE] [--csv FILE] [--frames N] [--live SECS] \
[--delay MS] [--size WxH] [--out DIR]";

struct Args {
    config: Option<PathBuf>,
    csv: Option<PathBuf>,
    frames: u32,
    live: Option<u64>,
    delay_ms: i64,
    width: u32,
    height: u32,
    out: PathBuf,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            config: None,
            csv: None,
            frames: 60,
            live: None,
            delay_ms: 0,
            width: 640,
            height: 160,
            out: PathBuf::from("target/out"),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    let cfg = match &args.config {
        Some(path) => config::load(path)?,
        None => StreamConfig::default(),
    };
    let (chart, mut named) = cfg.build();
    let mut chart = chart;
    if named.is_empty() {
        // No [[series]] configured: plot one filled green trace.
        let series = SharedSeries::new(TimeSeriesOptions::default());
        chart.add_series(
            &series,
            SeriesOptions {
                line_width: 2.0,
                stroke_style: Color::rgb(0, 255, 0),
                fill_style: Some(Color::from_argb(80, 0, 255, 0)),
            },
        );
        named.push(("signal".to_string(), series));
    }

    let feeds = attach_sources(named, args.csv.as_deref())?;
    tracing::info!(series = feeds.len(), width = args.width, height = args.height, "chart ready");

    match args.live {
        Some(secs) => run_live(chart, feeds, secs, &args),
        None => run_simulated(&chart, feeds, &args),
    }
}

fn parse_args(mut it: impl Iterator<Item = String>) -> Result<Args> {
    let mut args = Args::default();
    while let Some(flag) = it.next() {
        let mut value = || it.next().with_context(|| format!("{flag} needs a value\n{USAGE}"));
        match flag.as_str() {
            "--config" => args.config = Some(PathBuf::from(value()?)),
            "--csv" => args.csv = Some(PathBuf::from(value()?)),
            "--frames" => args.frames = value()?.parse().context("--frames")?,
            "--live" => args.live = Some(value()?.parse().context("--live")?),
            "--delay" => args.delay_ms = value()?.parse().context("--delay")?,
            "--out" => args.out = PathBuf::from(value()?),
            "--size" => {
                let raw = value()?;
                let (w, h) = raw.split_once('x').with_context(|| format!("--size expects WxH, got '{raw}'"))?;
                args.width = w.parse().context("--size width")?;
                args.height = h.parse().context("--size height")?;
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unknown argument '{other}'\n{USAGE}"),
        }
    }
    Ok(args)
}

/// Pair each series with a source: CSV columns in order, random walks for the rest.
fn attach_sources(
    named: Vec<(String, SharedSeries)>,
    csv: Option<&std::path::Path>,
) -> Result<Vec<(String, SharedSeries, Source)>> {
    let mut replays = match csv {
        Some(path) => {
            let r = signal::load_csv(path)?;
            tracing::info!(path = %path.display(), columns = r.len(), "loaded replay");
            for (column, replay) in r.iter().enumerate() {
                tracing::debug!(column, rows = replay.len(), last_offset = ?replay.last_offset(), "replay column");
            }
            r.into_iter()
        }
        None => Vec::new().into_iter(),
    };
    Ok(named
        .into_iter()
        .enumerate()
        .map(|(i, (name, series))| {
            let source = match replays.next() {
                Some(r) => Source::Replay(r),
                None => Source::Walk(RandomWalk::new(0x5eed + i as u64, 100 + 37 * i as i64)),
            };
            (name, series, source)
        })
        .collect())
}

/// Back-to-back frames on a simulated clock advancing one frame interval per
/// frame. Bounds resets are driven from the same clock.
fn run_simulated(chart: &StreamingChart, mut feeds: Vec<(String, SharedSeries, Source)>, args: &Args) -> Result<()> {
    let step = (chart.options.frame_interval().as_millis() as i64).max(1);
    let start = now_millis();
    let mut next_reset: Vec<Option<i64>> = feeds
        .iter()
        .map(|(_, s, _)| {
            let opts = *s.lock().options();
            opts.reset_bounds.then_some(opts.reset_interval().as_millis() as i64)
        })
        .collect();

    let mut surface = SkiaSurface::new(args.width, args.height)?;
    for frame in 0..args.frames {
        let offset = frame as i64 * step;
        for ((_, series, source), reset_at) in feeds.iter_mut().zip(next_reset.iter_mut()) {
            source.poll(offset, |at, v| series.append(start + at, v));
            if let Some(at) = reset_at {
                if offset >= *at {
                    series.reset_bounds();
                    *at += series.lock().options().reset_interval().as_millis() as i64;
                }
            }
        }
        chart.render(&mut surface, start + offset - args.delay_ms);
        let out = args.out.join(format!("frame_{frame:04}.png"));
        surface.write_png(&out).with_context(|| format!("writing {}", out.display()))?;
        tracing::debug!(frame, path = %out.display(), "frame written");
    }

    for (name, series, _) in &feeds {
        let (min, max) = series.bounds();
        tracing::info!(series = %name, retained = series.lock().len(), ?min, ?max, "final state");
    }
    tracing::info!(frames = args.frames, dir = %args.out.display(), "simulated run complete");
    Ok(())
}

/// Real timers: a feeder thread appends samples, the chart's render loop
/// records frames, and this thread rasterizes them.
fn run_live(
    chart: StreamingChart,
    feeds: Vec<(String, SharedSeries, Source)>,
    secs: u64,
    args: &Args,
) -> Result<()> {
    chart.start_series_timers()?;
    let fps = chart.options.fps.max(1.0).round() as u64;
    let shared = chart.into_shared();
    let series: Vec<SharedSeries> = feeds.iter().map(|(_, s, _)| s.clone()).collect();

    let running = Arc::new(AtomicBool::new(true));
    let feeder = {
        let running = running.clone();
        let start = now_millis();
        let mut feeds = feeds;
        thread::Builder::new().name("stripchart-feeder".into()).spawn(move || {
            while running.load(Ordering::Relaxed) {
                let offset = now_millis() - start;
                for (_, series, source) in feeds.iter_mut() {
                    source.poll(offset, |at, v| series.append(start + at, v));
                }
                thread::sleep(Duration::from_millis(10));
            }
        })?
    };

    let (tx, rx) = mpsc::channel::<(i64, Vec<DrawOp>)>();
    let recorder = RecordingSurface::new(args.width, args.height);
    let render = stripchart_core::stream_to(&shared, recorder, args.delay_ms, move |rec, time| {
        // Receiver gone means we are shutting down.
        let _ = tx.send((time, rec.take_ops()));
    })?;

    let mut surface = SkiaSurface::new(args.width, args.height)?;
    let deadline = Instant::now() + Duration::from_secs(secs);
    let mut frames = 0u64;
    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        match rx.recv_timeout(remaining) {
            Ok((time, ops)) => {
                replay_ops(&ops, &mut surface);
                frames += 1;
                if frames % fps == 0 {
                    let out = args.out.join(format!("live_{time}.png"));
                    surface.write_png(&out)?;
                    tracing::info!(frames, path = %out.display(), "snapshot");
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => break,
            Err(mpsc::RecvTimeoutError::Disconnected) => bail!("render loop ended unexpectedly"),
        }
    }

    render.stop();
    running.store(false, Ordering::Relaxed);
    if feeder.join().is_err() {
        tracing::warn!("feeder thread panicked");
    }
    for s in &series {
        s.stop();
    }
    surface.write_png(args.out.join("live_last.png"))?;
    tracing::info!(frames, secs, "live run complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &[&str]) -> Result<Args> {
        parse_args(raw.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_without_flags() {
        let args = parse(&[]).unwrap();
        assert_eq!((args.frames, args.width, args.height), (60, 640, 160));
        assert!(args.live.is_none());
    }

    #[test]
    fn flags_are_parsed() {
        let args = parse(&["--frames", "5", "--size", "300x90", "--live", "2", "--delay", "1000"]).unwrap();
        assert_eq!((args.frames, args.width, args.height), (5, 300, 90));
        assert_eq!(args.live, Some(2));
        assert_eq!(args.delay_ms, 1000);
    }

    #[test]
    fn bad_flags_are_errors() {
        assert!(parse(&["--frames"]).is_err());
        assert!(parse(&["--size", "300"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
    }
}
