// File: crates/demo/src/signal.rs
// Summary: Demo signal sources: a seeded random walk and CSV replay of (offset_ms, value...) rows.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces samples at offsets (ms) relative to the start of the stream.
pub enum Source {
    Walk(RandomWalk),
    Replay(Replay),
}

impl Source {
    /// Emit every sample with an offset in `(last polled, offset_ms]`.
    pub fn poll(&mut self, offset_ms: i64, mut emit: impl FnMut(i64, f64)) {
        match self {
            Source::Walk(w) => {
                while w.next_at <= offset_ms {
                    let v = w.step();
                    emit(w.next_at, v);
                    w.next_at += w.step_ms;
                }
            }
            Source::Replay(r) => {
                while let Some(&(at, v)) = r.rows.get(r.pos) {
                    if at > offset_ms {
                        break;
                    }
                    emit(at, v);
                    r.pos += 1;
                }
            }
        }
    }
}

/// Bounded random walk with occasional spikes.
pub struct RandomWalk {
    rng: StdRng,
    value: f64,
    step_ms: i64,
    next_at: i64,
}

impl RandomWalk {
    pub fn new(seed: u64, step_ms: i64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed), value: 50.0, step_ms: step_ms.max(1), next_at: 0 }
    }

    fn step(&mut self) -> f64 {
        self.value = (self.value + self.rng.random_range(-4.0..4.0)).clamp(0.0, 100.0);
        if self.rng.random_bool(0.03) {
            return self.value + self.rng.random_range(0.0..40.0);
        }
        self.value
    }
}

/// Pre-loaded samples for one series, sorted by offset.
pub struct Replay {
    rows: Vec<(i64, f64)>,
    pos: usize,
}

impl Replay {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn last_offset(&self) -> Option<i64> {
        self.rows.last().map(|&(at, _)| at)
    }
}

/// Load a CSV whose first column is the offset in ms and whose remaining
/// columns are one value per series. Blank or unparsable cells are skipped.
pub fn load_csv(path: &Path) -> Result<Vec<Replay>> {
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_csv(file).with_context(|| format!("parsing {}", path.display()))
}

pub fn read_csv<R: io::Read>(reader: R) -> Result<Vec<Replay>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);
    let columns = rdr.headers()?.len().saturating_sub(1);
    if columns == 0 {
        anyhow::bail!("expected an offset column followed by at least one value column");
    }

    let mut out: Vec<Vec<(i64, f64)>> = vec![Vec::new(); columns];
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let Some(at) = rec.get(0).and_then(|s| s.parse::<i64>().ok()) else {
            skipped += 1;
            continue;
        };
        for (i, rows) in out.iter_mut().enumerate() {
            if let Some(v) = rec.get(i + 1).and_then(|s| s.parse::<f64>().ok()) {
                rows.push((at, v));
            }
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, "rows without a numeric offset were ignored");
    }

    Ok(out
        .into_iter()
        .map(|mut rows| {
            rows.sort_by_key(|&(at, _)| at);
            Replay { rows, pos: 0 }
        })
        .collect())
}
