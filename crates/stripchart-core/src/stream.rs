// File: crates/stripchart-core/src/stream.rs
// Summary: Self-rescheduling render loop that streams a shared chart into a surface.

use crate::chart::SharedChart;
use crate::error::Result;
use crate::schedule::{now_millis, spawn_ticker, TickerHandle};
use crate::series::lock_recovering;
use crate::surface::DrawSurface;

type FrameHook<S> = Box<dyn FnMut(&mut S, i64) + Send>;

struct LoopState<S> {
    chart: SharedChart,
    surface: S,
    delay_ms: i64,
    on_frame: FrameHook<S>,
    frames: u64,
}

/// Running render loop started by [`stream_to`].
pub struct RenderLoop<S> {
    handle: TickerHandle<LoopState<S>>,
}

impl<S> RenderLoop<S> {
    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    /// Cancel the loop and take the surface back.
    pub fn stop(self) -> Option<S> {
        let state = self.handle.stop()?;
        tracing::info!(frames = state.frames, "render loop stopped");
        Some(state.surface)
    }
}

/// Render `chart` into `surface` now, then every `1000 / fps` ms, each frame
/// showing the time `delay_ms` behind the wall clock. `on_frame` runs after
/// every render with the surface and the frame's time, e.g. to present it.
///
/// The fps is re-read from the chart options on every tick.
pub fn stream_to<S, F>(chart: &SharedChart, surface: S, delay_ms: i64, on_frame: F) -> Result<RenderLoop<S>>
where
    S: DrawSurface + Send + 'static,
    F: FnMut(&mut S, i64) + Send + 'static,
{
    let state = LoopState {
        chart: chart.clone(),
        surface,
        delay_ms,
        on_frame: Box::new(on_frame),
        frames: 0,
    };
    let handle = spawn_ticker("stripchart-render", std::time::Duration::ZERO, state, |st| {
        let time = now_millis() - st.delay_ms;
        let interval = {
            let chart = lock_recovering(&st.chart);
            chart.render(&mut st.surface, time);
            chart.options.frame_interval()
        };
        (st.on_frame)(&mut st.surface, time);
        st.frames += 1;
        Some(interval)
    })?;
    tracing::info!(delay_ms, "render loop started");
    Ok(RenderLoop { handle })
}
