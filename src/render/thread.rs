//! Dedicated render/simulation thread
//!
//! One thread per surface lifetime: spawned when the surface is created,
//! stopped and joined when it is destroyed. Each iteration acquires a target,
//! updates and draws through a [`FrameDriver`], presents, then sleeps off the
//! rest of the frame budget.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::surface::{Frame, Surface, SurfaceError};

/// Per-frame work run on the render thread
pub trait FrameDriver: Send + Sync + 'static {
    /// Advance by `delta_ms` and paint into `frame`
    fn frame(&self, delta_ms: f32, frame: &mut Frame);
}

/// Stop flag the render thread can sleep on
#[derive(Debug, Default)]
struct StopSignal {
    stopped: Mutex<bool>,
    wake: Condvar,
}

impl StopSignal {
    fn raise(&self) {
        *self.stopped.lock().unwrap_or_else(PoisonError::into_inner) = true;
        self.wake.notify_all();
    }

    fn is_raised(&self) -> bool {
        *self.stopped.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sleep up to `duration`, waking early once the flag is raised
    fn sleep(&self, duration: Duration) {
        let guard = self.stopped.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = self
            .wake
            .wait_timeout_while(guard, duration, |stopped| !*stopped)
            .unwrap_or_else(PoisonError::into_inner);
    }
}

/// Handle to a running render thread; dropping it stops and joins the thread
pub struct RenderThread {
    signal: Arc<StopSignal>,
    handle: Option<JoinHandle<()>>,
}

impl RenderThread {
    pub fn spawn<S: Surface>(
        surface: S,
        driver: Arc<dyn FrameDriver>,
        frame_budget: Duration,
    ) -> std::io::Result<Self> {
        let signal = Arc::new(StopSignal::default());
        let thread_signal = signal.clone();
        let handle = thread::Builder::new()
            .name("render".into())
            .spawn(move || run(surface, driver, &thread_signal, frame_budget))?;

        Ok(Self {
            signal,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the loop and wait until the thread has exited
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.signal.raise();
        let Some(handle) = self.handle.take() else {
            return;
        };
        // join only returns once the thread is gone; an Err carries its panic
        match handle.join() {
            Ok(()) => log::info!("Render thread joined"),
            Err(_) => log::error!("Render thread panicked before shutdown"),
        }
    }
}

impl Drop for RenderThread {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run<S: Surface>(
    mut surface: S,
    driver: Arc<dyn FrameDriver>,
    signal: &StopSignal,
    frame_budget: Duration,
) {
    log::info!("Render thread started");
    let mut last = Instant::now();

    while !signal.is_raised() {
        let frame_start = Instant::now();

        match surface.acquire() {
            Ok(mut frame) => {
                let now = Instant::now();
                let delta_ms = now.duration_since(last).as_secs_f32() * 1000.0;
                last = now;

                driver.frame(delta_ms, &mut frame);

                if let Err(e) = surface.present(frame) {
                    log::warn!("Present failed: {e}");
                }
            }
            Err(SurfaceError::NotReady) => log::debug!("Surface not ready, frame skipped"),
            Err(e) => log::warn!("Acquire failed, frame skipped: {e}"),
        }

        if let Some(rest) = frame_budget.checked_sub(frame_start.elapsed()) {
            signal.sleep(rest);
        }
    }

    log::info!("Render thread stopped");
}
