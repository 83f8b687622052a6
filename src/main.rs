//! Skyhop demo host
//!
//! Runs the engine headless: a scripted accessory link connects, the
//! autopilot plays one match and the best score is kept in a JSON file.
//!
//! Usage: `skyhop [config.json]`

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use skyhop::link::{LinkController, LinkEvent};
use skyhop::render::{Frame, Surface, SurfaceError};
use skyhop::{BestScore, Engine, EngineConfig, GameListener, GamePhase, autopilot};

const SCREEN_WIDTH: u32 = 480;
const SCREEN_HEIGHT: u32 = 800;
const BEST_SCORE_FILE: &str = "skyhop-best.json";
/// Longest the autopilot plays before the demo gives up
const DEMO_LIMIT: Duration = Duration::from_secs(60);
const POLL_INTERVAL: Duration = Duration::from_millis(8);

/// Stands in for a window: hands out blank frames, counts what was presented
struct HeadlessSurface {
    presented: Arc<AtomicUsize>,
}

impl Surface for HeadlessSurface {
    fn acquire(&mut self) -> Result<Frame, SurfaceError> {
        Ok(Frame::new(SCREEN_WIDTH, SCREEN_HEIGHT))
    }

    fn present(&mut self, frame: Frame) -> Result<(), SurfaceError> {
        log::trace!(
            "Presenting {} triangles ({} bytes)",
            frame.triangle_count(),
            frame.as_bytes().len()
        );
        self.presented.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

struct DemoHost {
    best: Mutex<BestScore>,
    path: PathBuf,
}

impl GameListener for DemoHost {
    fn on_score(&self, total: u32) {
        log::info!("Score: {total}");
    }

    fn on_game_over(&self, total: u32) -> bool {
        let mut best = self.best.lock().unwrap_or_else(PoisonError::into_inner);
        let beaten = best.submit(total);
        if beaten {
            if let Err(e) = best.save(&self.path) {
                log::warn!("Could not save best score: {e}");
            }
        }
        beaten
    }

    fn on_state_changed(&self, phase: GamePhase) {
        log::info!("Game state: {phase:?}");
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Skyhop demo starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let path = PathBuf::from(BEST_SCORE_FILE);
    let host = Arc::new(DemoHost {
        best: Mutex::new(BestScore::load(&path)?),
        path,
    });

    let engine = Arc::new(Engine::new(&config));
    engine.set_listener(host.clone());
    engine.surface_changed(SCREEN_WIDTH, SCREEN_HEIGHT);

    let presented = Arc::new(AtomicUsize::new(0));
    engine.surface_created(HeadlessSurface {
        presented: presented.clone(),
    });

    let mut link = LinkController::new(engine.clone());
    for event in [
        LinkEvent::DeviceFound,
        LinkEvent::Connected,
        LinkEvent::ServicesValidated,
        LinkEvent::Ready,
    ] {
        link.handle(event);
        std::thread::sleep(POLL_INTERVAL);
    }

    let started = Instant::now();
    while started.elapsed() < DEMO_LIMIT {
        let snapshot = engine.snapshot();
        if snapshot.phase == GamePhase::Over {
            break;
        }
        if autopilot::should_flap(&snapshot) {
            link.handle(LinkEvent::ButtonPressed);
        }
        std::thread::sleep(POLL_INTERVAL);
    }

    engine.surface_destroyed();
    let snapshot = engine.snapshot();
    link.handle(LinkEvent::Disconnected);

    let best = host.best.lock().unwrap_or_else(PoisonError::into_inner).best;
    log::info!(
        "Demo finished after {} frames: score {}, best {}",
        presented.load(Ordering::Relaxed),
        snapshot.score,
        best
    );
    Ok(())
}
