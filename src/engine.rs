//! Thread-safe engine facade
//!
//! The host drives the engine from its UI thread; the render thread ticks and
//! draws it. Both go through the same `Mutex<GameState>`, so pool mutation
//! during a tick never overlaps a lifecycle command. Listener callbacks run
//! after the lock is released, which lets a listener call straight back into
//! the engine.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

use crate::render::{self, Frame, FrameDriver, RenderThread, Surface};
use crate::settings::EngineConfig;
use crate::sim::{self, GameEvent, GamePhase, GameState};

/// Callbacks from the engine to its host
///
/// Called from whichever thread caused the event: the render thread for
/// scoring and game over, the caller's thread for commands.
pub trait GameListener: Send + Sync {
    fn on_score(&self, _total: u32) {}

    /// The match ended with `total` points; return whether it beat the record
    fn on_game_over(&self, total: u32) -> bool;

    fn on_state_changed(&self, _phase: GamePhase) {}
}

/// Copied, read-only view of the running game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub record_beaten: bool,
    pub actor_y: f32,
    pub actor_bottom: f32,
    pub actor_velocity: f32,
    /// Ground line
    pub floor: f32,
    /// Top and bottom of the nearest gap the actor still has to pass
    pub next_gap: Option<(f32, f32)>,
}

impl Snapshot {
    fn of(state: &GameState) -> Self {
        let actor = &state.actor;
        Self {
            phase: state.phase,
            score: state.score,
            record_beaten: state.record_beaten,
            actor_y: actor.y,
            actor_bottom: actor.y + actor.height,
            actor_velocity: actor.velocity,
            floor: state.background.floor,
            next_gap: state
                .pool
                .active()
                .find(|o| !o.passed)
                .map(|o| (o.gap_top, o.gap_bottom())),
        }
    }
}

struct Shared {
    state: Mutex<GameState>,
    listener: RwLock<Option<Arc<dyn GameListener>>>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, GameState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn listener(&self) -> Option<Arc<dyn GameListener>> {
        self.listener
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run `f` under the lock, then dispatch whatever it queued
    fn with_state<T>(&self, f: impl FnOnce(&mut GameState) -> T) -> T {
        let (result, events) = {
            let mut state = self.lock();
            let result = f(&mut state);
            (result, state.take_events())
        };
        self.dispatch(events);
        result
    }

    fn dispatch(&self, events: Vec<GameEvent>) {
        if events.is_empty() {
            return;
        }
        let Some(listener) = self.listener() else {
            return;
        };

        for event in events {
            match event {
                GameEvent::PhaseChanged(phase) => listener.on_state_changed(phase),
                GameEvent::Scored { total, .. } => listener.on_score(total),
                GameEvent::GameOver { total, match_id } => {
                    let beaten = listener.on_game_over(total);
                    if beaten {
                        log::info!("New record: {total}");
                    }
                    self.lock().set_record_beaten(match_id, beaten);
                }
            }
        }
    }
}

impl FrameDriver for Shared {
    fn frame(&self, delta_ms: f32, frame: &mut Frame) {
        self.with_state(|state| {
            sim::tick(state, delta_ms);
            render::draw(state, frame);
        });
    }
}

/// The game engine
pub struct Engine {
    shared: Arc<Shared>,
    render: Mutex<Option<RenderThread>>,
    frame_budget: Duration,
}

impl Engine {
    pub fn new(config: &EngineConfig) -> Self {
        let state = GameState::new(config);
        log::info!("Engine created (seed {})", state.seed);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                listener: RwLock::new(None),
            }),
            render: Mutex::new(None),
            frame_budget: Duration::from_millis(config.frame_budget_ms),
        }
    }

    pub fn set_listener(&self, listener: Arc<dyn GameListener>) {
        *self
            .shared
            .listener
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(listener);
    }

    pub fn reset(&self) {
        self.shared.with_state(GameState::reset);
    }

    pub fn ready(&self) {
        self.shared.with_state(GameState::ready);
    }

    pub fn start(&self) {
        self.shared.with_state(GameState::start);
    }

    pub fn pause(&self) {
        self.shared.with_state(GameState::pause);
    }

    pub fn resume(&self) {
        self.shared.with_state(GameState::resume);
    }

    /// The single action button
    pub fn on_button_pressed(&self) {
        self.shared.with_state(GameState::on_button_pressed);
    }

    pub fn current_state(&self) -> GamePhase {
        self.shared.lock().phase
    }

    pub fn is_started(&self) -> bool {
        self.shared.lock().is_started()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.shared.lock())
    }

    /// A drawable surface exists: start the render thread on it
    ///
    /// Replaces (and joins) any thread left from a previous surface.
    pub fn surface_created<S: Surface>(&self, surface: S) {
        // Joins happen outside the lock; the old thread may be inside a
        // listener that calls back into the engine
        if let Some(previous) = self.take_render_thread() {
            previous.stop();
        }

        let driver: Arc<dyn FrameDriver> = self.shared.clone();
        let thread = match RenderThread::spawn(surface, driver, self.frame_budget) {
            Ok(thread) => thread,
            Err(e) => {
                log::error!("Failed to spawn render thread: {e}");
                return;
            }
        };

        let replaced = self
            .render
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(thread);
        if let Some(stale) = replaced {
            stale.stop();
        }
    }

    pub fn surface_changed(&self, width: u32, height: u32) {
        log::info!("Surface changed to {width}x{height}");
        self.shared
            .lock()
            .set_screen_dimensions(width as f32, height as f32);
    }

    /// The surface is going away: returns once the render thread has exited
    pub fn surface_destroyed(&self) {
        if let Some(thread) = self.take_render_thread() {
            thread.stop();
        }
    }

    fn take_render_thread(&self) -> Option<RenderThread> {
        self.render
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn is_rendering(&self) -> bool {
        self.render
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(RenderThread::is_running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SurfaceError;
    use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
    use std::time::Instant;

    #[derive(Default)]
    struct Recorder {
        phases: Mutex<Vec<GamePhase>>,
        scores: Mutex<Vec<u32>>,
        game_overs: AtomicU32,
        beat_record: AtomicBool,
        /// Last phase heard when `on_game_over` ran
        phase_at_game_over: Mutex<Option<GamePhase>>,
    }

    impl GameListener for Recorder {
        fn on_score(&self, total: u32) {
            self.scores.lock().unwrap().push(total);
        }

        fn on_game_over(&self, _total: u32) -> bool {
            self.game_overs.fetch_add(1, Ordering::SeqCst);
            *self.phase_at_game_over.lock().unwrap() = self.phases.lock().unwrap().last().copied();
            self.beat_record.load(Ordering::SeqCst)
        }

        fn on_state_changed(&self, phase: GamePhase) {
            self.phases.lock().unwrap().push(phase);
        }
    }

    fn engine() -> (Engine, Arc<Recorder>) {
        let engine = Engine::new(&EngineConfig {
            seed: Some(5),
            frame_budget_ms: 2,
            ..Default::default()
        });
        engine.surface_changed(480, 800);
        let recorder = Arc::new(Recorder::default());
        engine.set_listener(recorder.clone());
        (engine, recorder)
    }

    /// Headless surface failing every fourth acquire
    struct ScriptedSurface {
        acquires: Arc<AtomicUsize>,
    }

    impl Surface for ScriptedSurface {
        fn acquire(&mut self) -> Result<Frame, SurfaceError> {
            let n = self.acquires.fetch_add(1, Ordering::SeqCst);
            if n % 4 == 3 {
                return Err(SurfaceError::Lost);
            }
            Ok(Frame::new(480, 800))
        }

        fn present(&mut self, _frame: Frame) -> Result<(), SurfaceError> {
            Ok(())
        }
    }

    fn wait_until(mut done: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(10);
        while Instant::now() < deadline {
            if done() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        false
    }

    #[test]
    fn test_commands_follow_lifecycle() {
        let (engine, recorder) = engine();
        engine.start();
        assert_eq!(engine.current_state(), GamePhase::Initializing);

        engine.ready();
        engine.start();
        assert!(engine.is_started());
        engine.pause();
        engine.resume();
        assert_eq!(engine.current_state(), GamePhase::Ready);

        assert_eq!(
            *recorder.phases.lock().unwrap(),
            vec![
                GamePhase::Ready,
                GamePhase::Started,
                GamePhase::Paused,
                GamePhase::Ready
            ]
        );
    }

    #[test]
    fn test_button_press_starts_and_restarts() {
        let (engine, _) = engine();
        engine.ready();
        engine.on_button_pressed();
        assert_eq!(engine.current_state(), GamePhase::Started);

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.actor_velocity, crate::consts::LAUNCH_VELOCITY);
        assert_eq!(snapshot.next_gap, None);
    }

    #[test]
    fn test_game_over_caches_record_flag() {
        let (engine, recorder) = engine();
        recorder.beat_record.store(true, Ordering::SeqCst);
        engine.ready();
        engine.start();
        engine.shared.with_state(|state| {
            state.apply(sim::Transition::Ground);
        });

        assert_eq!(recorder.game_overs.load(Ordering::SeqCst), 1);
        assert_eq!(
            *recorder.phase_at_game_over.lock().unwrap(),
            Some(GamePhase::Over)
        );
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Over);
        assert!(snapshot.record_beaten);

        engine.on_button_pressed();
        assert_eq!(engine.current_state(), GamePhase::Ready);
        assert!(!engine.snapshot().record_beaten);
    }

    /// A listener that calls back into the engine must not deadlock
    struct Reentrant(Mutex<Option<Arc<Engine>>>);

    impl GameListener for Reentrant {
        fn on_game_over(&self, _total: u32) -> bool {
            if let Some(engine) = self.0.lock().unwrap().as_ref() {
                assert_eq!(engine.current_state(), GamePhase::Over);
            }
            false
        }
    }

    #[test]
    fn test_listener_may_reenter() {
        let engine = Arc::new(Engine::new(&EngineConfig::default()));
        engine.surface_changed(480, 800);
        let listener = Arc::new(Reentrant(Mutex::new(Some(engine.clone()))));
        engine.set_listener(listener.clone());

        engine.ready();
        engine.start();
        engine.shared.with_state(|state| {
            state.apply(sim::Transition::Ground);
        });
        assert_eq!(engine.current_state(), GamePhase::Over);
        listener.0.lock().unwrap().take();
    }

    #[test]
    fn test_render_thread_plays_until_game_over() {
        let (engine, recorder) = engine();
        let acquires = Arc::new(AtomicUsize::new(0));
        engine.ready();
        engine.start();
        engine.surface_created(ScriptedSurface {
            acquires: acquires.clone(),
        });
        assert!(engine.is_rendering());

        // Nobody flaps, so the actor drops to the floor
        assert!(wait_until(|| engine.current_state() == GamePhase::Over));
        assert_eq!(recorder.game_overs.load(Ordering::SeqCst), 1);

        let started = Instant::now();
        engine.surface_destroyed();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!engine.is_rendering());
        assert!(acquires.load(Ordering::SeqCst) > 4);
    }

    #[test]
    fn test_surface_recreated_replaces_thread() {
        let (engine, _) = engine();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        engine.surface_created(ScriptedSurface {
            acquires: first.clone(),
        });
        assert!(wait_until(|| first.load(Ordering::SeqCst) > 0));
        engine.surface_created(ScriptedSurface {
            acquires: second.clone(),
        });
        assert!(wait_until(|| second.load(Ordering::SeqCst) > 0));

        let stale = first.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(first.load(Ordering::SeqCst), stale);
        engine.surface_destroyed();
    }

    /// Calls back into the engine from the render thread, slowly
    #[derive(Default)]
    struct SlowListener {
        engine: Mutex<Option<Arc<Engine>>>,
        entered: AtomicBool,
    }

    impl GameListener for SlowListener {
        fn on_game_over(&self, _total: u32) -> bool {
            self.entered.store(true, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(200));
            let engine = self.engine.lock().unwrap().clone();
            if let Some(engine) = engine {
                let _ = engine.is_rendering();
            }
            false
        }
    }

    #[test]
    fn test_surface_recreated_while_listener_calls_back() {
        let engine = Arc::new(Engine::new(&EngineConfig {
            seed: Some(8),
            frame_budget_ms: 2,
            ..Default::default()
        }));
        engine.surface_changed(480, 800);
        let listener = Arc::new(SlowListener::default());
        *listener.engine.lock().unwrap() = Some(engine.clone());
        engine.set_listener(listener.clone());

        engine.ready();
        engine.start();
        engine.surface_created(ScriptedSurface {
            acquires: Arc::new(AtomicUsize::new(0)),
        });
        assert!(wait_until(|| listener.entered.load(Ordering::SeqCst)));

        // Recreate the surface while the old thread sits in on_game_over
        let (done, finished) = std::sync::mpsc::channel();
        let recreating = engine.clone();
        std::thread::spawn(move || {
            recreating.surface_created(ScriptedSurface {
                acquires: Arc::new(AtomicUsize::new(0)),
            });
            let _ = done.send(());
        });
        assert!(finished.recv_timeout(Duration::from_secs(5)).is_ok());
        assert!(engine.is_rendering());

        engine.surface_destroyed();
        listener.engine.lock().unwrap().take();
    }

    #[test]
    fn test_ready_flush_never_races_the_render_thread() {
        let engine = Engine::new(&EngineConfig {
            seed: Some(21),
            frame_budget_ms: 1,
            spawn_interval_ms: 10.0,
            ..Default::default()
        });
        engine.surface_changed(480, 800);
        engine.surface_created(ScriptedSurface {
            acquires: Arc::new(AtomicUsize::new(0)),
        });

        let mut saw_obstacle = false;
        for _ in 0..40 {
            engine.reset();
            engine.ready();
            let snapshot = engine.snapshot();
            assert_eq!(snapshot.phase, GamePhase::Ready);
            assert_eq!(snapshot.next_gap, None);
            assert_eq!(snapshot.score, 0);
            assert!(!snapshot.record_beaten);

            engine.start();
            for _ in 0..10 {
                // Flapping keeps the actor off the floor
                engine.on_button_pressed();
                std::thread::sleep(Duration::from_millis(3));
                saw_obstacle |= engine.snapshot().next_gap.is_some();
            }
        }

        engine.surface_destroyed();
        assert!(saw_obstacle);
    }
}
