//! Wireless accessory link routing
//!
//! The accessory subsystem (scanning, connecting, service discovery) lives in
//! the host. It reports progress as [`LinkEvent`]s; this module tracks the
//! connection transcript and turns the events into engine commands.

use std::sync::Arc;

use crate::engine::Engine;
use crate::sim::GamePhase;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    DeviceFound,
    Connected,
    ServicesValidated,
    Ready,
    Disconnected,
    Error { code: i32, message: String },
    ButtonPressed,
}

/// Connection progress, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LinkState {
    #[default]
    Scanning,
    Connecting,
    Validating,
    Starting,
    Ready,
}

/// Routes accessory events into the engine
pub struct LinkController {
    engine: Arc<Engine>,
    state: LinkState,
}

impl LinkController {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self {
            engine,
            state: LinkState::Scanning,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    pub fn handle(&mut self, event: LinkEvent) {
        match event {
            LinkEvent::DeviceFound => self.set_state(LinkState::Connecting),
            LinkEvent::Connected => self.set_state(LinkState::Validating),
            LinkEvent::ServicesValidated => self.set_state(LinkState::Starting),
            LinkEvent::Ready => {
                self.set_state(LinkState::Ready);
                self.engine.ready();
            }
            LinkEvent::Disconnected => {
                self.set_state(LinkState::Scanning);
                self.engine.reset();
            }
            LinkEvent::Error { code, message } => {
                log::warn!("Accessory error {code}: {message}");
            }
            LinkEvent::ButtonPressed => {
                if self.state == LinkState::Ready {
                    self.engine.on_button_pressed();
                } else {
                    log::debug!("Button press dropped while {:?}", self.state);
                }
            }
        }
    }

    /// The host lost focus: a running match is paused
    pub fn on_focus_lost(&self) {
        self.engine.pause();
    }

    pub fn overlay(&self) -> Overlay {
        Overlay::resolve(self.state, self.engine.current_state())
    }

    fn set_state(&mut self, state: LinkState) {
        if self.state != state {
            log::info!("Link {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}

/// Which overlay a host should show above the game surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Connection progress
    Connecting(LinkState),
    /// Live score
    Hud,
    /// Final and best score
    GameOver,
    /// Nothing; the game waits for the first press
    Hidden,
}

impl Overlay {
    pub fn resolve(link: LinkState, phase: GamePhase) -> Self {
        if link != LinkState::Ready {
            return Overlay::Connecting(link);
        }
        match phase {
            GamePhase::Initializing => Overlay::Connecting(link),
            GamePhase::Ready => Overlay::Hidden,
            GamePhase::Started | GamePhase::Paused | GamePhase::Finishing => Overlay::Hud,
            GamePhase::Over => Overlay::GameOver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::EngineConfig;

    fn controller() -> LinkController {
        let engine = Engine::new(&EngineConfig {
            seed: Some(3),
            ..Default::default()
        });
        engine.surface_changed(480, 800);
        LinkController::new(Arc::new(engine))
    }

    fn connect(link: &mut LinkController) {
        for event in [
            LinkEvent::DeviceFound,
            LinkEvent::Connected,
            LinkEvent::ServicesValidated,
            LinkEvent::Ready,
        ] {
            link.handle(event);
        }
    }

    #[test]
    fn test_transcript_readies_engine() {
        let mut link = controller();
        link.handle(LinkEvent::DeviceFound);
        assert_eq!(link.state(), LinkState::Connecting);
        assert_eq!(link.overlay(), Overlay::Connecting(LinkState::Connecting));
        link.handle(LinkEvent::Connected);
        link.handle(LinkEvent::ServicesValidated);
        assert_eq!(link.state(), LinkState::Starting);
        assert_eq!(link.engine().current_state(), GamePhase::Initializing);

        link.handle(LinkEvent::Ready);
        assert_eq!(link.state(), LinkState::Ready);
        assert_eq!(link.engine().current_state(), GamePhase::Ready);
        assert_eq!(link.overlay(), Overlay::Hidden);
    }

    #[test]
    fn test_button_ignored_until_ready() {
        let mut link = controller();
        link.handle(LinkEvent::DeviceFound);
        link.engine().ready();
        link.handle(LinkEvent::ButtonPressed);
        assert_eq!(link.engine().current_state(), GamePhase::Ready);
    }

    #[test]
    fn test_button_drives_match() {
        let mut link = controller();
        connect(&mut link);
        link.handle(LinkEvent::ButtonPressed);
        assert_eq!(link.engine().current_state(), GamePhase::Started);
        assert_eq!(link.overlay(), Overlay::Hud);

        link.on_focus_lost();
        assert_eq!(link.engine().current_state(), GamePhase::Paused);
        link.handle(LinkEvent::ButtonPressed);
        assert_eq!(link.engine().current_state(), GamePhase::Ready);
    }

    #[test]
    fn test_disconnect_resets() {
        let mut link = controller();
        connect(&mut link);
        link.handle(LinkEvent::ButtonPressed);
        link.handle(LinkEvent::Disconnected);
        assert_eq!(link.state(), LinkState::Scanning);
        assert_eq!(link.engine().current_state(), GamePhase::Initializing);
        assert_eq!(link.overlay(), Overlay::Connecting(LinkState::Scanning));
    }

    #[test]
    fn test_error_keeps_state() {
        let mut link = controller();
        connect(&mut link);
        link.handle(LinkEvent::Error {
            code: 133,
            message: "GATT error".into(),
        });
        assert_eq!(link.state(), LinkState::Ready);
        assert_eq!(link.engine().current_state(), GamePhase::Ready);
    }

    #[test]
    fn test_overlay_for_game_over() {
        assert_eq!(
            Overlay::resolve(LinkState::Ready, GamePhase::Over),
            Overlay::GameOver
        );
        assert_eq!(
            Overlay::resolve(LinkState::Validating, GamePhase::Over),
            Overlay::Connecting(LinkState::Validating)
        );
    }
}
