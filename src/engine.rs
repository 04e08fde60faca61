use crate::{
    audio::{Cue, NullSoundPlayer, SoundPlayer},
    config::GameConfig,
    rng::GameRng,
    state::{FrameSnapshot, GameState, Phase},
};

pub struct EngineSettings {
    pub config: GameConfig,
    pub seed: u64,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
    sounds: Box<dyn SoundPlayer>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
            sounds: Box::new(NullSoundPlayer),
        }
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn with_sounds(mut self, sounds: impl SoundPlayer + 'static) -> Self {
        self.sounds = Box::new(sounds);
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            state: GameState::new(&self.settings.config),
            rng: GameRng::new(self.settings.seed),
            systems: self.systems,
            sounds: self.sounds,
            config: self.settings.config,
        }
    }
}

/// Per-tick inputs shared by every system.
pub struct TickContext<'a> {
    pub tick: u64,
    /// Clamped frame delta in seconds.
    pub dt: f64,
    pub config: &'a GameConfig,
}

pub trait System: Send {
    fn name(&self) -> &str;
    fn update(
        &mut self,
        ctx: &TickContext<'_>,
        state: &mut GameState,
        rng: &mut GameRng,
        events: &mut Vec<GameEvent>,
    );
}

/// What happened during a tick or a tap, in occurrence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Spawned { id: u64 },
    Popped { id: u64, points: u32 },
    TapMissed,
    StarLost { id: u64, lives_left: u32 },
    Ended { score: u32 },
}

impl GameEvent {
    pub fn cue(&self) -> Option<Cue> {
        match self {
            GameEvent::Spawned { .. } => None,
            GameEvent::Popped { .. } => Some(Cue::Pop),
            GameEvent::TapMissed => Some(Cue::TapMiss),
            GameEvent::StarLost { .. } => Some(Cue::Miss),
            GameEvent::Ended { .. } => Some(Cue::GameOver),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TickSummary {
    pub tick: u64,
    pub events: Vec<GameEvent>,
}

/// The game loop: owns the state, the spawn RNG, the registered systems,
/// and the sound collaborator. The caller drives it — one `tick` per frame,
/// taps and start/suspend as serial events in between.
pub struct Engine {
    config: GameConfig,
    state: GameState,
    rng: GameRng,
    systems: Vec<Box<dyn System>>,
    sounds: Box<dyn SoundPlayer>,
}

impl Engine {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        self.state.snapshot(&self.config.name)
    }

    /// (Re)starts a run. Always lands in the same start-of-run state, no
    /// matter what phase the game was in.
    pub fn start(&mut self) {
        self.state.reset(&self.config);
        self.sounds.play(Cue::Start);
    }

    /// Stops play without ending the run's score, for when the page hides.
    pub fn suspend(&mut self) {
        if self.state.phase().is_running() {
            self.state.set_phase(Phase::Idle);
        }
    }

    /// Advances the game by one frame. A no-op outside of play.
    pub fn tick(&mut self, dt_seconds: f64) -> TickSummary {
        if !self.state.phase().is_running() {
            return TickSummary {
                tick: self.state.tick(),
                events: Vec::new(),
            };
        }

        let dt = dt_seconds.clamp(0.0, self.config.max_frame_dt_ms / 1000.0);
        self.state.advance_tick();
        let ctx = TickContext {
            tick: self.state.tick(),
            dt,
            config: &self.config,
        };

        let mut events = Vec::new();
        for system in &mut self.systems {
            system.update(&ctx, &mut self.state, &mut self.rng, &mut events);
        }
        for event in &events {
            if let Some(cue) = event.cue() {
                self.sounds.play(cue);
            }
        }

        TickSummary {
            tick: self.state.tick(),
            events,
        }
    }

    /// Applies one tap in play-area coordinates. At most one star pops per
    /// tap; the newest overlapping star wins. Taps outside of play are
    /// ignored entirely.
    pub fn handle_tap(&mut self, x: f64, y: f64) -> Option<GameEvent> {
        if !self.state.phase().is_running() {
            return None;
        }

        let hit = self
            .state
            .stars()
            .iter()
            .enumerate()
            .rev()
            .find(|(_, star)| star.covers(x, y))
            .map(|(index, _)| index);

        let event = match hit {
            Some(index) => {
                let star = self.state.remove_star(index);
                let points = star.points();
                self.state.add_score(points);
                GameEvent::Popped {
                    id: star.id.raw(),
                    points,
                }
            }
            None => {
                self.state.penalize_tap();
                GameEvent::TapMissed
            }
        };

        if let Some(cue) = event.cue() {
            self.sounds.play(cue);
        }
        Some(event)
    }
}
