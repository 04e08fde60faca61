use std::f64::consts::TAU;

use crate::{
    engine::{GameEvent, System, TickContext},
    rng::GameRng,
    state::{GameState, Star},
};

/// Creates stars on a timer and ramps the pace after each spawn.
pub struct SpawnSystem;

impl SpawnSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpawnSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for SpawnSystem {
    fn name(&self) -> &str {
        "spawn"
    }

    fn update(
        &mut self,
        ctx: &TickContext<'_>,
        state: &mut GameState,
        rng: &mut GameRng,
        events: &mut Vec<GameEvent>,
    ) {
        state.spawn_timer += ctx.dt;
        if state.spawn_timer <= state.spawn_interval_ms / 1000.0 {
            return;
        }
        // At most one star per frame, even after a long stall.
        state.spawn_timer = 0.0;

        let config = ctx.config;
        let size = config.star_size.sample(rng);
        let x = rng.in_range(size, config.width - size);
        let fall_speed = config.fall_speed.sample(rng);
        let wobble = rng.in_range(0.0, TAU);
        let tilt = config.tilt.sample(rng);

        let id = state.allocate_star_id();
        state.push_star(Star {
            id,
            x,
            y: -size,
            fall_speed,
            size,
            wobble,
            tilt,
        });
        events.push(GameEvent::Spawned { id: id.raw() });

        state.spawn_interval_ms =
            (state.spawn_interval_ms * config.spawn_ramp).max(config.min_spawn_interval_ms);
    }
}
