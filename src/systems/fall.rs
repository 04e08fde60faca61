use crate::{
    engine::{GameEvent, System, TickContext},
    rng::GameRng,
    state::{GameState, Phase},
};

/// Wobble phase advance in radians per second.
const WOBBLE_RATE: f64 = 6.0;

/// Moves stars down the play area and culls the ones that get away.
pub struct FallSystem;

impl FallSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FallSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for FallSystem {
    fn name(&self) -> &str {
        "fall"
    }

    fn update(
        &mut self,
        ctx: &TickContext<'_>,
        state: &mut GameState,
        _rng: &mut GameRng,
        events: &mut Vec<GameEvent>,
    ) {
        for star in state.stars_mut() {
            star.y += star.fall_speed * ctx.dt;
            star.wobble += WOBBLE_RATE * ctx.dt;
        }

        // A star is gone once its top edge passes the bottom boundary.
        // Popped stars leave the list immediately, so everything culled here
        // was never tapped and costs a life.
        let floor = ctx.config.height;
        let mut index = 0;
        while index < state.star_count() {
            if state.stars()[index].top() <= floor {
                index += 1;
                continue;
            }
            let star = state.remove_star(index);
            let lives_left = state.lose_life();
            events.push(GameEvent::StarLost {
                id: star.id.raw(),
                lives_left,
            });
            if lives_left == 0 {
                state.set_phase(Phase::GameOver);
                events.push(GameEvent::Ended {
                    score: state.score(),
                });
                break;
            }
        }
    }
}
