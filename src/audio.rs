use serde::Serialize;

/// A short named sound effect fired by a game event.
///
/// Wire names match the cue identifiers the browser client synthesizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    Pop,
    TapMiss,
    Miss,
    Start,
    GameOver,
}

impl Cue {
    pub fn name(self) -> &'static str {
        match self {
            Cue::Pop => "pop",
            Cue::TapMiss => "tapmiss",
            Cue::Miss => "miss",
            Cue::Start => "start",
            Cue::GameOver => "gameover",
        }
    }
}

/// Plays cues on behalf of the engine.
///
/// Playback is fire-and-forget: implementations swallow failures (muted
/// output, missing audio device) rather than surfacing them to game logic.
pub trait SoundPlayer: Send {
    fn play(&mut self, cue: Cue);
}

/// Drops every cue. The default player for headless runs and tests.
pub struct NullSoundPlayer;

impl SoundPlayer for NullSoundPlayer {
    fn play(&mut self, _cue: Cue) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_cue_identifiers() {
        let cues = [Cue::Pop, Cue::TapMiss, Cue::Miss, Cue::Start, Cue::GameOver];
        let names: Vec<&str> = cues.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["pop", "tapmiss", "miss", "start", "gameover"]);
        for cue in cues {
            let wire = serde_json::to_string(&cue).unwrap();
            assert_eq!(wire, format!("\"{}\"", cue.name()));
        }
    }
}
