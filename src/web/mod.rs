mod assets;

use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use anyhow::Result;
use axum::{
    extract::State,
    http::header,
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::broadcast, time::MissedTickBehavior};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

use crate::{
    audio::{Cue, SoundPlayer},
    config::GameConfig,
    engine::{Engine, EngineBuilder, EngineSettings, GameEvent},
    state::{FrameSnapshot, Phase},
    systems::{FallSystem, SpawnSystem},
};

/// Queues cues the engine plays so the next frame carries them to the
/// browser, which does the actual synthesis.
#[derive(Clone, Default)]
struct CueBuffer(Arc<Mutex<Vec<Cue>>>);

impl CueBuffer {
    fn drain(&self) -> Vec<&'static str> {
        let mut queued = self.0.lock().expect("cue buffer lock poisoned");
        queued.drain(..).map(Cue::name).collect()
    }
}

impl SoundPlayer for CueBuffer {
    fn play(&mut self, cue: Cue) {
        self.0
            .lock()
            .expect("cue buffer lock poisoned")
            .push(cue);
    }
}

/// One message on the event stream: the current state plus any cues that
/// fired since the previous frame.
#[derive(Clone, Serialize)]
pub struct UiFrame {
    pub snapshot: FrameSnapshot,
    pub cues: Vec<&'static str>,
}

#[derive(Clone, Serialize)]
pub struct StateEnvelope {
    pub profile: String,
    pub width: f64,
    pub height: f64,
    pub seed: u64,
    pub frame: FrameSnapshot,
}

/// A finished run, kept in memory for the lifetime of the process.
#[derive(Clone, Serialize)]
pub struct RunSummary {
    pub score: u32,
    pub ticks: u64,
    pub ended_at: DateTime<Utc>,
}

struct AppState {
    engine: Mutex<Engine>,
    cues: CueBuffer,
    broadcaster: broadcast::Sender<String>,
    history: Mutex<Vec<RunSummary>>,
}

pub struct WebServerConfig {
    pub game: GameConfig,
    pub seed: u64,
    pub host: String,
    pub port: u16,
}

pub async fn run(config: WebServerConfig) -> Result<()> {
    let WebServerConfig {
        game,
        seed,
        host,
        port,
    } = config;

    let cues = CueBuffer::default();
    let engine = EngineBuilder::new(EngineSettings { config: game, seed })
        .with_system(SpawnSystem::new())
        .with_system(FallSystem::new())
        .with_sounds(cues.clone())
        .build();

    let (tx, _) = broadcast::channel::<String>(512);
    let state = Arc::new(AppState {
        engine: Mutex::new(engine),
        cues,
        broadcaster: tx,
        history: Mutex::new(Vec::new()),
    });

    let ticker = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(16));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last = Instant::now();
        let mut last_phase = Phase::Idle;
        loop {
            interval.tick().await;
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f64();
            last = now;

            let mut engine = ticker.engine.lock().expect("engine lock poisoned");
            let summary = engine.tick(dt);
            for event in &summary.events {
                if let GameEvent::Ended { score } = event {
                    ticker
                        .history
                        .lock()
                        .expect("history lock poisoned")
                        .push(RunSummary {
                            score: *score,
                            ticks: summary.tick,
                            ended_at: Utc::now(),
                        });
                }
            }
            let phase = engine.state().phase();
            if phase.is_running() || phase != last_phase {
                send_frame(&ticker.broadcaster, &engine, &ticker.cues);
            }
            last_phase = phase;
        }
    });

    let router = Router::new()
        .route("/", get(index))
        .route("/styles.css", get(styles))
        .route("/app.js", get(script))
        .route("/api/state", get(current_state))
        .route("/api/events", get(stream_events))
        .route("/api/start", post(start_game))
        .route("/api/tap", post(tap))
        .route("/api/suspend", post(suspend))
        .route("/api/history", get(history))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("invalid address");

    println!(
        "🌠 Starfall live at http://{}:{} (Ctrl+C to stop)",
        host, port
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    println!("Shutting down...");
}

fn send_frame(broadcaster: &broadcast::Sender<String>, engine: &Engine, cues: &CueBuffer) {
    let frame = UiFrame {
        snapshot: engine.snapshot(),
        cues: cues.drain(),
    };
    if let Ok(payload) = serde_json::to_string(&frame) {
        let _ = broadcaster.send(payload);
    }
}

async fn index() -> Html<&'static str> {
    Html(assets::INDEX_HTML)
}

async fn styles() -> impl IntoResponse {
    Response::builder()
        .header(header::CONTENT_TYPE, "text/css; charset=utf-8")
        .body(assets::STYLES_CSS.to_string())
        .unwrap()
}

async fn script() -> impl IntoResponse {
    Response::builder()
        .header(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )
        .body(assets::APP_JS.to_string())
        .unwrap()
}

async fn current_state(State(state): State<Arc<AppState>>) -> Json<StateEnvelope> {
    let engine = state.engine.lock().expect("engine lock poisoned");
    Json(StateEnvelope {
        profile: engine.config().name.clone(),
        width: engine.config().width,
        height: engine.config().height,
        seed: engine.seed(),
        frame: engine.snapshot(),
    })
}

async fn start_game(State(state): State<Arc<AppState>>) -> Json<FrameSnapshot> {
    let mut engine = state.engine.lock().expect("engine lock poisoned");
    engine.start();
    send_frame(&state.broadcaster, &engine, &state.cues);
    Json(engine.snapshot())
}

async fn suspend(State(state): State<Arc<AppState>>) -> Json<FrameSnapshot> {
    let mut engine = state.engine.lock().expect("engine lock poisoned");
    engine.suspend();
    send_frame(&state.broadcaster, &engine, &state.cues);
    Json(engine.snapshot())
}

#[derive(Deserialize)]
struct TapRequest {
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct TapResponse {
    outcome: &'static str,
    points: u32,
    score: u32,
    lives: u32,
}

async fn tap(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TapRequest>,
) -> Json<TapResponse> {
    let mut engine = state.engine.lock().expect("engine lock poisoned");
    let event = engine.handle_tap(request.x, request.y);
    let (outcome, points) = match event {
        Some(GameEvent::Popped { points, .. }) => ("pop", points),
        Some(GameEvent::TapMissed) => ("miss", 0),
        _ => ("ignored", 0),
    };
    send_frame(&state.broadcaster, &engine, &state.cues);
    Json(TapResponse {
        outcome,
        points,
        score: engine.state().score(),
        lives: engine.state().lives(),
    })
}

async fn history(State(state): State<Arc<AppState>>) -> Json<Vec<RunSummary>> {
    let history = state.history.lock().expect("history lock poisoned");
    Json(history.clone())
}

async fn stream_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.broadcaster.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(payload) => Some(Ok(Event::default().data(payload))),
        Err(_) => None,
    });
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(2))
            .text("keep-alive"),
    )
}
