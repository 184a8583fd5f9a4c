use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use rps_common::{
    choice::{ChoiceGenerator, UniformSource},
    error::GameError,
    model::{
        game::{describe_round, evaluate, Play},
        messages::{
            NewGameRequest, NewGameResponse, PlayRequest, RoundResponse, ScoreResponse, SessionId,
        },
        series::SeriesState,
    },
};
use tokio::{
    net::TcpListener,
    sync::{broadcast, Mutex},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::model::error::ServerError;

pub type ComputerSource = Box<dyn UniformSource + Send>;

type Result<T> = std::result::Result<T, ServerError>;

// Extractor rejections are turned into `ServerError` so every error body is JSON
type JsonBody<T> = std::result::Result<Json<T>, JsonRejection>;
type SessionPath = std::result::Result<Path<SessionId>, PathRejection>;

struct GameManagerState {
    default_best_of: i64,
    max_sessions: usize,
    sessions: HashMap<SessionId, SeriesState>,
    generator: ChoiceGenerator<ComputerSource>,
}

type SharedState = Arc<Mutex<GameManagerState>>;

/// Hosts one series per session. All sessions share the computer's
/// choice generator.
pub struct GameManager {
    state: SharedState,
}

impl GameManager {
    pub fn new(default_best_of: i64, max_sessions: usize, source: ComputerSource) -> Self {
        GameManager {
            state: Arc::new(Mutex::new(GameManagerState {
                default_best_of,
                max_sessions,
                sessions: HashMap::new(),
                generator: ChoiceGenerator::new(source),
            })),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(Self::root))
            .route("/game", post(Self::new_game))
            .route("/game/{session_id}", delete(Self::end_game))
            .route("/game/{session_id}/play", post(Self::play))
            .route("/game/{session_id}/score", get(Self::score))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    pub async fn run(
        &self,
        listener: TcpListener,
        mut shutdown_receiver: broadcast::Receiver<()>,
    ) -> std::io::Result<()> {
        info!("Game manager listening on {:?}", listener.local_addr()?);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                if let Err(e) = shutdown_receiver.recv().await {
                    warn!("Shutdown channel closed: {}", e);
                }
            })
            .await?;
        info!("Exited game manager");
        Ok(())
    }

    async fn root() -> &'static str {
        "Rock, Paper, Scissors"
    }

    async fn new_game(
        State(state): State<SharedState>,
        request: JsonBody<NewGameRequest>,
    ) -> Result<(StatusCode, Json<NewGameResponse>)> {
        let Json(request) = request?;
        let mut state = state.lock().await;
        let series = SeriesState::new(request.best_of.unwrap_or(state.default_best_of))?;
        let session_id = request.session_id.unwrap_or_default();
        if state.sessions.contains_key(&session_id) {
            return Err(ServerError::SessionExists(session_id));
        }
        if state.sessions.len() >= state.max_sessions {
            // Finished series have already reported their final score
            let before = state.sessions.len();
            state.sessions.retain(|_, series| !series.is_complete());
            debug!("Evicted {} finished sessions", before - state.sessions.len());
        }
        if state.sessions.len() >= state.max_sessions {
            warn!("Session limit {} reached", state.max_sessions);
            return Err(ServerError::ServerFull(state.max_sessions));
        }
        state.sessions.insert(session_id, series);
        info!("Started session {} (best of {})", session_id, series.best_of());
        Ok((
            StatusCode::CREATED,
            Json(NewGameResponse {
                session_id,
                best_of: series.best_of(),
            }),
        ))
    }

    async fn play(
        State(state): State<SharedState>,
        session_id: SessionPath,
        request: JsonBody<PlayRequest>,
    ) -> Result<Json<RoundResponse>> {
        let Path(session_id) = session_id?;
        let Json(request) = request?;
        let mut state = state.lock().await;
        let series = *state
            .sessions
            .get(&session_id)
            .ok_or(ServerError::SessionNotFound(session_id))?;
        if series.is_complete() {
            warn!("Session {} got a play after completing", session_id);
            return Err(GameError::SeriesComplete.into());
        }
        let player_play = request.play.parse::<Play>().inspect_err(|_| {
            warn!("Session {} sent invalid play {:?}", session_id, request.play);
        })?;

        let computer_play = state.generator.next();
        let outcome = evaluate(player_play, computer_play);
        let series = series.record_round(outcome)?;
        state.sessions.insert(session_id, series);
        debug!(
            "Session {}: {} vs {} -> {:?}",
            session_id, player_play, computer_play, outcome
        );
        if series.is_complete() {
            info!(
                "Session {} complete, {}",
                session_id,
                series.result().message()
            );
        }

        Ok(Json(RoundResponse {
            outcome,
            player_play,
            computer_play,
            message: describe_round(outcome, player_play, computer_play),
            score: ScoreResponse::from(&series),
        }))
    }

    async fn score(
        State(state): State<SharedState>,
        session_id: SessionPath,
    ) -> Result<Json<ScoreResponse>> {
        let Path(session_id) = session_id?;
        let state = state.lock().await;
        let series = state
            .sessions
            .get(&session_id)
            .ok_or(ServerError::SessionNotFound(session_id))?;
        Ok(Json(ScoreResponse::from(series)))
    }

    async fn end_game(
        State(state): State<SharedState>,
        session_id: SessionPath,
    ) -> Result<StatusCode> {
        let Path(session_id) = session_id?;
        let mut state = state.lock().await;
        state
            .sessions
            .remove(&session_id)
            .ok_or(ServerError::SessionNotFound(session_id))?;
        info!("Ended session {}", session_id);
        Ok(StatusCode::NO_CONTENT)
    }
}
