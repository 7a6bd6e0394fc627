//! Single binary web server: JSON API over events, rounds and scores.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use padel_rounds_web::{
    advance_event, apply_wildcard_shuffle, record_score, undo_last_round, CourtMatch, Event,
    EventFormat, EventId, EventSettings, InMemoryRoundStore, PlayerId, RoundError, RoundState,
    RoundStore, WildcardIntensity,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-event entry: event data + last activity time (for auto-cleanup).
struct EventEntry {
    event: Event,
    last_activity: Instant,
}

/// Events by id, plus the rounds of every event.
#[derive(Default)]
struct AppData {
    events: HashMap<EventId, EventEntry>,
    store: InMemoryRoundStore,
}

type AppState = Data<RwLock<AppData>>;

/// Inactivity threshold: events not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventView<'a> {
    event: &'a Event,
    rounds: Vec<RoundState>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateEventBody {
    name: String,
    #[serde(default)]
    format: EventFormat,
    roster: Vec<PlayerId>,
    num_courts: u32,
    #[serde(default)]
    settings: EventSettings,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreBody {
    score_a: u32,
    score_b: u32,
}

#[derive(Deserialize)]
struct WildcardBody {
    courts: Vec<CourtMatch>,
    intensity: WildcardIntensity,
}

/// Path segment: event id (e.g. /api/events/{id})
#[derive(Deserialize)]
struct EventPath {
    id: EventId,
}

/// Path segments: event id, round number and court number.
#[derive(Deserialize)]
struct CourtPath {
    id: EventId,
    round_num: u32,
    court_num: u32,
}

fn error_response(e: &RoundError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        RoundError::EventNotFound(_)
        | RoundError::RoundNotFound { .. }
        | RoundError::CourtNotFound { .. } => HttpResponse::NotFound().json(body),
        RoundError::RoundLocked { .. } => HttpResponse::Conflict().json(body),
        _ => {
            log::warn!("rejected request: {}", e);
            HttpResponse::BadRequest().json(body)
        }
    }
}

fn event_response(data: &AppData, id: EventId) -> HttpResponse {
    let entry = match data.events.get(&id) {
        Some(e) => e,
        None => return error_response(&RoundError::EventNotFound(id)),
    };
    match data.store.history(id) {
        Ok(rounds) => HttpResponse::Ok().json(EventView {
            event: &entry.event,
            rounds,
        }),
        Err(e) => error_response(&e),
    }
}

/// Refresh last activity; None if the event does not exist.
fn touch(data: &mut AppData, id: EventId) -> Option<Event> {
    let entry = data.events.get_mut(&id)?;
    entry.last_activity = Instant::now();
    Some(entry.event.clone())
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-rounds-web",
    })
}

/// Create a new event (returns it with id; client stores id for subsequent requests).
#[post("/api/events")]
async fn api_create_event(state: AppState, body: Json<CreateEventBody>) -> HttpResponse {
    let body = body.into_inner();
    let event = match Event::new(body.name, body.format, body.roster, body.num_courts, body.settings) {
        Ok(event) => event,
        Err(e) => return error_response(&e),
    };
    let id = event.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.store.register_event(id);
    g.events.insert(
        id,
        EventEntry {
            event,
            last_activity: Instant::now(),
        },
    );
    log::info!("created event {}", id);
    event_response(&g, id)
}

/// Get an event with its rounds (404 if not found). Touching it refreshes last_activity.
#[get("/api/events/{id}")]
async fn api_get_event(state: AppState, path: Path<EventPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if touch(&mut g, path.id).is_none() {
        return error_response(&RoundError::EventNotFound(path.id));
    }
    event_response(&g, path.id)
}

/// Generate the next round (the latest round must be fully scored).
#[post("/api/events/{id}/rounds/next")]
async fn api_next_round(state: AppState, path: Path<EventPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let event = match touch(&mut g, path.id) {
        Some(e) => e,
        None => return error_response(&RoundError::EventNotFound(path.id)),
    };
    match advance_event(&event, &mut g.store, &mut rand::thread_rng()) {
        Ok(round) => HttpResponse::Ok().json(round),
        Err(e) => error_response(&e),
    }
}

/// Set the score of one court.
#[put("/api/events/{id}/rounds/{round_num}/courts/{court_num}/score")]
async fn api_set_score(state: AppState, path: Path<CourtPath>, body: Json<ScoreBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if touch(&mut g, path.id).is_none() {
        return error_response(&RoundError::EventNotFound(path.id));
    }
    match record_score(
        &mut g.store,
        path.id,
        path.round_num,
        path.court_num,
        body.score_a,
        body.score_b,
    ) {
        Ok(round) => HttpResponse::Ok().json(round),
        Err(e) => error_response(&e),
    }
}

/// Undo the latest round; the previous round becomes current again.
#[post("/api/events/{id}/rounds/undo")]
async fn api_undo_round(state: AppState, path: Path<EventPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if touch(&mut g, path.id).is_none() {
        return error_response(&RoundError::EventNotFound(path.id));
    }
    match undo_last_round(&mut g.store, path.id) {
        Ok(_) => event_response(&g, path.id),
        Err(e) => error_response(&e),
    }
}

/// Preview a wildcard shuffle of arbitrary courts (nothing is stored).
#[post("/api/wildcard")]
async fn api_wildcard(body: Json<WildcardBody>) -> HttpResponse {
    match apply_wildcard_shuffle(&body.courts, body.intensity, &mut rand::thread_rng()) {
        Ok(courts) => HttpResponse::Ok().json(courts),
        Err(e) => error_response(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(AppData::default()));

    // Background task: every 30 minutes, remove events inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let stale: Vec<EventId> = g
                .events
                .iter()
                .filter(|(_, entry)| entry.last_activity.elapsed() >= INACTIVITY_TIMEOUT)
                .map(|(id, _)| *id)
                .collect();
            for id in &stale {
                g.events.remove(id);
                g.store.remove_event(*id);
            }
            if !stale.is_empty() {
                log::info!("Cleaned up {} inactive event(s) (no activity for 12h)", stale.len());
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_event)
            .service(api_get_event)
            .service(api_next_round)
            .service(api_set_score)
            .service(api_undo_round)
            .service(api_wildcard)
    })
    .bind(bind)?
    .run()
    .await
}
