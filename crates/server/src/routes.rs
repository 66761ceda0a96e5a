//! HTTP handlers for the session-control surface (§6) and the rating
//! surface (§10.6).

use std::time::{SystemTime, UNIX_EPOCH};

use axum::Json;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use vizbroker::rating::{self, RateRequest};

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

/// Processor targeted by `/refresh_ui`: the Markdown control panel only,
/// never the point cloud or image lanes.
const REFRESH_UI_TARGETS: &[&str] = &["ui_panel"];

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/create_source", post(create_source))
        .route("/load_range/:uuid", post(load_range))
        .route("/heartbeat/:uuid", post(heartbeat))
        .route("/refresh_ui/:uuid", post(refresh_ui))
        .route("/enable_streaming_mode/:uuid", post(enable_streaming_mode))
        .route("/enable_alignment_mode/:uuid", post(enable_alignment_mode))
        .route("/play_data/:uuid", post(play_data))
        .route("/list_sessions", get(list_sessions))
        .route("/get_info/:uuid", get(get_info))
        .route("/list_all", get(list_all))
        .route("/rate_frame", post(rate_frame))
        .route("/rate_range", post(rate_range))
        .route("/rate_collection", post(rate_collection))
        .with_state(state)
}

async fn create_source(
    State(state): State<AppState>,
    Json(req): Json<CreateSourceRequest>,
) -> Result<Json<SourceResponse>, ApiError> {
    let session = state
        .manager
        .create_session(req.dataset.clone(), req.collection.clone())?;
    if req.alignment_mode {
        session.enable_alignment_mode();
    }
    if req.streaming_mode {
        session.enable_streaming_mode();
    }
    let max_frame_idx = state
        .manager
        .document_source()
        .count(&req.dataset, &req.collection)
        .unwrap_or(0);
    let connect_url = format!(
        "rerun+http://{}:{}/proxy",
        state.settings.backend_ip, session.port
    );
    Ok(Json(SourceResponse {
        status: "created",
        app_id: session.uuid.clone(),
        recording_uuid: session.uuid.clone(),
        port: session.port,
        connect_url,
        max_frame_idx,
    }))
}

async fn load_range(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Json(req): Json<LoadRangeRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session = state
        .manager
        .get(&uuid)
        .ok_or_else(|| ApiError(vizbroker::VizError::NotFound(uuid.clone())))?;
    session.enable_streaming_mode();
    session.load_range(req.start_index, req.end_index)?;
    Ok(Json(json!({
        "status": "loading",
        "range": [req.start_index, req.end_index],
        "recording_uuid": uuid,
    })))
}

async fn heartbeat(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.manager.keep_alive(&uuid) {
        return Err(ApiError(vizbroker::VizError::NotFound(uuid)));
    }
    let server_time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64();
    Ok(Json(json!({
        "status": "alive",
        "recording_uuid": uuid,
        "server_time": server_time,
    })))
}

async fn refresh_ui(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Json(req): Json<RefreshUiRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let uuid = req.recording_uuid.clone().unwrap_or(uuid);
    let session = state
        .manager
        .get(&uuid)
        .ok_or_else(|| ApiError(vizbroker::VizError::NotFound(uuid.clone())))?;
    let targets: Vec<String> = REFRESH_UI_TARGETS.iter().map(|s| s.to_string()).collect();
    session.refresh_ui(&targets, req.loaded_ranges.clone());
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64();
    Ok(Json(json!({
        "status": "ui_refresh_triggered",
        "recording_uuid": uuid,
        "ranges": req.loaded_ranges,
        "timestamp": timestamp,
    })))
}

async fn enable_streaming_mode(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session = state
        .manager
        .get(&uuid)
        .ok_or_else(|| ApiError(vizbroker::VizError::NotFound(uuid.clone())))?;
    session.enable_streaming_mode();
    Ok(Json(json!({
        "status": "success",
        "recording_uuid": uuid,
        "streaming_mode": true,
    })))
}

async fn enable_alignment_mode(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session = state
        .manager
        .get(&uuid)
        .ok_or_else(|| ApiError(vizbroker::VizError::NotFound(uuid.clone())))?;
    session.enable_alignment_mode();
    Ok(Json(json!({
        "status": "success",
        "recording_uuid": uuid,
        "alignment_mode": true,
    })))
}

async fn play_data(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.manager.start_playback(&uuid)?;
    Ok(Json(json!({
        "status": "playback_started",
        "recording_uuid": uuid,
    })))
}

async fn list_sessions(State(state): State<AppState>) -> Json<serde_json::Value> {
    let sessions = state.manager.list_sessions();
    let map: serde_json::Map<String, serde_json::Value> = sessions
        .into_iter()
        .map(|info| {
            let summary = SessionSummary {
                app_id: info.app_id,
                port: info.port,
                is_playing: info.is_playing,
                uptime: format!("{}s", info.uptime_secs),
            };
            (info.recording_uuid, serde_json::to_value(summary).unwrap())
        })
        .collect();
    Json(serde_json::Value::Object(map))
}

async fn get_info(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Json<SessionInfoResponse>, ApiError> {
    let session = state
        .manager
        .get(&uuid)
        .ok_or_else(|| ApiError(vizbroker::VizError::NotFound(uuid.clone())))?;
    let max_frame_idx = state
        .manager
        .document_source()
        .count(&session.dataset, &session.collection)
        .unwrap_or(0);
    Ok(Json(SessionInfoResponse {
        recording_uuid: uuid,
        app_id: session.uuid.clone(),
        dataset: session.dataset.clone(),
        collection: session.collection.clone(),
        max_frame_idx,
    }))
}

async fn list_all(
    State(state): State<AppState>,
) -> Result<Json<std::collections::BTreeMap<String, Vec<String>>>, ApiError> {
    Ok(Json(state.manager.list_all()?))
}

async fn rate_frame(
    State(state): State<AppState>,
    Json(req): Json<RateFrameRequest>,
) -> Result<Json<RateResponse>, ApiError> {
    let rate_req = to_rate_request(&req.base);
    let rated_count = rating::rate_frame(
        state.manager.document_source().as_ref(),
        &rate_req,
        &req.frame_id,
    )?;
    Ok(Json(RateResponse {
        status: "rated",
        rated_count,
    }))
}

async fn rate_range(
    State(state): State<AppState>,
    Json(req): Json<RateRangeRequest>,
) -> Result<Json<RateResponse>, ApiError> {
    let rate_req = to_rate_request(&req.base);
    let rated_count = rating::rate_range(
        state.manager.document_source().as_ref(),
        &rate_req,
        &req.start_timestamp,
        &req.end_timestamp,
    )?;
    Ok(Json(RateResponse {
        status: "rated",
        rated_count,
    }))
}

async fn rate_collection(
    State(state): State<AppState>,
    Json(req): Json<RateCollectionRequest>,
) -> Result<Json<RateResponse>, ApiError> {
    let rate_req = to_rate_request(&req.base);
    let rated_count =
        rating::rate_collection(state.manager.document_source().as_ref(), &rate_req)?;
    Ok(Json(RateResponse {
        status: "rated",
        rated_count,
    }))
}

fn to_rate_request(base: &BaseRateRequest) -> RateRequest<'_> {
    RateRequest {
        src_database: &base.src_database,
        src_collection: &base.src_collection,
        dst_database: &base.dst_database,
        dst_collection: &base.dst_collection,
        score: &base.score,
        comment: base.comment.as_deref(),
    }
}
