//! Request/response bodies for the HTTP surface (§6, §10.6).

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateSourceRequest {
    pub dataset: String,
    pub collection: String,
    #[serde(default)]
    pub alignment_mode: bool,
    #[serde(default)]
    pub streaming_mode: bool,
}

#[derive(Debug, Serialize)]
pub struct SourceResponse {
    pub status: &'static str,
    pub app_id: String,
    pub recording_uuid: String,
    pub port: u16,
    pub connect_url: String,
    pub max_frame_idx: u64,
}

#[derive(Debug, Deserialize)]
pub struct LoadRangeRequest {
    pub start_index: u64,
    pub end_index: u64,
}

#[derive(Debug, Deserialize)]
pub struct RefreshUiRequest {
    #[serde(default)]
    pub recording_uuid: Option<String>,
    #[serde(default)]
    pub loaded_ranges: Option<Vec<(u64, u64)>>,
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub app_id: String,
    pub port: u16,
    pub is_playing: bool,
    pub uptime: String,
}

#[derive(Debug, Serialize)]
pub struct SessionInfoResponse {
    pub recording_uuid: String,
    pub app_id: String,
    pub dataset: String,
    pub collection: String,
    pub max_frame_idx: u64,
}

/// Shared body fields across all three rating routes (§10.6).
#[derive(Debug, Deserialize)]
pub struct BaseRateRequest {
    pub src_database: String,
    pub src_collection: String,
    pub dst_database: String,
    pub dst_collection: String,
    pub score: String,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RateFrameRequest {
    #[serde(flatten)]
    pub base: BaseRateRequest,
    pub frame_id: String,
}

#[derive(Debug, Deserialize)]
pub struct RateRangeRequest {
    #[serde(flatten)]
    pub base: BaseRateRequest,
    pub start_timestamp: String,
    pub end_timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct RateCollectionRequest {
    #[serde(flatten)]
    pub base: BaseRateRequest,
}

#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub status: &'static str,
    pub rated_count: usize,
}
