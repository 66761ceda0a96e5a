//! Shared application state handed to every HTTP handler.

use std::sync::Arc;

use vizbroker::{Settings, SessionManager};

#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<SessionManager>,
    pub settings: Arc<Settings>,
}
