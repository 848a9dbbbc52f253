//! # GET /api/isalive

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use steem_sign_types::IsAliveResponse;

use crate::config::AppState;
use crate::signer::ChainSigner;

/// GET /api/isalive — 死活監視。常に200を返す。
pub async fn handle_is_alive<S: ChainSigner>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<IsAliveResponse> {
    Json(IsAliveResponse {
        name: state.info.name.clone(),
        version: state.info.version.clone(),
        env: state.info.env.clone(),
    })
}
