//! # POST /api/sign

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use steem_sign_types::{SignTransactionRequest, SignTransactionResponse};

use crate::config::AppState;
use crate::error::ServiceError;
use crate::signer::ChainSigner;

/// POST /api/sign — トランザクション署名。
///
/// ボディの形式不正も署名検証の失敗と同じ400で返すため、
/// `Json`エクストラクタを使わずにパースする。
pub async fn handle_sign<S: ChainSigner>(
    State(state): State<Arc<AppState<S>>>,
    body: Bytes,
) -> Result<Json<SignTransactionResponse>, ServiceError> {
    let request: SignTransactionRequest = serde_json::from_slice(&body)
        .map_err(|e| ServiceError::InvalidInput(format!("SignTransactionRequestのパースに失敗: {e}")))?;

    state.gateway.sign(&request).map(Json)
}
