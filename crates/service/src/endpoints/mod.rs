//! # サービスエンドポイント
//!
//! 全てのルートは`/api`配下に公開する。
//! - `GET /api/isalive` — 死活監視
//! - `POST /api/wallets` — デポジットアドレス発行
//! - `POST /api/sign` — トランザクション署名

pub mod is_alive;
pub mod sign;
pub mod wallets;

#[cfg(test)]
pub mod test_helpers;

pub use is_alive::handle_is_alive;
pub use sign::handle_sign;
pub use wallets::handle_wallets;

use std::sync::Arc;

use axum::routing::{get, post};

use crate::config::AppState;
use crate::signer::ChainSigner;

/// ルーターを構築する。
pub fn router<S: ChainSigner>(state: Arc<AppState<S>>) -> axum::Router {
    let api = axum::Router::new()
        .route("/isalive", get(handle_is_alive::<S>))
        .route("/wallets", post(handle_wallets::<S>))
        .route("/sign", post(handle_sign::<S>));

    axum::Router::new().nest("/api", api).with_state(state)
}
