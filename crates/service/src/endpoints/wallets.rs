//! # POST /api/wallets

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use steem_sign_types::WalletResponse;

use crate::config::AppState;
use crate::signer::ChainSigner;

/// POST /api/wallets — デポジット用の仮想ウォレットを発行する。
pub async fn handle_wallets<S: ChainSigner>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<WalletResponse> {
    let wallet = state.issuer.issue();
    tracing::debug!(public_address = %wallet.public_address, "デポジットアドレスを発行しました");
    Json(wallet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::test_helpers::{steem_state, HOT_WALLET_ACCOUNT};
    use steem_sign_types::DUMMY_PRIVATE_KEY;

    #[tokio::test]
    async fn test_wallets() {
        let state = steem_state(None);

        let first = handle_wallets(State(state.clone())).await.0;
        let second = handle_wallets(State(state)).await.0;

        let prefix = format!("{HOT_WALLET_ACCOUNT}$");
        assert!(first.public_address.starts_with(&prefix));
        assert!(second.public_address.starts_with(&prefix));
        assert_ne!(first.public_address, second.public_address);
        assert_eq!(first.private_key, DUMMY_PRIVATE_KEY);
    }
}
