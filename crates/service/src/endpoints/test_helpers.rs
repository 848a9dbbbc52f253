//! # エンドポイントテスト用共通ヘルパー
//!
//! 署名・ウォレット・死活監視テストで共有する鍵、共有状態、モック署名器。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use steem_sign_crypto::PrivateKey;
use steem_sign_types::{Settings, SignServiceSettings};

use crate::config::{AppInfo, AppState};
use crate::signer::{ChainSigner, SignerError, SteemSigner};

/// テスト用ホットウォレットのアカウント名
pub const HOT_WALLET_ACCOUNT: &str = "hotwallet";

/// テスト用ホットウォレットのActive秘密鍵
pub fn hot_wallet_key() -> PrivateKey {
    PrivateKey::from_login(HOT_WALLET_ACCOUNT, "hot-wallet-password", "active").unwrap()
}

pub fn hot_wallet_wif() -> String {
    hot_wallet_key().to_wif()
}

/// ホットウォレットとは無関係な顧客の秘密鍵
pub fn customer_key() -> PrivateKey {
    PrivateKey::from_login("customer", "customer-password", "active").unwrap()
}

pub fn customer_wif() -> String {
    customer_key().to_wif()
}

fn test_settings() -> Settings {
    Settings {
        sign_service: SignServiceSettings {
            hot_wallet_account: HOT_WALLET_ACCOUNT.to_string(),
            hot_wallet_active_public_key: hot_wallet_key().public_key().to_string(),
        },
    }
}

/// Steem署名器を使う共有状態を構築する。
pub fn steem_state(env: Option<String>) -> Arc<AppState<SteemSigner>> {
    Arc::new(AppState::from_settings(AppInfo::new(env), &test_settings(), SteemSigner).unwrap())
}

/// 署名結果を固定値で返すモック署名器。
///
/// 鍵の扱いはSteem署名器と同一で、署名呼び出し回数を記録する。
pub struct MockSigner {
    response: Result<serde_json::Value, String>,
    calls: Arc<AtomicUsize>,
}

impl MockSigner {
    /// `response`を返すモック署名器と、呼び出し回数カウンタを返す。
    pub fn returning(response: serde_json::Value) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let signer = Self {
            response: Ok(response),
            calls: calls.clone(),
        };
        (signer, calls)
    }

    /// 常に署名失敗を返すモック署名器。
    pub fn failing(message: &str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let signer = Self {
            response: Err(message.to_string()),
            calls: calls.clone(),
        };
        (signer, calls)
    }
}

impl ChainSigner for MockSigner {
    type PrivateKey = PrivateKey;
    type PublicKey = steem_sign_crypto::PublicKey;
    type Transaction = serde_json::Value;
    type Options = serde_json::Value;
    type Signed = serde_json::Value;

    fn parse_private_key(&self, encoded: &str) -> Result<PrivateKey, SignerError> {
        SteemSigner.parse_private_key(encoded)
    }

    fn parse_public_key(&self, encoded: &str) -> Result<Self::PublicKey, SignerError> {
        SteemSigner.parse_public_key(encoded)
    }

    fn public_key(&self, key: &PrivateKey) -> Self::PublicKey {
        SteemSigner.public_key(key)
    }

    fn sign(
        &self,
        _tx: &serde_json::Value,
        _options: &serde_json::Value,
        _keys: &[PrivateKey],
    ) -> Result<serde_json::Value, SignerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone().map_err(SignerError::Signing)
    }
}

/// モック署名器を使う共有状態を構築する。
pub fn mock_state(signer: MockSigner) -> Arc<AppState<MockSigner>> {
    Arc::new(AppState::from_settings(AppInfo::new(None), &test_settings(), signer).unwrap())
}

/// ルーターを`127.0.0.1`のランダムポートで起動し、ポート番号を返す。
pub async fn start_server<S: ChainSigner>(state: Arc<AppState<S>>) -> u16 {
    let app = crate::endpoints::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    port
}
