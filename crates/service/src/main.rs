//! # Steem Sign Service
//!
//! カストディアル取引所向けのSteem署名サービス。
//!
//! ## 役割
//! - デポジットアドレス（`{ホットウォレット}${UUID}`）の発行
//! - 外部で構築されたトランザクションへの署名
//! - 内部振替（シミュレーション）のホットウォレット鍵による承認
//!
//! 秘密鍵は保持しない。リクエストごとに受け取り、使用後は破棄する。
//!
//! ## 環境変数
//! - `SettingsUrl` — 設定の取得元（必須）
//! - `ENV_INFO` — 死活監視で返す環境情報
//! - `PORT` — 待ち受けポート（デフォルト: 5000）

mod config;
mod endpoints;
mod error;
mod issuer;
mod settings;
mod signer;
mod signing;

use std::sync::Arc;

use crate::config::{AppInfo, AppState, ServiceConfig};
use crate::signer::SteemSigner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = ServiceConfig::from_env()?;

    // 設定の取得に失敗した場合は起動しない
    let settings = settings::load_settings(&config.settings_url).await?;

    let state = Arc::new(AppState::from_settings(
        AppInfo::new(config.env_info.clone()),
        &settings,
        SteemSigner,
    )?);
    tracing::info!(
        hot_wallet = state.issuer.hot_wallet_account(),
        hot_wallet_public_key = %state.gateway.hot_wallet_public_key(),
        env = config.env_info.as_deref().unwrap_or("-"),
        "署名サービスを初期化しました"
    );

    let app = endpoints::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Steem Sign Serviceを {} で起動します", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
