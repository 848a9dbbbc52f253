//! # HTTP 設定ローダー
//!
//! 設定サービスからGETで設定JSONを取得する。

use std::time::Duration;

use steem_sign_types::Settings;

use super::{parse_settings, SettingsError, SettingsLoader};

/// 設定サービスへのリクエストタイムアウト
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// URL経由で設定を取得するローダー。
///
/// URLにはアクセストークンが含まれる場合があるため、ログやエラーには出力しない。
pub struct HttpLoader {
    url: String,
}

impl HttpLoader {
    /// 新しいHttpLoaderを作成する。
    pub fn new(url: String) -> Self {
        Self { url }
    }

    fn fetch_error(message: String) -> SettingsError {
        SettingsError::Fetch {
            source_name: "http".to_string(),
            message,
        }
    }
}

#[async_trait::async_trait]
impl SettingsLoader for HttpLoader {
    fn kind(&self) -> &'static str {
        "http"
    }

    async fn load(&self) -> Result<Settings, SettingsError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| Self::fetch_error(format!("HTTPクライアントの構築に失敗: {e}")))?;

        let response = client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Self::fetch_error(format!("HTTP送信失敗: {}", e.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Self::fetch_error(format!("レスポンス読み取り失敗: {}", e.without_url())))?;

        if !status.is_success() {
            return Err(Self::fetch_error(format!(
                "設定サービスがエラーを返しました: HTTP {status}"
            )));
        }

        parse_settings("http", &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;

    /// テスト用設定サービスを起動する。
    async fn start_settings_server(status: StatusCode, body: &'static str) -> u16 {
        let app = axum::Router::new().route("/settings", get(move || async move { (status, body) }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        port
    }

    #[tokio::test]
    async fn test_load_from_settings_service() {
        let port = start_settings_server(
            StatusCode::OK,
            r#"{"SteemSignService":{"HotWalletAccount":"hotwallet","HotWalletActivePublicKey":"STM6UUbAGbTLLWfY2gAc8XmjGBz2c7WT4fYB5r1L1aHDwAY88ujex"}}"#,
        )
        .await;

        let loader = HttpLoader::new(format!("http://127.0.0.1:{port}/settings"));
        let settings = loader.load().await.unwrap();
        assert_eq!(settings.sign_service.hot_wallet_account, "hotwallet");
    }

    #[tokio::test]
    async fn test_error_status_is_fetch_failure() {
        let port = start_settings_server(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;

        let loader = HttpLoader::new(format!("http://127.0.0.1:{port}/settings"));
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, SettingsError::Fetch { .. }));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_invalid_body_is_parse_failure() {
        let port = start_settings_server(StatusCode::OK, "not json").await;

        let loader = HttpLoader::new(format!("http://127.0.0.1:{port}/settings"));
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        // バインド直後に閉じたポートへ接続する
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let loader = HttpLoader::new(format!("http://127.0.0.1:{port}/settings"));
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, SettingsError::Fetch { .. }));
        assert!(!err.to_string().contains("127.0.0.1"));
    }
}
