//! # 設定ローダー
//!
//! 起動時に一度だけアプリケーション設定を取得する。
//! 取得に失敗した場合はリクエストの受付を開始しない。
//!
//! ## ローダー実装
//! - `HttpLoader`: `http`で始まる場所から設定サービス経由で取得する（本番用）
//! - `FileLoader`: ローカルファイルから読み込む（開発・テスト用）

pub mod file;
pub mod http;

pub use file::FileLoader;
pub use http::HttpLoader;

use steem_sign_types::Settings;

/// 設定取得のエラー型
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// 必須の環境変数が未設定
    #[error("環境変数{0}が設定されていません")]
    MissingEnv(&'static str),
    /// 設定サービスからの取得に失敗
    #[error("設定の取得に失敗 ({source_name}): {message}")]
    Fetch {
        source_name: String,
        message: String,
    },
    /// 設定のパースに失敗
    #[error("設定のパースに失敗 ({source_name}): {message}")]
    Parse {
        source_name: String,
        message: String,
    },
    /// 設定値が不正
    #[error("設定値が不正です: {0}")]
    Invalid(String),
}

/// 設定を取得するトレイト。
#[async_trait::async_trait]
pub trait SettingsLoader: Send + Sync {
    /// ログ出力用のソース種別（URLやパスは含めない）
    fn kind(&self) -> &'static str;

    /// 設定を取得する。
    async fn load(&self) -> Result<Settings, SettingsError>;
}

/// 設定の場所からローダーを選択する。`http`で始まる場合はHTTP、それ以外はファイル。
pub fn loader_for(location: &str) -> Box<dyn SettingsLoader> {
    if location.starts_with("http") {
        Box::new(HttpLoader::new(location.to_string()))
    } else {
        Box::new(FileLoader::new(location.to_string()))
    }
}

/// 設定を取得する。
pub async fn load_settings(location: &str) -> Result<Settings, SettingsError> {
    let loader = loader_for(location);
    tracing::info!(source = loader.kind(), "設定を読み込み中...");
    let settings = loader.load().await?;
    tracing::info!(source = loader.kind(), "設定の読み込み完了");
    Ok(settings)
}

/// JSON文字列を設定としてパースする。
fn parse_settings(source_name: &str, body: &str) -> Result<Settings, SettingsError> {
    serde_json::from_str(body).map_err(|e| SettingsError::Parse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_selection() {
        assert_eq!(loader_for("http://settings/api").kind(), "http");
        assert_eq!(loader_for("https://settings/api").kind(), "http");
        assert_eq!(loader_for("/etc/steem-sign/settings.json").kind(), "file");
        assert_eq!(loader_for("settings.json").kind(), "file");
    }

    #[test]
    fn test_parse_settings_error() {
        let err = parse_settings("test", "{}").unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }
}
