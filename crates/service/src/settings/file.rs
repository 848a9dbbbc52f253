//! # ファイル設定ローダー
//!
//! ローカルファイルから設定JSONを読み込む。開発・テスト環境用。

use steem_sign_types::Settings;

use super::{parse_settings, SettingsError, SettingsLoader};

/// ローカルファイルから設定を読み込むローダー。
pub struct FileLoader {
    path: String,
}

impl FileLoader {
    /// 新しいFileLoaderを作成する。
    pub fn new(path: String) -> Self {
        Self { path }
    }
}

#[async_trait::async_trait]
impl SettingsLoader for FileLoader {
    fn kind(&self) -> &'static str {
        "file"
    }

    async fn load(&self) -> Result<Settings, SettingsError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SettingsError::Fetch {
                source_name: self.path.clone(),
                message: format!("設定ファイルの読み込みに失敗: {e}"),
            })?;
        parse_settings(&self.path, &body)
    }
}
