//! # サービス設定・共有状態
//!
//! 環境変数からの設定読み込みと、起動時に構築する読み取り専用の共有状態。

use steem_sign_types::Settings;

use crate::issuer::AddressIssuer;
use crate::settings::SettingsError;
use crate::signer::ChainSigner;
use crate::signing::SigningGateway;

/// デフォルトの待ち受けポート
const DEFAULT_PORT: u16 = 5000;

/// 環境変数から読み込むプロセス設定。
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// 設定の取得元（`http`で始まればURL、それ以外はファイルパス）
    pub settings_url: String,
    /// 死活監視で返す環境情報
    pub env_info: Option<String>,
    /// 待ち受けポート
    pub port: u16,
}

impl ServiceConfig {
    /// 環境変数から構築する。
    ///
    /// - `SettingsUrl`（必須）
    /// - `ENV_INFO`
    /// - `PORT`（デフォルト: 5000）
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let settings_url = lookup("SettingsUrl")
            .filter(|v| !v.is_empty())
            .ok_or(SettingsError::MissingEnv("SettingsUrl"))?;

        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| SettingsError::Invalid(format!("PORTが不正です: {port}")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            settings_url,
            env_info: lookup("ENV_INFO"),
            port,
        })
    }
}

/// 死活監視で返すアプリケーション情報。
#[derive(Debug, Clone)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub env: Option<String>,
}

impl AppInfo {
    /// クレート名・バージョンと環境情報から構築する。
    pub fn new(env: Option<String>) -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            env,
        }
    }
}

/// サービスの共有状態。起動後は変更されない。
pub struct AppState<S: ChainSigner> {
    /// アプリケーション情報
    pub info: AppInfo,
    /// デポジットアドレス発行器
    pub issuer: AddressIssuer,
    /// 署名ゲートウェイ
    pub gateway: SigningGateway<S>,
}

impl<S: ChainSigner> AppState<S> {
    /// 取得した設定から共有状態を構築する。設定値はここで検証する。
    pub fn from_settings(info: AppInfo, settings: &Settings, signer: S) -> Result<Self, SettingsError> {
        let sign_service = &settings.sign_service;
        Ok(Self {
            info,
            issuer: AddressIssuer::new(&sign_service.hot_wallet_account)?,
            gateway: SigningGateway::new(signer, &sign_service.hot_wallet_active_public_key)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use steem_sign_types::SignServiceSettings;

    use super::*;
    use crate::signer::SteemSigner;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn settings(account: &str, public_key: &str) -> Settings {
        Settings {
            sign_service: SignServiceSettings {
                hot_wallet_account: account.to_string(),
                hot_wallet_active_public_key: public_key.to_string(),
            },
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = ServiceConfig::from_lookup(lookup(&[("SettingsUrl", "settings.json")])).unwrap();
        assert_eq!(config.settings_url, "settings.json");
        assert_eq!(config.port, 5000);
        assert!(config.env_info.is_none());
    }

    #[test]
    fn test_config_overrides() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("SettingsUrl", "http://settings"),
            ("PORT", "8080"),
            ("ENV_INFO", "staging"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.env_info.as_deref(), Some("staging"));
    }

    #[test]
    fn test_config_requires_settings_url() {
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[])),
            Err(SettingsError::MissingEnv("SettingsUrl"))
        ));
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[("SettingsUrl", "")])),
            Err(SettingsError::MissingEnv("SettingsUrl"))
        ));
    }

    #[test]
    fn test_config_rejects_bad_port() {
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[("SettingsUrl", "s.json"), ("PORT", "http")])),
            Err(SettingsError::Invalid(_))
        ));
    }

    #[test]
    fn test_state_from_valid_settings() {
        let state = AppState::from_settings(
            AppInfo::new(None),
            &settings("hotwallet", "STM6UUbAGbTLLWfY2gAc8XmjGBz2c7WT4fYB5r1L1aHDwAY88ujex"),
            SteemSigner,
        )
        .unwrap();
        assert_eq!(state.issuer.hot_wallet_account(), "hotwallet");
        assert_eq!(
            state.gateway.hot_wallet_public_key().to_string(),
            "STM6UUbAGbTLLWfY2gAc8XmjGBz2c7WT4fYB5r1L1aHDwAY88ujex"
        );
        assert_eq!(state.info.name, "steem-sign-service");
    }

    #[test]
    fn test_state_rejects_invalid_public_key() {
        let result = AppState::from_settings(
            AppInfo::new(None),
            &settings("hotwallet", "STMnotakey"),
            SteemSigner,
        );
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_state_rejects_separator_in_account() {
        let result = AppState::from_settings(
            AppInfo::new(None),
            &settings("hot$wallet", "STM6UUbAGbTLLWfY2gAc8XmjGBz2c7WT4fYB5r1L1aHDwAY88ujex"),
            SteemSigner,
        );
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }
}
