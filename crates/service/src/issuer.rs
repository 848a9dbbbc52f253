//! # デポジットアドレス発行
//!
//! `{HotWalletAccount}${UniqueId}`形式の仮想ウォレットを発行する。
//! 入金時、ユーザーは`HotWalletAccount`を送金先、`UniqueId`をメモとして指定する。
//! 発行済みアドレスは記録せず、一意性はUUID v4に依存する。

use steem_sign_types::{WalletResponse, ADDRESS_SEPARATOR, DUMMY_PRIVATE_KEY};

use crate::settings::SettingsError;

/// デポジットアドレス発行器。
pub struct AddressIssuer {
    hot_wallet_account: String,
}

impl AddressIssuer {
    /// ホットウォレットのアカウント名から構築する。
    ///
    /// アカウント名が空、または区切り文字を含む場合は設定エラーとする。
    pub fn new(hot_wallet_account: &str) -> Result<Self, SettingsError> {
        if hot_wallet_account.is_empty() {
            return Err(SettingsError::Invalid(
                "HotWalletAccountが空です".to_string(),
            ));
        }
        if hot_wallet_account.contains(ADDRESS_SEPARATOR) {
            return Err(SettingsError::Invalid(format!(
                "HotWalletAccountに区切り文字'{ADDRESS_SEPARATOR}'を含めることはできません"
            )));
        }
        Ok(Self {
            hot_wallet_account: hot_wallet_account.to_string(),
        })
    }

    pub fn hot_wallet_account(&self) -> &str {
        &self.hot_wallet_account
    }

    /// 新しいデポジットアドレスを発行する。
    pub fn issue(&self) -> WalletResponse {
        WalletResponse {
            public_address: format!(
                "{}{ADDRESS_SEPARATOR}{}",
                self.hot_wallet_account,
                uuid::Uuid::new_v4()
            ),
            private_key: DUMMY_PRIVATE_KEY.to_string(),
        }
    }
}
