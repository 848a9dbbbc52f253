//! # Steem Sign Service 共有型定義
//!
//! HTTP APIのリクエスト/レスポンス、設定、署名コンテキストの構造体を提供する。
//! フィールド名は上流・下流システムとのワイヤ互換性のため camelCase / PascalCase を維持する。
//!
//! ## エンコーディング規則
//! - `transactionContext` / `signedTransaction`: JSONシリアライズ → Base64（Standard）

pub mod codec;

use serde::{Deserialize, Serialize};

pub use codec::{from_base64, to_base64, CodecError};

/// デポジットアドレスの区切り文字。
/// ホットウォレットのアカウント名に含まれてはならない。
pub const ADDRESS_SEPARATOR: char = '$';

/// デポジットアドレスに対応する秘密鍵のダミー値。
/// 資金はカストディアルであり、エクスポート可能な鍵は存在しない。
pub const DUMMY_PRIVATE_KEY: &str = "dummy_private_key";

// ---------------------------------------------------------------------------
// 設定
// ---------------------------------------------------------------------------

/// 設定サービス（またはファイル）から取得するアプリケーション設定。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// 署名サービス固有の設定
    #[serde(rename = "SteemSignService")]
    pub sign_service: SignServiceSettings,
}

/// ホットウォレットの設定。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignServiceSettings {
    /// ホットウォレットのアカウント名
    #[serde(rename = "HotWalletAccount")]
    pub hot_wallet_account: String,
    /// ホットウォレットのActive公開鍵（例: "STM..."）
    #[serde(rename = "HotWalletActivePublicKey")]
    pub hot_wallet_active_public_key: String,
}

// ---------------------------------------------------------------------------
// POST /api/sign
// ---------------------------------------------------------------------------

/// 署名リクエスト。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignTransactionRequest {
    /// WIF形式の秘密鍵の一覧
    pub private_keys: Vec<String>,
    /// Base64エンコードされた`TransactionContext`
    pub transaction_context: String,
}

/// 署名レスポンス。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignTransactionResponse {
    /// Base64エンコードされた署名済みトランザクション（またはシミュレーション結果）
    pub signed_transaction: String,
}

/// 上流で組み立てられた署名対象の記述。
///
/// `tx`の有無のみが実トランザクションとシミュレーションを区別する。
/// `null`も不在として扱う。`options`は省略可能で、省略時は`O::default()`。
/// 未知のフィールドは無視する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionContext<T, O> {
    /// 署名器に渡すクライアントオプション（chainId等）
    #[serde(default, alias = "signingOptions")]
    pub options: O,
    /// 実トランザクション。シミュレーションの場合は`None`
    #[serde(alias = "transaction", skip_serializing_if = "Option::is_none")]
    pub tx: Option<T>,
}

/// シミュレーション（DW → HW等の内部振替）の署名結果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedTransaction {
    /// ミリ秒単位のUNIXタイムスタンプ（10進文字列）
    #[serde(rename = "txId")]
    pub tx_id: String,
}

// ---------------------------------------------------------------------------
// POST /api/wallets
// ---------------------------------------------------------------------------

/// デポジット用の仮想ウォレット。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletResponse {
    /// `{HotWalletAccount}${UniqueId}`形式のアドレス
    pub public_address: String,
    /// 常に[`DUMMY_PRIVATE_KEY`]
    pub private_key: String,
}

// ---------------------------------------------------------------------------
// GET /api/isalive
// ---------------------------------------------------------------------------

/// 死活監視レスポンス。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsAliveResponse {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
}
