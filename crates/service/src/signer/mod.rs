//! # チェーン署名器の抽象化
//!
//! 秘密鍵のパース、公開鍵の導出、トランザクション署名を一つのトレイトにまとめる。
//! 鍵の形式チェック・ホットウォレット鍵との照合・署名は、必ず同じ実装を通して行う。
//!
//! 現在の実装:
//! - `steem` — WIF秘密鍵 + secp256k1（本番用）

pub mod steem;

pub use steem::SteemSigner;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// 署名器のエラー型
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// 鍵の形式が不正
    #[error("鍵の形式が不正です: {0}")]
    InvalidKey(String),
    /// 署名処理に失敗
    #[error("署名に失敗しました: {0}")]
    Signing(String),
}

/// 外部チェーンの署名プリミティブ。
pub trait ChainSigner: Send + Sync + 'static {
    /// パース済みの秘密鍵
    type PrivateKey: Send;
    /// 公開鍵。ホットウォレット鍵との比較に使用する
    type PublicKey: PartialEq + fmt::Display + Send + Sync;
    /// `TransactionContext.tx`のデコード先
    type Transaction: DeserializeOwned + Send;
    /// `TransactionContext.options`のデコード先。省略時は`Default`
    type Options: DeserializeOwned + Default + Send;
    /// 署名結果。そのままJSON → Base64でクライアントに返す
    type Signed: Serialize;

    /// 秘密鍵文字列をパースする。
    fn parse_private_key(&self, encoded: &str) -> Result<Self::PrivateKey, SignerError>;

    /// 公開鍵文字列をパースする（設定値の検証用）。
    fn parse_public_key(&self, encoded: &str) -> Result<Self::PublicKey, SignerError>;

    /// 秘密鍵から公開鍵を導出する。
    fn public_key(&self, key: &Self::PrivateKey) -> Self::PublicKey;

    /// トランザクションに全ての鍵で署名する。
    fn sign(
        &self,
        tx: &Self::Transaction,
        options: &Self::Options,
        keys: &[Self::PrivateKey],
    ) -> Result<Self::Signed, SignerError>;
}
