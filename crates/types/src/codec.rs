//! # ペイロードエンコーディング
//!
//! `transactionContext`（リクエスト）と`signedTransaction`（レスポンス）で使用する
//! 「JSONシリアライズ → Base64（Standard）」形式の変換。

use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Base64エンジン（Standard）
fn b64() -> base64::engine::GeneralPurpose {
    base64::engine::general_purpose::STANDARD
}

/// エンコード・デコードのエラー型
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Base64デコードに失敗
    #[error("Base64デコードに失敗: {0}")]
    Base64(#[from] base64::DecodeError),
    /// JSONのシリアライズ・パースに失敗
    #[error("JSON変換に失敗: {0}")]
    Json(#[from] serde_json::Error),
}

/// 値をJSONにシリアライズし、Base64でエンコードする。
pub fn to_base64<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    let json = serde_json::to_vec(value)?;
    Ok(b64().encode(json))
}

/// Base64文字列をデコードし、JSONとして`T`にパースする。
pub fn from_base64<T: DeserializeOwned>(encoded: &str) -> Result<T, CodecError> {
    let bytes = b64().decode(encoded)?;
    Ok(serde_json::from_slice(&bytes)?)
}
