//! # Steem 暗号処理
//!
//! ホットウォレット署名サービスが使用するSteemチェーンの暗号プリミティブ。
//!
//! ## アルゴリズム
//! | 用途 | アルゴリズム |
//! |------|------------|
//! | 署名 | secp256k1 ECDSA（canonical, low-S, リカバリID付き） |
//! | 秘密鍵形式 | WIF（Base58 + ダブルSHA-256チェックサム） |
//! | 公開鍵形式 | プレフィックス + Base58（圧縮点 + RIPEMD-160チェックサム） |
//! | トランザクションダイジェスト | SHA-256(chain_id ‖ シリアライズ済みトランザクション) |

pub mod keys;
pub mod transaction;

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

pub use keys::{PrivateKey, PublicKey, Signature, DEFAULT_ADDRESS_PREFIX};
pub use transaction::{
    parse_chain_id, sign_transaction, transaction_digest, Asset, Operation, Transaction,
    DEFAULT_CHAIN_ID,
};

/// 暗号処理のエラー型
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// Base58デコードに失敗
    #[error("Base58デコードに失敗しました: {0}")]
    Base58(String),
    /// WIFのネットワークIDが不正
    #[error("秘密鍵のネットワークIDが不正です: {0:#04x}")]
    NetworkId(u8),
    /// 鍵データの長さが不正
    #[error("鍵データの長さが不正です: {0} bytes")]
    KeyLength(usize),
    /// 署名データの長さが不正
    #[error("署名データの長さが不正です: {0} bytes（65 bytesである必要があります）")]
    SignatureLength(usize),
    /// チェックサム不一致
    #[error("チェックサムが一致しません")]
    Checksum,
    /// secp256k1として無効な鍵
    #[error("secp256k1の鍵として無効です")]
    InvalidKey,
    /// 公開鍵プレフィックスが不正
    #[error("公開鍵のプレフィックスが不正です")]
    Prefix,
    /// 署名計算に失敗
    #[error("署名に失敗しました: {0}")]
    Signing(String),
    /// 署名からの公開鍵復元に失敗
    #[error("公開鍵の復元に失敗しました")]
    Recovery,
    /// 不正なchain_id
    #[error("chain_idが不正です: {0}")]
    ChainId(String),
    /// トランザクションのシリアライズに失敗
    #[error("トランザクションのシリアライズに失敗: {0}")]
    Serialize(String),
    /// 未対応のオペレーション
    #[error("未対応のオペレーションです: {0}")]
    UnsupportedOperation(String),
}

/// SHA-256ハッシュ計算。
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&Sha256::digest(data));
    hash
}

/// ダブルSHA-256（WIFチェックサム用）。
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// RIPEMD-160ハッシュ計算（公開鍵チェックサム用）。
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&Ripemd160::digest(data));
    hash
}
