//! # Steem 鍵・署名
//!
//! WIF秘密鍵、プレフィックス付き公開鍵、canonicalなリカバリ可能署名。

use std::fmt;
use std::str::FromStr;

use base58::{FromBase58, ToBase58};
use k256::ecdsa::signature::hazmat::RandomizedPrehashSigner;
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey};

use crate::{double_sha256, ripemd160, sha256, CryptoError};

/// 公開鍵のデフォルトプレフィックス（Steemメインネット）
pub const DEFAULT_ADDRESS_PREFIX: &str = "STM";

/// WIFのネットワークID
const NETWORK_ID: u8 = 0x80;

/// canonical署名が得られるまでの最大試行回数
const MAX_SIGN_ATTEMPTS: usize = 256;

// ---------------------------------------------------------------------------
// 秘密鍵
// ---------------------------------------------------------------------------

/// secp256k1秘密鍵。
///
/// `Debug`は鍵データを出力しない。ドロップ時にゼロ化される（`k256::ecdsa::SigningKey`）。
#[derive(Clone)]
pub struct PrivateKey {
    key: SigningKey,
}

impl PrivateKey {
    /// 32バイトの秘密スカラーから構築する。
    pub fn from_bytes(secret: &[u8]) -> Result<Self, CryptoError> {
        if secret.len() != 32 {
            return Err(CryptoError::KeyLength(secret.len()));
        }
        let key = SigningKey::from_slice(secret).map_err(|_| CryptoError::InvalidKey)?;
        Ok(Self { key })
    }

    /// WIF文字列をパースする。
    ///
    /// 形式: `Base58(0x80 ‖ secret(32) ‖ double_sha256(0x80 ‖ secret)[0..4])`
    pub fn from_wif(wif: &str) -> Result<Self, CryptoError> {
        let decoded = wif
            .from_base58()
            .map_err(|e| CryptoError::Base58(format!("{e:?}")))?;
        if decoded.len() != 37 {
            return Err(CryptoError::KeyLength(decoded.len()));
        }
        let (payload, checksum) = decoded.split_at(33);
        if payload[0] != NETWORK_ID {
            return Err(CryptoError::NetworkId(payload[0]));
        }
        if double_sha256(payload)[..4] != *checksum {
            return Err(CryptoError::Checksum);
        }
        Self::from_bytes(&payload[1..])
    }

    /// シード文字列のSHA-256から秘密鍵を導出する。
    pub fn from_seed(seed: &str) -> Result<Self, CryptoError> {
        Self::from_bytes(&sha256(seed.as_bytes()))
    }

    /// アカウント名・パスワード・ロール（"active", "owner"等）から秘密鍵を導出する。
    pub fn from_login(username: &str, password: &str, role: &str) -> Result<Self, CryptoError> {
        Self::from_seed(&format!("{username}{role}{password}"))
    }

    /// WIF文字列にエンコードする。
    pub fn to_wif(&self) -> String {
        let mut payload = Vec::with_capacity(37);
        payload.push(NETWORK_ID);
        payload.extend_from_slice(&self.key.to_bytes());
        let checksum = double_sha256(&payload);
        payload.extend_from_slice(&checksum[..4]);
        payload.to_base58()
    }

    /// 対応する公開鍵（デフォルトプレフィックス）を導出する。
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.key.verifying_key(), DEFAULT_ADDRESS_PREFIX)
    }

    /// 32バイトのダイジェストに署名する。
    ///
    /// Steemノードはcanonicalな署名のみを受け付けるため、
    /// 条件を満たすまで乱数を加えて署名をやり直す。
    pub fn sign(&self, digest: &[u8; 32]) -> Result<Signature, CryptoError> {
        let mut rng = rand::rngs::OsRng;
        for _ in 0..MAX_SIGN_ATTEMPTS {
            let signature: EcdsaSignature =
                RandomizedPrehashSigner::<EcdsaSignature>::sign_prehash_with_rng(
                    &self.key, &mut rng, digest,
                )
                .map_err(|e| CryptoError::Signing(e.to_string()))?;
            let signature = signature.normalize_s().unwrap_or(signature);

            let mut data = [0u8; 64];
            data.copy_from_slice(&signature.to_bytes());
            if !is_canonical(&data) {
                continue;
            }

            let recovery = recovery_id(self.key.verifying_key(), digest, &signature)?;
            return Ok(Signature { data, recovery });
        }
        Err(CryptoError::Signing(
            "canonicalな署名を生成できませんでした".to_string(),
        ))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key().to_string())
            .finish_non_exhaustive()
    }
}

impl FromStr for PrivateKey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wif(s)
    }
}

/// 署名から公開鍵を復元できるリカバリIDを探す。
fn recovery_id(
    verifying_key: &VerifyingKey,
    digest: &[u8; 32],
    signature: &EcdsaSignature,
) -> Result<u8, CryptoError> {
    for byte in 0..=1u8 {
        let Some(id) = RecoveryId::from_byte(byte) else {
            continue;
        };
        if let Ok(recovered) = VerifyingKey::recover_from_prehash(digest, signature, id) {
            if recovered == *verifying_key {
                return Ok(byte);
            }
        }
    }
    Err(CryptoError::Recovery)
}

/// r, s がともに32バイトに収まり、先頭バイトの上位ビットが立っていないことを確認する。
fn is_canonical(data: &[u8; 64]) -> bool {
    data[0] & 0x80 == 0
        && !(data[0] == 0 && data[1] & 0x80 == 0)
        && data[32] & 0x80 == 0
        && !(data[32] == 0 && data[33] & 0x80 == 0)
}

// ---------------------------------------------------------------------------
// 公開鍵
// ---------------------------------------------------------------------------

/// secp256k1公開鍵（圧縮形式）とアドレスプレフィックス。
///
/// 等価性は鍵データのみで判定し、プレフィックスは比較しない。
#[derive(Clone, Debug)]
pub struct PublicKey {
    key: [u8; 33],
    prefix: String,
}

impl PublicKey {
    fn from_verifying_key(verifying_key: &VerifyingKey, prefix: &str) -> Self {
        let mut key = [0u8; 33];
        key.copy_from_slice(verifying_key.to_encoded_point(true).as_bytes());
        Self {
            key,
            prefix: prefix.to_string(),
        }
    }

    /// SEC1エンコードされた点から構築する。曲線上の点であることを検証する。
    pub fn from_sec1_bytes(bytes: &[u8], prefix: &str) -> Result<Self, CryptoError> {
        let verifying_key = VerifyingKey::from_sec1_bytes(bytes).map_err(|_| CryptoError::InvalidKey)?;
        Ok(Self::from_verifying_key(&verifying_key, prefix))
    }

    /// `STM...`形式の文字列をパースする。先頭3文字をプレフィックスとして扱う。
    pub fn from_string(encoded: &str) -> Result<Self, CryptoError> {
        let (prefix, body) = match (encoded.get(..3), encoded.get(3..)) {
            (Some(prefix), Some(body)) if prefix.chars().all(|c| c.is_ascii_alphabetic()) => {
                (prefix, body)
            }
            _ => return Err(CryptoError::Prefix),
        };
        let decoded = body
            .from_base58()
            .map_err(|e| CryptoError::Base58(format!("{e:?}")))?;
        if decoded.len() != 37 {
            return Err(CryptoError::KeyLength(decoded.len()));
        }
        let (key, checksum) = decoded.split_at(33);
        if ripemd160(key)[..4] != *checksum {
            return Err(CryptoError::Checksum);
        }
        Self::from_sec1_bytes(key, prefix)
    }

    /// 圧縮形式の公開鍵（33バイト）
    pub fn to_bytes(&self) -> [u8; 33] {
        self.key
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// プレフィックスを差し替える。
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut data = Vec::with_capacity(37);
        data.extend_from_slice(&self.key);
        data.extend_from_slice(&ripemd160(&self.key)[..4]);
        write!(f, "{}{}", self.prefix, data.to_base58())
    }
}

impl FromStr for PublicKey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

// ---------------------------------------------------------------------------
// 署名
// ---------------------------------------------------------------------------

/// リカバリ可能な署名。
/// ワイヤ形式: `[recovery_id + 31 ‖ r(32) ‖ s(32)]` の16進文字列
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    data: [u8; 64],
    recovery: u8,
}

impl Signature {
    /// 65バイトのワイヤ形式
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        // 31 = 27 + 4（圧縮公開鍵）
        bytes[0] = self.recovery + 31;
        bytes[1..].copy_from_slice(&self.data);
        bytes
    }

    /// 65バイトのワイヤ形式からパースする。
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != 65 {
            return Err(CryptoError::SignatureLength(bytes.len()));
        }
        let recovery = bytes[0]
            .checked_sub(31)
            .filter(|r| *r <= 3)
            .ok_or(CryptoError::Recovery)?;
        let mut data = [0u8; 64];
        data.copy_from_slice(&bytes[1..]);
        Ok(Self { data, recovery })
    }

    /// 署名からダイジェストに署名した公開鍵を復元する。
    pub fn recover(&self, digest: &[u8; 32]) -> Result<PublicKey, CryptoError> {
        let signature = EcdsaSignature::from_slice(&self.data).map_err(|_| CryptoError::Recovery)?;
        let id = RecoveryId::from_byte(self.recovery).ok_or(CryptoError::Recovery)?;
        let verifying_key = VerifyingKey::recover_from_prehash(digest, &signature, id)
            .map_err(|_| CryptoError::Recovery)?;
        Ok(PublicKey::from_verifying_key(&verifying_key, DEFAULT_ADDRESS_PREFIX))
    }

    pub fn is_canonical(&self) -> bool {
        is_canonical(&self.data)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}
