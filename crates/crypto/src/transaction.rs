//! # Steem トランザクション
//!
//! JSON表現のトランザクションをチェーンのバイナリ形式にシリアライズし、
//! ダイジェストを計算して署名する。
//!
//! ## バイナリ形式
//! | フィールド | 形式 |
//! |-----------|------|
//! | ref_block_num | u16 LE |
//! | ref_block_prefix | u32 LE |
//! | expiration | u32 LE（UNIX秒） |
//! | operations | varint32 個数 + (varint32 ID + フィールド)* |
//! | extensions | varint32 個数（空のみ対応） |

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::keys::PrivateKey;
use crate::{sha256, CryptoError};

/// Steemメインネットのchain_id（全ゼロ）
pub const DEFAULT_CHAIN_ID: [u8; 32] = [0u8; 32];

/// `expiration`フィールドの時刻形式（UTC、タイムゾーン表記なし）
const EXPIRATION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// 署名対象のトランザクション。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    /// 有効期限（例: "2017-07-15T16:51:19"）
    pub expiration: String,
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub extensions: Vec<Value>,
    /// 16進エンコードされた署名。署名時に追記される
    #[serde(default)]
    pub signatures: Vec<String>,
    /// 上記以外のフィールド。署名済みトランザクションにそのまま引き継ぐ
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `["transfer", { ... }]`形式のオペレーション。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation(pub String, pub Value);

impl Operation {
    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn params(&self) -> &Value {
        &self.1
    }
}

/// 金額と通貨シンボル（例: "1.000 STEEM"）。
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    /// 最小単位での金額
    pub amount: i64,
    pub precision: u8,
    pub symbol: String,
}

impl FromStr for Asset {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(amount), Some(symbol), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(CryptoError::Serialize(format!("金額の形式が不正です: {s}")));
        };

        let precision = match symbol {
            "STEEM" | "SBD" | "TESTS" | "TBD" => 3,
            "VESTS" => 6,
            _ => {
                return Err(CryptoError::Serialize(format!(
                    "未対応の通貨シンボルです: {symbol}"
                )))
            }
        };

        Ok(Self {
            amount: parse_amount(amount, precision)?,
            precision,
            symbol: symbol.to_string(),
        })
    }
}

/// 10進表記の金額を最小単位の整数に変換する。
///
/// 受け付けるのは`123`または`123.456`形式のみ。符号・指数表記・
/// 通貨の精度を超える小数桁は丸めずに拒否する。
fn parse_amount(amount: &str, precision: u8) -> Result<i64, CryptoError> {
    let invalid = || CryptoError::Serialize(format!("金額が不正です: {amount}"));

    let (integer, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if integer.is_empty() || !is_digits(integer) || !is_digits(fraction) {
        return Err(invalid());
    }
    if amount.contains('.') && fraction.is_empty() {
        return Err(invalid());
    }
    if fraction.len() > usize::from(precision) {
        return Err(CryptoError::Serialize(format!(
            "金額の小数桁が精度({precision})を超えています: {amount}"
        )));
    }

    let scale = 10i64.pow(u32::from(precision));
    let integer: i64 = integer.parse().map_err(|_| invalid())?;
    let fraction: i64 = if fraction.is_empty() {
        0
    } else {
        let padding = 10i64.pow(u32::from(precision) - fraction.len() as u32);
        fraction.parse::<i64>().map_err(|_| invalid())? * padding
    };

    integer
        .checked_mul(scale)
        .and_then(|v| v.checked_add(fraction))
        .ok_or_else(invalid)
}

// ---------------------------------------------------------------------------
// バイナリライター
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    fn u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    fn u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    fn varint32(&mut self, mut value: u32) {
        while value >= 0x80 {
            self.buf.push((value as u8 & 0x7f) | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
    }

    fn string(&mut self, value: &str) -> Result<(), CryptoError> {
        let len = u32::try_from(value.len())
            .map_err(|_| CryptoError::Serialize("文字列が長すぎます".to_string()))?;
        self.varint32(len);
        self.buf.extend_from_slice(value.as_bytes());
        Ok(())
    }

    fn asset(&mut self, asset: &Asset) {
        self.i64(asset.amount);
        self.u8(asset.precision);
        let mut symbol = [0u8; 7];
        for (slot, byte) in symbol.iter_mut().zip(asset.symbol.bytes()) {
            *slot = byte;
        }
        self.buf.extend_from_slice(&symbol);
    }

    fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

// ---------------------------------------------------------------------------
// シリアライズ
// ---------------------------------------------------------------------------

fn str_field<'a>(params: &'a Map<String, Value>, name: &str) -> Result<&'a str, CryptoError> {
    params
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| CryptoError::Serialize(format!("フィールド{name}が見つかりません")))
}

fn u32_field(params: &Map<String, Value>, name: &str) -> Result<u32, CryptoError> {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| CryptoError::Serialize(format!("フィールド{name}が不正です")))
}

fn asset_field(params: &Map<String, Value>, name: &str) -> Result<Asset, CryptoError> {
    str_field(params, name)?.parse()
}

fn write_operation(w: &mut ByteWriter, op: &Operation) -> Result<(), CryptoError> {
    let params = op.params().as_object().ok_or_else(|| {
        CryptoError::Serialize(format!("オペレーション{}の引数がオブジェクトではありません", op.name()))
    })?;

    match op.name() {
        "transfer" => {
            w.varint32(2);
            w.string(str_field(params, "from")?)?;
            w.string(str_field(params, "to")?)?;
            w.asset(&asset_field(params, "amount")?);
            w.string(str_field(params, "memo")?)?;
        }
        "transfer_to_vesting" => {
            w.varint32(3);
            w.string(str_field(params, "from")?)?;
            w.string(str_field(params, "to")?)?;
            w.asset(&asset_field(params, "amount")?);
        }
        "transfer_to_savings" => {
            w.varint32(32);
            w.string(str_field(params, "from")?)?;
            w.string(str_field(params, "to")?)?;
            w.asset(&asset_field(params, "amount")?);
            w.string(str_field(params, "memo")?)?;
        }
        "transfer_from_savings" => {
            w.varint32(33);
            w.string(str_field(params, "from")?)?;
            w.u32(u32_field(params, "request_id")?);
            w.string(str_field(params, "to")?)?;
            w.asset(&asset_field(params, "amount")?);
            w.string(str_field(params, "memo")?)?;
        }
        other => return Err(CryptoError::UnsupportedOperation(other.to_string())),
    }
    Ok(())
}

impl Transaction {
    /// チェーンのバイナリ形式にシリアライズする（`signatures`は含まない）。
    pub fn to_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        let expiration = chrono::NaiveDateTime::parse_from_str(&self.expiration, EXPIRATION_FORMAT)
            .map_err(|e| CryptoError::Serialize(format!("expirationのパースに失敗: {e}")))?;
        let expiration = u32::try_from(expiration.and_utc().timestamp())
            .map_err(|_| CryptoError::Serialize("expirationが範囲外です".to_string()))?;

        let op_count = u32::try_from(self.operations.len())
            .map_err(|_| CryptoError::Serialize("オペレーションが多すぎます".to_string()))?;

        let mut w = ByteWriter::default();
        w.u16(self.ref_block_num);
        w.u32(self.ref_block_prefix);
        w.u32(expiration);
        w.varint32(op_count);
        for op in &self.operations {
            write_operation(&mut w, op)?;
        }
        if !self.extensions.is_empty() {
            return Err(CryptoError::Serialize(
                "extensionsには対応していません".to_string(),
            ));
        }
        w.varint32(0);
        Ok(w.into_bytes())
    }
}

/// 16進文字列のchain_idをパースする。
pub fn parse_chain_id(chain_id: &str) -> Result<[u8; 32], CryptoError> {
    let bytes = hex::decode(chain_id).map_err(|e| CryptoError::ChainId(e.to_string()))?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| CryptoError::ChainId(format!("32バイトである必要があります: {} bytes", b.len())))
}

/// 署名対象ダイジェスト: `SHA-256(chain_id ‖ serialize(tx))`
pub fn transaction_digest(tx: &Transaction, chain_id: &[u8; 32]) -> Result<[u8; 32], CryptoError> {
    let mut data = chain_id.to_vec();
    data.extend_from_slice(&tx.to_bytes()?);
    Ok(sha256(&data))
}

/// 各秘密鍵で署名し、`signatures`に追記したトランザクションを返す。
/// 既存の署名は保持される。
pub fn sign_transaction(
    tx: &Transaction,
    keys: &[PrivateKey],
    chain_id: &[u8; 32],
) -> Result<Transaction, CryptoError> {
    let digest = transaction_digest(tx, chain_id)?;
    let mut signed = tx.clone();
    for key in keys {
        signed.signatures.push(key.sign(&digest)?.to_string());
    }
    Ok(signed)
}
