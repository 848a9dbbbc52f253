//! 署名ゲートウェイ実装

use std::time::{SystemTime, UNIX_EPOCH};

use steem_sign_types::{
    from_base64, to_base64, SignTransactionRequest, SignTransactionResponse,
    SimulatedTransaction, TransactionContext,
};

use crate::error::ServiceError;
use crate::settings::SettingsError;
use crate::signer::ChainSigner;

/// 署名リクエストの分類。
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionKind<T> {
    /// 外部で構築されたトランザクション。任意の鍵で署名する
    Real(T),
    /// 内部振替（DW → HW等）。オンチェーンのアクションを持たず、
    /// ホットウォレット鍵の所持のみで承認される
    Simulated,
}

impl<T> From<Option<T>> for TransactionKind<T> {
    fn from(tx: Option<T>) -> Self {
        match tx {
            Some(tx) => TransactionKind::Real(tx),
            None => TransactionKind::Simulated,
        }
    }
}

impl<T> TransactionKind<T> {
    fn label(&self) -> &'static str {
        match self {
            TransactionKind::Real(_) => "real",
            TransactionKind::Simulated => "simulated",
        }
    }
}

/// 署名ゲートウェイ。
pub struct SigningGateway<S: ChainSigner> {
    signer: S,
    hot_wallet_public_key: S::PublicKey,
}

impl<S: ChainSigner> SigningGateway<S> {
    /// 署名器とホットウォレット公開鍵（文字列）から構築する。
    /// 公開鍵は署名器自身のパーサーで検証する。
    pub fn new(signer: S, hot_wallet_public_key: &str) -> Result<Self, SettingsError> {
        let hot_wallet_public_key = signer.parse_public_key(hot_wallet_public_key).map_err(|e| {
            SettingsError::Invalid(format!("HotWalletActivePublicKeyが不正です: {e}"))
        })?;
        Ok(Self {
            signer,
            hot_wallet_public_key,
        })
    }

    pub fn hot_wallet_public_key(&self) -> &S::PublicKey {
        &self.hot_wallet_public_key
    }

    /// 署名リクエストを処理する。
    pub fn sign(
        &self,
        request: &SignTransactionRequest,
    ) -> Result<SignTransactionResponse, ServiceError> {
        // Step 1: 空の鍵リストを拒否
        if request.private_keys.is_empty() {
            return Err(ServiceError::InvalidInput(
                "秘密鍵が指定されていません".to_string(),
            ));
        }

        // Step 2: transactionContextのデコード
        let context: TransactionContext<S::Transaction, S::Options> =
            from_base64(&request.transaction_context).map_err(|e| {
                ServiceError::InvalidInput(format!("transactionContextのデコードに失敗: {e}"))
            })?;

        // Step 3: 秘密鍵のパース（分類より前に行う）
        let keys = request
            .private_keys
            .iter()
            .enumerate()
            .map(|(index, key)| {
                self.signer.parse_private_key(key).map_err(|e| {
                    ServiceError::InvalidInput(format!("秘密鍵[{index}]のパースに失敗: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Step 4: 分類
        let TransactionContext { options, tx } = context;
        let kind = TransactionKind::from(tx);
        let label = kind.label();

        let signed_transaction = match kind {
            TransactionKind::Simulated => {
                self.authorize_simulated(&keys)?;
                self.simulate()?
            }
            TransactionKind::Real(tx) => {
                let signed = self
                    .signer
                    .sign(&tx, &options, &keys)
                    .map_err(|e| ServiceError::UpstreamSigning(e.to_string()))?;
                to_base64(&signed).map_err(|e| {
                    ServiceError::Internal(format!("署名済みトランザクションのエンコードに失敗: {e}"))
                })?
            }
        };

        tracing::info!(kind = label, keys = keys.len(), "トランザクションに署名しました");

        Ok(SignTransactionResponse { signed_transaction })
    }

    /// 全ての鍵がホットウォレット公開鍵に対応することを確認する。
    fn authorize_simulated(&self, keys: &[S::PrivateKey]) -> Result<(), ServiceError> {
        for (index, key) in keys.iter().enumerate() {
            let public_key = self.signer.public_key(key);
            if public_key != self.hot_wallet_public_key {
                return Err(ServiceError::InvalidInput(format!(
                    "秘密鍵[{index}]がホットウォレット鍵ではありません: {public_key}"
                )));
            }
        }
        Ok(())
    }

    /// 現在時刻（ミリ秒）をtxIdとするシミュレーション結果を返す。
    /// 同一ミリ秒内の衝突は許容する。
    fn simulate(&self) -> Result<String, ServiceError> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| ServiceError::Internal(format!("時刻取得失敗: {e}")))?
            .as_millis();
        to_base64(&SimulatedTransaction {
            tx_id: millis.to_string(),
        })
        .map_err(|e| ServiceError::Internal(format!("シミュレーション結果のエンコードに失敗: {e}")))
    }
}
