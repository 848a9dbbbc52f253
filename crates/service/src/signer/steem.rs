//! # Steem署名器

use serde::Deserialize;
use steem_sign_crypto::{PrivateKey, PublicKey, Transaction};

use super::{ChainSigner, SignerError};

/// 署名に使用するクライアントオプション。未知のフィールドは無視する。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteemOptions {
    /// 16進エンコードされたchain_id。省略時はメインネット
    pub chain_id: Option<String>,
}

/// WIF秘密鍵とsecp256k1によるSteem署名器。
#[derive(Debug, Clone, Copy, Default)]
pub struct SteemSigner;

impl ChainSigner for SteemSigner {
    type PrivateKey = PrivateKey;
    type PublicKey = PublicKey;
    type Transaction = Transaction;
    type Options = SteemOptions;
    type Signed = Transaction;

    fn parse_private_key(&self, encoded: &str) -> Result<PrivateKey, SignerError> {
        PrivateKey::from_wif(encoded).map_err(|e| SignerError::InvalidKey(e.to_string()))
    }

    fn parse_public_key(&self, encoded: &str) -> Result<PublicKey, SignerError> {
        PublicKey::from_string(encoded).map_err(|e| SignerError::InvalidKey(e.to_string()))
    }

    fn public_key(&self, key: &PrivateKey) -> PublicKey {
        key.public_key()
    }

    fn sign(
        &self,
        tx: &Transaction,
        options: &SteemOptions,
        keys: &[PrivateKey],
    ) -> Result<Transaction, SignerError> {
        let chain_id = match &options.chain_id {
            Some(chain_id) => steem_sign_crypto::parse_chain_id(chain_id)
                .map_err(|e| SignerError::Signing(e.to_string()))?,
            None => steem_sign_crypto::DEFAULT_CHAIN_ID,
        };
        steem_sign_crypto::sign_transaction(tx, keys, &chain_id)
            .map_err(|e| SignerError::Signing(e.to_string()))
    }
}
