//! # 署名ゲートウェイ
//!
//! ## 処理フロー
//! 1. 秘密鍵リストが空でないことを確認
//! 2. `transactionContext`をBase64 → JSONでデコード
//! 3. 全ての秘密鍵をパース（一つでも失敗すればリクエスト全体を拒否）
//! 4. `tx`の有無で実トランザクション / シミュレーションを分類
//! 5. シミュレーション: 全ての鍵がホットウォレット公開鍵に対応することを確認し、
//!    タイムスタンプをtxIdとして返す（署名は行わない）
//! 6. 実トランザクション: 鍵の所有者は確認せず、署名器に委譲する
//!
//! いずれの失敗もクライアントには同じメッセージで返す。

mod gateway;


pub use gateway::{SigningGateway, TransactionKind};
