//! # サービスエラー型
//!
//! 全エンドポイントで共通のエラー型。
//! クライアントには原因を区別しない固定メッセージのみを返し、詳細はログに出力する。

use axum::http::StatusCode;

/// サービスエラー型。
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// 不正な入力（空の鍵リスト、デコード失敗、不正な鍵、ホットウォレット鍵以外での内部振替）
    #[error("Invalid private key(s)")]
    InvalidInput(String),
    /// 署名器が実トランザクションの署名を拒否した
    #[error("Transaction signing failed")]
    UpstreamSigning(String),
    /// 内部エラー（シリアライズ失敗、時刻取得失敗）
    #[error("内部エラー")]
    Internal(String),
}

impl ServiceError {
    /// ログ出力用の詳細
    pub fn detail(&self) -> &str {
        match self {
            ServiceError::InvalidInput(detail)
            | ServiceError::UpstreamSigning(detail)
            | ServiceError::Internal(detail) => detail,
        }
    }
}

impl axum::response::IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let reason = self.detail();
        let status = match &self {
            ServiceError::InvalidInput(_) => {
                tracing::debug!(reason, "リクエストを拒否しました");
                StatusCode::BAD_REQUEST
            }
            ServiceError::UpstreamSigning(_) => {
                tracing::warn!(reason, "トランザクションの署名に失敗しました");
                StatusCode::BAD_REQUEST
            }
            ServiceError::Internal(_) => {
                tracing::error!(reason, "内部エラー");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_invalid_input_is_generic() {
        let err = ServiceError::InvalidInput("秘密鍵のパースに失敗: index 1".to_string());
        assert_eq!(err.to_string(), "Invalid private key(s)");
        assert_eq!(err.detail(), "秘密鍵のパースに失敗: index 1");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_detail_is_masked() {
        let err = ServiceError::UpstreamSigning("未対応のオペレーションです: vote".to_string());
        assert_eq!(err.to_string(), "Transaction signing failed");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_status() {
        let err = ServiceError::Internal("clock".to_string());
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
