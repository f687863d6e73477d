//! # 에러 처리 모듈
//!
//! 저장소 계층에서 발생할 수 있는 에러 타입을 정의합니다.
//!
//! 데이터베이스 드라이버(sqlx)가 보고한 에러는 분류하거나 메시지를 바꾸지 않고
//! `AppError::Database`에 그대로 담아 호출자에게 전달합니다.
//! 조회 결과 없음, 유니크 제약 위반, I/O 실패 모두 원래의 `sqlx::Error`로 남습니다.

use thiserror::Error;

/// 저장소 계층의 모든 에러 종류
#[derive(Debug, Error)]
pub enum AppError {
    /// 데이터베이스 오류
    /// #[from]: sqlx 함수에서 `?`를 쓰면 자동으로 이 variant로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 마이그레이션 실행 오류
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// 외부 표현(문자열)의 ID를 정수로 해석할 수 없음
    #[error("Invalid id: {0:?}")]
    InvalidId(String),
}

impl AppError {
    /// 조회 대상 행이 없어서 발생한 에러인지 확인합니다.
    ///
    /// `fetch_one`이 0행을 만나면 sqlx는 `RowNotFound`를 돌려줍니다.
    /// 상위 계층은 이 메서드로 404 같은 응답을 고를 수 있습니다.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Database(sqlx::Error::RowNotFound))
    }
}

/// 외부 표현(URL 경로 등)의 ID 문자열을 정수 ID로 변환합니다.
///
/// 부호 없는 정수만 허용합니다. `"-1"`, `" 3"`, `"abc"`는 모두 `InvalidId`입니다.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<u64>()
        .ok()
        .and_then(|id| i64::try_from(id).ok())
        .ok_or_else(|| AppError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_unsigned_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("0").unwrap(), 0);
    }

    #[test]
    fn parse_id_rejects_malformed_input() {
        for raw in ["", "-1", "abc", " 3", "1.5", "18446744073709551615"] {
            let err = parse_id(raw).unwrap_err();
            assert!(matches!(err, AppError::InvalidId(ref s) if s == raw), "{raw}");
        }
    }

    #[test]
    fn row_not_found_is_reported_as_not_found() {
        assert!(AppError::Database(sqlx::Error::RowNotFound).is_not_found());
        assert!(!AppError::InvalidId("x".into()).is_not_found());
    }
}
