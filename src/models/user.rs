//! # 사용자 모델 정의
//!
//! 사용자는 이메일 또는 전화번호로 로그인하거나, GitHub 계정으로 로그인합니다.
//! 두 방식 모두 같은 `users` 행에 묶입니다.
//! email, telephone, github_login_id는 값이 있을 때만 유일해야 하므로 Option입니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 사용자 엔티티: `users` 테이블 한 행
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: Option<String>,
    pub telephone: Option<String>,
    /// 비밀번호 (해싱은 인증 계층의 책임). 응답 JSON에는 포함하지 않습니다.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    /// 이메일 인증 상태 ("0": 미인증)
    pub verify_state: String,
    #[serde(skip_serializing)]
    pub secret_key: Option<String>,
    /// 인증 링크 등의 만료 시각
    pub out_time: Option<DateTime<Utc>>,
    pub github_login_id: Option<String>,
    pub is_admin: bool,
    pub avatar_url: String,
    pub nick_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 새 사용자 삽입 값
///
/// `verify_state`가 비어 있으면 "0"으로 저장합니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub password: Option<String>,
    pub verify_state: String,
    pub secret_key: Option<String>,
    pub out_time: Option<DateTime<Utc>>,
    pub github_login_id: Option<String>,
    pub is_admin: bool,
    pub avatar_url: String,
    pub nick_name: String,
}
