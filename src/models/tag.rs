//! # 태그 모델 정의
//!
//! - `Tag`: `tags` 테이블의 한 행. 이름은 유일합니다.
//! - `PostTag`: 글과 태그의 다대다(N:M) 연결 행. `(post_id, tag_id)` 쌍이 유일합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 태그 엔티티
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    /// 태그 이름 (예: "rust", "일기")
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// 이 태그가 붙은 공개 글의 수
    ///
    /// 저장되는 값이 아니라 `list_tags` 집계 쿼리에서만 계산됩니다.
    /// `#[sqlx(default)]`: 결과에 `total` 컬럼이 없으면 0으로 둡니다.
    #[sqlx(default)]
    #[serde(default)]
    pub total: i64,
}

/// 글-태그 연결 엔티티: `post_tags` 테이블 한 행
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostTag {
    pub id: i64,
    pub post_id: i64,
    pub tag_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
