use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 페이지 엔티티: `pages` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Page {
    pub id: i64,
    pub title: String,
    pub body: String,
    /// 조회수
    pub view_count: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 새 페이지 삽입 값
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPage {
    pub title: String,
    pub body: String,
    pub is_published: bool,
}
