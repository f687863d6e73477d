use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 댓글 엔티티: `comments` 테이블 한 행에 대응합니다.
///
/// 작성자(`user_id`)와 대상 글(`post_id`)을 참조합니다.
/// 외래키 제약은 두지 않으므로 참조 무결성은 호출자가 책임집니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 새 댓글 삽입 값
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewComment {
    pub user_id: i64,
    pub post_id: i64,
    pub content: String,
}
