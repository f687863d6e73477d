//! # 글(Post) 모델 정의
//!
//! 글은 페이지와 같은 컬럼을 가지지만, 태그와 댓글이 연결된다는 점이 다릅니다.
//! 태그와 댓글은 `posts` 테이블에 저장되지 않고 별도 쿼리로 채웁니다
//! (`Repository::load_post_relations`).

use super::{Comment, Tag};
use crate::services::markdown;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 글 엔티티: `posts` 테이블 한 행에 대응합니다.
///
/// `#[sqlx(skip)]`: 이 필드는 SQL 결과에서 읽지 않고 `Default`(빈 Vec)로 채웁니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    /// 마크다운 본문
    pub body: String,
    pub view_count: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// 글에 연결된 태그 (로딩 전에는 비어 있음)
    #[sqlx(skip)]
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// 글에 달린 댓글 (로딩 전에는 비어 있음)
    #[sqlx(skip)]
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    /// 목록 화면용 요약문을 만듭니다.
    ///
    /// 본문을 HTML로 렌더링하고 모든 태그를 제거한 뒤 300자로 자르고 "..."를 붙입니다.
    pub fn excerpt(&self) -> String {
        markdown::excerpt(&self.body)
    }
}

/// 새 글 삽입 값
///
/// `created_at`이 None이면 삽입 시각을 사용합니다.
/// 다른 블로그에서 글을 옮겨올 때처럼 작성일을 지정해야 할 때만 Some을 넣습니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub is_published: bool,
    pub created_at: Option<DateTime<Utc>>,
}
