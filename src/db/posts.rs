//! # 글 데이터베이스 쿼리 모듈
//!
//! `posts` 테이블에 대한 CRUD 쿼리와 태그 필터 목록 조회를 담당합니다.
//!
//! 글 목록은 항상 작성일 내림차순(최신 글이 먼저)입니다.
//! 작성일이 같으면 id가 큰 글이 먼저 옵니다.

use super::{expect_affected, Repository};
use crate::error::{parse_id, AppError};
use crate::models::*;
use chrono::Utc;

impl Repository {
    /// 새 글을 저장하고, id와 타임스탬프가 채워진 글을 반환합니다.
    ///
    /// `new.created_at`이 있으면 그 시각을 작성일로 씁니다.
    pub async fn insert_post(&self, new: &NewPost) -> Result<Post, AppError> {
        let now = Utc::now();
        let created_at = new.created_at.unwrap_or(now);

        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, body, is_published, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, title, body, view_count, is_published, created_at, updated_at
            "#,
        )
        .bind(&new.title)
        .bind(&new.body)
        .bind(new.is_published)
        .bind(created_at)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(post_id = post.id, published = post.is_published, "Post inserted");
        Ok(post)
    }

    /// 글의 제목, 본문, 공개 여부만 수정합니다.
    ///
    /// 조회수(`view_count`)와 작성일은 바뀌지 않습니다.
    /// 반환되는 글의 tags/comments는 비어 있습니다.
    pub async fn update_post(&self, post: &Post) -> Result<Post, AppError> {
        let result = sqlx::query(
            "UPDATE posts SET title = ?, body = ?, is_published = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.is_published)
        .bind(Utc::now())
        .bind(post.id)
        .execute(&self.pool)
        .await?;
        expect_affected(result)?;

        self.find_post(post.id).await
    }

    /// 글을 삭제합니다. 없는 글이면 `false`를 반환합니다.
    ///
    /// 연결된 `post_tags`와 `comments`는 지우지 않습니다.
    /// 태그 연결 정리는 `delete_post_tags_by_post_id`로 따로 합니다.
    pub async fn delete_post(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 문자열 id로 글을 조회합니다.
    pub async fn get_post_by_id(&self, id: &str) -> Result<Post, AppError> {
        self.find_post(parse_id(id)?).await
    }

    /// 공개된 글 목록. `tag`가 있으면 그 태그가 붙은 글만 반환합니다.
    pub async fn list_published_posts(&self, tag: Option<&str>) -> Result<Vec<Post>, AppError> {
        self.list_posts(tag, true).await
    }

    /// 글 목록을 최신순으로 조회합니다.
    ///
    /// ## 매개변수
    /// - `tag`: 태그 id 문자열. None이거나 빈 문자열이면 태그로 거르지 않습니다.
    ///   값이 있으면 `post_tags`를 JOIN하여 그 태그가 붙은 글만 남깁니다.
    /// - `published`: true면 공개 글만
    ///
    /// ```sql
    /// posts ←── post_tags ──→ tags
    /// ```
    pub async fn list_posts(
        &self,
        tag: Option<&str>,
        published: bool,
    ) -> Result<Vec<Post>, AppError> {
        let tag_id = match tag.filter(|t| !t.is_empty()) {
            Some(raw) => Some(parse_id(raw)?),
            None => None,
        };

        // (태그 필터 여부, 공개 필터 여부) 조합마다 쿼리가 다릅니다
        let posts = match (tag_id, published) {
            (Some(tag_id), true) => {
                sqlx::query_as::<_, Post>(
                    r#"
                    SELECT p.id, p.title, p.body, p.view_count, p.is_published,
                           p.created_at, p.updated_at
                    FROM posts p
                    INNER JOIN post_tags pt ON p.id = pt.post_id
                    WHERE pt.tag_id = ? AND p.is_published = ?
                    ORDER BY p.created_at DESC, p.id DESC
                    "#,
                )
                .bind(tag_id)
                .bind(true)
                .fetch_all(&self.pool)
                .await?
            }
            (Some(tag_id), false) => {
                sqlx::query_as::<_, Post>(
                    r#"
                    SELECT p.id, p.title, p.body, p.view_count, p.is_published,
                           p.created_at, p.updated_at
                    FROM posts p
                    INNER JOIN post_tags pt ON p.id = pt.post_id
                    WHERE pt.tag_id = ?
                    ORDER BY p.created_at DESC, p.id DESC
                    "#,
                )
                .bind(tag_id)
                .fetch_all(&self.pool)
                .await?
            }
            (None, true) => {
                sqlx::query_as::<_, Post>(
                    r#"
                    SELECT id, title, body, view_count, is_published, created_at, updated_at
                    FROM posts
                    WHERE is_published = ?
                    ORDER BY created_at DESC, id DESC
                    "#,
                )
                .bind(true)
                .fetch_all(&self.pool)
                .await?
            }
            (None, false) => {
                sqlx::query_as::<_, Post>(
                    r#"
                    SELECT id, title, body, view_count, is_published, created_at, updated_at
                    FROM posts
                    ORDER BY created_at DESC, id DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(posts)
    }

    /// 전체 글 수 (초안 포함)
    pub async fn count_posts(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// 글 조회수를 1 올립니다.
    pub async fn increment_post_view(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE posts SET view_count = view_count + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_affected(result)
    }

    /// 글에 연결된 태그와 댓글을 채웁니다.
    pub async fn load_post_relations(&self, post: &mut Post) -> Result<(), AppError> {
        let id = post.id.to_string();
        post.tags = self.list_tags_by_post_id(&id).await?;
        post.comments = self.list_comments_by_post_id(&id).await?;
        Ok(())
    }

    pub(crate) async fn find_post(&self, id: i64) -> Result<Post, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, body, view_count, is_published, created_at, updated_at
            FROM posts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }
}
