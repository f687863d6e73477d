//! # 댓글 데이터베이스 쿼리 모듈

use super::Repository;
use crate::error::{parse_id, AppError};
use crate::models::*;
use chrono::Utc;

impl Repository {
    /// 새 댓글을 저장하고 반환합니다.
    pub async fn insert_comment(&self, new: &NewComment) -> Result<Comment, AppError> {
        let now = Utc::now();

        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (user_id, post_id, content, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, user_id, post_id, content, created_at, updated_at
            "#,
        )
        .bind(new.user_id)
        .bind(new.post_id)
        .bind(&new.content)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(comment_id = comment.id, post_id = comment.post_id, "Comment inserted");
        Ok(comment)
    }

    /// 댓글을 삭제합니다. 없는 댓글이면 `false`입니다.
    pub async fn delete_comment(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 글에 달린 댓글을 작성순(오래된 것 먼저)으로 조회합니다.
    pub async fn list_comments_by_post_id(&self, post_id: &str) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, user_id, post_id, content, created_at, updated_at
            FROM comments
            WHERE post_id = ?
            ORDER BY created_at, id
            "#,
        )
        .bind(parse_id(post_id)?)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    /// id로 댓글을 조회합니다.
    pub async fn get_comment(&self, id: i64) -> Result<Comment, AppError> {
        let comment = sqlx::query_as::<_, Comment>(
            "SELECT id, user_id, post_id, content, created_at, updated_at FROM comments WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    /// 전체 댓글 수
    pub async fn count_comments(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
