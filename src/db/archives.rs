//! # 월별 아카이브 쿼리 모듈
//!
//! 공개 글을 작성 연/월로 묶어 집계하고, 특정 월의 글을 조회합니다.
//!
//! `created_at`은 RFC 3339 텍스트로 저장되어 있으므로 SQLite의
//! `strftime('%Y-%m', created_at)`으로 `"2023-02"` 형태의 월 키를 뽑습니다.
//! 시간대 접미사(+00:00)가 있으면 UTC로 환산한 뒤 월을 계산합니다.

use super::Repository;
use crate::error::AppError;
use crate::models::*;

impl Repository {
    /// 공개 글의 월별 아카이브를 최신 월부터 반환합니다.
    ///
    /// 월 키를 해석할 수 없는 행(`created_at`이 날짜 형식이 아닌 행)은 건너뜁니다.
    pub async fn list_post_archives(&self) -> Result<Vec<Archive>, AppError> {
        let rows: Vec<(Option<String>, i64)> = sqlx::query_as(
            r#"
            SELECT strftime('%Y-%m', created_at) AS month, COUNT(*) AS total
            FROM posts
            WHERE is_published = ?
            GROUP BY month
            ORDER BY month DESC
            "#,
        )
        .bind(true)
        .fetch_all(&self.pool)
        .await?;

        let archives = rows
            .into_iter()
            .filter_map(|(month, total)| {
                let archive = month.as_deref().and_then(|m| Archive::from_month(m, total));
                if archive.is_none() {
                    tracing::warn!(?month, total, "Skipping archive bucket with unparseable month");
                }
                archive
            })
            .collect();

        Ok(archives)
    }

    /// `list_post_archives`의 best-effort 버전
    ///
    /// 에러를 로그에 남기고 빈 목록을 반환합니다.
    /// 사이드바처럼 실패해도 페이지를 그려야 하는 곳에서만 사용합니다.
    pub async fn list_post_archives_or_empty(&self) -> Vec<Archive> {
        self.list_post_archives().await.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Failed to list post archives");
            Vec::new()
        })
    }

    /// 특정 연/월에 작성된 공개 글을 최신순으로 반환합니다.
    ///
    /// `month`가 한 자리면 앞에 0을 붙입니다 (`"2"` → `"02"`).
    /// 형식이 맞지 않는 값은 에러가 아니라 빈 결과가 됩니다.
    pub async fn list_posts_by_archive(
        &self,
        year: &str,
        month: &str,
    ) -> Result<Vec<Post>, AppError> {
        let condition = archive_key(year, month);

        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, body, view_count, is_published, created_at, updated_at
            FROM posts
            WHERE strftime('%Y-%m', created_at) = ? AND is_published = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(condition)
        .bind(true)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }
}

/// `("2023", "2")` → `"2023-02"`
fn archive_key(year: &str, month: &str) -> String {
    if month.len() == 1 {
        format!("{year}-0{month}")
    } else {
        format!("{year}-{month}")
    }
}
