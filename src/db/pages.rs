//! # 페이지 데이터베이스 쿼리 모듈
//!
//! `pages` 테이블에 대한 CRUD 쿼리입니다.
//! 페이지는 "소개" 같은 고정 문서로, 태그나 댓글이 없습니다.

use super::{expect_affected, Repository};
use crate::error::{parse_id, AppError};
use crate::models::*;
use chrono::Utc;

impl Repository {
    /// 새 페이지를 저장하고, id와 타임스탬프가 채워진 페이지를 반환합니다.
    pub async fn insert_page(&self, new: &NewPage) -> Result<Page, AppError> {
        let now = Utc::now();

        // RETURNING: INSERT한 행을 같은 문장에서 바로 돌려받습니다 (SQLite 3.35+)
        let page = sqlx::query_as::<_, Page>(
            r#"
            INSERT INTO pages (title, body, is_published, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, title, body, view_count, is_published, created_at, updated_at
            "#,
        )
        .bind(&new.title)
        .bind(&new.body)
        .bind(new.is_published)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(page_id = page.id, "Page inserted");
        Ok(page)
    }

    /// 페이지의 제목, 본문, 공개 여부만 수정합니다.
    ///
    /// 조회수 등 나머지 컬럼은 건드리지 않습니다.
    /// 해당 id의 행이 없으면 `RowNotFound` 에러입니다.
    pub async fn update_page(&self, page: &Page) -> Result<Page, AppError> {
        let result = sqlx::query(
            "UPDATE pages SET title = ?, body = ?, is_published = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&page.title)
        .bind(&page.body)
        .bind(page.is_published)
        .bind(Utc::now())
        .bind(page.id)
        .execute(&self.pool)
        .await?;
        expect_affected(result)?;

        self.find_page(page.id).await
    }

    /// 페이지를 삭제합니다.
    ///
    /// ## 반환값
    /// - `true`: 삭제됨
    /// - `false`: 이미 없는 행 (에러가 아님)
    pub async fn delete_page(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 문자열 id로 페이지를 조회합니다.
    ///
    /// id가 숫자가 아니면 `InvalidId`, 행이 없으면 `RowNotFound`입니다.
    pub async fn get_page_by_id(&self, id: &str) -> Result<Page, AppError> {
        self.find_page(parse_id(id)?).await
    }

    /// 공개된 페이지 목록
    pub async fn list_published_pages(&self) -> Result<Vec<Page>, AppError> {
        self.list_pages(true).await
    }

    /// 페이지 목록을 id 순으로 조회합니다.
    ///
    /// `published`가 true면 공개 페이지만, false면 초안을 포함한 전체를 반환합니다.
    pub async fn list_pages(&self, published: bool) -> Result<Vec<Page>, AppError> {
        let pages = if published {
            sqlx::query_as::<_, Page>(
                r#"
                SELECT id, title, body, view_count, is_published, created_at, updated_at
                FROM pages
                WHERE is_published = ?
                ORDER BY id
                "#,
            )
            .bind(true)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Page>(
                r#"
                SELECT id, title, body, view_count, is_published, created_at, updated_at
                FROM pages
                ORDER BY id
                "#,
            )
            .fetch_all(&self.pool)
            .await?
        };

        Ok(pages)
    }

    /// 전체 페이지 수
    pub async fn count_pages(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pages")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// 페이지 조회수를 1 올립니다.
    pub async fn increment_page_view(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE pages SET view_count = view_count + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_affected(result)
    }

    async fn find_page(&self, id: i64) -> Result<Page, AppError> {
        let page = sqlx::query_as::<_, Page>(
            r#"
            SELECT id, title, body, view_count, is_published, created_at, updated_at
            FROM pages
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(page)
    }
}
