//! # 태그 데이터베이스 쿼리 모듈
//!
//! 태그 CRUD 및 글-태그 관계를 관리하는 SQL 쿼리 함수들입니다.
//!
//! ## 테이블 구조
//! - `tags`: 태그 엔티티 (id, name), name은 UNIQUE
//! - `post_tags`: 글과 태그의 다대다(N:M) 관계 테이블, (post_id, tag_id)는 UNIQUE
//!
//! ## find-or-create
//! 태그와 글-태그 연결은 "있으면 기존 행, 없으면 새 행"을 돌려줍니다.
//! `INSERT OR IGNORE`로 유니크 충돌을 조용히 넘긴 뒤, 유니크 키로 다시 조회합니다.
//! 두 요청이 동시에 같은 태그를 만들어도 행은 하나만 생깁니다.

use super::Repository;
use crate::error::{parse_id, AppError};
use crate::models::*;
use chrono::Utc;
use sqlx::SqliteConnection;

impl Repository {
    /// 이름으로 태그를 찾고, 없으면 만들어서 반환합니다.
    pub async fn insert_tag(&self, name: &str) -> Result<Tag, AppError> {
        let mut conn = self.pool.acquire().await?;
        let tag = find_or_create_tag(&mut *conn, name).await?;
        Ok(tag)
    }

    /// 공개 글이 하나 이상 붙은 태그 목록을, 태그별 공개 글 수(`total`)와 함께 반환합니다.
    ///
    /// 공개 글이 없는 태그는 결과에 나오지 않습니다.
    pub async fn list_tags(&self) -> Result<Vec<Tag>, AppError> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name, t.created_at, t.updated_at, COUNT(*) AS total
            FROM tags t
            INNER JOIN post_tags pt ON t.id = pt.tag_id
            INNER JOIN posts p ON pt.post_id = p.id
            WHERE p.is_published = ?
            GROUP BY t.id
            ORDER BY t.id
            "#,
        )
        .bind(true)
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }

    /// `list_tags`의 best-effort 버전
    ///
    /// 에러를 로그에 남기고 빈 목록을 반환합니다.
    pub async fn list_tags_or_empty(&self) -> Vec<Tag> {
        self.list_tags().await.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Failed to list tags");
            Vec::new()
        })
    }

    /// 특정 글에 연결된 모든 태그를 이름순으로 조회합니다.
    ///
    /// ```sql
    /// tags ←── post_tags ──→ posts
    ///  (1)       (N:M)        (1)
    /// ```
    pub async fn list_tags_by_post_id(&self, post_id: &str) -> Result<Vec<Tag>, AppError> {
        let post_id = parse_id(post_id)?;

        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name, t.created_at, t.updated_at
            FROM tags t
            INNER JOIN post_tags pt ON t.id = pt.tag_id
            WHERE pt.post_id = ?
            ORDER BY t.name
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }

    /// 문자열 id로 태그를 조회합니다.
    pub async fn get_tag_by_id(&self, id: &str) -> Result<Tag, AppError> {
        let tag = sqlx::query_as::<_, Tag>(
            "SELECT id, name, created_at, updated_at FROM tags WHERE id = ?",
        )
        .bind(parse_id(id)?)
        .fetch_one(&self.pool)
        .await?;

        Ok(tag)
    }

    /// 태그와 그 태그의 글 연결을 함께 삭제합니다. 없는 태그면 `false`입니다.
    pub async fn delete_tag(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM post_tags WHERE tag_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// 전체 태그 수
    pub async fn count_tags(&self) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tags")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// 글에 태그를 연결합니다. 이미 연결되어 있으면 기존 연결 행을 반환합니다.
    pub async fn insert_post_tag(&self, post_id: i64, tag_id: i64) -> Result<PostTag, AppError> {
        let mut conn = self.pool.acquire().await?;
        let post_tag = find_or_create_post_tag(&mut *conn, post_id, tag_id).await?;
        Ok(post_tag)
    }

    /// 글의 태그 연결을 모두 삭제하고, 삭제된 행 수를 반환합니다.
    pub async fn delete_post_tags_by_post_id(&self, post_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM post_tags WHERE post_id = ?")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// 글의 태그 집합을 통째로 교체합니다.
    ///
    /// 1. 기존 연결을 모두 삭제
    /// 2. 각 이름의 태그를 find-or-create
    /// 3. 글과 연결
    ///
    /// 하나의 트랜잭션에서 실행되므로 중간에 실패하면 기존 연결이 그대로 남습니다.
    /// 앞뒤 공백을 제거한 뒤 빈 이름은 무시합니다.
    pub async fn replace_post_tags<S: AsRef<str>>(
        &self,
        post_id: i64,
        names: &[S],
    ) -> Result<Vec<Tag>, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM post_tags WHERE post_id = ?")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        let mut tags: Vec<Tag> = Vec::with_capacity(names.len());
        for name in names.iter().map(|n| n.as_ref().trim()).filter(|n| !n.is_empty()) {
            let tag = find_or_create_tag(&mut *tx, name).await?;
            find_or_create_post_tag(&mut *tx, post_id, tag.id).await?;
            if !tags.iter().any(|t| t.id == tag.id) {
                tags.push(tag);
            }
        }

        tx.commit().await?;
        tracing::debug!(post_id, tag_count = tags.len(), "Post tags replaced");
        Ok(tags)
    }
}

async fn find_or_create_tag(conn: &mut SqliteConnection, name: &str) -> Result<Tag, AppError> {
    let now = Utc::now();
    sqlx::query("INSERT OR IGNORE INTO tags (name, created_at, updated_at) VALUES (?, ?, ?)")
        .bind(name)
        .bind(now)
        .bind(now)
        .execute(&mut *conn)
        .await?;

    let tag = sqlx::query_as::<_, Tag>(
        "SELECT id, name, created_at, updated_at FROM tags WHERE name = ?",
    )
    .bind(name)
    .fetch_one(&mut *conn)
    .await?;

    Ok(tag)
}

async fn find_or_create_post_tag(
    conn: &mut SqliteConnection,
    post_id: i64,
    tag_id: i64,
) -> Result<PostTag, AppError> {
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO post_tags (post_id, tag_id, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(post_id)
    .bind(tag_id)
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    let post_tag = sqlx::query_as::<_, PostTag>(
        r#"
        SELECT id, post_id, tag_id, created_at, updated_at
        FROM post_tags
        WHERE post_id = ? AND tag_id = ?
        "#,
    )
    .bind(post_id)
    .bind(tag_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(post_tag)
}

#[cfg(test)]
mod tests {
    use crate::db::test_support::repo;
    use crate::db::Repository;
    use crate::models::*;

    async fn post(repo: &Repository, title: &str, published: bool) -> Post {
        repo.insert_post(&NewPost {
            title: title.to_string(),
            is_published: published,
            ..Default::default()
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn insert_tag_is_find_or_create() {
        let repo = repo().await;
        let first = repo.insert_tag("rust").await.unwrap();
        let second = repo.insert_tag("rust").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(repo.count_tags().await.unwrap(), 1);
        assert_eq!(repo.get_tag_by_id(&first.id.to_string()).await.unwrap(), first);
    }

    #[tokio::test]
    async fn insert_post_tag_is_find_or_create() {
        let repo = repo().await;
        let p = post(&repo, "p", true).await;
        let tag = repo.insert_tag("go").await.unwrap();

        let first = repo.insert_post_tag(p.id, tag.id).await.unwrap();
        let second = repo.insert_post_tag(p.id, tag.id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!((first.post_id, first.tag_id), (p.id, tag.id));

        assert_eq!(repo.delete_post_tags_by_post_id(p.id).await.unwrap(), 1);
        assert_eq!(repo.delete_post_tags_by_post_id(p.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_tags_counts_published_posts_only() {
        let repo = repo().await;
        let a = post(&repo, "a", true).await;
        let b = post(&repo, "b", true).await;
        let c = post(&repo, "c", false).await;

        let rust = repo.insert_tag("rust").await.unwrap();
        let draft_only = repo.insert_tag("draft-only").await.unwrap();
        repo.insert_tag("unused").await.unwrap();

        for p in [&a, &b, &c] {
            repo.insert_post_tag(p.id, rust.id).await.unwrap();
        }
        repo.insert_post_tag(c.id, draft_only.id).await.unwrap();

        let tags = repo.list_tags().await.unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "rust");
        assert_eq!(tags[0].total, 2);
        assert_eq!(repo.list_tags_or_empty().await, tags);

        // 집계 쿼리가 아닌 조회에서는 total이 0입니다
        let fetched = repo.get_tag_by_id(&rust.id.to_string()).await.unwrap();
        assert_eq!(fetched.total, 0);
    }

    #[tokio::test]
    async fn list_tags_by_post_id_is_sorted_by_name() {
        let repo = repo().await;
        let p = post(&repo, "p", false).await;
        for name in ["zig", "ada", "nim"] {
            let tag = repo.insert_tag(name).await.unwrap();
            repo.insert_post_tag(p.id, tag.id).await.unwrap();
        }

        let names: Vec<String> = repo
            .list_tags_by_post_id(&p.id.to_string())
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["ada", "nim", "zig"]);
        assert!(repo.list_tags_by_post_id("x").await.is_err());
    }

    #[tokio::test]
    async fn replace_post_tags_swaps_the_tag_set() {
        let repo = repo().await;
        let p = post(&repo, "p", true).await;
        repo.replace_post_tags(p.id, &["old", "shared"]).await.unwrap();

        let tags = repo
            .replace_post_tags(p.id, &["shared", " new ", "", "new"])
            .await
            .unwrap();
        assert_eq!(
            tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
            vec!["shared", "new"]
        );

        let linked: Vec<String> = repo
            .list_tags_by_post_id(&p.id.to_string())
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(linked, vec!["new", "shared"]);
        // 연결이 끊긴 태그 자체는 남아 있습니다
        assert_eq!(repo.count_tags().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn delete_tag_removes_links() {
        let repo = repo().await;
        let p = post(&repo, "p", true).await;
        let tag = repo.insert_tag("temp").await.unwrap();
        repo.insert_post_tag(p.id, tag.id).await.unwrap();

        assert!(repo.delete_tag(tag.id).await.unwrap());
        assert!(!repo.delete_tag(tag.id).await.unwrap());
        assert!(repo.list_tags_by_post_id(&p.id.to_string()).await.unwrap().is_empty());
        assert_eq!(repo.count_tags().await.unwrap(), 0);
    }
}
