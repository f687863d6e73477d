//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 블로그 엔티티를 데이터베이스에 저장하고 조회하는 `Repository`를 정의합니다.
//! 상위 계층(웹 핸들러 등)은 `Repository` 하나를 만들어 공유하고,
//! 엔티티별 메서드를 호출합니다.
//!
//! 각 하위 모듈은 `impl Repository` 블록으로 한 엔티티의 쿼리를 담당합니다:
//! - `pages`: 페이지 CRUD
//! - `posts`: 글 CRUD, 태그 필터 목록, 연관 데이터 로딩
//! - `archives`: 월별 아카이브 집계
//! - `tags`: 태그와 글-태그 연결
//! - `users`: 사용자 CRUD와 GitHub 로그인 find-or-create
//! - `comments`: 댓글 CRUD
//!
//! ## 에러 처리
//! 모든 메서드는 드라이버 에러를 `AppError::Database`에 담아 그대로 반환합니다.
//! 재시도나 복구는 하지 않습니다.

pub mod archives;
pub mod comments;
pub mod pages;
pub mod posts;
pub mod tags;
pub mod users;

use crate::config::Config;
use crate::error::AppError;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqlitePoolOptions, SqliteQueryResult};
use sqlx::SqlitePool;

/// `./migrations` 폴더의 SQL 파일들을 컴파일 시점에 바이너리에 포함시킨 마이그레이터
///
/// 애플리케이션 시작 시 자동으로 실행하지 않습니다.
/// `wblog-migrate` 도구가 애플리케이션보다 먼저 실행합니다.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// 블로그 저장소
///
/// 연결 풀을 주입받아 보관합니다. `SqlitePool`은 내부적으로 Arc이므로
/// `Repository`를 clone해도 같은 풀을 공유합니다.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// 이미 만들어진 연결 풀로 저장소를 생성합니다.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 설정의 연결 문자열로 풀을 만들고 저장소를 생성합니다.
    ///
    /// 스키마 마이그레이션은 실행하지 않습니다.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;

        tracing::debug!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        Ok(Self::new(pool))
    }

    /// 내부 연결 풀의 참조
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// 아직 적용되지 않은 마이그레이션을 순서대로 실행합니다.
    pub async fn migrate(&self) -> Result<(), AppError> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }
}

/// UPDATE 결과가 0행이면 대상 행이 없다는 뜻이므로 `RowNotFound`로 바꿉니다.
pub(crate) fn expect_affected(result: SqliteQueryResult) -> Result<(), AppError> {
    if result.rows_affected() == 0 {
        return Err(sqlx::Error::RowNotFound.into());
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Repository;
    use sqlx::sqlite::SqlitePoolOptions;

    /// 마이그레이션이 끝난 인메모리 저장소
    ///
    /// 인메모리 DB는 연결마다 별개이므로 연결을 하나로 고정하고 만료시키지 않습니다.
    pub async fn repo() -> Repository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        let repo = Repository::new(pool);
        repo.migrate().await.expect("migrations");
        repo
    }
}
