//! # 스키마 마이그레이션 도구
//!
//! 애플리케이션을 시작하기 전에 실행하여 데이터베이스 스키마를 최신으로 맞춥니다.
//!
//! ```text
//! DATABASE_URL=sqlite:data/wblog.db?mode=rwc cargo run --bin wblog-migrate
//! ```
//!
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 연결 풀 생성
//! 4. 아직 적용되지 않은 마이그레이션 실행
//! 5. 테이블별 행 수 출력

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wblog::{Config, Repository};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 없어도 에러 없이 넘어갑니다
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wblog=debug,wblog_migrate=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let repo = Repository::connect(&config).await?;

    tracing::info!("Running database migrations...");
    repo.migrate().await?;

    let pages = repo.count_pages().await?;
    let posts = repo.count_posts().await?;
    let tags = repo.count_tags().await?;
    let comments = repo.count_comments().await?;
    let users = repo.count_users().await?;
    tracing::info!(pages, posts, tags, comments, users, "Schema is up to date");

    repo.pool().close().await;
    Ok(())
}
