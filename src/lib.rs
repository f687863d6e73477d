//! # wblog 데이터 접근 계층
//!
//! 블로그 애플리케이션의 페이지, 글, 태그, 사용자, 댓글을 SQLite에 저장하고
//! 조회하는 라이브러리입니다. 웹 계층은 이 크레이트의 `Repository`를 통해서만
//! 데이터베이스에 접근합니다.
//!
//! ## 사용 예
//! ```no_run
//! # async fn run() -> Result<(), wblog::AppError> {
//! use wblog::{Config, Repository};
//!
//! let config = Config::new("sqlite:data/wblog.db?mode=rwc");
//! let repo = Repository::connect(&config).await?;
//! let posts = repo.list_published_posts(None).await?;
//! for post in &posts {
//!     println!("{}: {}", post.title, post.excerpt());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! 스키마는 `wblog-migrate` 도구로 미리 만들어 두어야 합니다.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use config::Config;
pub use db::Repository;
pub use error::AppError;
