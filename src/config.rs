//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 데이터베이스 연결 설정을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 연결 문자열 (예: "sqlite:data/wblog.db?mode=rwc")
//! - `DATABASE_MAX_CONNECTIONS`: 연결 풀의 최대 연결 수 (기본값: 5)

use std::env;

/// 저장소 계층 설정
///
/// 프로세스 시작 시 한 번 읽어 `Repository::connect`에 전달합니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// 데이터베이스 연결 문자열 (드라이버별 형식)
    pub database_url: String,
    /// 연결 풀의 최대 동시 연결 수
    pub max_connections: u32,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`은 필수이며, 없으면 `VarError`가 발생합니다.
    /// `DATABASE_MAX_CONNECTIONS`는 없거나 숫자가 아니면 기본값 5를 씁니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
        })
    }

    /// 연결 문자열만으로 설정을 만듭니다. 나머지는 기본값입니다.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 5,
        }
    }
}
