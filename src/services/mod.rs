//! # 서비스 모듈
//!
//! 데이터베이스와 무관한 순수 변환 로직을 모아둔 모듈입니다.
//! - `markdown`: 글 본문 → 요약문(excerpt) 변환

pub mod markdown;
