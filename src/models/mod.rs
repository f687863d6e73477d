//! # 데이터 모델 모듈
//!
//! 블로그 저장소에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 엔티티의 데이터 타입을 담당합니다:
//! - `page`: 고정 페이지(Page)
//! - `post`: 글(Post)
//! - `tag`: 태그(Tag)와 글-태그 연결(PostTag)
//! - `user`: 사용자(User)
//! - `comment`: 댓글(Comment)
//! - `archive`: 월별 아카이브 조회 결과(Archive)
//!
//! `New*` 구조체는 삽입(INSERT) 시 호출자가 채우는 값이고,
//! 엔티티 구조체는 DB가 부여한 id와 타임스탬프까지 포함한 한 행입니다.

pub mod archive;
pub mod comment;
pub mod page;
pub mod post;
pub mod tag;
pub mod user;

pub use archive::*;
pub use comment::*;
pub use page::*;
pub use post::*;
pub use tag::*;
pub use user::*;
