use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// 월별 아카이브. 저장되는 엔티티가 아닌 집계 쿼리 결과입니다.
///
/// 공개 글을 작성 연/월로 묶고, 각 묶음의 글 수를 담습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Archive {
    /// 해당 월의 1일
    pub archive_date: NaiveDate,
    pub year: i32,
    pub month: u32,
    /// 해당 월에 작성된 공개 글 수
    pub total: i64,
}

impl Archive {
    /// `"2023-02"` 형태의 월 문자열과 글 수로 아카이브를 만듭니다.
    ///
    /// 형식이 맞지 않으면 None을 반환합니다.
    pub fn from_month(month: &str, total: i64) -> Option<Self> {
        let archive_date = NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()?;
        Some(Self {
            archive_date,
            year: archive_date.year(),
            month: archive_date.month(),
            total,
        })
    }
}
