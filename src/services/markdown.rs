//! # 마크다운 요약문(Excerpt) 서비스
//!
//! 글 목록 화면에 보여줄 짧은 평문 요약을 만듭니다.
//!
//! 처리 순서:
//! 1. `render_html()`: 마크다운 본문을 HTML로 렌더링 (pulldown-cmark)
//! 2. `strip_tags()`: 모든 HTML 태그 제거 (ammonia, 허용 태그 없음)
//! 3. `truncate_chars()`: 유니코드 문자 기준 300자로 자르기
//! 4. 끝에 `"..."` 붙이기
//!
//! 모두 부수효과가 없는 순수 함수이며 데이터베이스와 무관합니다.

use pulldown_cmark::{html, Options, Parser};
use std::collections::HashSet;

/// 요약문 최대 문자 수 (말줄임표 제외)
pub const EXCERPT_CHARS: usize = 300;

/// 요약문 끝에 붙는 말줄임표
pub const ELLIPSIS: &str = "...";

/// 마크다운 본문으로 요약문을 만듭니다.
///
/// 본문 길이와 관계없이 항상 `"..."`가 붙습니다.
pub fn excerpt(body: &str) -> String {
    let sanitized = strip_tags(&render_html(body));
    let mut excerpt = truncate_chars(&sanitized, EXCERPT_CHARS).to_string();
    excerpt.push_str(ELLIPSIS);
    excerpt
}

/// 마크다운을 HTML로 렌더링합니다.
///
/// 표, 취소선, 각주 확장을 켭니다. 본문에 섞인 원시 HTML은 그대로 통과합니다
/// (태그 제거는 다음 단계의 몫).
pub fn render_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// HTML에서 모든 태그를 제거하고 텍스트만 남깁니다.
///
/// `Builder::empty()`는 허용 태그 목록이 빈 새니타이저입니다.
/// `<script>`, `<style>`은 태그뿐 아니라 내용까지 버립니다.
/// 남은 텍스트의 `<`, `>`, `&`는 HTML 엔티티로 이스케이프됩니다.
pub fn strip_tags(html: &str) -> String {
    let clean_content: HashSet<&str> = ["script", "style"].into_iter().collect();
    ammonia::Builder::empty()
        .clean_content_tags(clean_content)
        .clean(html)
        .to_string()
}

/// 문자열을 앞에서부터 최대 `max_chars`개의 문자로 자릅니다.
///
/// 바이트가 아니라 `char` 단위로 셉니다 (한글 1자 = 1문자, 3바이트).
/// 바이트 인덱스로 자르면 멀티바이트 문자 중간에서 잘려 패닉이 나므로
/// `char_indices()`로 경계를 찾습니다.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
