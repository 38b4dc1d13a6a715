//! 모듈 만들기 실습: 다른 파일(바이너리)에서 `use my_module::...` 로 가져다 쓰는 함수 모음.
//!
//! - [`generate_sentence`]: 단어 목록에서 무작위로 골라 문장을 만듭니다.
//! - [`uptime`]: 운영체제가 켜진 뒤 흐른 시간을 돌려줍니다.

use std::time::Duration;

use rand::{seq::SliceRandom, Rng};
use thiserror::Error;

/// 문장 틀. `{adjective}`, `{noun}` 자리가 순서대로 채워짐
pub const SENTENCE_TEMPLATE: &str =
    "The {adjective} brown {noun} jumped over the {adjective} {noun}";

pub const ADJECTIVES: &[&str] = &[
    "quick", "lazy", "sleepy", "noisy", "hungry", "clever", "fuzzy", "grumpy", "shiny",
];

pub const NOUNS: &[&str] = &[
    "fox", "dog", "cat", "rabbit", "turtle", "owl", "badger", "hedgehog", "otter",
];

/// 스레드 로컬 난수 생성기로 문장을 하나 만든다.
pub fn generate_sentence() -> String {
    generate_sentence_with(&mut rand::thread_rng())
}

/// 난수 생성기를 직접 넘겨 문장을 만든다. 시드를 고정하면 결과도 고정됨
pub fn generate_sentence_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut sentence = String::with_capacity(SENTENCE_TEMPLATE.len() + 32);
    let mut rest = SENTENCE_TEMPLATE;

    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        sentence.push_str(&rest[..start]);

        let words = match &rest[start + 1..start + len] {
            "adjective" => ADJECTIVES,
            "noun" => NOUNS,
            _ => &[][..],
        };
        if let Some(word) = words.choose(rng) {
            sentence.push_str(word);
        }

        rest = &rest[start + len + 1..];
    }
    sentence.push_str(rest);

    sentence
}

#[derive(Debug, Error)]
pub enum UptimeError {
    #[error("failed to read /proc/uptime: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected /proc/uptime contents: {0:?}")]
    Parse(String),

    #[error("system uptime is only available on linux, not {0}")]
    Unsupported(&'static str),
}

/// 운영체제 가동 시간.
///
/// Linux 의 `/proc/uptime` 을 읽습니다. 다른 OS 에서는 항상
/// [`UptimeError::Unsupported`] 를 돌려줍니다.
#[cfg(target_os = "linux")]
pub fn uptime() -> Result<Duration, UptimeError> {
    let contents = std::fs::read_to_string("/proc/uptime")?;
    parse_uptime(&contents)
}

/// 운영체제 가동 시간. `/proc/uptime` 이 없는 OS 라서 지원하지 않음
#[cfg(not(target_os = "linux"))]
pub fn uptime() -> Result<Duration, UptimeError> {
    Err(UptimeError::Unsupported(std::env::consts::OS))
}

/// `/proc/uptime` 형식("가동초 유휴초")에서 첫 번째 값을 읽는다.
pub fn parse_uptime(contents: &str) -> Result<Duration, UptimeError> {
    contents
        .split_whitespace()
        .next()
        .and_then(|secs| secs.parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(Duration::from_secs_f64)
        .ok_or_else(|| UptimeError::Parse(contents.trim().to_owned()))
}
