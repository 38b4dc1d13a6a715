//! ⚙️ 실행 설정: `.env` 파일 → 환경변수 → 기본값 순으로 결정

const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE_NAME: &str = "hashing";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_name: String,
    pub listen_addr: String,
    /// `USER_STORE=memory` 이면 DB 없이 메모리 저장소로 실행
    pub in_memory: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok(); // .env 파일 로드

        Self {
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            database_name: env_or("DATABASE_NAME", DEFAULT_DATABASE_NAME),
            listen_addr: env_or("LISTEN_ADDR", DEFAULT_LISTEN_ADDR),
            in_memory: env_or("USER_STORE", "mongodb").eq_ignore_ascii_case("memory"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
