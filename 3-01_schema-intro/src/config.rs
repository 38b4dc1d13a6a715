//! ⚙️ 환경변수(.env 포함)에서 읽는 실행 설정

const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE_NAME: &str = "hackeryou";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_name: String,
    /// `DOCUMENT_STORE=memory` 이면 MongoDB 없이 메모리에서 실행
    pub in_memory: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok(); // .env 파일 로드 (없으면 무시)

        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned()),
            database_name: std::env::var("DATABASE_NAME")
                .unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_owned()),
            in_memory: std::env::var("DOCUMENT_STORE")
                .is_ok_and(|store| store.eq_ignore_ascii_case("memory")),
        }
    }
}
